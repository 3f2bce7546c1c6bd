use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Items(args) => commands::items_command(args),
        Commands::Jf2(args) => commands::jf2_command(args),
        Commands::Get(args) => commands::get_command(args),
        Commands::Rel(args) => commands::rel_command(args),
        Commands::Validate(args) => commands::validate_command(args),
    }
}
