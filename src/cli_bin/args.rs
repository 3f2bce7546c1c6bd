//! Command-line argument definitions and parsing
//!
//! Thin clap layer over the library; every command reads parsed mf2 JSON
//! files (or stdin when no file is given) and prints JSON or YAML.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "mf2query",
    version,
    about = "Query parsed microformats2 documents and convert items to JF2",
    long_about = "mf2query reads the JSON produced by a microformats2 parser, lets you \
                  select items by type, read property values and HTML, look up rels, \
                  and flattens items into JF2."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the types of top-level items
    Items(ItemsArgs),
    /// Convert items to JF2
    Jf2(Jf2Args),
    /// Read a property of the first matching item
    Get(GetArgs),
    /// Look up relation data
    Rel(RelArgs),
    /// Check that files are well-formed parsed mf2 documents
    Validate(ValidateArgs),
}

/// Common options for input files
#[derive(Args, Debug, Clone)]
pub struct CommonFileOptions {
    /// Parsed mf2 JSON files or directories (stdin when omitted)
    pub files: Vec<PathBuf>,

    /// Follow symbolic links when processing directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum depth for directory recursion
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include hidden files (starting with .)
    #[arg(long)]
    pub include_hidden: bool,

    /// Only pick up files with these extensions inside directories
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Exclude files matching these patterns
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,

    /// Skip structural validation of the input
    #[arg(long)]
    pub no_validate: bool,
}

/// Common options for rendering output
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the output file directly instead of through a temp file
    #[arg(long)]
    pub no_atomic: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl From<OutputFormat> for mf2query::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => mf2query::OutputFormat::Json,
            OutputFormat::Yaml => mf2query::OutputFormat::Yaml,
        }
    }
}

/// Arguments for the items command
#[derive(Args, Debug)]
pub struct ItemsArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Only list items carrying this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_: Option<String>,
}

/// Arguments for the jf2 command
#[derive(Args, Debug)]
pub struct Jf2Args {
    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Only convert items carrying this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_: Option<String>,

    /// Convert every matching item instead of the first
    #[arg(long)]
    pub all: bool,

    /// Leave properties with an empty value list out of the output
    #[arg(long)]
    pub drop_empty: bool,

    /// JSONPath applied to the JF2 output
    #[arg(long, value_name = "JSONPATH")]
    pub query: Option<String>,

    /// Disable automatic root prepending ($ or $.)
    #[arg(long, requires = "query")]
    pub no_auto_root: bool,
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Property name to read
    #[arg(short, long, value_name = "NAME", required = true)]
    pub prop: String,

    /// Read from the first item carrying this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_: Option<String>,

    /// Read the HTML rendering instead of the plain value
    #[arg(long)]
    pub html: bool,

    /// Return every value of the property instead of the first
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the rel command
#[derive(Args, Debug)]
pub struct RelArgs {
    /// Relation name (e.g. "me", "webmention")
    pub name: String,

    #[command(flatten)]
    pub files: CommonFileOptions,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,
}
