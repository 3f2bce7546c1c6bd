//! CLI module for the mf2query command-line interface
//!
//! Argument parsing and the command handlers that bridge CLI operations to
//! library functions.

pub mod args;
pub mod commands;
