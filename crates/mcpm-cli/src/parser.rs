//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the MCP server manager.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands.
#[derive(Parser)]
#[command(name = "mcpm")]
#[command(about = "Manage MCP server definitions and their processes")]
#[command(version)]
pub struct Cli {
    /// Override the registry file for this invocation
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
