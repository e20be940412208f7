//! CLI adapter for mcpm.
//!
//! Defines the argument parser, the composition root, and the command
//! handlers. Handlers are thin: they validate CLI-specific input, call
//! the core services, and format terminal output.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
