//! Command handlers that delegate to the core services.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Access the registry file or the process table directly
//! - Contain lifecycle or validation logic

pub mod add;
pub mod list;
pub mod remove;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;
pub mod update;
