//! Add command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the add command.
///
/// Registers a new server definition. The id is derived from the name;
/// a collision with an existing id is rejected without touching the
/// registry.
pub async fn execute(ctx: &CliContext, name: &str, command: &str, args: Vec<String>) -> Result<()> {
    let record = ctx
        .registry()
        .add(name, command, args)
        .await
        .map_err(CliError::from)?;

    println!("✅ Server '{}' added (id: {}).", record.name, record.id);
    Ok(())
}
