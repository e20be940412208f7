//! Start command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the start command.
///
/// Launches the server detached and verifies it came online before
/// reporting success. An unverified start is a failure; the launch is
/// not retried.
pub async fn execute(ctx: &CliContext, id: &str) -> Result<()> {
    let record = ctx.registry().get(id).await.map_err(CliError::from)?;

    ctx.lifecycle()
        .start(&record)
        .await
        .map_err(CliError::from)?;
    println!("✅ Server '{id}' started.");
    Ok(())
}
