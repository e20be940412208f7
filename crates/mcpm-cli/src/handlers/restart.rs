//! Restart command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the restart command.
///
/// Graceful stop, teardown settle, then start. A stop failure aborts the
/// restart without attempting the start.
pub async fn execute(ctx: &CliContext, id: &str) -> Result<()> {
    let record = ctx.registry().get(id).await.map_err(CliError::from)?;

    ctx.lifecycle()
        .restart(&record)
        .await
        .map_err(CliError::from)?;
    println!("✅ Server '{id}' restarted.");
    Ok(())
}
