//! Stop command handler.

use anyhow::Result;

use mcpm_core::services::StopOutcome;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the stop command.
///
/// Graceful by default (polite signal, one forceful escalation); `force`
/// kills immediately without re-verification. A process that survives
/// both signals is reported as a warning, not a failure - the registry
/// records the stop intent either way.
pub async fn execute(ctx: &CliContext, id: &str, force: bool) -> Result<()> {
    let record = ctx.registry().get(id).await.map_err(CliError::from)?;

    let outcome = ctx
        .lifecycle()
        .stop(&record, force)
        .await
        .map_err(CliError::from)?;

    match outcome {
        StopOutcome::Stopped => println!("✅ Server '{id}' stopped."),
        StopOutcome::Unverified => println!(
            "⚠️ Server '{id}' may not have stopped completely; offline state was recorded."
        ),
    }
    Ok(())
}
