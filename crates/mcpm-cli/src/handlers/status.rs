//! Status command handler.

use anyhow::Result;

use mcpm_core::domain::ServerRecord;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_status, format_timestamp};

/// Execute the status command.
///
/// Re-probes liveness (one server, or all when no id is given) and
/// persists the confirmed observation back to the registry.
pub async fn execute(ctx: &CliContext, id: Option<&str>) -> Result<()> {
    let records: Vec<ServerRecord> = match id {
        Some(id) => vec![ctx.registry().get(id).await.map_err(CliError::from)?],
        None => ctx.registry().list().await.map_err(CliError::from)?,
    };

    if records.is_empty() {
        println!("No servers registered. Use 'mcpm add' to register one.");
        return Ok(());
    }

    println!("{:<24} {:<20} {}", "ID", "STATUS", "LAST CONNECTED");
    for record in records {
        ctx.lifecycle()
            .refresh_status(&record)
            .await
            .map_err(CliError::from)?;
        let refreshed = ctx.registry().get(&record.id).await.map_err(CliError::from)?;
        println!(
            "{:<24} {:<20} {}",
            refreshed.id,
            format_status(refreshed.status),
            format_timestamp(refreshed.last_connection_time),
        );
    }
    Ok(())
}
