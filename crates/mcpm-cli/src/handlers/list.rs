//! List command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_status, format_timestamp};

/// Execute the list command.
///
/// Prints all registered servers with their last recorded status. The
/// status is whatever was persisted last - use `mcpm status` to re-probe.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let records = ctx.registry().list().await.map_err(CliError::from)?;

    if records.is_empty() {
        println!("No servers registered. Use 'mcpm add' to register one.");
        return Ok(());
    }

    println!(
        "{:<24} {:<20} {:<40} {}",
        "ID", "STATUS", "COMMAND", "LAST CONNECTED"
    );
    for record in records {
        println!(
            "{:<24} {:<20} {:<40} {}",
            record.id,
            format_status(record.status),
            record.command_line(),
            format_timestamp(record.last_connection_time),
        );
    }
    Ok(())
}
