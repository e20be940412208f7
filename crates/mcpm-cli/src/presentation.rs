//! Terminal formatting helpers shared by handlers.

use chrono::{DateTime, Utc};

use mcpm_core::domain::{Liveness, ObservedStatus, Provenance, ServerRecord};

/// Render a status with its provenance marker.
///
/// Assumed values are flagged so the user can tell a probed result from
/// recorded intent.
#[must_use]
pub fn format_status(status: ObservedStatus) -> String {
    let liveness = match status.liveness {
        Liveness::Online => "online",
        Liveness::Offline => "offline",
    };
    match status.provenance {
        Provenance::Confirmed => liveness.to_string(),
        Provenance::Assumed => format!("{liveness} (assumed)"),
    }
}

/// Render a timestamp for table output.
#[must_use]
pub fn format_timestamp(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(
        || "-".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

/// Print a one-record summary, used before destructive operations.
pub fn print_record_summary(record: &ServerRecord) {
    println!("  id:      {}", record.id);
    println!("  command: {}", record.command_line());
    println!("  status:  {}", format_status(record.status));
}
