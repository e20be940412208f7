//! Detached process launch.

use std::process::Stdio;

use tracing::info;

use mcpm_core::ports::ProcessError;

/// Launch `command` with `args` as a detached background process.
///
/// The child handle is dropped immediately: the process is never waited
/// on and keeps running after this tool exits. Stdio is detached so the
/// child cannot block on our pipes.
pub fn spawn_detached(command: &str, args: &[String]) -> Result<(), ProcessError> {
    let child = tokio::process::Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false)
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            command: command.to_string(),
            source,
        })?;

    info!(command = %command, pid = ?child.id(), "launched detached process");
    drop(child);
    Ok(())
}
