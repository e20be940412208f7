//! `ProcessControl` implementation over the real OS.

use async_trait::async_trait;

use mcpm_core::ports::{ProcessControl, ProcessError, TerminateSignal};

use crate::{launch, signal};

/// Process control backed by the OS: detached spawns via `tokio::process`
/// and pattern-targeted signals via the process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProcessControl;

impl OsProcessControl {
    /// Create a new process control adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessControl for OsProcessControl {
    async fn spawn_detached(&self, command: &str, args: &[String]) -> Result<(), ProcessError> {
        launch::spawn_detached(command, args)
    }

    async fn signal_matching(
        &self,
        pattern: &str,
        signal: TerminateSignal,
    ) -> Result<usize, ProcessError> {
        let owned = pattern.to_string();
        // Process table scan is blocking work.
        tokio::task::spawn_blocking(move || signal::signal_matching(&owned, signal))
            .await
            .map_err(|e| ProcessError::Signal {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?
    }
}
