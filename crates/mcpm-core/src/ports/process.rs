//! Process launch and signal delivery port.

use async_trait::async_trait;
use thiserror::Error;

/// Termination severity, platform-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateSignal {
    /// Polite request to shut down (SIGTERM-equivalent).
    Polite,
    /// Unconditional termination (SIGKILL-equivalent).
    Unconditional,
}

/// Errors from OS-level process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be launched (command not found, exec error).
    #[error("failed to launch '{command}': {source}")]
    Spawn {
        /// The command that failed to launch.
        command: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Signal delivery was refused by the OS.
    #[error("failed to signal processes matching '{pattern}': {reason}")]
    Signal {
        /// The command-line pattern that was targeted.
        pattern: String,
        /// Human-readable OS error.
        reason: String,
    },

    /// The operation is not available on this platform.
    #[error("process control not supported on this platform: {0}")]
    Unsupported(String),
}

/// OS process boundary: detached launch and pattern-targeted signals.
///
/// Launched processes are not supervised; no handle is retained and the
/// caller never waits on exit. Signals target every process whose command
/// line matches a pattern, because no PID is known.
#[async_trait]
pub trait ProcessControl: Send + Sync {
    /// Launch `command` with `args` as a detached background process.
    ///
    /// # Errors
    ///
    /// `Spawn` if the OS refuses the exec.
    async fn spawn_detached(&self, command: &str, args: &[String]) -> Result<(), ProcessError>;

    /// Deliver `signal` to every process whose command line contains
    /// `pattern`, excluding the calling process. Returns the number of
    /// processes signalled; zero matches is not an error.
    ///
    /// # Errors
    ///
    /// - `Signal` if delivery is refused for a matched process
    /// - `Unsupported` on platforms without signal delivery
    async fn signal_matching(
        &self,
        pattern: &str,
        signal: TerminateSignal,
    ) -> Result<usize, ProcessError>;
}
