//! Signal delivery to processes matched by command line.
//!
//! No PID is known for the targets (they were launched detached, possibly
//! by a previous invocation), so delivery scans the process table and
//! signals every process whose command line contains the pattern.

use mcpm_core::ports::{ProcessError, TerminateSignal};

#[cfg(unix)]
use sysinfo::System;
#[cfg(unix)]
use tracing::{debug, warn};

/// Deliver `signal` to every process whose command line contains
/// `pattern`, excluding the calling process. Returns the number of
/// processes signalled; zero matches is not an error.
#[cfg(unix)]
pub fn signal_matching(pattern: &str, signal: TerminateSignal) -> Result<usize, ProcessError> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    // An empty substring matches every command line; refusing it here
    // keeps a degenerate pattern from signalling the whole machine.
    if pattern.is_empty() {
        return Err(ProcessError::Signal {
            pattern: pattern.to_string(),
            reason: "refusing to signal with an empty pattern".to_string(),
        });
    }

    let sig = match signal {
        TerminateSignal::Polite => Signal::SIGTERM,
        TerminateSignal::Unconditional => Signal::SIGKILL,
    };

    let system = System::new_all();
    let own_pid = sysinfo::get_current_pid().ok();

    let mut delivered = 0;
    for (pid, process) in system.processes() {
        if own_pid == Some(*pid) {
            continue;
        }
        let command_line = process
            .cmd()
            .iter()
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        if !command_line.contains(pattern) {
            continue;
        }

        let target = Pid::from_raw(pid.as_u32() as i32);
        match signal::kill(target, sig) {
            Ok(()) => {
                debug!(pid = %pid, signal = ?sig, "signal delivered");
                delivered += 1;
            }
            // Exited between scan and kill.
            Err(Errno::ESRCH) => {}
            Err(e) => {
                warn!(pid = %pid, error = %e, "signal delivery refused");
                return Err(ProcessError::Signal {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(delivered)
}

#[cfg(not(unix))]
pub fn signal_matching(pattern: &str, _signal: TerminateSignal) -> Result<usize, ProcessError> {
    let _ = pattern;
    Err(ProcessError::Unsupported(
        "signal delivery is only implemented on Unix".to_string(),
    ))
}
