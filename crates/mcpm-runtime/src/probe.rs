//! Pattern-based liveness probing.
//!
//! With no process handle retained across invocations, liveness is
//! reconstructed from observable system state each time: first a
//! command-line match against the live process table, then a fallback to
//! listening-port inspection for processes that show up under a wrapper
//! or interpreter name (version managers, `npx`-style launchers).

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use sysinfo::System;
use tracing::debug;

use mcpm_core::domain::{Liveness, ServerRecord};
use mcpm_core::ports::LivenessProber;

use crate::listen::port_has_listener;

/// `--port=8080` or `--port 8080` packed into a single token.
static PORT_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--port[=\s](\d+)").expect("valid port pattern"));

/// Liveness prober backed by the OS process table and listening sockets.
///
/// Infallible: every internal failure collapses to `Offline`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternProber;

impl PatternProber {
    /// Create a new prober.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LivenessProber for PatternProber {
    async fn probe(&self, record: &ServerRecord) -> Liveness {
        let patterns = match_patterns(record);

        // The process table scan is blocking work.
        let table_hit = tokio::task::spawn_blocking(move || process_table_matches(&patterns))
            .await
            .unwrap_or(false);
        if table_hit {
            return Liveness::Online;
        }

        if let Some(port) = extract_port(&record.args) {
            debug!(id = %record.id, port = %port, "no process match, checking port");
            if port_has_listener(port) {
                return Liveness::Online;
            }
        }

        Liveness::Offline
    }
}

/// Build the match patterns for a record, most- to least-specific:
/// the full invocation, the bare command as given, and the command
/// basename. Duplicates collapse (e.g. a bare command with no args or
/// path yields a single pattern). Matching is plain case-sensitive
/// substring containment, so no token in the record can act as a
/// pattern operator. Empty patterns are dropped: a command ending in a
/// path separator has an empty basename, and an empty substring would
/// match every process.
fn match_patterns(record: &ServerRecord) -> Vec<String> {
    let mut patterns = vec![record.command_line(), record.command.clone()];
    patterns.push(record.command_basename().to_string());
    patterns.retain(|p| !p.is_empty());
    patterns.dedup();
    patterns
}

/// Scan the process table for a command line containing any pattern,
/// excluding the scanning process itself.
fn process_table_matches(patterns: &[String]) -> bool {
    let system = System::new_all();
    let own_pid = sysinfo::get_current_pid().ok();

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
        if command_line.is_empty() {
            continue;
        }
        if patterns.iter().any(|p| command_line.contains(p.as_str())) {
            debug!(pid = %pid, "process table match");
            return true;
        }
    }
    false
}

/// Extract the first candidate port from an argument list.
///
/// Tokens are scanned in order; for each token a bare integer wins over a
/// `--port=N` form, which wins over a `-p`/`--port` flag followed by a
/// numeric token. The bare-integer-first precedence can false-positive on
/// non-port numeric arguments (a retry count, say) - kept as observed
/// behavior pending product clarification.
fn extract_port(args: &[String]) -> Option<u16> {
    for (index, token) in args.iter().enumerate() {
        if let Ok(port) = token.parse::<u16>() {
            return Some(port);
        }
        if let Some(captures) = PORT_FLAG.captures(token) {
            if let Ok(port) = captures[1].parse::<u16>() {
                return Some(port);
            }
        }
        if token == "-p" || token == "--port" {
            if let Some(port) = args.get(index + 1).and_then(|next| next.parse::<u16>().ok()) {
                return Some(port);
            }
        }
    }
    None
}
