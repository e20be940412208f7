//! Server record domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derive the registry key for a server name.
///
/// Lower-cases the name and replaces every character outside `[a-z0-9]`
/// with `-`. The derivation is a pure function of the name, so deriving
/// twice always yields the same slug.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Whether a server's process was observed as running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    /// A matching process or listening port was found.
    Online,
    /// No evidence of a running process.
    #[default]
    Offline,
}

impl Liveness {
    /// Check whether this is the online state.
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// How a status value was established.
///
/// Lifecycle operations sometimes record user intent rather than verified
/// OS state (e.g. a graceful stop whose escalation could not be confirmed).
/// Keeping the distinction explicit lets consumers tell a probed result
/// apart from an optimistic one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A liveness probe directly verified the state.
    Confirmed,
    /// The state was written as best-effort intent without verification.
    #[default]
    Assumed,
}

/// Liveness paired with its provenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedStatus {
    /// Online or offline.
    pub liveness: Liveness,
    /// Confirmed by a probe, or assumed from intent.
    pub provenance: Provenance,
}

impl ObservedStatus {
    /// A probe-verified status.
    #[must_use]
    pub const fn confirmed(liveness: Liveness) -> Self {
        Self {
            liveness,
            provenance: Provenance::Confirmed,
        }
    }

    /// A best-effort status recorded without verification.
    #[must_use]
    pub const fn assumed(liveness: Liveness) -> Self {
        Self {
            liveness,
            provenance: Provenance::Assumed,
        }
    }
}

/// A named command+arguments definition a user wants manageable as a process.
///
/// The record carries no OS process handle. `status` and
/// `last_connection_time` are advisory: they reflect the last observation or
/// the last intent, and can be stale if the process died outside the tool's
/// control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Stable slug derived from `name`; the registry key.
    pub id: String,

    /// Human-readable label; non-empty.
    pub name: String,

    /// Executable name or path; non-empty.
    pub command: String,

    /// Ordered argument tokens, passed verbatim to the process launcher.
    /// Ordering is significant: it affects both the launched process and
    /// the pattern used for liveness matching.
    pub args: Vec<String>,

    /// Last observed or intended liveness.
    #[serde(default)]
    pub status: ObservedStatus,

    /// Timestamp of the most recent confirmed transition to online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_connection_time: Option<DateTime<Utc>>,
}

impl ServerRecord {
    /// Create a record from a name, deriving the id.
    #[must_use]
    pub fn new(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            command: command.into(),
            args,
            status: ObservedStatus::default(),
            last_connection_time: None,
        }
    }

    /// The final path component of `command`, used as the least-specific
    /// liveness match pattern and as the signal-delivery pattern.
    #[must_use]
    pub fn command_basename(&self) -> &str {
        self.command
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.command)
    }

    /// The full invocation, command followed by all args space-joined.
    #[must_use]
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}
