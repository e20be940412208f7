//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core services expect from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No filesystem or process-table types in any signature
//! - The registry port is minimal and CRUD-focused
//! - The OS ports are intent-based (spawn, signal, probe), so the
//!   pattern-matching liveness strategy can be swapped for a supervised
//!   backend without touching the lifecycle state machine

pub mod liveness;
pub mod process;
pub mod registry;

pub use liveness::LivenessProber;
pub use process::{ProcessControl, ProcessError, TerminateSignal};
pub use registry::{RegistryError, RegistryStore};
