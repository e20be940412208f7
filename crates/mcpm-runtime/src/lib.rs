//! OS process adapters for mcpm.
//!
//! Implements the core ports against the real operating system:
//! pattern-based liveness probing over the process table, detached
//! launches, and pattern-targeted signal delivery.

pub mod control;
pub mod launch;
pub mod listen;
pub mod probe;
pub mod signal;

pub use control::OsProcessControl;
pub use probe::PatternProber;
