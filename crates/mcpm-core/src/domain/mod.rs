//! Server registry domain types.
//!
//! These types represent manageable server definitions independent of any
//! infrastructure concerns (config file, process table, CLI).
//!
//! # Design
//!
//! - `ServerRecord` - A named command+arguments definition with observed state
//! - `ObservedStatus` - Liveness tagged with how it was established
//! - `slugify` - Derives the registry key from a human-readable name

mod server;

pub use server::{Liveness, ObservedStatus, Provenance, ServerRecord, slugify};
