//! Core domain types, port definitions and services for mcpm.
//!
//! This crate holds everything that is independent of infrastructure:
//! the server record model, the port traits the lifecycle logic expects
//! from the registry store and the OS, and the services that orchestrate
//! them. Adapters (JSON file store, process table prober, CLI) live in
//! sibling crates and depend on this one, never the other way round.

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Liveness, ObservedStatus, Provenance, ServerRecord, slugify};
pub use ports::{
    LivenessProber, ProcessControl, ProcessError, RegistryError, RegistryStore, TerminateSignal,
};
pub use services::{
    LifecycleController, LifecycleError, LifecycleTiming, RegistryService, RegistryServiceError,
    ServerUpdate, StopOutcome,
};
