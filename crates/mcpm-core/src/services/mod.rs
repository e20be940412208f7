//! Services orchestrating the ports.
//!
//! - `RegistryService` - CRUD over server records with validation before
//!   any store mutation
//! - `LifecycleController` - start / stop / restart with liveness
//!   verification and graceful-to-forceful escalation

pub mod lifecycle;
pub mod registry;

pub use lifecycle::{LifecycleController, LifecycleError, LifecycleTiming, StopOutcome};
pub use registry::{RegistryService, RegistryServiceError, ServerUpdate};
