//! Liveness probe port.

use async_trait::async_trait;

use crate::domain::{Liveness, ServerRecord};

/// Classifies a record as online or offline by inspecting observable
/// system state.
///
/// The probe is infallible by contract: any internal failure collapses to
/// `Offline`. No process handle is retained across invocations of the
/// tool, so implementations reconstruct liveness from scratch each time.
///
/// This is a strategy seam. The default implementation matches command
/// lines against the OS process table with a listening-port fallback; a
/// future backend (supervised child, container runtime identity) can
/// replace it without touching the lifecycle controller.
#[async_trait]
pub trait LivenessProber: Send + Sync {
    /// Probe the record, returning a definite answer.
    async fn probe(&self, record: &ServerRecord) -> Liveness;
}
