//! Lifecycle controller - start / stop / restart with verification.
//!
//! Orchestrates detached launch, signal delivery and liveness probing over
//! a server record, persisting the observed (or intended) state through
//! the registry store after each operation. Target processes are not owned
//! by this tool, so termination is best-effort: a graceful stop escalates
//! once from a polite to an unconditional signal, and an unverified
//! outcome is reported as a warning while the intent is still persisted.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::{Liveness, ObservedStatus, Provenance, ServerRecord};
use crate::ports::{
    LivenessProber, ProcessControl, ProcessError, RegistryError, RegistryStore, TerminateSignal,
};

/// Settle delays between lifecycle steps.
///
/// These are unconditional sleeps, not event-driven waits: with no process
/// handle there is nothing to await, so the controller gives the OS a
/// fixed window to act before re-probing.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleTiming {
    /// Delay between launch and the start-verification probe.
    pub start_settle: Duration,
    /// Delay after each termination signal before re-probing.
    pub stop_settle: Duration,
    /// Delay between the stop and start halves of a restart, allowing
    /// full teardown (port release) before relaunch.
    pub restart_settle: Duration,
}

impl Default for LifecycleTiming {
    fn default() -> Self {
        Self {
            start_settle: Duration::from_millis(500),
            stop_settle: Duration::from_millis(500),
            restart_settle: Duration::from_millis(1000),
        }
    }
}

impl LifecycleTiming {
    /// Zero delays, for tests.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            start_settle: Duration::ZERO,
            stop_settle: Duration::ZERO,
            restart_settle: Duration::ZERO,
        }
    }
}

/// Result of a stop operation that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Termination was verified (or was forced and not re-verified).
    Stopped,
    /// The process survived polite and unconditional signals; offline
    /// state was persisted as intent. Surfaced as a warning, not a
    /// failure.
    Unverified,
}

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// OS-level launch or signal failure.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The post-launch probe could not verify the server came online.
    /// No status is persisted in this case.
    #[error("could not verify that server '{0}' started")]
    StartUnverified(String),

    /// Store failure while persisting observed state.
    #[error(transparent)]
    Store(#[from] RegistryError),
}

/// Orchestrates process lifecycle operations over server records.
///
/// Per-record state machine: `offline --start--> online|offline`,
/// `online --stop--> offline` (verified, assumed-with-warning, or forced),
/// `restart` = graceful stop then start. The transient starting/stopping
/// states live only inside an operation and are never persisted. Callers
/// are expected to serialize operations per record; operations on
/// different records may interleave freely because every probe and signal
/// targets only that record's command pattern.
pub struct LifecycleController {
    store: Arc<dyn RegistryStore>,
    prober: Arc<dyn LivenessProber>,
    process: Arc<dyn ProcessControl>,
    timing: LifecycleTiming,
}

impl LifecycleController {
    /// Create a controller with production settle delays.
    pub fn new(
        store: Arc<dyn RegistryStore>,
        prober: Arc<dyn LivenessProber>,
        process: Arc<dyn ProcessControl>,
    ) -> Self {
        Self::with_timing(store, prober, process, LifecycleTiming::default())
    }

    /// Create a controller with explicit settle delays.
    pub fn with_timing(
        store: Arc<dyn RegistryStore>,
        prober: Arc<dyn LivenessProber>,
        process: Arc<dyn ProcessControl>,
        timing: LifecycleTiming,
    ) -> Self {
        Self {
            store,
            prober,
            process,
            timing,
        }
    }

    /// Start the server and verify it came online.
    ///
    /// Launches the command detached, waits the start settle interval,
    /// then probes. Online persists `Confirmed(Online)` and the connection
    /// timestamp; offline is a hard failure with **no** status write. The
    /// launch attempt is not retried.
    ///
    /// # Errors
    ///
    /// - `Process` if the OS refuses the exec (no status write)
    /// - `StartUnverified` if the probe stays offline
    /// - `Store` if persisting the verified state fails
    pub async fn start(&self, record: &ServerRecord) -> Result<(), LifecycleError> {
        info!(id = %record.id, command = %record.command, "starting server");
        self.process
            .spawn_detached(&record.command, &record.args)
            .await?;

        sleep(self.timing.start_settle).await;

        match self.prober.probe(record).await {
            Liveness::Online => {
                let mut verified = record.clone();
                verified.status = ObservedStatus::confirmed(Liveness::Online);
                verified.last_connection_time = Some(Utc::now());
                self.store.upsert(&verified).await?;
                info!(id = %record.id, "server online");
                Ok(())
            }
            Liveness::Offline => {
                debug!(id = %record.id, "post-launch probe found no process");
                Err(LifecycleError::StartUnverified(record.name.clone()))
            }
        }
    }

    /// Stop the server.
    ///
    /// With `force`, an unconditional signal is sent and offline is
    /// persisted without re-verification. Otherwise a polite signal is
    /// sent, liveness is re-probed after the settle interval, and a
    /// survivor gets exactly one unconditional escalation before the
    /// outcome is decided.
    ///
    /// Offline intent is persisted even when signal delivery fails, so
    /// the registry always records what the user asked for.
    ///
    /// # Errors
    ///
    /// - `Process` if signal delivery fails (intent is still persisted)
    /// - `Store` if the persist fails
    pub async fn stop(
        &self,
        record: &ServerRecord,
        force: bool,
    ) -> Result<StopOutcome, LifecycleError> {
        if force {
            return self.stop_forced(record).await;
        }
        self.stop_graceful(record).await
    }

    /// Restart the server: graceful stop, teardown settle, then start.
    ///
    /// # Errors
    ///
    /// A stop failure propagates without attempting the start; a start
    /// failure propagates as the restart failure.
    pub async fn restart(&self, record: &ServerRecord) -> Result<(), LifecycleError> {
        info!(id = %record.id, "restarting server");
        self.stop(record, false).await?;
        sleep(self.timing.restart_settle).await;
        self.start(record).await
    }

    async fn stop_forced(&self, record: &ServerRecord) -> Result<StopOutcome, LifecycleError> {
        info!(id = %record.id, "force-stopping server");
        let delivery = self
            .process
            .signal_matching(record.command_basename(), TerminateSignal::Unconditional)
            .await;

        self.persist_offline(record, Provenance::Assumed).await?;
        delivery?;
        Ok(StopOutcome::Stopped)
    }

    async fn stop_graceful(&self, record: &ServerRecord) -> Result<StopOutcome, LifecycleError> {
        let pattern = record.command_basename();
        info!(id = %record.id, pattern = %pattern, "stopping server");

        let polite = self
            .process
            .signal_matching(pattern, TerminateSignal::Polite)
            .await;
        if polite.is_err() {
            self.persist_offline(record, Provenance::Assumed).await?;
            polite?;
        }

        sleep(self.timing.stop_settle).await;
        if !self.prober.probe(record).await.is_online() {
            self.persist_offline(record, Provenance::Confirmed).await?;
            return Ok(StopOutcome::Stopped);
        }

        debug!(id = %record.id, "process survived polite signal, escalating");
        let unconditional = self
            .process
            .signal_matching(pattern, TerminateSignal::Unconditional)
            .await;
        if unconditional.is_err() {
            self.persist_offline(record, Provenance::Assumed).await?;
            unconditional?;
        }

        sleep(self.timing.stop_settle).await;
        if !self.prober.probe(record).await.is_online() {
            self.persist_offline(record, Provenance::Confirmed).await?;
            return Ok(StopOutcome::Stopped);
        }

        // The process outlived both signals. Record the user's intent and
        // surface the discrepancy as a warning rather than failing.
        warn!(id = %record.id, "termination may be incomplete");
        self.persist_offline(record, Provenance::Assumed).await?;
        Ok(StopOutcome::Unverified)
    }

    async fn persist_offline(
        &self,
        record: &ServerRecord,
        provenance: Provenance,
    ) -> Result<(), RegistryError> {
        let mut stopped = record.clone();
        stopped.status = ObservedStatus {
            liveness: Liveness::Offline,
            provenance,
        };
        self.store.upsert(&stopped).await
    }

    /// Probe the record and persist the confirmed observation.
    ///
    /// Used by status refresh paths; unlike start/stop this never signals
    /// or launches anything.
    ///
    /// # Errors
    ///
    /// `Store` if the persist fails.
    pub async fn refresh_status(
        &self,
        record: &ServerRecord,
    ) -> Result<Liveness, LifecycleError> {
        let liveness = self.prober.probe(record).await;
        let mut observed = record.clone();
        observed.status = ObservedStatus::confirmed(liveness);
        if liveness.is_online() && record.status.liveness != Liveness::Online {
            observed.last_connection_time = Some(Utc::now());
        }
        self.store.upsert(&observed).await?;
        Ok(liveness)
    }
}
