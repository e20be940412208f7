//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: the JSON file registry, the pattern prober, and
//! the OS process control are instantiated here and injected into the
//! core services. Command handlers receive the composed `CliContext` and
//! delegate work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use mcpm_core::services::{LifecycleController, RegistryService};
use mcpm_registry::JsonFileRegistry;
use mcpm_runtime::{OsProcessControl, PatternProber};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the registry document.
    pub registry_path: PathBuf,
}

impl CliConfig {
    /// Resolve the registry path: an explicit override wins, otherwise
    /// the platform config directory (`<config>/mcpm/servers.json`).
    pub fn resolve(override_path: Option<PathBuf>) -> Result<Self> {
        let registry_path = match override_path {
            Some(path) => path,
            None => dirs::config_dir()
                .context("could not determine the platform config directory")?
                .join("mcpm")
                .join("servers.json"),
        };
        Ok(Self { registry_path })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    registry: RegistryService,
    lifecycle: LifecycleController,
}

impl CliContext {
    /// CRUD service over the registry.
    pub fn registry(&self) -> &RegistryService {
        &self.registry
    }

    /// Lifecycle controller for start/stop/restart/status.
    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }
}

/// Wire the concrete adapters into the core services.
pub fn bootstrap(config: &CliConfig) -> CliContext {
    tracing::debug!(registry = %config.registry_path.display(), "composing CLI context");
    let store = Arc::new(JsonFileRegistry::new(config.registry_path.clone()));
    let prober = Arc::new(PatternProber::new());
    let process = Arc::new(OsProcessControl::new());

    CliContext {
        registry: RegistryService::new(store.clone()),
        lifecycle: LifecycleController::new(store, prober, process),
    }
}
