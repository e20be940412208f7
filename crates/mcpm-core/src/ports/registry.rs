//! Registry store trait and error types.
//!
//! This module defines the persistence abstraction for server records.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ServerRecord;

/// Domain-specific errors for registry store operations.
///
/// This error type abstracts away storage implementation details and
/// provides a clean interface for services to handle persistence failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested record was not found.
    #[error("server not found: {0}")]
    NotFound(String),

    /// The stored document could not be parsed. Malformed content is a
    /// hard failure, never silently replaced.
    #[error("malformed registry document: {0}")]
    Parse(String),

    /// Storage backend error (filesystem, permissions, disk).
    #[error("registry I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence port for server records.
///
/// Implementations must make each operation's read-modify-write atomic
/// with respect to other callers in the same process (scoped acquisition
/// with guaranteed release). A missing backing document reads as an empty
/// registry.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Load all records, keyed by id.
    ///
    /// # Errors
    ///
    /// - `Parse` if the stored document is malformed
    /// - `Io` for storage errors
    async fn load_all(&self) -> Result<BTreeMap<String, ServerRecord>, RegistryError>;

    /// Insert or replace the record under its own id.
    ///
    /// # Errors
    ///
    /// - `Parse` / `Io` as for `load_all`
    async fn upsert(&self, record: &ServerRecord) -> Result<(), RegistryError>;

    /// Delete the record with the given id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record with the given id exists
    /// - `Parse` / `Io` as for `load_all`
    async fn delete(&self, id: &str) -> Result<(), RegistryError>;

    /// Delete `old_id` and insert `record` as one atomic step.
    ///
    /// Used by rename so no caller can observe the registry with neither
    /// (or both) entries present.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `old_id` does not exist
    /// - `Parse` / `Io` as for `load_all`
    async fn replace(&self, old_id: &str, record: &ServerRecord) -> Result<(), RegistryError>;
}
