//! Registry service - CRUD over server records.
//!
//! All validation happens before any store mutation; a rejected operation
//! leaves the registry exactly as it was. Status fields are never touched
//! by this path - only the lifecycle controller writes them.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{ServerRecord, slugify};
use crate::ports::{RegistryError, RegistryStore};

/// Errors from registry CRUD operations.
#[derive(Debug, Error)]
pub enum RegistryServiceError {
    /// A field failed validation before any mutation.
    #[error("invalid server definition: {0}")]
    Validation(String),

    /// A record with the derived id already exists.
    #[error("server already exists: {0}")]
    Duplicate(String),

    /// No record with the given id exists.
    #[error("server not found: {0}")]
    NotFound(String),

    /// Underlying store failure, propagated untouched.
    #[error(transparent)]
    Store(#[from] RegistryError),
}

/// Partial update for an existing record. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct ServerUpdate {
    /// New name; changes the id via re-slugification.
    pub name: Option<String>,
    /// New executable.
    pub command: Option<String>,
    /// New argument list, replacing the old one entirely.
    pub args: Option<Vec<String>>,
}

/// CRUD service over the registry store.
pub struct RegistryService {
    store: Arc<dyn RegistryStore>,
}

impl RegistryService {
    /// Create a new registry service.
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Add a new server definition.
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty name or command
    /// - `Duplicate` if the derived id is already taken (the registry is
    ///   not mutated)
    /// - `Store` for persistence failures
    pub async fn add(
        &self,
        name: &str,
        command: &str,
        args: Vec<String>,
    ) -> Result<ServerRecord, RegistryServiceError> {
        validate_fields(name, command)?;

        let record = ServerRecord::new(name, command, args);
        let existing = self.store.load_all().await?;
        if existing.contains_key(&record.id) {
            return Err(RegistryServiceError::Duplicate(record.id));
        }

        self.store.upsert(&record).await?;
        tracing::info!(id = %record.id, command = %record.command, "server added");
        Ok(record)
    }

    /// Update an existing server definition.
    ///
    /// A name change derives a new id; the old entry is deleted and the
    /// new one inserted atomically by the store. The new id must not
    /// collide with another record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` does not exist
    /// - `Validation` / `Duplicate` as for [`Self::add`]
    /// - `Store` for persistence failures
    pub async fn update(
        &self,
        id: &str,
        update: ServerUpdate,
    ) -> Result<ServerRecord, RegistryServiceError> {
        let existing = self.store.load_all().await?;
        let Some(current) = existing.get(id) else {
            return Err(RegistryServiceError::NotFound(id.to_string()));
        };

        let name = update.name.unwrap_or_else(|| current.name.clone());
        let command = update.command.unwrap_or_else(|| current.command.clone());
        validate_fields(&name, &command)?;

        let new_id = slugify(&name);
        if new_id != id && existing.contains_key(&new_id) {
            return Err(RegistryServiceError::Duplicate(new_id));
        }

        let updated = ServerRecord {
            id: new_id.clone(),
            name,
            command,
            args: update.args.unwrap_or_else(|| current.args.clone()),
            // The CRUD path never rewrites observed state.
            status: current.status,
            last_connection_time: current.last_connection_time,
        };

        if new_id == id {
            self.store.upsert(&updated).await?;
        } else {
            self.store.replace(id, &updated).await?;
            tracing::info!(old_id = %id, new_id = %new_id, "server renamed");
        }
        Ok(updated)
    }

    /// Remove a server definition.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` does not exist
    /// - `Store` for persistence failures
    pub async fn remove(&self, id: &str) -> Result<(), RegistryServiceError> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "server removed");
                Ok(())
            }
            Err(RegistryError::NotFound(id)) => Err(RegistryServiceError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a single record by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` does not exist
    /// - `Store` for persistence failures
    pub async fn get(&self, id: &str) -> Result<ServerRecord, RegistryServiceError> {
        let mut all = self.store.load_all().await?;
        all.remove(id)
            .ok_or_else(|| RegistryServiceError::NotFound(id.to_string()))
    }

    /// List all records, ordered by id.
    ///
    /// # Errors
    ///
    /// `Store` for persistence failures.
    pub async fn list(&self) -> Result<Vec<ServerRecord>, RegistryServiceError> {
        let all = self.store.load_all().await?;
        Ok(all.into_values().collect())
    }
}

fn validate_fields(name: &str, command: &str) -> Result<(), RegistryServiceError> {
    if name.trim().is_empty() {
        return Err(RegistryServiceError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    if command.trim().is_empty() {
        return Err(RegistryServiceError::Validation(
            "command must not be empty".to_string(),
        ));
    }
    // A trailing separator would give an empty basename, and an empty
    // pattern matches every process on the machine.
    let basename = command.rsplit(['/', '\\']).next().unwrap_or(command);
    if basename.is_empty() {
        return Err(RegistryServiceError::Validation(
            "command must not end in a path separator".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory store mirroring the real store's atomicity guarantees.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<String, ServerRecord>>,
    }

    #[async_trait]
    impl RegistryStore for MemoryStore {
        async fn load_all(&self) -> Result<BTreeMap<String, ServerRecord>, RegistryError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn upsert(&self, record: &ServerRecord) -> Result<(), RegistryError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.id.clone(), record.clone());
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), RegistryError> {
            self.records
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| RegistryError::NotFound(id.to_string()))
        }

        async fn replace(&self, old_id: &str, record: &ServerRecord) -> Result<(), RegistryError> {
            let mut records = self.records.lock().unwrap();
            if records.remove(old_id).is_none() {
                return Err(RegistryError::NotFound(old_id.to_string()));
            }
            records.insert(record.id.clone(), record.clone());
            Ok(())
        }
    }

    fn service() -> (RegistryService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (RegistryService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn add_derives_slug_id() {
        let (service, _) = service();
        let record = service
            .add("File Server", "npx", vec!["-y".to_string()])
            .await
            .unwrap();
        assert_eq!(record.id, "file-server");
    }

    #[tokio::test]
    async fn add_rejects_empty_fields() {
        let (service, store) = service();
        assert!(matches!(
            service.add("  ", "npx", vec![]).await,
            Err(RegistryServiceError::Validation(_))
        ));
        assert!(matches!(
            service.add("ok", "", vec![]).await,
            Err(RegistryServiceError::Validation(_))
        ));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_rejects_command_with_empty_basename() {
        let (service, store) = service();
        for command in ["/usr/local/bin/", "tools\\", "/"] {
            assert!(matches!(
                service.add("srv", command, vec![]).await,
                Err(RegistryServiceError::Validation(_))
            ));
        }
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_command_with_empty_basename() {
        let (service, _) = service();
        service.add("srv", "node", vec![]).await.unwrap();

        let err = service
            .update(
                "srv",
                ServerUpdate {
                    command: Some("/usr/local/bin/".to_string()),
                    ..ServerUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryServiceError::Validation(_)));
        assert_eq!(service.get("srv").await.unwrap().command, "node");
    }

    #[tokio::test]
    async fn duplicate_add_fails_without_mutation() {
        let (service, store) = service();
        service.add("My Server", "node", vec![]).await.unwrap();

        // Different name, same slug.
        let err = service
            .add("my server", "python", vec!["x".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryServiceError::Duplicate(ref id) if id == "my-server"));

        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records["my-server"].command, "node");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (service, _) = service();
        let err = service
            .update("missing", ServerUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn rename_moves_record_atomically() {
        let (service, store) = service();
        service.add("old name", "node", vec![]).await.unwrap();

        let updated = service
            .update(
                "old-name",
                ServerUpdate {
                    name: Some("new name".to_string()),
                    ..ServerUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, "new-name");
        let records = store.records.lock().unwrap();
        assert!(!records.contains_key("old-name"));
        assert!(records.contains_key("new-name"));
    }

    #[tokio::test]
    async fn rename_onto_existing_slug_is_rejected() {
        let (service, store) = service();
        service.add("alpha", "node", vec![]).await.unwrap();
        service.add("beta", "node", vec![]).await.unwrap();

        let err = service
            .update(
                "beta",
                ServerUpdate {
                    name: Some("Alpha".to_string()),
                    ..ServerUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryServiceError::Duplicate(_)));
        assert_eq!(store.records.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_preserves_status_fields() {
        let (service, store) = service();
        let mut record = service.add("srv", "node", vec![]).await.unwrap();
        record.status = crate::domain::ObservedStatus::confirmed(crate::domain::Liveness::Online);
        store.upsert(&record).await.unwrap();

        let updated = service
            .update(
                "srv",
                ServerUpdate {
                    command: Some("deno".to_string()),
                    ..ServerUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, record.status);
        assert_eq!(updated.command, "deno");
    }

    #[tokio::test]
    async fn remove_requires_existence() {
        let (service, _) = service();
        assert!(matches!(
            service.remove("ghost").await,
            Err(RegistryServiceError::NotFound(_))
        ));

        service.add("real", "node", vec![]).await.unwrap();
        service.remove("real").await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let (service, _) = service();
        service.add("zeta", "node", vec![]).await.unwrap();
        service.add("alpha", "node", vec![]).await.unwrap();
        let ids: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
