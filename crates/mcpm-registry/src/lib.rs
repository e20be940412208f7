//! JSON-file-backed registry store.
//!
//! Persists server records in a single document shaped as
//! `{"mcpServers": {"<id>": {"command": ..., "args": [...]}}}`. The entry
//! key is the record's slug; the human-readable name is reconstructed from
//! it on load. Observed status and the last connection timestamp are
//! round-tripped as optional fields so lifecycle results survive across
//! short-lived invocations - documents written by hand without them load
//! fine, and they are omitted when absent.
//!
//! A missing file reads as an empty registry and is created with a default
//! empty document. Malformed JSON is a hard read failure. Writes go
//! through a temp file + rename so a crash never leaves a half-written
//! document, and every read-modify-write happens under a scoped in-process
//! mutex.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use mcpm_core::domain::{ObservedStatus, ServerRecord};
use mcpm_core::ports::{RegistryError, RegistryStore};

/// On-disk document root.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: BTreeMap<String, WireEntry>,
}

/// One persisted server entry. The core wire contract is command+args;
/// the remaining fields are application extras.
#[derive(Debug, Serialize, Deserialize)]
struct WireEntry {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<ObservedStatus>,
    #[serde(
        rename = "lastConnectionTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    last_connection_time: Option<DateTime<Utc>>,
}

impl WireEntry {
    fn from_record(record: &ServerRecord) -> Self {
        Self {
            command: record.command.clone(),
            args: record.args.clone(),
            status: Some(record.status),
            last_connection_time: record.last_connection_time,
        }
    }

    fn into_record(self, id: &str) -> ServerRecord {
        ServerRecord {
            id: id.to_string(),
            // The slug key is the only name the document carries.
            name: id.to_string(),
            command: self.command,
            args: self.args,
            status: self.status.unwrap_or_default(),
            last_connection_time: self.last_connection_time,
        }
    }
}

/// Registry store over a JSON config file.
pub struct JsonFileRegistry {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileRegistry {
    /// Create a store over the given document path. The file is created
    /// on first read if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The document path this store operates on.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<RegistryDocument, RegistryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| RegistryError::Parse(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "registry file missing, creating default");
                let document = RegistryDocument::default();
                self.write_document(&document).await?;
                Ok(document)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &RegistryDocument) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| RegistryError::Parse(e.to_string()))?;

        // Atomic write: temp file in the same directory, then rename.
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RegistryStore for JsonFileRegistry {
    async fn load_all(&self) -> Result<BTreeMap<String, ServerRecord>, RegistryError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        Ok(document
            .mcp_servers
            .into_iter()
            .map(|(id, entry)| {
                let record = entry.into_record(&id);
                (id, record)
            })
            .collect())
    }

    async fn upsert(&self, record: &ServerRecord) -> Result<(), RegistryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document
            .mcp_servers
            .insert(record.id.clone(), WireEntry::from_record(record));
        self.write_document(&document).await
    }

    async fn delete(&self, id: &str) -> Result<(), RegistryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.mcp_servers.remove(id).is_none() {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.write_document(&document).await
    }

    async fn replace(&self, old_id: &str, record: &ServerRecord) -> Result<(), RegistryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.mcp_servers.remove(old_id).is_none() {
            return Err(RegistryError::NotFound(old_id.to_string()));
        }
        document
            .mcp_servers
            .insert(record.id.clone(), WireEntry::from_record(record));
        self.write_document(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpm_core::domain::{Liveness, Provenance};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> JsonFileRegistry {
        JsonFileRegistry::new(dir.path().join("servers.json"))
    }

    fn record(name: &str) -> ServerRecord {
        ServerRecord::new(name, "node", vec!["server.js".to_string()])
    }

    #[tokio::test]
    async fn missing_file_reads_empty_and_creates_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let all = store.load_all().await.unwrap();
        assert!(all.is_empty());

        let content = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["mcpServers"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[tokio::test]
    async fn upsert_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut original = record("file server");
        original.status = ObservedStatus {
            liveness: Liveness::Online,
            provenance: Provenance::Confirmed,
        };
        original.last_connection_time = Some(Utc::now());
        store.upsert(&original).await.unwrap();

        let all = store.load_all().await.unwrap();
        let loaded = &all["file-server"];
        assert_eq!(loaded.command, original.command);
        assert_eq!(loaded.args, original.args);
        assert_eq!(loaded.status, original.status);
        assert_eq!(loaded.last_connection_time, original.last_connection_time);
        // The document only carries the slug; the name loads as the key.
        assert_eq!(loaded.name, "file-server");
    }

    #[tokio::test]
    async fn plain_command_args_entries_load_fine() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(
            store.path(),
            r#"{"mcpServers":{"fs":{"command":"npx","args":["-y","@modelcontextprotocol/server-filesystem"]}}}"#,
        )
        .unwrap();

        let all = store.load_all().await.unwrap();
        let loaded = &all["fs"];
        assert_eq!(loaded.command, "npx");
        assert_eq!(loaded.args.len(), 2);
        assert_eq!(loaded.status, ObservedStatus::default());
        assert!(loaded.last_connection_time.is_none());
    }

    #[tokio::test]
    async fn args_order_survives_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let args = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        let mut rec = record("ordered");
        rec.args = args.clone();
        store.upsert(&rec).await.unwrap();

        let all = store.load_all().await.unwrap();
        assert_eq!(all["ordered"].args, args);
    }

    #[tokio::test]
    async fn delete_requires_existence() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(
            store.delete("ghost").await,
            Err(RegistryError::NotFound(_))
        ));

        store.upsert(&record("real")).await.unwrap();
        store.delete("real").await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_swaps_entries_in_one_write() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.upsert(&record("old name")).await.unwrap();

        let renamed = record("new name");
        store.replace("old-name", &renamed).await.unwrap();

        let all = store.load_all().await.unwrap();
        assert!(!all.contains_key("old-name"));
        assert!(all.contains_key("new-name"));

        let missing = store.replace("old-name", &renamed).await;
        assert!(matches!(missing, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.upsert(&record("srv")).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
