//! Export metadata persistence
//!
//! A single JSON file records which collections were last exported, under
//! the `colecciones` key the platform's services read at startup. The file
//! may carry other keys owned by other tools; those are preserved across
//! rewrites. There is no history: each completed run replaces the previous
//! collection list wholesale.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::{error, warn};

use crate::error::{Result, UndersoundsError};

/// Metadata key listing the collections of the last completed export.
pub const COLLECTIONS_KEY: &str = "colecciones";

/// Reader/writer for the shared metadata file.
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    /// Create a store over the given metadata file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the current metadata object.
    ///
    /// Tolerant by design: a missing file or unparseable content degrades to
    /// an empty object after a log line, so a corrupt metadata file can
    /// never block an export run.
    pub async fn load(&self) -> Map<String, Value> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                error!("Error reading {}: {e}", self.path.display());
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(
                    "{} does not contain a JSON object, starting from empty metadata",
                    self.path.display()
                );
                Map::new()
            }
            Err(e) => {
                error!("Error parsing {}: {e}", self.path.display());
                Map::new()
            }
        }
    }

    /// Record the collections of a completed run.
    ///
    /// Replaces the `colecciones` entry with the requested selection and
    /// keeps every other key already present in the file. The caller decides
    /// whether a write failure is fatal; for the export tool it is not.
    pub async fn record_exported(&self, collections: &[String]) -> Result<()> {
        let mut meta = self.load().await;
        meta.insert(COLLECTIONS_KEY.to_string(), json!(collections));

        let text = serde_json::to_string_pretty(&Value::Object(meta))
            .map_err(|e| UndersoundsError::Generic(format!("Failed to encode metadata: {e}")))?;

        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::new(dir.path().join("dbmeta.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dbmeta.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = MetadataStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dbmeta.json");
        tokio::fs::write(&path, r#"{"version": 3, "colecciones": ["old"]}"#)
            .await
            .unwrap();

        let store = MetadataStore::new(&path);
        store
            .record_exported(&["albums".to_string(), "news".to_string()])
            .await
            .unwrap();

        let meta = store.load().await;
        assert_eq!(meta.get("version"), Some(&json!(3)));
        assert_eq!(meta.get(COLLECTIONS_KEY), Some(&json!(["albums", "news"])));
    }

    #[tokio::test]
    async fn test_record_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::new(dir.path().join("config").join("dbmeta.json"));
        let result = store.record_exported(&["albums".to_string()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rewrite_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dbmeta.json");
        let store = MetadataStore::new(&path);

        let selection = vec!["albums".to_string()];
        store.record_exported(&selection).await.unwrap();
        let first = tokio::fs::read_to_string(&path).await.unwrap();
        store.record_exported(&selection).await.unwrap();
        let second = tokio::fs::read_to_string(&path).await.unwrap();

        assert_eq!(first, second);
    }
}
