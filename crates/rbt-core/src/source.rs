use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rbt_model::{Batch, Label};
use tracing::debug;

use crate::error::CoreError;

/// Supplies batch definitions by name.
#[async_trait]
pub trait BatchSource: Send + Sync + 'static {
    /// Load the named batch, or [`CoreError::BatchConfigMissing`] if it is absent or malformed.
    async fn load(&self, name: &str) -> Result<Batch, CoreError>;
}

/// Reads `<dir>/<name>.json`, each a JSON array of server labels.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BatchSource for JsonDirSource {
    async fn load(&self, name: &str) -> Result<Batch, CoreError> {
        let path = self.path_for(name);
        let missing = |reason: String| CoreError::BatchConfigMissing {
            batch: name.to_string(),
            reason,
        };

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| missing(format!("{}: {e}", path.display())))?;
        let servers: Vec<Label> = serde_json::from_str(&raw)
            .map_err(|e| missing(format!("{}: {e}", path.display())))?;

        debug!(batch = name, servers = servers.len(), path = %path.display(), "batch loaded");
        Ok(Batch::new(name, servers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rbt-source-{tag}-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn loads_labels_in_order() {
        let dir = scratch_dir("ok");
        std::fs::write(dir.join("batch1.json"), r#"["web-2", "web-1", "db-1"]"#).unwrap();

        let batch = JsonDirSource::new(&dir).load("batch1").await.unwrap();

        assert_eq!(batch.name(), "batch1");
        assert_eq!(batch.servers(), ["web-2", "web-1", "db-1"]);
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_file_is_config_missing() {
        let dir = scratch_dir("missing");
        let err = JsonDirSource::new(&dir).load("batch9").await.unwrap_err();
        assert!(matches!(err, CoreError::BatchConfigMissing { ref batch, .. } if batch == "batch9"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn malformed_file_is_config_missing() {
        let dir = scratch_dir("bad");
        std::fs::write(dir.join("batch1.json"), r#"{"servers": ["web-1"]}"#).unwrap();

        let err = JsonDirSource::new(&dir).load("batch1").await.unwrap_err();

        assert!(matches!(err, CoreError::BatchConfigMissing { .. }));
        std::fs::remove_dir_all(dir).ok();
    }
}
