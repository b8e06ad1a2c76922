use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ReportError;

/// Writes one log file per batch, `<dir>/<batch>_log.txt`, replaced on every run.
#[derive(Debug, Clone)]
pub struct LogFileChannel {
    dir: PathBuf,
}

impl LogFileChannel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, batch: &str) -> PathBuf {
        self.dir.join(format!("{batch}_log.txt"))
    }

    pub async fn write(&self, batch: &str, content: &str) -> Result<PathBuf, ReportError> {
        let path = self.path_for(batch);
        let err = |source| ReportError::LogWrite {
            path: path.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(err)?;
        tokio::fs::write(&path, content).await.map_err(err)?;

        debug!(path = %path.display(), bytes = content.len(), "batch log written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_dir_and_overwrites() {
        let dir = std::env::temp_dir().join(format!("rbt-logs-{}", uuid::Uuid::new_v4()));
        let channel = LogFileChannel::new(dir.join("nested"));

        channel.write("batch1", "first run\n").await.unwrap();
        let path = channel.write("batch1", "second run\n").await.unwrap();

        assert_eq!(path, dir.join("nested").join("batch1_log.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second run\n");
        std::fs::remove_dir_all(dir).ok();
    }
}
