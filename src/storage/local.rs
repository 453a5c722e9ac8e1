//! Local filesystem schedule storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ScheduleData;
use crate::storage::ScheduleStore;

/// File name of the schedule document under the storage root.
pub const SCHEDULE_FILE: &str = "schedule.json";

/// Local filesystem storage backend for the schedule document.
#[derive(Clone)]
pub struct LocalScheduleStore {
    root_dir: PathBuf,
}

impl LocalScheduleStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.root_dir.join(SCHEDULE_FILE)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl ScheduleStore for LocalScheduleStore {
    async fn load(&self) -> Result<ScheduleData> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                log::debug!("No {SCHEDULE_FILE} found; starting empty");
                Ok(ScheduleData::default())
            }
        }
    }

    async fn save(&self, data: &ScheduleData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        self.write_bytes(&bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEvent;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_document_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalScheduleStore::new(tmp.path());

        let data = store.load().await.unwrap();
        assert!(data.events.is_empty());
        assert!(data.finalized_dates.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let tmp = TempDir::new().unwrap();
        let store = LocalScheduleStore::new(tmp.path());

        let mut data = ScheduleData::default();
        data.events.insert(
            "2025-04-01".into(),
            vec![ScheduleEvent::new("Physics", "9:00 AM", "10:00 AM")],
        );
        data.finalized_dates.push("2025-04-01".into());
        store.save(&data).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.events_for("2025-04-01").len(), 1);
        assert!(loaded.is_finalized("2025-04-01"));

        // No stray temp file left behind.
        assert!(!tmp.path().join("schedule.tmp").exists());
    }
}
