//! Local-file state backend.
//!
//! Persists the published-record set as pretty-printed JSON at a configured
//! path. Writes go to `<path>.tmp` and are renamed into place, so a crash
//! mid-save never truncates the previous state.

use std::path::PathBuf;

use crosspost_core::types::PublishedRecord;

use crate::error::{io_err, StoreError};
use crate::StateStore;

/// State store backed by a single local JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StateStore for FileStore {
    /// A missing file reads as the empty record set; this is the first-run
    /// case, consistent with the remote backend.
    fn load(&self) -> Result<Vec<PublishedRecord>, StoreError> {
        if !self.path.exists() {
            log::info!(
                "no state file at {}. starting from scratch",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, records: &[PublishedRecord]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = PathBuf::from(format!("{}.tmp", self.path.display()));
        std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crosspost_core::types::ArticleId;
    use tempfile::TempDir;

    use super::*;

    fn record(id: &str, url: &str) -> PublishedRecord {
        PublishedRecord {
            url: url.to_string(),
            id: ArticleId::from(id),
            publish_timestamp: Utc::now(),
            medium_response: serde_json::json!({"id": format!("m-{id}")}),
        }
    }

    #[test]
    fn empty_set_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("status.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn roundtrip_save_load() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("status.json"));
        let records = vec![
            record("1", "https://example.com/posts/a/"),
            record("2", "https://example.com/posts/b/"),
        ];

        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn save_of_unchanged_load_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("status.json"));
        store.save(&[record("1", "https://example.com/posts/a/")]).unwrap();

        let first = store.load().unwrap();
        store.save(&first).unwrap();
        assert_eq!(store.load().unwrap(), first);
    }

    #[test]
    fn serialized_state_is_pretty_printed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("status.json");
        let store = FileStore::new(path.clone());
        store.save(&[record("1", "https://example.com/posts/a/")]).unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains('\n'), "state must stay human-diffable");
        assert!(on_disk.contains("  \"publishTimestamp\""));
    }

    #[test]
    fn tmp_file_cleaned_up_after_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("status.json");
        let store = FileStore::new(path.clone());
        store.save(&[]).unwrap();

        let tmp_path = PathBuf::from(format!("{}.tmp", path.display()));
        assert!(
            !tmp_path.exists(),
            "tmp file should be removed after atomic rename"
        );
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("status.json");
        let store = FileStore::new(path);
        store.save(&[record("1", "https://example.com/posts/a/")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn malformed_state_is_a_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("status.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
