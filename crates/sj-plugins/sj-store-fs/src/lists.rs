use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sj_core::{AppError, ListStore, Result, WordLists};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{ensure_parent, storage_error};

/// Both lists persisted together as one pretty-printed JSON object.
pub struct FsListStore {
    path: PathBuf,
}

impl FsListStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Sibling temp file, unique per write so racing writers never share one.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lists".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[async_trait]
impl ListStore for FsListStore {
    async fn read(&self) -> Result<WordLists> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WordLists::default()),
            Err(e) => return Err(storage_error("reading", &self.path, e)),
        };
        serde_json::from_str(&raw).map_err(|e| {
            AppError::StorageUnavailable(format!(
                "{} is not a valid lists snapshot: {e}",
                self.path.display()
            ))
        })
    }

    /// Write-to-temp then rename: the target always holds a complete snapshot.
    async fn write(&self, lists: &WordLists) -> Result<()> {
        let body = serde_json::to_vec_pretty(lists)
            .map_err(|e| AppError::StorageUnavailable(format!("serializing lists: {e}")))?;

        ensure_parent(&self.path).await?;

        let tmp = self.temp_path();
        if let Err(e) = write_synced(&tmp, &body).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_error("writing", &tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_error("replacing", &self.path, e));
        }

        log::debug!(
            "saved lists to {} ({} blacklisted, {} whitelisted)",
            self.path.display(),
            lists.blacklist.len(),
            lists.whitelist.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{break_medium, restore_medium};
    use tempfile::TempDir;

    fn lists(black: &[&str], white: &[&str]) -> WordLists {
        WordLists {
            blacklist: black.iter().map(|s| s.to_string()).collect(),
            whitelist: white.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn fresh_store_reads_empty_pair() {
        let tmp = TempDir::new().unwrap();
        let store = FsListStore::new(tmp.path().join("lists.json"));
        assert_eq!(store.read().await.unwrap(), WordLists::default());
    }

    #[tokio::test]
    async fn write_then_read_returns_exact_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = FsListStore::new(tmp.path().join("nested/dir/lists.json"));

        // Stored as-is: no normalization, duplicates and case preserved.
        let snapshot = lists(&["Bad", "bad", " spaced "], &["ok"]);
        store.write(&snapshot).await.unwrap();
        assert_eq!(store.read().await.unwrap(), snapshot);

        let replacement = lists(&[], &["only"]);
        store.write(&replacement).await.unwrap();
        assert_eq!(store.read().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn write_leaves_no_temp_files_behind() {
        let tmp = TempDir::new().unwrap();
        let store = FsListStore::new(tmp.path().join("lists.json"));
        store.write(&lists(&["x"], &[])).await.unwrap();
        store.write(&lists(&["y"], &[])).await.unwrap();

        let mut entries = fs::read_dir(tmp.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["lists.json"]);
    }

    #[tokio::test]
    async fn partial_snapshot_reads_missing_list_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lists.json");
        fs::write(&path, r#"{"whitelist":["fine"]}"#).await.unwrap();

        let read = FsListStore::new(path).read().await.unwrap();
        assert_eq!(read, lists(&[], &["fine"]));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_storage_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lists.json");
        fs::write(&path, "{ not json").await.unwrap();

        let err = FsListStore::new(path).read().await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        let store = FsListStore::new(data.join("lists.json"));
        let original = lists(&["badword"], &[]);
        store.write(&original).await.unwrap();

        let parked = break_medium(&data).await;
        let err = store.write(&lists(&["other"], &["x"])).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        restore_medium(&data, &parked).await;

        assert_eq!(store.read().await.unwrap(), original);
    }

    #[tokio::test]
    async fn racing_writers_leave_one_complete_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FsListStore::new(tmp.path().join("lists.json")));

        let candidates: Vec<WordLists> = (0..16)
            .map(|i| WordLists {
                blacklist: (0..i).map(|n| format!("word{n}")).collect(),
                whitelist: vec![format!("writer{i}")],
            })
            .collect();

        let mut handles = Vec::new();
        for snapshot in candidates.clone() {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.write(&snapshot).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let last = store.read().await.unwrap();
        assert!(candidates.contains(&last));
    }
}
