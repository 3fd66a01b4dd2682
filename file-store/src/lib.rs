//! Flat text files keyed by filename, stored in one directory.
//!
//! - Last writer wins; no locking, versioning or atomic rename.
//! - `create` overwrites silently, `update` requires an existing file.
//! - Listings skip entries that cannot be stat'ed instead of failing.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

pub mod errors;
pub mod name;

use errors::{FileStoreError, Result};
pub use name::{FileName, MAX_FILENAME_CHARS};

/// Listing entry with its modification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub filename: String,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
}

/// Directory-backed text store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the store directory exists.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn ensure_dir(&self) -> Result<()> {
        if fs::try_exists(&self.root).await? {
            debug!("files dir exists");
        } else {
            fs::create_dir_all(&self.root).await?;
            info!("created files dir");
        }
        Ok(())
    }

    /// Writes `content` under `name`, replacing any existing file.
    #[instrument(skip(self, content), fields(file = %name, bytes = content.len()))]
    pub async fn create(&self, name: &FileName, content: &str) -> Result<()> {
        fs::write(self.path_of(name), content).await?;
        info!("file written");
        Ok(())
    }

    #[instrument(skip(self), fields(file = %name))]
    pub async fn read(&self, name: &FileName) -> Result<String> {
        fs::read_to_string(self.path_of(name))
            .await
            .map_err(|e| not_found_or_io(e, name))
    }

    /// Replaces the whole content of an existing file.
    #[instrument(skip(self, content), fields(file = %name, bytes = content.len()))]
    pub async fn update(&self, name: &FileName, content: &str) -> Result<()> {
        // No `create(true)`: a missing file surfaces as NotFound at open time.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.path_of(name))
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        info!("file updated");
        Ok(())
    }

    #[instrument(skip(self), fields(file = %name))]
    pub async fn delete(&self, name: &FileName) -> Result<()> {
        fs::remove_file(self.path_of(name))
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        info!("file deleted");
        Ok(())
    }

    /// Names of the regular files in the store, in directory order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<String>> {
        let names = self
            .scan()
            .await?
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        debug!(count = names.len(), "files listed");
        Ok(names)
    }

    /// Regular files with their modification time, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_modified(&self) -> Result<Vec<FileEntry>> {
        let mut entries: Vec<FileEntry> = self
            .scan()
            .await?
            .into_iter()
            .map(|(filename, modified)| FileEntry {
                filename,
                last_modified: DateTime::<Utc>::from(modified),
            })
            .collect();
        entries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        debug!(count = entries.len(), "files listed by modification time");
        Ok(entries)
    }

    /// Regular files and their mtime; unreadable entries are skipped.
    async fn scan(&self) -> Result<Vec<(String, SystemTime)>> {
        let mut dir = fs::read_dir(&self.root).await?;
        let mut out = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "error accessing file");
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            let modified = match meta.modified() {
                Ok(t) => t,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "no modification time");
                    continue;
                }
            };
            match entry.file_name().into_string() {
                Ok(name) => out.push((name, modified)),
                Err(raw) => warn!(name = ?raw, "skipping non UTF-8 filename"),
            }
        }

        Ok(out)
    }

    fn path_of(&self, name: &FileName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

fn not_found_or_io(err: std::io::Error, name: &FileName) -> FileStoreError {
    if err.kind() == ErrorKind::NotFound {
        FileStoreError::NotFound(name.to_string())
    } else {
        FileStoreError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    async fn fresh_store() -> (TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("files"));
        store.ensure_dir().await.unwrap();
        (dir, store)
    }

    fn name(s: &str) -> FileName {
        FileName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let (_dir, store) = fresh_store().await;
        store.ensure_dir().await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let (_dir, store) = fresh_store().await;
        for (file, content) in [
            ("empty.txt", ""),
            ("unicode.txt", "héllo ✓\nsecond line\n"),
            ("spaces in name", "  padded  "),
        ] {
            store.create(&name(file), content).await.unwrap();
            assert_eq!(store.read(&name(file)).await.unwrap(), content);
        }
    }

    #[tokio::test]
    async fn create_overwrites_silently() {
        let (_dir, store) = fresh_store().await;
        store.create(&name("a.txt"), "first").await.unwrap();
        store.create(&name("a.txt"), "second").await.unwrap();
        assert_eq!(store.read(&name("a.txt")).await.unwrap(), "second");
        assert_eq!(store.list().await.unwrap(), vec!["a.txt".to_string()]);
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let (_dir, store) = fresh_store().await;
        let err = store.read(&name("missing.txt")).await.unwrap_err();
        assert!(matches!(err, FileStoreError::NotFound(n) if n == "missing.txt"));
    }

    #[tokio::test]
    async fn update_replaces_whole_content() {
        let (_dir, store) = fresh_store().await;
        store.create(&name("a.txt"), "a much longer original").await.unwrap();
        store.update(&name("a.txt"), "short").await.unwrap();
        assert_eq!(store.read(&name("a.txt")).await.unwrap(), "short");
    }

    #[tokio::test]
    async fn update_missing_does_not_create() {
        let (_dir, store) = fresh_store().await;
        let err = store.update(&name("ghost.txt"), "x").await.unwrap_err();
        assert!(matches!(err, FileStoreError::NotFound(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let (_dir, store) = fresh_store().await;
        store.create(&name("a.txt"), "x").await.unwrap();
        store.delete(&name("a.txt")).await.unwrap();
        let err = store.delete(&name("a.txt")).await.unwrap_err();
        assert!(matches!(err, FileStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_skips_directories() {
        let (_dir, store) = fresh_store().await;
        store.create(&name("a.txt"), "a").await.unwrap();
        store.create(&name("b.txt"), "b").await.unwrap();
        fs::create_dir(store.root().join("subdir")).await.unwrap();

        let mut names = store.list().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[tokio::test]
    async fn list_by_modified_is_newest_first() {
        let (_dir, store) = fresh_store().await;
        store.create(&name("old.txt"), "1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        store.create(&name("new.txt"), "2").await.unwrap();

        let entries = store.list_by_modified().await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["new.txt", "old.txt"]);
        assert!(entries[0].last_modified >= entries[1].last_modified);
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(matches!(store.list().await, Err(FileStoreError::Io(_))));
    }

    #[test]
    fn entry_serializes_last_modified_in_camel_case() {
        let entry = FileEntry {
            filename: "a.txt".into(),
            last_modified: DateTime::<Utc>::from(SystemTime::UNIX_EPOCH),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["lastModified"], "1970-01-01T00:00:00Z");
    }
}
