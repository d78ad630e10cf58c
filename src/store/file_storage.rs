use std::io;
use std::path::{Path, PathBuf};

use crate::store::traits::{Storage, StoredCopy};

/// Plain directory of JSON files.
#[derive(Debug, Clone)]
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Delete `name` if present. Returns whether a file was removed.
    pub async fn remove(&self, name: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl Storage for DirStorage {
    async fn read_copies(&self, name: &str) -> Vec<StoredCopy> {
        let path = self.path_for(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => vec![StoredCopy {
                location: path,
                contents,
            }],
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    async fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write beside the target and rename so readers never see half a file
        let path = self.path_for(name);
        let tmp_path = self.path_for(&format!(".{}.tmp", name));
        tokio::fs::write(&tmp_path, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        Ok(path)
    }
}

/// Checked-in data directory with a writable fallback for read-only deployments.
///
/// Reads prefer the fallback copy because it can only exist if a write to the
/// primary location failed at some point. Writes go to the primary directory
/// first and drop to the fallback on any error.
#[derive(Debug, Clone)]
pub struct FailoverStorage {
    primary: DirStorage,
    fallback: DirStorage,
}

impl FailoverStorage {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: DirStorage::new(primary),
            fallback: DirStorage::new(fallback),
        }
    }
}

#[async_trait::async_trait]
impl Storage for FailoverStorage {
    async fn read_copies(&self, name: &str) -> Vec<StoredCopy> {
        let mut copies = self.fallback.read_copies(name).await;
        copies.extend(self.primary.read_copies(name).await);
        copies
    }

    async fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        match self.primary.write(name, contents).await {
            Ok(path) => {
                // A leftover fallback copy would shadow what we just wrote
                if let Err(e) = self.fallback.remove(name).await {
                    log::warn!(
                        "Failed to remove stale fallback copy of {} in {}: {}",
                        name,
                        self.fallback.dir().display(),
                        e
                    );
                }
                Ok(path)
            }
            Err(e) => {
                log::warn!(
                    "Primary write of {} in {} failed ({}), using fallback {}",
                    name,
                    self.primary.dir().display(),
                    e,
                    self.fallback.dir().display()
                );
                self.fallback.write(name, contents).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dir_storage_missing_file_has_no_copies() {
        let dir = TempDir::new().unwrap();
        let storage = DirStorage::new(dir.path());

        assert!(storage.read_copies("artworks.json").await.is_empty());
    }

    #[tokio::test]
    async fn test_dir_storage_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = DirStorage::new(dir.path().join("nested"));

        let written = storage.write("series.json", "[]").await.unwrap();
        assert_eq!(written, dir.path().join("nested").join("series.json"));

        let copies = storage.read_copies("series.json").await;
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].contents, "[]");
        assert!(!dir.path().join("nested").join(".series.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failover_writes_primary_when_possible() {
        let primary = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        std::fs::write(fallback.path().join("series.json"), "[\"stale\"]").unwrap();

        let storage = FailoverStorage::new(primary.path(), fallback.path());
        let written = storage.write("series.json", "[]").await.unwrap();

        assert_eq!(written, primary.path().join("series.json"));
        assert!(!fallback.path().join("series.json").exists());

        let copies = storage.read_copies("series.json").await;
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].contents, "[]");
    }

    #[tokio::test]
    async fn test_failover_writes_fallback_when_primary_unwritable() {
        let root = TempDir::new().unwrap();
        // A regular file where the primary directory should be makes every write fail
        let primary = root.path().join("readonly");
        std::fs::write(&primary, "not a directory").unwrap();
        let fallback = root.path().join("tmp");

        let storage = FailoverStorage::new(&primary, &fallback);
        let written = storage.write("contact.json", "{}").await.unwrap();

        assert_eq!(written, fallback.join("contact.json"));
        assert_eq!(std::fs::read_to_string(fallback.join("contact.json")).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_failover_reads_fallback_before_primary() {
        let primary = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        std::fs::write(primary.path().join("series.json"), "\"primary\"").unwrap();
        std::fs::write(fallback.path().join("series.json"), "\"fallback\"").unwrap();

        let storage = FailoverStorage::new(primary.path(), fallback.path());
        let copies = storage.read_copies("series.json").await;

        let contents: Vec<_> = copies.iter().map(|c| c.contents.as_str()).collect();
        assert_eq!(contents, vec!["\"fallback\"", "\"primary\""]);
    }
}
