use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::model::Document;
use crate::store::error::{StoreError, StoreResult};
use crate::store::snapshot_cache::SnapshotCache;
use crate::store::traits::Storage;

/// Store for a single JSON object (contact details). Never created or
/// deleted, only read and patched.
pub struct DocumentStore<T, S> {
    storage: Arc<S>,
    seed: T,
    cache: SnapshotCache<T>,
    write_lock: Mutex<()>,
}

impl<T: Document, S: Storage> DocumentStore<T, S> {
    pub fn new(storage: Arc<S>, seed: T, cache_ttl: Duration) -> Self {
        Self {
            storage,
            seed,
            cache: SnapshotCache::new(cache_ttl),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> T {
        if let Some(cached) = self.cache.get() {
            return cached.as_ref().clone();
        }
        let generation = self.cache.generation();
        let document = self.load().await;
        self.cache.put(document, generation).as_ref().clone()
    }

    /// Apply `changes` on top of the stored document.
    ///
    /// Top-level keys replace; when both sides hold an object the patch is
    /// merged into it key by key, so `{"instagram": {"handle": ..}}` keeps
    /// the stored url.
    pub async fn update(&self, changes: Map<String, Value>) -> StoreResult<T> {
        let _guard = self.write_lock.lock().await;
        let current = serde_json::to_value(self.load().await)?;

        let merged = merge_one_level(current, changes);
        let updated: T = serde_json::from_value(merged)
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        let json = serde_json::to_string_pretty(&updated)?;
        let result = self.storage.write(T::FILE_NAME, &json).await;
        self.cache.invalidate();

        match result {
            Ok(path) => {
                log::info!("Saved {} to {}", T::FILE_NAME, path.display());
                Ok(updated)
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", T::FILE_NAME, e);
                Err(e.into())
            }
        }
    }

    async fn load(&self) -> T {
        for copy in self.storage.read_copies(T::FILE_NAME).await {
            match serde_json::from_str::<T>(&copy.contents) {
                Ok(document) => return document,
                Err(e) => log::warn!(
                    "Ignoring corrupt {} at {}: {}",
                    T::FILE_NAME,
                    copy.location.display(),
                    e
                ),
            }
        }

        log::debug!("No readable {}, serving seed data", T::FILE_NAME);
        self.seed.clone()
    }
}

fn merge_one_level(current: Value, changes: Map<String, Value>) -> Value {
    let Value::Object(mut fields) = current else {
        return Value::Object(changes);
    };

    for (key, change) in changes {
        match (fields.get_mut(&key), change) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                existing.extend(nested);
            }
            (_, change) => {
                fields.insert(key, change);
            }
        }
    }

    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contact;
    use crate::seed;
    use crate::store::file_storage::DirStorage;
    use crate::store::test_support::PausingStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn contact_store(dir: &TempDir) -> DocumentStore<Contact, DirStorage> {
        DocumentStore::new(
            Arc::new(DirStorage::new(dir.path())),
            seed::contact(),
            Duration::from_secs(5),
        )
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_serves_seed() {
        let dir = TempDir::new().unwrap();
        assert_eq!(contact_store(&dir).get().await, seed::contact());
    }

    #[tokio::test]
    async fn test_corrupt_file_serves_seed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("contact.json"), "[1, 2").unwrap();
        assert_eq!(contact_store(&dir).get().await, seed::contact());
    }

    #[tokio::test]
    async fn test_nested_patch_keeps_sibling_fields() {
        let dir = TempDir::new().unwrap();
        let store = contact_store(&dir);

        let updated = store
            .update(as_map(json!({"instagram": {"handle": "@jalon"}})))
            .await
            .unwrap();

        assert_eq!(updated.instagram.handle, "@jalon");
        assert_eq!(updated.instagram.url, seed::contact().instagram.url);
        assert_eq!(updated.email, seed::contact().email);
        assert_eq!(store.get().await, updated);
    }

    #[tokio::test]
    async fn test_top_level_patch_replaces_value() {
        let dir = TempDir::new().unwrap();
        let store = contact_store(&dir);

        let updated = store
            .update(as_map(json!({"email": "hola@example.com"})))
            .await
            .unwrap();

        assert_eq!(updated.email, "hola@example.com");
        assert!(dir.path().join("contact.json").exists());
    }

    #[tokio::test]
    async fn test_read_overlapping_a_write_does_not_cache_old_document() {
        let dir = TempDir::new().unwrap();
        let (storage, pause) = PausingStorage::new(DirStorage::new(dir.path()));
        let store: Arc<DocumentStore<Contact, _>> = Arc::new(DocumentStore::new(
            Arc::new(storage),
            seed::contact(),
            Duration::from_secs(60),
        ));

        let reader = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.get().await }
        });
        pause.loaded.await.unwrap();

        store
            .update(as_map(json!({"email": "hola@example.com"})))
            .await
            .unwrap();
        pause.release.send(()).unwrap();

        assert_eq!(reader.await.unwrap(), seed::contact());
        assert_eq!(store.get().await.email, "hola@example.com");
    }

    #[test]
    fn test_merge_one_level() {
        let merged = merge_one_level(
            json!({"a": 1, "nested": {"x": 1, "y": 2}}),
            as_map(json!({"a": 2, "nested": {"y": 3}})),
        );
        assert_eq!(merged, json!({"a": 2, "nested": {"x": 1, "y": 3}}));
    }
}
