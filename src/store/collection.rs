use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

use crate::model::Record;
use crate::store::error::{StoreError, StoreResult};
use crate::store::snapshot_cache::SnapshotCache;
use crate::store::traits::Storage;

/// JSON-array backed collection of records with a short-lived read cache.
///
/// Reads never fail: a missing or corrupt file degrades to the seed data the
/// store was built with. Mutations are serialised within the process; a second
/// process writing the same file still wins or loses whole-file races.
pub struct CollectionStore<T, S> {
    storage: Arc<S>,
    seed: Vec<T>,
    cache: SnapshotCache<Vec<T>>,
    write_lock: Mutex<()>,
}

impl<T: Record, S: Storage> CollectionStore<T, S> {
    pub fn new(storage: Arc<S>, seed: Vec<T>, cache_ttl: Duration) -> Self {
        Self {
            storage,
            seed,
            cache: SnapshotCache::new(cache_ttl),
            write_lock: Mutex::new(()),
        }
    }

    /// All records, served from cache while it is fresh
    pub async fn all(&self) -> Vec<T> {
        self.snapshot().await.as_ref().clone()
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.snapshot().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.snapshot()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub async fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.snapshot().await.iter().filter(|r| predicate(r)).count()
    }

    /// Append a record. Fails with `DuplicateKey` if the id is taken.
    pub async fn insert(&self, record: T) -> StoreResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await;

        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::DuplicateKey {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }

        records.push(record.clone());
        self.persist(&records).await?;
        Ok(record)
    }

    /// Shallow-merge `changes` into the record with `id`.
    ///
    /// An `id` key in `changes` is ignored. Returns `None` if no record matches.
    pub async fn update(&self, id: &str, changes: Map<String, Value>) -> StoreResult<Option<T>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(&records[index])?;
        if let Value::Object(fields) = &mut merged {
            for (key, value) in changes {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }

        let updated: T = serde_json::from_value(merged)
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        records[index] = updated.clone();
        self.persist(&records).await?;
        Ok(Some(updated))
    }

    /// Delete the record with `id`. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.remove_locked(id).await
    }

    /// Delete `id` only if `guard` accepts the current collection.
    ///
    /// The guard runs under this collection's write lock, so no other
    /// mutation of this collection lands between the check and the removal.
    /// Other collections the guard consults must be held via `lock_fresh`.
    pub async fn remove_if<F>(&self, id: &str, guard: F) -> StoreResult<bool>
    where
        F: FnOnce(&T) -> StoreResult<()>,
    {
        let _guard = self.write_lock.lock().await;
        let records = self.load().await;
        let Some(record) = records.iter().find(|r| r.id() == id) else {
            return Ok(false);
        };
        guard(record)?;
        self.remove_locked(id).await
    }

    /// Hold this collection's write lock and read it straight from storage.
    ///
    /// Mutations of the collection wait until the returned guard is dropped.
    pub async fn lock_fresh(&self) -> (MutexGuard<'_, ()>, Vec<T>) {
        let guard = self.write_lock.lock().await;
        let records = self.load().await;
        (guard, records)
    }

    async fn remove_locked(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.load().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }

        self.persist(&records).await?;
        Ok(true)
    }

    async fn snapshot(&self) -> Arc<Vec<T>> {
        if let Some(cached) = self.cache.get() {
            return cached;
        }
        let generation = self.cache.generation();
        let records = self.load().await;
        self.cache.put(records, generation)
    }

    /// Read the collection from storage, bypassing the cache
    async fn load(&self) -> Vec<T> {
        for copy in self.storage.read_copies(T::FILE_NAME).await {
            match serde_json::from_str::<Vec<T>>(&copy.contents) {
                Ok(records) => return records,
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

    async fn persist(&self, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(records);
        let result = match json {
            Ok(json) => self
                .storage
                .write(T::FILE_NAME, &json)
                .await
                .map_err(StoreError::from),
            Err(e) => Err(StoreError::from(e)),
        };

        // Whatever happened on disk, the next read must go back to it
        self.cache.invalidate();

        match result {
            Ok(path) => {
                log::info!("Saved {} {} record(s) to {}", records.len(), T::KIND, path.display());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", T::FILE_NAME, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artwork, ArtworkStatus, Series};
    use crate::seed;
    use crate::store::file_storage::{DirStorage, FailoverStorage};
    use crate::store::test_support::PausingStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn series_store(dir: &TempDir, ttl: Duration) -> CollectionStore<Series, DirStorage> {
        CollectionStore::new(Arc::new(DirStorage::new(dir.path())), seed::series(), ttl)
    }

    fn azul() -> Series {
        Series {
            id: "azul".to_string(),
            name: "Azul".to_string(),
            name_en: "Blue".to_string(),
        }
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
        let store = series_store(&dir, Duration::ZERO);

        assert_eq!(store.all().await, seed::series());
    }

    #[tokio::test]
    async fn test_corrupt_file_serves_seed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("series.json"), "{ not json").unwrap();
        let store = series_store(&dir, Duration::ZERO);

        assert_eq!(store.all().await, seed::series());
    }

    #[tokio::test]
    async fn test_corrupt_fallback_falls_through_to_primary() {
        let primary = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        std::fs::write(fallback.path().join("series.json"), "garbage").unwrap();
        std::fs::write(
            primary.path().join("series.json"),
            serde_json::to_string(&vec![azul()]).unwrap(),
        )
        .unwrap();

        let storage = Arc::new(FailoverStorage::new(primary.path(), fallback.path()));
        let store: CollectionStore<Series, _> =
            CollectionStore::new(storage, seed::series(), Duration::ZERO);

        assert_eq!(store.all().await, vec![azul()]);
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::from_secs(5));

        store.insert(azul()).await.unwrap();

        assert_eq!(store.get("azul").await, Some(azul()));
        assert_eq!(store.all().await.len(), seed::series().len() + 1);

        let on_disk: Vec<Series> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("series.json")).unwrap())
                .unwrap();
        assert!(on_disk.contains(&azul()));
    }

    #[tokio::test]
    async fn test_duplicate_insert_leaves_collection_untouched() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);
        store.insert(azul()).await.unwrap();
        let before = store.all().await;

        let mut clash = azul();
        clash.name = "Otro".to_string();
        let err = store.insert(clash).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey { kind: "Series", .. }));
        assert_eq!(err.to_string(), "Series with id \"azul\" already exists");
        assert_eq!(store.all().await, before);
    }

    #[tokio::test]
    async fn test_update_ignores_id_and_merges_fields() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);
        store.insert(azul()).await.unwrap();

        let updated = store
            .update("azul", as_map(json!({"id": "rojo", "nameEn": "Navy"})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, "azul");
        assert_eq!(updated.name, "Azul");
        assert_eq!(updated.name_en, "Navy");
        assert_eq!(store.get("azul").await, Some(updated));
        assert!(store.get("rojo").await.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);

        let result = store.update("nada", as_map(json!({"name": "Nada"}))).await.unwrap();
        assert!(result.is_none());
        assert!(!dir.path().join("series.json").exists());
    }

    #[tokio::test]
    async fn test_update_rejects_changes_that_break_the_record() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);

        let err = store
            .update("identidades", as_map(json!({"name": 42})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);

        assert!(store.remove("tensiones").await.unwrap());
        assert!(store.get("tensiones").await.is_none());
        assert!(!store.remove("tensiones").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_if_guard_blocks_removal() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::ZERO);

        let err = store
            .remove_if("tensiones", |_| Err(StoreError::InUse { count: 2 }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InUse { count: 2 }));
        assert!(store.get("tensiones").await.is_some());
    }

    #[tokio::test]
    async fn test_cache_hides_external_edits_until_expiry() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::from_secs(60));
        assert_eq!(store.all().await, seed::series());

        std::fs::write(
            dir.path().join("series.json"),
            serde_json::to_string(&vec![azul()]).unwrap(),
        )
        .unwrap();

        // Still inside the TTL window
        assert_eq!(store.all().await, seed::series());

        let fresh = series_store(&dir, Duration::ZERO);
        assert_eq!(fresh.all().await, vec![azul()]);
    }

    #[tokio::test]
    async fn test_write_invalidates_cache() {
        let dir = TempDir::new().unwrap();
        let store = series_store(&dir, Duration::from_secs(60));
        assert!(store.get("azul").await.is_none());

        store.insert(azul()).await.unwrap();
        assert!(store.get("azul").await.is_some());
    }

    #[tokio::test]
    async fn test_read_overlapping_a_write_does_not_cache_old_snapshot() {
        let dir = TempDir::new().unwrap();
        let (storage, pause) = PausingStorage::new(DirStorage::new(dir.path()));
        let store: Arc<CollectionStore<Series, _>> = Arc::new(CollectionStore::new(
            Arc::new(storage),
            seed::series(),
            Duration::from_secs(60),
        ));

        let reader = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.all().await }
        });
        pause.loaded.await.unwrap();

        store.insert(azul()).await.unwrap();
        pause.release.send(()).unwrap();

        // The reader started before the insert, so it sees the old collection
        let old = reader.await.unwrap();
        assert!(!old.contains(&azul()));

        assert_eq!(store.get("azul").await, Some(azul()));
    }

    #[tokio::test]
    async fn test_filter_by_each_status() {
        let dir = TempDir::new().unwrap();
        let store: CollectionStore<Artwork, _> = CollectionStore::new(
            Arc::new(DirStorage::new(dir.path())),
            seed::artworks(),
            Duration::from_secs(5),
        );

        for status in ArtworkStatus::ALL {
            let matching = store.filter(|a| a.status == status).await;
            assert!(!matching.is_empty(), "no {} artworks", status);
            assert!(matching.iter().all(|a| a.status == status));
        }
    }
}
