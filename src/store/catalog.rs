use std::sync::Arc;
use std::time::Duration;

use crate::model::{Artwork, Contact, Exhibition, Record, Series};
use crate::seed;
use crate::store::collection::CollectionStore;
use crate::store::document::DocumentStore;
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::Storage;

/// Every store the site needs, sharing one storage backend.
pub struct Catalog<S> {
    pub artworks: CollectionStore<Artwork, S>,
    pub exhibitions: CollectionStore<Exhibition, S>,
    pub series: CollectionStore<Series, S>,
    pub contact: DocumentStore<Contact, S>,
}

impl<S: Storage> Catalog<S> {
    /// Catalog seeded with the compiled-in dataset
    pub fn new(storage: S, cache_ttl: Duration) -> Self {
        let storage = Arc::new(storage);
        Self {
            artworks: CollectionStore::new(Arc::clone(&storage), seed::artworks(), cache_ttl),
            exhibitions: CollectionStore::new(Arc::clone(&storage), seed::exhibitions(), cache_ttl),
            series: CollectionStore::new(Arc::clone(&storage), seed::series(), cache_ttl),
            contact: DocumentStore::new(storage, seed::contact(), cache_ttl),
        }
    }

    /// Number of artworks filed under series `id`, or `None` if the series does not exist
    pub async fn series_usage(&self, id: &str) -> Option<usize> {
        let series = self.series.get(id).await?;
        Some(self.artworks.count(|artwork| series.contains(artwork)).await)
    }

    /// Delete a series unless artworks still reference it by name.
    ///
    /// Returns `Ok(false)` if the series does not exist and
    /// `StoreError::InUse` if it is still referenced. Artwork writes are
    /// held off until the decision is made; lock order is artworks, then series.
    pub async fn delete_series(&self, id: &str) -> StoreResult<bool> {
        let (_artworks_guard, artworks) = self.artworks.lock_fresh().await;
        self.series
            .remove_if(id, |series| {
                let count = artworks.iter().filter(|a| series.contains(a)).count();
                if count > 0 {
                    log::info!("Refusing to delete series {}: {} artwork(s) use it", id, count);
                    return Err(StoreError::InUse { count });
                }
                Ok(())
            })
            .await
    }
}

/// Access to the collection holding a given record type
pub trait CatalogEntity: Record {
    fn collection<S: Storage>(catalog: &Catalog<S>) -> &CollectionStore<Self, S>;
}

impl CatalogEntity for Artwork {
    fn collection<S: Storage>(catalog: &Catalog<S>) -> &CollectionStore<Self, S> {
        &catalog.artworks
    }
}

impl CatalogEntity for Exhibition {
    fn collection<S: Storage>(catalog: &Catalog<S>) -> &CollectionStore<Self, S> {
        &catalog.exhibitions
    }
}

impl CatalogEntity for Series {
    fn collection<S: Storage>(catalog: &Catalog<S>) -> &CollectionStore<Self, S> {
        &catalog.series
    }
}
