use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry for a loaded snapshot
#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

#[derive(Debug)]
struct CacheState<T> {
    entry: Option<CacheEntry<T>>,
    generation: u64,
}

/// Single-value cache with a fixed time-to-live.
///
/// Holds the last snapshot read from storage. Writers call `invalidate`
/// so the next read goes back to disk. Every invalidation bumps a
/// generation counter; a reader passes the generation it saw before
/// loading to `put`, and a load that raced with a write is returned to
/// the caller but never stored.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    state: Mutex<CacheState<T>>,
    ttl: Duration,
}

impl<T> SnapshotCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entry: None,
                generation: 0,
            }),
            ttl,
        }
    }

    /// Cached snapshot if it is younger than the TTL
    pub fn get(&self) -> Option<Arc<T>> {
        let mut state = self.state.lock();
        if let Some(cached) = state.entry.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Some(Arc::clone(&cached.value));
            }
        }

        // Expired or empty
        state.entry = None;
        None
    }

    /// Current generation, to be read before loading from storage
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Store `value` if no invalidation happened since `generation`
    pub fn put(&self, value: T, generation: u64) -> Arc<T> {
        let value = Arc::new(value);
        let mut state = self.state.lock();
        if state.generation == generation {
            state.entry = Some(CacheEntry {
                value: Arc::clone(&value),
                loaded_at: Instant::now(),
            });
        } else {
            log::debug!("Discarding snapshot loaded before a write");
        }
        value
    }

    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.entry = None;
        state.generation = state.generation.wrapping_add(1);
    }
}
