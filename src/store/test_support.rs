//! Storage wrapper that holds the first read open until released

use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use tokio::sync::oneshot;

use crate::store::traits::{Storage, StoredCopy};

pub struct PausingStorage<S> {
    inner: S,
    gate: Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
}

/// Test side of a `PausingStorage`: `loaded` fires once the first read has
/// its copies, and that read returns only after `release` is sent.
pub struct PauseHandle {
    pub loaded: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

impl<S: Storage> PausingStorage<S> {
    pub fn new(inner: S) -> (Self, PauseHandle) {
        let (loaded_tx, loaded_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let storage = Self {
            inner,
            gate: Mutex::new(Some((loaded_tx, release_rx))),
        };
        let handle = PauseHandle {
            loaded: loaded_rx,
            release: release_tx,
        };
        (storage, handle)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Storage for PausingStorage<S> {
    async fn read_copies(&self, name: &str) -> Vec<StoredCopy> {
        let copies = self.inner.read_copies(name).await;
        let gate = self.gate.lock().take();
        if let Some((loaded, release)) = gate {
            let _ = loaded.send(());
            let _ = release.await;
        }
        copies
    }

    async fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        self.inner.write(name, contents).await
    }
}
