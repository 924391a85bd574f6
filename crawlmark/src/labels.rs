//! Client-side label cache synchronized with the remote label store.
//!
//! The store is an explicitly owned instance created once per session and
//! shared by `Arc`, never a process-wide global. Reads are served from the
//! local cache; writes go to the remote store and, on success, the response
//! replaces the whole cache (replace-on-success, not merge). Transport
//! failures degrade: the cache stays as it was, a diagnostic is logged, and
//! the call still completes so a waiting UI refresh is never blocked.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::LabelMap;
use crate::transport::LabelTransport;

/// Cache of operator relevance labels, keyed by document URL.
///
/// A label is tri-state to consumers: relevant, irrelevant, or absent
/// (unlabeled). Absent and irrelevant are distinct; only
/// [`is_irrelevant`](Self::is_irrelevant) reports an explicit `false` label.
pub struct LabelStore {
    transport: Arc<dyn LabelTransport>,
    cache: RwLock<LabelMap>,
    // Serializes sends FIFO so the last write intent wins, rather than the
    // last response to arrive.
    send_lock: Mutex<()>,
}

impl LabelStore {
    /// Creates a store with an empty cache.
    ///
    /// Until [`hydrate`](Self::hydrate) completes, every key reads as
    /// unlabeled; an empty cache is not an error state.
    #[must_use]
    pub fn new(transport: Arc<dyn LabelTransport>) -> Self {
        Self {
            transport,
            cache: RwLock::new(LabelMap::new()),
            send_lock: Mutex::new(()),
        }
    }

    /// Fetches the full label mapping from the remote store.
    ///
    /// On transport failure the cache is left empty and a diagnostic is
    /// emitted; there is no automatic retry.
    pub async fn hydrate(&self) {
        match self.transport.fetch_labels().await {
            Ok(labels) => {
                debug!(count = labels.len(), "label cache hydrated");
                *self.cache.write() = labels;
            }
            Err(err) => {
                warn!(%err, "failed to fetch labels from server");
            }
        }
    }

    /// Spawns [`hydrate`](Self::hydrate) onto the runtime.
    pub fn spawn_hydrate(self: &Arc<Self>) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.hydrate().await;
        });
    }

    /// Whether the cached label for `url` is exactly `true`.
    ///
    /// Returns `false` for both absent and explicitly-irrelevant labels.
    #[must_use]
    pub fn is_relevant(&self, url: &str) -> bool {
        self.cache.read().get(url) == Some(&true)
    }

    /// Whether the cached label for `url` is exactly `false`.
    #[must_use]
    pub fn is_irrelevant(&self, url: &str) -> bool {
        self.cache.read().get(url) == Some(&false)
    }

    /// The raw tri-state label for `url`: `Some(true)` relevant,
    /// `Some(false)` irrelevant, `None` unlabeled.
    #[must_use]
    pub fn label_for(&self, url: &str) -> Option<bool> {
        self.cache.read().get(url).copied()
    }

    /// Number of cached labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether the cache holds no labels yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Sends a partial mapping to the remote store.
    ///
    /// Sends are serialized FIFO, so concurrent calls apply in submission
    /// order and a completion always observes the response it triggered. On
    /// success the response becomes the new full cache and `true` is
    /// returned. On failure the cache is unchanged (stale but available),
    /// the failure is logged, and `false` is returned; either way the call
    /// completes normally.
    pub async fn send_labels(&self, partial: LabelMap) -> bool {
        let _intent = self.send_lock.lock().await;
        match self.transport.update_labels(&partial).await {
            Ok(full) => {
                *self.cache.write() = full;
                true
            }
            Err(err) => {
                warn!(%err, keys = partial.len(), "failed to send labels to server");
                false
            }
        }
    }
}

impl std::fmt::Debug for LabelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelStore")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}
