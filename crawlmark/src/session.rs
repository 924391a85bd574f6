//! Session composition root: wires transports, the label store, and the
//! availability machine, and gates presenter creation on the probe outcome.

use std::sync::Arc;

use crate::availability::{SearchAvailability, SearchState};
use crate::config::ReviewConfig;
use crate::labels::LabelStore;
use crate::presenter::ResultPresenter;
use crate::transport::{CapabilityTransport, LabelTransport};

/// One review session over a crawl index.
///
/// Owns the label store and availability state for its lifetime; both are
/// created here and torn down when the session drops. Presenters are only
/// handed out while search is [`SearchState::Available`].
pub struct ReviewSession {
    config: ReviewConfig,
    capability: Arc<dyn CapabilityTransport>,
    availability: Arc<SearchAvailability>,
    store: Arc<LabelStore>,
}

impl ReviewSession {
    /// Creates a session over explicit transports.
    ///
    /// Nothing is fetched yet; call [`launch`](Self::launch) to start the
    /// capability probe and label hydration in the background, or
    /// [`run_startup`](Self::run_startup) to await them.
    #[must_use]
    pub fn new(
        config: ReviewConfig,
        labels: Arc<dyn LabelTransport>,
        capability: Arc<dyn CapabilityTransport>,
    ) -> Self {
        Self {
            config,
            capability,
            availability: Arc::new(SearchAvailability::new()),
            store: Arc::new(LabelStore::new(labels)),
        }
    }

    /// Creates a session backed by the HTTP API from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::CrawlmarkError::Transport`] when the HTTP
    /// client cannot be constructed.
    #[cfg(feature = "http")]
    pub fn connect(config: ReviewConfig) -> Result<Self, crate::errors::CrawlmarkError> {
        let api = Arc::new(crate::transport::HttpApi::new(&config)?);
        Ok(Self::new(
            config,
            Arc::clone(&api) as Arc<dyn LabelTransport>,
            api as Arc<dyn CapabilityTransport>,
        ))
    }

    /// Spawns the startup work without blocking the caller: label hydration
    /// and the capability probe, each on its own task.
    pub fn launch(&self) {
        self.store.spawn_hydrate();

        let availability = Arc::clone(&self.availability);
        let capability = Arc::clone(&self.capability);
        let retry = self.config.retry.clone();
        tokio::spawn(async move {
            availability.run_probe(capability.as_ref(), &retry).await;
        });
    }

    /// Runs the startup work to completion. Deterministic alternative to
    /// [`launch`](Self::launch) for tests and command-line callers.
    pub async fn run_startup(&self) {
        tokio::join!(
            self.store.hydrate(),
            self.availability
                .run_probe(self.capability.as_ref(), &self.config.retry),
        );
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Current availability state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.availability.state()
    }

    /// The session's label store.
    #[must_use]
    pub fn store(&self) -> &Arc<LabelStore> {
        &self.store
    }

    /// Returns a presenter for rendering results, or `None` while search is
    /// loading or unavailable.
    #[must_use]
    pub fn presenter(&self) -> Option<ResultPresenter> {
        if self.availability.is_available() {
            Some(ResultPresenter::new(Arc::clone(&self.store)))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("state", &self.state())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
