//! Availability state machine gating whether search is offered at all.
//!
//! Driven by a single capability probe at session startup. Transport
//! failures are retried with exponential backoff, but once a terminal state
//! is reached it holds for the rest of the session: there is no transition
//! back to `Loading` and no automatic re-probe.

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::transport::CapabilityTransport;

/// Reason reported when the crawler API cannot be reached.
pub const REASON_CONNECTION_FAILED: &str = "connection failed";

/// Reason reported when the backend serves this crawl without search.
pub const REASON_NOT_ENABLED: &str = "search not enabled for this crawl";

/// Session-level search availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Probe still in flight; the initial state.
    Loading,
    /// Search cannot be offered; `reason` is the only user-facing error
    /// string this core produces.
    Unavailable {
        /// Why search is not offered.
        reason: String,
    },
    /// Search is usable for this crawl.
    Available,
}

impl SearchState {
    /// Whether this is a terminal state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// One-shot availability machine: `Loading` → `Unavailable` | `Available`.
#[derive(Debug)]
pub struct SearchAvailability {
    state: RwLock<SearchState>,
}

impl Default for SearchAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAvailability {
    /// Creates the machine in its `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SearchState::Loading),
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.read().clone()
    }

    /// Whether search may be offered.
    #[must_use]
    pub fn is_available(&self) -> bool {
        *self.state.read() == SearchState::Available
    }

    /// Runs the capability probe and settles the state exactly once.
    ///
    /// Transport failures are retried per `retry` with exponential backoff;
    /// a definitive answer (either enablement value) is never retried. If
    /// the state was already settled by the time the probe completes, the
    /// late result is ignored.
    pub async fn run_probe(&self, transport: &dyn CapabilityTransport, retry: &RetryConfig) {
        let mut attempt = 0;
        let next = loop {
            match transport.fetch_capability().await {
                Ok(capability) if capability.search_enabled => break SearchState::Available,
                Ok(_) => {
                    break SearchState::Unavailable {
                        reason: REASON_NOT_ENABLED.to_string(),
                    }
                }
                Err(err) => {
                    if attempt >= retry.max_retries {
                        warn!(%err, attempts = attempt + 1, "capability probe failed");
                        break SearchState::Unavailable {
                            reason: REASON_CONNECTION_FAILED.to_string(),
                        };
                    }
                    debug!(%err, attempt, "capability probe failed, retrying");
                    tokio::time::sleep(retry.delay_for_attempt(attempt)).await;
                    attempt += 1;
                }
            }
        };
        self.settle(next);
    }

    fn settle(&self, next: SearchState) {
        let mut state = self.state.write();
        if state.is_settled() {
            debug!(?next, "ignoring late probe result");
            return;
        }
        *state = next;
    }
}
