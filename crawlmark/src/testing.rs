//! In-memory transport fakes for tests and examples.
//!
//! These stand in for the remote crawler API without a network: the label
//! fake keeps a server-side mapping and merges updates into it the way the
//! real service does, and the capability fake replays a scripted sequence of
//! probe outcomes so retry behavior can be exercised deterministically.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::CrawlmarkError;
use crate::models::{Capability, LabelMap};
use crate::transport::{CapabilityTransport, LabelTransport};

/// Label transport fake backed by an in-memory mapping.
#[derive(Debug, Default)]
pub struct StaticLabelTransport {
    state: Mutex<LabelMap>,
    fail_fetches: bool,
    fail_updates: bool,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl StaticLabelTransport {
    /// A fake with no labels on the server yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fake whose server already holds the given labels.
    #[must_use]
    pub fn with_labels(labels: LabelMap) -> Self {
        Self {
            state: Mutex::new(labels),
            ..Self::default()
        }
    }

    /// A fake where every call fails at the transport level.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_fetches: true,
            fail_updates: true,
            ..Self::default()
        }
    }

    /// Number of fetches made against this fake.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of updates made against this fake.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LabelTransport for StaticLabelTransport {
    async fn fetch_labels(&self) -> Result<LabelMap, CrawlmarkError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches {
            return Err(CrawlmarkError::transport("GET /labels"));
        }
        Ok(self.state.lock().clone())
    }

    async fn update_labels(&self, partial: &LabelMap) -> Result<LabelMap, CrawlmarkError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates {
            return Err(CrawlmarkError::transport("PUT /labels"));
        }
        let mut state = self.state.lock();
        state.extend(partial.iter().map(|(k, v)| (k.clone(), *v)));
        Ok(state.clone())
    }
}

/// Capability transport fake replaying a scripted sequence of outcomes.
///
/// `None` entries are transport failures. The final entry repeats once the
/// script is exhausted; an empty script always fails.
#[derive(Debug)]
pub struct StaticCapabilityTransport {
    outcomes: Mutex<VecDeque<Option<Capability>>>,
    calls: AtomicUsize,
}

impl StaticCapabilityTransport {
    /// A probe that always answers with the given enablement.
    #[must_use]
    pub fn enabled(search_enabled: bool) -> Self {
        Self::sequence(vec![Some(Capability { search_enabled })])
    }

    /// A probe that always fails at the transport level.
    #[must_use]
    pub fn failing() -> Self {
        Self::sequence(Vec::new())
    }

    /// A probe that replays the given outcomes in order.
    #[must_use]
    pub fn sequence(outcomes: Vec<Option<Capability>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of probes made against this fake.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityTransport for StaticCapabilityTransport {
    async fn fetch_capability(&self) -> Result<Capability, CrawlmarkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut outcomes = self.outcomes.lock();
        let outcome = if outcomes.len() > 1 {
            outcomes.pop_front().flatten()
        } else {
            outcomes.front().cloned().flatten()
        };
        outcome.ok_or_else(|| CrawlmarkError::transport("GET /"))
    }
}
