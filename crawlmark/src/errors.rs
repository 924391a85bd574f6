//! Error types for the crawlmark core.
//!
//! The public surface of this crate is deliberately hard to fail: every
//! degradation a remote backend can cause is absorbed into a sentinel value
//! (empty cache, empty image URL, `Unavailable` state) so the review UI stays
//! usable. The variants below exist for the seams where a failure still has
//! to travel between layers before it is absorbed.

use thiserror::Error;

/// The main error type for crawlmark operations.
#[derive(Debug, Error)]
pub enum CrawlmarkError {
    /// A network or HTTP failure on one of the remote calls.
    #[error("transport failure: {context}")]
    Transport {
        /// What the transport was doing when it failed.
        context: String,
    },

    /// The document URL used as a resolution base is not a valid absolute URL.
    #[error("malformed base URL: {base}")]
    MalformedBaseUrl {
        /// The offending base URL.
        base: String,
    },

    /// A remote payload could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CrawlmarkError {
    /// Creates a transport error with context about the failed call.
    #[must_use]
    pub fn transport(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }

    /// Creates a malformed-base-URL error.
    #[must_use]
    pub fn malformed_base(base: impl Into<String>) -> Self {
        Self::MalformedBaseUrl { base: base.into() }
    }

    /// Whether this error represents a remote transport failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
