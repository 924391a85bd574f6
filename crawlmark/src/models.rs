//! Data models for crawled documents and review state.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A label mapping as served and accepted by the remote label store:
/// document URL to boolean relevance judgement.
pub type LabelMap = HashMap<String, bool>;

/// A document served by the search index.
///
/// Owned by the query layer and read-only to this core; the `html` field is
/// raw crawled markup from arbitrary third-party pages and must be treated as
/// untrusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Canonical document URL; unique key for labels.
    pub url: String,
    /// Document title; may carry the index's highlighting markup.
    #[serde(default)]
    pub title: String,
    /// Raw crawled HTML.
    #[serde(default)]
    pub html: String,
    /// Extracted plain text.
    #[serde(default)]
    pub text: String,
    /// When the crawler retrieved the page, as epoch milliseconds on the wire.
    #[serde(rename = "retrieved", default)]
    pub retrieved_at: i64,
    /// Result-type/category tag assigned by the classifier.
    #[serde(rename = "_type", default)]
    pub classified_type: String,
}

impl Document {
    /// Creates a new document with the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the raw HTML.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Sets the plain text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the retrieval timestamp from epoch milliseconds.
    #[must_use]
    pub fn with_retrieved_at(mut self, epoch_millis: i64) -> Self {
        self.retrieved_at = epoch_millis;
        self
    }

    /// Sets the classified type tag.
    #[must_use]
    pub fn with_classified_type(mut self, tag: impl Into<String>) -> Self {
        self.classified_type = tag.into();
        self
    }

    /// The retrieval time as a UTC datetime, if the timestamp is representable.
    #[must_use]
    pub fn retrieved_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.retrieved_at).single()
    }
}

/// Backend capability payload from the one-shot startup probe.
///
/// Absence or failure of the probe is a distinct signal from
/// `search_enabled == false` and is modeled at the transport layer, not here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capability {
    /// Whether the backend can serve search for the current crawl.
    #[serde(rename = "searchEnabled", default)]
    pub search_enabled: bool,
}

/// Display fields derived from a [`Document`].
///
/// Cheap, idempotent, and recomputed on every render; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Human-readable summary, at most 350 chars including the ellipsis.
    pub snippet: String,
    /// Absolute thumbnail URL, or empty when no usable image was found.
    pub image_url: String,
}

impl ExtractedContent {
    /// Whether a thumbnail image was found.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}
