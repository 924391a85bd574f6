//! Renders one search result and dispatches label changes.

use std::sync::Arc;

use chrono::{Datelike, Timelike};

use crate::extract::ContentExtractor;
use crate::labels::LabelStore;
use crate::models::{Document, LabelMap};
use crate::sanitize::{sanitize_markup, SanitizePolicy};

/// Display-ready fields for one result entry.
///
/// All markup-bearing fields have already passed the sanitizer boundary:
/// `title` keeps the highlighter's emphasis tags, `url` and `snippet` are
/// fully escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Sanitized title markup.
    pub title: String,
    /// Escaped document URL, also the link target.
    pub url: String,
    /// Escaped snippet text.
    pub snippet: String,
    /// Absolute thumbnail URL, or empty when none was found.
    pub image_url: String,
    /// Formatted crawl time, or empty when the timestamp is unusable.
    pub crawl_time: String,
    /// Category tag from the classifier, surfaced verbatim.
    pub classified_as: String,
    /// Whether the operator has labeled this document relevant.
    pub relevant: bool,
    /// Whether the operator has labeled this document irrelevant.
    pub irrelevant: bool,
}

/// Composes extraction, sanitization, and label state for one document.
pub struct ResultPresenter {
    store: Arc<LabelStore>,
    extractor: ContentExtractor,
    highlight: SanitizePolicy,
    text_only: SanitizePolicy,
}

impl ResultPresenter {
    /// Creates a presenter over a shared label store.
    #[must_use]
    pub fn new(store: Arc<LabelStore>) -> Self {
        Self {
            store,
            extractor: ContentExtractor::new(),
            highlight: SanitizePolicy::highlight(),
            text_only: SanitizePolicy::text_only(),
        }
    }

    /// Renders the document's current display state.
    ///
    /// Extraction is recomputed on every call; it is a cheap pure function
    /// of the document and caching it would only risk staleness against the
    /// label cache.
    #[must_use]
    pub fn render(&self, doc: &Document) -> ResultView {
        let content = self.extractor.extract(doc);
        ResultView {
            // Title is the one field the query layer may highlight.
            title: sanitize_markup(&doc.title, &self.highlight),
            url: sanitize_markup(&doc.url, &self.text_only),
            snippet: sanitize_markup(&content.snippet, &self.text_only),
            image_url: content.image_url,
            crawl_time: format_crawl_time(doc),
            classified_as: doc.classified_type.clone(),
            relevant: self.store.is_relevant(&doc.url),
            irrelevant: self.store.is_irrelevant(&doc.url),
        }
    }

    /// Labels the document relevant and re-renders on completion.
    pub async fn mark_relevant(&self, doc: &Document) -> ResultView {
        self.label_as(doc, true).await
    }

    /// Labels the document irrelevant and re-renders on completion.
    pub async fn mark_irrelevant(&self, doc: &Document) -> ResultView {
        self.label_as(doc, false).await
    }

    async fn label_as(&self, doc: &Document, feedback: bool) -> ResultView {
        let partial = LabelMap::from([(doc.url.clone(), feedback)]);
        // A failed send leaves the cache unchanged; the refreshed view then
        // simply shows the previous label state.
        self.store.send_labels(partial).await;
        self.render(doc)
    }
}

/// Formats the crawl time as `YYYY-MM-DD hh:mm:ss` on a 12-hour clock with
/// no am/pm marker, matching the dashboard's established display format:
/// afternoon hours wrap, and both midnight and noon render as 12. Unusable
/// timestamps yield an empty string.
fn format_crawl_time(doc: &Document) -> String {
    let Some(dt) = doc.retrieved_datetime() else {
        return String::new();
    };
    let hour = match dt.hour() {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        hour,
        dt.minute(),
        dt.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticLabelTransport;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn presenter() -> ResultPresenter {
        ResultPresenter::new(Arc::new(LabelStore::new(Arc::new(
            StaticLabelTransport::empty(),
        ))))
    }

    fn millis(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_render_unlabeled_document() {
        let doc = Document::new("http://example.com/page")
            .with_title("found <em>term</em>")
            .with_html(r#"<meta property="og:description" content="Desc">"#)
            .with_text("Body")
            .with_classified_type("relevant");

        let view = presenter().render(&doc);
        assert_eq!(view.title, "found <em>term</em>");
        assert_eq!(view.url, "http://example.com/page");
        assert_eq!(view.snippet, "Desc || Body");
        assert_eq!(view.classified_as, "relevant");
        assert!(!view.relevant);
        assert!(!view.irrelevant);
    }

    #[test]
    fn test_render_sanitizes_hostile_title() {
        let doc = Document::new("http://example.com")
            .with_title(r#"<img src=x onerror=alert(1)>safe<em>hit</em>"#);

        let view = presenter().render(&doc);
        assert_eq!(view.title, "safe<em>hit</em>");
    }

    #[tokio::test]
    async fn test_mark_relevant_refreshes_view() {
        let p = presenter();
        let doc = Document::new("http://example.com/page").with_text("hello");

        let before = p.render(&doc);
        assert!(!before.relevant);

        let after = p.mark_relevant(&doc).await;
        assert!(after.relevant);
        assert!(!after.irrelevant);
    }

    #[tokio::test]
    async fn test_mark_irrelevant_overrides_relevant() {
        let p = presenter();
        let doc = Document::new("http://example.com/page");

        p.mark_relevant(&doc).await;
        let view = p.mark_irrelevant(&doc).await;
        assert!(view.irrelevant);
        assert!(!view.relevant);
    }

    #[tokio::test]
    async fn test_mark_with_failed_send_keeps_previous_state() {
        let p = ResultPresenter::new(Arc::new(LabelStore::new(Arc::new(
            StaticLabelTransport::failing(),
        ))));
        let doc = Document::new("http://example.com/page");

        // The action completes and re-renders even though nothing was saved.
        let view = p.mark_relevant(&doc).await;
        assert!(!view.relevant);
        assert!(!view.irrelevant);
    }

    #[test]
    fn test_crawl_time_format() {
        let doc =
            Document::new("http://example.com").with_retrieved_at(millis(2017, 3, 5, 15, 4, 9));
        assert_eq!(presenter().render(&doc).crawl_time, "2017-03-05 03:04:09");
    }

    #[test]
    fn test_crawl_time_midnight_renders_as_12() {
        let doc =
            Document::new("http://example.com").with_retrieved_at(millis(2017, 3, 5, 0, 30, 0));
        assert_eq!(presenter().render(&doc).crawl_time, "2017-03-05 12:30:00");
    }

    #[test]
    fn test_crawl_time_afternoon_wraps() {
        let doc =
            Document::new("http://example.com").with_retrieved_at(millis(2017, 3, 5, 23, 59, 59));
        assert_eq!(presenter().render(&doc).crawl_time, "2017-03-05 11:59:59");
    }

    #[test]
    fn test_crawl_time_noon_unwrapped() {
        let doc =
            Document::new("http://example.com").with_retrieved_at(millis(2017, 3, 5, 12, 0, 0));
        assert_eq!(presenter().render(&doc).crawl_time, "2017-03-05 12:00:00");
    }
}
