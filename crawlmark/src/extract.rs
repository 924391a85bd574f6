//! Best-effort snippet and thumbnail extraction from raw crawled HTML.
//!
//! Crawled markup is untrusted and frequently malformed, so extraction is a
//! real HTML parse (html5ever via `scraper`) restricted to `<meta>` and
//! `<img>` elements rather than pattern matching over the raw bytes. A
//! missing tag is never an error here, just the next fallback branch:
//! og:description falls back to the document's plain text, og:image falls
//! back to the first `<img>`, and the absence of both yields an empty image
//! URL.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::models::{Document, ExtractedContent};
use crate::resolve;

/// Maximum snippet length in chars, including the ellipsis when truncated.
const MAX_SNIPPET_CHARS: usize = 350;

/// Marker appended in place of the final characters of a truncated snippet.
const ELLIPSIS: &str = "...";

/// Derives display fields ([`ExtractedContent`]) from crawled documents.
///
/// Stateless apart from pre-compiled patterns; cheap to construct and clone.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    escaped_newline: Regex,
    whitespace_runs: Regex,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor {
    /// Creates a new extractor.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        // Both patterns are compile-time constants.
        Self {
            escaped_newline: Regex::new(r"\\n").expect("static pattern"),
            whitespace_runs: Regex::new(r"\s\s+").expect("static pattern"),
        }
    }

    /// Extracts both display fields in one pass.
    #[must_use]
    pub fn extract(&self, doc: &Document) -> ExtractedContent {
        let html = Html::parse_document(&doc.html);
        ExtractedContent {
            snippet: self.snippet_from(&html, &doc.text),
            image_url: self.image_from(&html, &doc.url),
        }
    }

    /// Extracts a truncated, whitespace-normalized snippet.
    ///
    /// Prefers `"{og:description} || {text}"` when the page carries an
    /// OpenGraph description; otherwise uses the plain text alone.
    #[must_use]
    pub fn extract_snippet(&self, doc: &Document) -> String {
        let html = Html::parse_document(&doc.html);
        self.snippet_from(&html, &doc.text)
    }

    /// Extracts an absolute thumbnail URL, or `""` when no image was found
    /// or its source could not be resolved.
    #[must_use]
    pub fn extract_image(&self, doc: &Document) -> String {
        let html = Html::parse_document(&doc.html);
        self.image_from(&html, &doc.url)
    }

    fn snippet_from(&self, html: &Html, text: &str) -> String {
        let raw = match og_meta_content(html, "og:description") {
            Some(desc) => format!("{desc} || {text}"),
            None => text.to_string(),
        };

        // Crawled text often carries escaped newlines as literal backslash-n;
        // collapse those first, then runs of whitespace.
        let collapsed = self.escaped_newline.replace_all(&raw, " ");
        let clean = self.whitespace_runs.replace_all(&collapsed, " ");
        truncate_snippet(&clean)
    }

    fn image_from(&self, html: &Html, base_url: &str) -> String {
        let candidate = og_meta_content(html, "og:image").or_else(|| first_img_src(html));
        let Some(candidate) = candidate else {
            return String::new();
        };

        match resolve::resolve(&candidate, base_url) {
            Ok(url) => url,
            Err(err) => {
                // A broken image source is a display degradation, not fatal.
                debug!(%base_url, %err, "image URL resolution failed");
                String::new()
            }
        }
    }
}

/// Finds the content attribute of the first `<meta>` whose `property`
/// matches `property` case-insensitively.
///
/// Attribute values are entity-decoded by the parse, so `&amp;` in a content
/// URL comes back as `&`.
fn og_meta_content(html: &Html, property: &str) -> Option<String> {
    let selector = static_selector("meta")?;
    html.select(&selector)
        .find(|el| {
            el.value()
                .attr("property")
                .is_some_and(|p| p.eq_ignore_ascii_case(property))
        })
        .and_then(|el| el.value().attr("content"))
        .map(String::from)
}

/// Finds the `src` of the first `<img>` element carrying one.
fn first_img_src(html: &Html) -> Option<String> {
    let selector = static_selector("img")?;
    html.select(&selector)
        .find_map(|el| el.value().attr("src"))
        .map(String::from)
}

fn static_selector(css: &str) -> Option<Selector> {
    // Selectors used here are constant element names; parse cannot fail.
    Selector::parse(css).ok()
}

/// Truncates to [`MAX_SNIPPET_CHARS`] chars, replacing the final characters
/// with an ellipsis when truncation occurs.
fn truncate_snippet(clean: &str) -> String {
    if clean.chars().count() <= MAX_SNIPPET_CHARS {
        return clean.to_string();
    }
    let mut out: String = clean
        .chars()
        .take(MAX_SNIPPET_CHARS - ELLIPSIS.len())
        .collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(html: &str, text: &str) -> Document {
        Document::new("http://example.com/dir/page.html")
            .with_html(html)
            .with_text(text)
    }

    #[test]
    fn test_snippet_prefers_og_description() {
        let d = doc(
            r#"<html><head><meta property="og:description" content="Desc"></head></html>"#,
            "Body text",
        );
        assert_eq!(ContentExtractor::new().extract_snippet(&d), "Desc || Body text");
    }

    #[test]
    fn test_snippet_og_property_case_insensitive() {
        let d = doc(
            r#"<META PROPERTY="OG:DESCRIPTION" CONTENT="Desc">"#,
            "Body",
        );
        assert_eq!(ContentExtractor::new().extract_snippet(&d), "Desc || Body");
    }

    #[test]
    fn test_snippet_falls_back_to_text() {
        let d = doc("<html><body><p>nothing structured</p></body></html>", "hello");
        assert_eq!(ContentExtractor::new().extract_snippet(&d), "hello");
    }

    #[test]
    fn test_snippet_meta_without_content_falls_back() {
        let d = doc(r#"<meta property="og:description">"#, "hello");
        assert_eq!(ContentExtractor::new().extract_snippet(&d), "hello");
    }

    #[test]
    fn test_snippet_collapses_escaped_newlines_and_whitespace() {
        let d = doc("", r"first\nsecond    third");
        assert_eq!(
            ContentExtractor::new().extract_snippet(&d),
            "first second third"
        );
    }

    #[test]
    fn test_snippet_truncates_to_350_with_ellipsis() {
        let text = "x".repeat(400);
        let d = doc("", &text);
        let snippet = ContentExtractor::new().extract_snippet(&d);

        assert_eq!(snippet.chars().count(), 350);
        assert!(snippet.ends_with("..."));
        assert_eq!(&snippet[..347], &text[..347]);
    }

    #[test]
    fn test_snippet_at_limit_not_truncated() {
        let text = "y".repeat(350);
        let d = doc("", &text);
        assert_eq!(ContentExtractor::new().extract_snippet(&d), text);
    }

    #[test]
    fn test_image_prefers_og_image() {
        let d = doc(
            r#"<meta property="og:image" content="http://cdn.example.com/og.png">
               <img src="http://example.com/first.png">"#,
            "",
        );
        assert_eq!(
            ContentExtractor::new().extract_image(&d),
            "http://cdn.example.com/og.png"
        );
    }

    #[test]
    fn test_image_entities_decoded() {
        let d = doc(
            r#"<meta property="og:image" content="http://cdn.example.com/a.png?w=1&amp;h=2">"#,
            "",
        );
        assert_eq!(
            ContentExtractor::new().extract_image(&d),
            "http://cdn.example.com/a.png?w=1&h=2"
        );
    }

    #[test]
    fn test_image_falls_back_to_first_img() {
        let d = doc(r#"<body><img src="img/a.png" alt=""></body>"#, "");
        assert_eq!(
            ContentExtractor::new().extract_image(&d),
            "http://example.com/dir/img/a.png"
        );
    }

    #[test]
    fn test_image_protocol_relative() {
        let d = doc(r#"<img src="//cdn.example.com/a.png">"#, "");
        assert_eq!(
            ContentExtractor::new().extract_image(&d),
            "http://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_no_image_yields_empty() {
        let d = doc("<html><body><p>text only</p></body></html>", "");
        assert_eq!(ContentExtractor::new().extract_image(&d), "");
    }

    #[test]
    fn test_unresolvable_image_yields_empty() {
        let mut d = doc(r#"<img src="img/a.png">"#, "");
        d.url = "not an absolute url".to_string();
        assert_eq!(ContentExtractor::new().extract_image(&d), "");
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let d = doc(r#"<meta property="og:description" content="unclosed"#, "fallback");
        // html5ever recovers or drops the tag; either way extraction is total.
        let snippet = ContentExtractor::new().extract_snippet(&d);
        assert!(!snippet.is_empty());
    }

    #[test]
    fn test_extract_combines_both_fields() {
        let d = doc(
            r#"<meta property="og:description" content="Desc"><img src="/a.png">"#,
            "Body",
        );
        let content = ContentExtractor::new().extract(&d);
        assert_eq!(content.snippet, "Desc || Body");
        assert_eq!(content.image_url, "http://example.com/a.png");
        assert!(content.has_image());
    }
}
