//! Image URL normalization and resolution.
//!
//! Crawled pages reference images with absolute, protocol-relative, and
//! relative paths. This module turns any of those into a fully qualified
//! absolute URL against the document's own URL, without touching the network.

use url::Url;

use crate::errors::CrawlmarkError;

/// Resolves a possibly-relative URL against a base document URL.
///
/// - Candidates already carrying an `http://` or `https://` scheme are
///   returned unchanged.
/// - Protocol-relative candidates (`//host/path`) are given an `http:` scheme.
/// - Anything else is resolved as a relative reference against `base_url`
///   per RFC 3986, the way a browser `URL` constructor would (`./`, `../`,
///   path-relative, query and fragment handling included).
///
/// # Errors
///
/// Returns [`CrawlmarkError::MalformedBaseUrl`] when `base_url` is not a
/// valid absolute URL (or the join is impossible). Callers are expected to
/// degrade to an empty image URL rather than propagate.
pub fn resolve(candidate: &str, base_url: &str) -> Result<String, CrawlmarkError> {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Ok(candidate.to_string());
    }
    if candidate.starts_with("//") {
        return Ok(format!("http:{candidate}"));
    }

    let base = Url::parse(base_url).map_err(|_| CrawlmarkError::malformed_base(base_url))?;
    let resolved = base
        .join(candidate)
        .map_err(|_| CrawlmarkError::malformed_base(base_url))?;
    Ok(resolved.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_http_unchanged() {
        assert_eq!(
            resolve("http://x/a.png", "http://example.com").unwrap(),
            "http://x/a.png"
        );
    }

    #[test]
    fn test_absolute_https_unchanged() {
        assert_eq!(
            resolve("https://x/a.png", "http://example.com").unwrap(),
            "https://x/a.png"
        );
    }

    #[test]
    fn test_protocol_relative_gets_http() {
        assert_eq!(
            resolve("//cdn.example.com/a.png", "http://example.com").unwrap(),
            "http://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_path_relative_resolves_against_directory() {
        assert_eq!(
            resolve("img/a.png", "http://example.com/dir/page.html").unwrap(),
            "http://example.com/dir/img/a.png"
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            resolve("/static/a.png", "http://example.com/dir/page.html").unwrap(),
            "http://example.com/static/a.png"
        );
    }

    #[test]
    fn test_dot_segments() {
        assert_eq!(
            resolve("../up.png", "http://example.com/a/b/page.html").unwrap(),
            "http://example.com/a/up.png"
        );
        assert_eq!(
            resolve("./here.png", "http://example.com/a/page.html").unwrap(),
            "http://example.com/a/here.png"
        );
    }

    #[test]
    fn test_base_query_and_fragment_stripped() {
        assert_eq!(
            resolve("a.png", "http://example.com/dir/page.html?q=1#frag").unwrap(),
            "http://example.com/dir/a.png"
        );
    }

    #[test]
    fn test_malformed_base_errors() {
        let err = resolve("a.png", "not a base url").unwrap_err();
        assert!(matches!(err, CrawlmarkError::MalformedBaseUrl { .. }));
    }
}
