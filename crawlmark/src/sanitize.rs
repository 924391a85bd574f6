//! Allow-list markup sanitizer for rendered result fields.
//!
//! Title and URL come from a crawl of arbitrary third-party content, and the
//! query layer is permitted to inject highlighting markup into the title.
//! Everything that reaches the rendered output therefore passes through this
//! boundary: allow-listed inline tags are re-emitted attribute-free, every
//! other tag is dropped (its children are kept, except script and style
//! subtrees which are removed outright), and all text is re-escaped.

use scraper::{Html, Node};
use std::collections::HashSet;

/// Which tags survive sanitization.
#[derive(Debug, Clone, Default)]
pub struct SanitizePolicy {
    allowed_tags: HashSet<&'static str>,
}

impl SanitizePolicy {
    /// Policy for fields the query layer may highlight: the highlighter's
    /// emphasis tags and nothing else.
    #[must_use]
    pub fn highlight() -> Self {
        Self {
            allowed_tags: ["em", "strong", "b", "i", "mark"].into_iter().collect(),
        }
    }

    /// Policy that strips all markup, leaving escaped text.
    #[must_use]
    pub fn text_only() -> Self {
        Self::default()
    }

    /// Whether a tag name survives sanitization.
    #[must_use]
    pub fn allows(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }
}

/// Sanitizes a markup fragment against the given policy.
#[must_use]
pub fn sanitize_markup(input: &str, policy: &SanitizePolicy) -> String {
    let fragment = Html::parse_fragment(input);
    let mut out = String::with_capacity(input.len());
    emit(fragment.tree.root(), policy, &mut out);
    out
}

fn emit(node: ego_tree::NodeRef<'_, Node>, policy: &SanitizePolicy, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_escaped(&text.text, out),
        Node::Element(el) => {
            let name = el.name();
            // Script and style bodies are code, not content; dropping only
            // the tags would surface them as visible text.
            if matches!(name, "script" | "style") {
                return;
            }
            let keep = policy.allows(name);
            if keep {
                out.push('<');
                out.push_str(name);
                out.push('>');
            }
            for child in node.children() {
                emit(child, policy, out);
            }
            if keep {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
        // Fragment/document wrappers, comments, doctypes: descend only.
        _ => {
            for child in node.children() {
                emit(child, policy, out);
            }
        }
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
