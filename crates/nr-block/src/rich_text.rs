//! Rich-text rendering for captions.

use crate::block::{DEFAULT_COLOR, RichTextSpan};
use crate::node::{Element, Node};

/// Renders a sequence of rich-text spans.
pub trait RichTextRenderer: Send + Sync {
    fn render(&self, spans: &[RichTextSpan]) -> Node;
}

/// Default renderer honouring span annotations and links.
///
/// Formatting nests as `<a>` → color `<span>` → `<strong>` → `<em>` → `<s>` →
/// `<u>` → `<code>` → text. Links with a script-capable scheme are rendered
/// as plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotatedTextRenderer;

impl RichTextRenderer for AnnotatedTextRenderer {
    fn render(&self, spans: &[RichTextSpan]) -> Node {
        Node::Fragment(spans.iter().map(render_span).collect())
    }
}

fn render_span(span: &RichTextSpan) -> Node {
    let a = &span.annotations;
    let mut node = Node::Text(span.plain_text.clone());

    for (enabled, tag) in [
        (a.code, "code"),
        (a.underline, "u"),
        (a.strikethrough, "s"),
        (a.italic, "em"),
        (a.bold, "strong"),
    ] {
        if enabled {
            node = Element::new(tag).child(node).into();
        }
    }

    if !a.color.is_empty() && a.color != DEFAULT_COLOR {
        node = Element::new("span")
            .class(format!("notion-{}", a.color.replace('_', "-")))
            .child(node)
            .into();
    }

    match span.href.as_deref() {
        Some(href) if is_safe_href(href) => Element::new("a")
            .class("notion-link")
            .attr("href", href)
            .child(node)
            .into(),
        Some(href) => {
            tracing::warn!(href, "Dropping link with unsafe scheme");
            node
        }
        None => node,
    }
}

/// Whether `href` is safe to emit as a link target.
fn is_safe_href(href: &str) -> bool {
    let scheme_end = href.find(':');
    let path_start = href.find(['/', '?', '#']);
    let scheme = match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if colon < slash => &href[..colon],
        (Some(colon), None) => &href[..colon],
        _ => return true, // relative
    };
    let scheme = scheme.trim().to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto" | "tel")
}
