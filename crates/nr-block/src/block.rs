//! Code block data model.
//!
//! Mirrors the `code` payload of a Notion block:
//!
//! ```json
//! {
//!   "caption": [],
//!   "rich_text": [{ "plain_text": "print(1)" }],
//!   "language": "python"
//! }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A code block as supplied by the document renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeBlock {
    /// Caption spans; empty when the block has no caption.
    #[serde(default)]
    pub caption: Vec<RichTextSpan>,
    /// Code spans, concatenated to form the block content.
    #[serde(default)]
    pub rich_text: Vec<RichTextSpan>,
    /// Language identifier, used verbatim as the grammar key.
    #[serde(default)]
    pub language: String,
}

impl CodeBlock {
    /// Create a block with a single code span and no caption.
    #[must_use]
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            caption: Vec::new(),
            rich_text: vec![RichTextSpan::plain(content)],
            language: language.into(),
        }
    }

    /// Replace the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: Vec<RichTextSpan>) -> Self {
        self.caption = caption;
        self
    }

    /// Full plain-text content of the block.
    #[must_use]
    pub fn content(&self) -> String {
        plain_text(&self.rich_text)
    }

    /// Language name for display.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        display_label(&self.language)
    }
}

/// A unit of rich text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RichTextSpan {
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichTextSpan {
    /// Unformatted span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }
}

/// Inline formatting of a [`RichTextSpan`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: DEFAULT_COLOR.to_owned(),
        }
    }
}

/// Color value meaning "no color".
pub const DEFAULT_COLOR: &str = "default";

/// Concatenate the plain text of `spans`, with no separator.
#[must_use]
pub fn plain_text(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}

/// Display form of a language identifier.
///
/// Upper-cases the first character when it is an ASCII lowercase letter and
/// leaves everything else untouched.
///
/// ```
/// use nr_block::display_label;
///
/// assert_eq!(display_label("go"), "Go");
/// assert_eq!(display_label("TypeScript"), "TypeScript");
/// ```
#[must_use]
pub fn display_label(language: &str) -> Cow<'_, str> {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            Cow::Owned(format!("{}{}", first.to_ascii_uppercase(), chars.as_str()))
        }
        _ => Cow::Borrowed(language),
    }
}
