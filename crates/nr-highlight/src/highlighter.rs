//! Syntax highlighting adapter.
//!
//! [`Highlighter`] turns raw code into class-annotated HTML using the grammar
//! registered for a language, falling back to [`PLAIN`] for unknown languages.
//!
//! # Security
//!
//! The markup returned here is inserted into the render tree without further
//! escaping. All user text passes through the engine's HTML escaping (or
//! [`html_escape`] on the error path). [`TrustedHtml`] has no public
//! constructor taking raw markup: it comes out of [`Highlighter::highlight`]
//! or [`TrustedHtml::escaped`], never from a plain string.

use std::fmt;
use std::sync::Arc;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxReference;
use syntect::util::LinesWithEndings;

use crate::registry::{GrammarRegistry, PLAIN};

/// HTML markup that is safe to insert verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Markup as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Escape arbitrary text into trusted markup.
    #[must_use]
    pub fn escaped(text: &str) -> Self {
        Self(html_escape::encode_text(text).into_owned())
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Highlights code with a shared [`GrammarRegistry`].
#[derive(Clone, Debug)]
pub struct Highlighter {
    registry: Arc<GrammarRegistry>,
}

impl Highlighter {
    /// Create a highlighter over a frozen registry.
    #[must_use]
    pub fn new(registry: Arc<GrammarRegistry>) -> Self {
        Self { registry }
    }

    /// Registry backing this highlighter.
    #[must_use]
    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// Key of the grammar that will highlight `language`.
    ///
    /// Lookup is exact: `"Python"` does not resolve to `"python"`.
    #[must_use]
    pub fn resolve<'a>(&self, language: &'a str) -> &'a str {
        if self.registry.contains(language) {
            language
        } else {
            tracing::debug!(language, "No grammar registered, using plain");
            PLAIN
        }
    }

    /// Highlight `content` as `language`.
    ///
    /// Never fails: unknown languages use the plain grammar and engine errors
    /// degrade to escaped, unhighlighted text.
    #[must_use]
    pub fn highlight(&self, content: &str, language: &str) -> TrustedHtml {
        let syntax = self
            .registry
            .get(language)
            .unwrap_or_else(|| self.registry.plain());

        match self.generate(syntax, content) {
            Ok(html) => TrustedHtml(html),
            Err(e) => {
                tracing::warn!(language, error = %e, "Highlighting failed, rendering plain text");
                TrustedHtml::escaped(content)
            }
        }
    }

    fn generate(&self, syntax: &SyntaxReference, content: &str) -> Result<String, syntect::Error> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            self.registry.syntaxes(),
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(content) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}
