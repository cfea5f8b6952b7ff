//! Grammar registry and syntax highlighting for code blocks.
//!
//! Setup happens once, before rendering:
//!
//! ```
//! use std::sync::Arc;
//! use nr_highlight::{GrammarRegistry, Highlighter};
//!
//! let registry = GrammarRegistry::with_defaults().expect("plain grammar is a default");
//! let highlighter = Highlighter::new(Arc::new(registry));
//!
//! let html = highlighter.highlight("print(1)", "python");
//! assert!(html.as_str().contains("constant numeric"));
//! ```
//!
//! Custom grammars are installed with loaders:
//!
//! ```
//! use nr_highlight::{GrammarEngine, languages};
//!
//! fn load_shell(engine: &mut GrammarEngine) {
//!     engine.alias("shell", "Bourne Again Shell (bash)");
//! }
//!
//! let mut engine = GrammarEngine::new();
//! engine.register(languages::DEFAULT_LOADERS).register(&[load_shell]);
//! let registry = engine.freeze().unwrap();
//! assert!(registry.contains("shell"));
//! ```

mod highlighter;
pub mod languages;
mod registry;

pub use highlighter::{Highlighter, TrustedHtml};
pub use registry::{
    GrammarEngine, GrammarRegistry, LoaderFn, PLAIN, PLAIN_TEXT_SYNTAX, RegistryError,
};
