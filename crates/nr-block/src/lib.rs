//! Highlighted, copyable code blocks.
//!
//! Turns a Notion-style [`CodeBlock`] into a [`Node`] tree: a language label,
//! a copy button, highlighted code, an optional caption and a "Copied"
//! tooltip driven by [`FeedbackController`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use nr_block::{CodeBlock, CodeBlockView, MemoryClipboard, RenderContext};
//! use nr_highlight::{GrammarRegistry, Highlighter};
//!
//! let registry = Arc::new(GrammarRegistry::with_defaults().unwrap());
//! let ctx = RenderContext::new(Highlighter::new(registry));
//!
//! let block = CodeBlock::new("print(1)", "python");
//! let mut view = CodeBlockView::mount(&ctx);
//!
//! let mut clipboard = MemoryClipboard::new();
//! view.copy(&block, &mut clipboard, Instant::now());
//! assert_eq!(clipboard.contents(), Some("print(1)"));
//!
//! let html = view.render(&block).to_html();
//! assert!(html.contains("notion-visible"));
//! view.unmount();
//! ```

mod block;
mod clipboard;
mod feedback;
mod node;
mod rich_text;
mod view;

pub use block::{Annotations, CodeBlock, DEFAULT_COLOR, RichTextSpan, display_label, plain_text};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use feedback::{
    AutoHideTimer, CopyOutcome, DEFAULT_FEEDBACK_DURATION, FeedbackController, FeedbackState,
    MAX_FEEDBACK_DURATION,
};
pub use node::{Element, Node};
pub use rich_text::{AnnotatedTextRenderer, RichTextRenderer};
pub use view::{CodeBlockView, RenderContext, ViewSettings, render_static};
