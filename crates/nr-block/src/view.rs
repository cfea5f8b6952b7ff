//! Code block view.
//!
//! [`CodeBlockView`] composes the highlighter, the caption renderer and the
//! copy feedback controller into one rendered block:
//!
//! ```text
//! figure.notion-block.notion-code
//! ├── div.notion-code-content
//! │   ├── div.notion-code-meta
//! │   │   ├── div.notion-code-language     display label
//! │   │   └── button.notion-code-copy      icon + copy label
//! │   └── code > div                       highlighted markup
//! ├── figcaption.notion-asset-caption      only with a caption
//! └── div.notion-code-copy-tooltip         visibility mirrors feedback state
//! ```

use std::time::{Duration, Instant};

use nr_highlight::Highlighter;

use crate::block::CodeBlock;
use crate::clipboard::Clipboard;
use crate::feedback::{CopyOutcome, DEFAULT_FEEDBACK_DURATION, FeedbackController, FeedbackState};
use crate::node::{Element, Node};
use crate::rich_text::{AnnotatedTextRenderer, RichTextRenderer};

const COPY_ICON: &str = r#"<svg stroke="currentColor" fill="currentColor" stroke-width="0" viewBox="0 0 448 512" height="1em" width="1em" xmlns="http://www.w3.org/2000/svg"><path d="M433.941 65.941l-51.882-51.882A48 48 0 0 0 348.118 0H176c-26.51 0-48 21.49-48 48v48H48c-26.51 0-48 21.49-48 48v320c0 26.51 21.49 48 48 48h224c26.51 0 48-21.49 48-48v-48h80c26.51 0 48-21.49 48-48V99.882a48 48 0 0 0-14.059-33.941zM266 464H54a6 6 0 0 1-6-6V150a6 6 0 0 1 6-6h74v224c0 26.51 21.49 48 48 48h96v42a6 6 0 0 1-6 6zm128-96H182a6 6 0 0 1-6-6V54a6 6 0 0 1 6-6h106v88c0 13.255 10.745 24 24 24h88v202a6 6 0 0 1-6 6zm6-256h-64V48h9.632c1.591 0 3.117.632 4.243 1.757l48.368 48.368c1.125 1.126 1.757 2.652 1.757 4.243V112z"></path></svg>"#;

/// Labels and timings for rendered code blocks.
#[derive(Clone, Debug)]
pub struct ViewSettings {
    /// Text of the copy button.
    pub copy_label: String,
    /// Text of the tooltip shown after copying.
    pub tooltip_label: String,
    /// How long the tooltip stays visible.
    pub feedback_duration: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            copy_label: "Copy".to_owned(),
            tooltip_label: "Copied".to_owned(),
            feedback_duration: DEFAULT_FEEDBACK_DURATION,
        }
    }
}

/// Shared, read-only collaborators for every code block view.
pub struct RenderContext {
    highlighter: Highlighter,
    caption_renderer: Box<dyn RichTextRenderer>,
    settings: ViewSettings,
}

impl RenderContext {
    /// Context with default settings and [`AnnotatedTextRenderer`] captions.
    #[must_use]
    pub fn new(highlighter: Highlighter) -> Self {
        Self {
            highlighter,
            caption_renderer: Box::new(AnnotatedTextRenderer),
            settings: ViewSettings::default(),
        }
    }

    #[must_use]
    pub fn with_caption_renderer(mut self, renderer: impl RichTextRenderer + 'static) -> Self {
        self.caption_renderer = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ViewSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    #[must_use]
    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }
}

/// A mounted code block.
///
/// Owns the copy feedback state for its lifetime. Call [`tick`](Self::tick)
/// from the event loop (at or after [`next_deadline`](Self::next_deadline))
/// and re-render when it returns `true`.
pub struct CodeBlockView<'ctx> {
    ctx: &'ctx RenderContext,
    feedback: FeedbackController,
}

impl<'ctx> CodeBlockView<'ctx> {
    /// Mount a view with hidden feedback.
    #[must_use]
    pub fn mount(ctx: &'ctx RenderContext) -> Self {
        Self {
            ctx,
            feedback: FeedbackController::new(ctx.settings.feedback_duration),
        }
    }

    #[must_use]
    pub fn feedback(&self) -> FeedbackState {
        self.feedback.state()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.feedback.next_deadline()
    }

    /// Copy the block's content and show the tooltip.
    pub fn copy(
        &mut self,
        block: &CodeBlock,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> CopyOutcome {
        self.feedback.copy(clipboard, &block.content(), now)
    }

    /// Advance the feedback countdown. Returns `true` if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.feedback.poll(now)
    }

    /// Tear the view down, cancelling any pending auto-hide.
    pub fn unmount(mut self) {
        self.feedback.cancel();
    }

    /// Render `block` with the current feedback state.
    #[must_use]
    pub fn render(&self, block: &CodeBlock) -> Node {
        let settings = &self.ctx.settings;
        let content = block.content();
        let markup = self.ctx.highlighter.highlight(&content, &block.language);

        let meta = Element::new("div")
            .class("notion-code-meta")
            .child(
                Element::new("div")
                    .class("notion-code-language")
                    .text(block.label()),
            )
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .class("notion-code-copy")
                    .child(Node::Static(COPY_ICON))
                    .child(Element::new("span").text(settings.copy_label.as_str())),
            );

        let body = Element::new("div")
            .class("notion-code-content")
            .child(meta)
            .child(Element::new("code").child(Element::new("div").child(markup)));

        let mut figure = Element::new("figure")
            .class("notion-block notion-code")
            .child(body);

        if !block.caption.is_empty() {
            figure = figure.child(
                Element::new("figcaption")
                    .class("notion-asset-caption")
                    .child(self.ctx.caption_renderer.render(&block.caption)),
            );
        }

        figure.child(self.tooltip()).into()
    }

    fn tooltip(&self) -> Element {
        let visible = self.feedback.is_visible();
        let visibility = if visible { "visible" } else { "hidden" };
        Element::new("div")
            .attr("aria-hidden", if visible { "false" } else { "true" })
            .class(format!("notion-code-copy-tooltip notion-{visibility}"))
            .child(Element::new("div").text(self.ctx.settings.tooltip_label.as_str()))
    }
}

/// Render `block` once, without feedback.
#[must_use]
pub fn render_static(ctx: &RenderContext, block: &CodeBlock) -> Node {
    CodeBlockView::mount(ctx).render(block)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use nr_highlight::GrammarRegistry;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::block::RichTextSpan;
    use crate::clipboard::MemoryClipboard;

    fn context() -> RenderContext {
        let registry = Arc::new(GrammarRegistry::with_defaults().unwrap());
        RenderContext::new(Highlighter::new(registry))
    }

    fn code_region(node: &Node) -> String {
        let content = node.find_class("notion-code-content").unwrap();
        let code = content.children.iter().find_map(|child| match child {
            Node::Element(el) if el.tag == "code" => Some(el),
            _ => None,
        });
        Node::from(code.unwrap().clone()).to_html()
    }

    #[test]
    fn test_render_order_and_classes() {
        let ctx = context();
        let block = CodeBlock::new("print(1)", "python");
        let node = CodeBlockView::mount(&ctx).render(&block);

        let Node::Element(figure) = &node else {
            panic!("expected figure element");
        };
        assert_eq!(figure.tag, "figure");
        assert!(figure.has_class("notion-code"));
        assert_eq!(figure.children.len(), 2);

        let html = node.to_html();
        let label = html.find("notion-code-language").unwrap();
        let copy = html.find("notion-code-copy\"").unwrap();
        let code = html.find("<code>").unwrap();
        let tooltip = html.find("notion-code-copy-tooltip").unwrap();
        assert!(label < copy && copy < code && code < tooltip);
    }

    #[test]
    fn test_label_is_display_form() {
        let ctx = context();
        let node = render_static(&ctx, &CodeBlock::new("x := 1", "go"));
        let label = node.find_class("notion-code-language").unwrap();
        assert_eq!(Node::from(label.clone()).text_content(), "Go");
    }

    #[test]
    fn test_highlight_uses_declared_language() {
        let ctx = context();
        let block = CodeBlock::new("print(1)", "python");
        let node = render_static(&ctx, &block);
        let expected = ctx.highlighter().highlight("print(1)", "python");
        assert!(code_region(&node).contains(expected.as_str()));
    }

    #[test]
    fn test_python_distinct_from_unknown_language() {
        let ctx = context();
        let python = render_static(&ctx, &CodeBlock::new("print(1)", "python"));
        let unknown = render_static(&ctx, &CodeBlock::new("print(1)", "unknownlang"));
        assert!(code_region(&python).contains("constant numeric"));
        assert!(!code_region(&unknown).contains("constant numeric"));
    }

    #[test]
    fn test_empty_caption_has_no_region() {
        let ctx = context();
        let node = render_static(&ctx, &CodeBlock::new("x", "go"));
        assert!(node.find_class("notion-asset-caption").is_none());
        assert!(!node.to_html().contains("figcaption"));
    }

    #[test]
    fn test_caption_region_delegates() {
        let ctx = context();
        let block =
            CodeBlock::new("x", "go").with_caption(vec![RichTextSpan::plain("Example")]);
        let node = render_static(&ctx, &block);

        let caption = node.find_class("notion-asset-caption").unwrap();
        assert_eq!(caption.tag, "figcaption");
        assert_eq!(Node::from(caption.clone()).text_content(), "Example");
    }

    #[test]
    fn test_custom_caption_renderer() {
        struct Upper(Arc<Mutex<usize>>);

        impl RichTextRenderer for Upper {
            fn render(&self, spans: &[RichTextSpan]) -> Node {
                *self.0.lock().unwrap() += 1;
                Node::Text(crate::block::plain_text(spans).to_uppercase())
            }
        }

        let calls = Arc::new(Mutex::new(0));
        let ctx = context().with_caption_renderer(Upper(Arc::clone(&calls)));
        let block =
            CodeBlock::new("x", "go").with_caption(vec![RichTextSpan::plain("Example")]);

        let node = render_static(&ctx, &block);
        let caption = node.find_class("notion-asset-caption").unwrap();
        assert_eq!(Node::from(caption.clone()).text_content(), "EXAMPLE");
        assert_eq!(*calls.lock().unwrap(), 1);

        render_static(&ctx, &CodeBlock::new("x", "go"));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_empty_content_keeps_chrome() {
        let ctx = context();
        let block = CodeBlock {
            rich_text: Vec::new(),
            language: "python".to_owned(),
            ..CodeBlock::default()
        };
        let node = render_static(&ctx, &block);
        assert!(node.find_class("notion-code-meta").is_some());
        assert!(node.find_class("notion-code-copy").is_some());
        assert!(node.find_class("notion-code-copy-tooltip").is_some());
        assert_eq!(code_region(&node), "<code><div></div></code>");
    }

    #[test]
    fn test_tooltip_hidden_initially() {
        let ctx = context();
        let node = render_static(&ctx, &CodeBlock::new("x", "go"));
        let tooltip = node.find_class("notion-code-copy-tooltip").unwrap();
        assert_eq!(tooltip.get_attr("aria-hidden"), Some("true"));
        assert!(tooltip.has_class("notion-hidden"));
        assert_eq!(Node::from(tooltip.clone()).text_content(), "Copied");
    }

    #[test]
    fn test_copy_shows_tooltip_then_hides() {
        let ctx = context();
        let block = CodeBlock {
            rich_text: vec![RichTextSpan::plain("a"), RichTextSpan::plain("b")],
            language: "go".to_owned(),
            ..CodeBlock::default()
        };
        let mut view = CodeBlockView::mount(&ctx);
        let mut clipboard = MemoryClipboard::new();
        let t0 = Instant::now();

        view.copy(&block, &mut clipboard, t0);
        assert_eq!(clipboard.contents(), Some("ab"));
        assert_eq!(view.feedback(), FeedbackState::Visible);

        let node = view.render(&block);
        let tooltip = node.find_class("notion-code-copy-tooltip").unwrap();
        assert_eq!(tooltip.get_attr("aria-hidden"), Some("false"));
        assert!(tooltip.has_class("notion-visible"));

        assert!(view.tick(t0 + DEFAULT_FEEDBACK_DURATION));
        assert!(!view.tick(t0 + DEFAULT_FEEDBACK_DURATION * 2));
        let node = view.render(&block);
        let tooltip = node.find_class("notion-code-copy-tooltip").unwrap();
        assert_eq!(tooltip.get_attr("aria-hidden"), Some("true"));
    }

    #[test]
    fn test_unmount_while_visible() {
        let ctx = context();
        let block = CodeBlock::new("x", "go");
        let mut view = CodeBlockView::mount(&ctx);
        let mut clipboard = MemoryClipboard::new();

        view.copy(&block, &mut clipboard, Instant::now());
        assert!(view.next_deadline().is_some());
        view.unmount();

        assert_eq!(clipboard.writes(), 1);
    }

    #[test]
    fn test_settings_apply() {
        let settings = ViewSettings {
            copy_label: "Copier".to_owned(),
            tooltip_label: "Copié".to_owned(),
            feedback_duration: Duration::from_millis(500),
        };
        let ctx = context().with_settings(settings);
        let block = CodeBlock::new("x", "go");
        let mut view = CodeBlockView::mount(&ctx);
        let mut clipboard = MemoryClipboard::new();
        let t0 = Instant::now();

        let outcome = view.copy(&block, &mut clipboard, t0);
        assert_eq!(outcome.hide_at, t0 + Duration::from_millis(500));

        let html = view.render(&block).to_html();
        assert!(html.contains("<span>Copier</span>"));
        assert!(html.contains("<div>Copié</div>"));
    }
}
