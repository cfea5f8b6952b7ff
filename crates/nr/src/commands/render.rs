//! `nr render` command implementation.

use std::time::Instant;

use clap::Args;
use nr_block::{CodeBlock, CodeBlockView, MemoryClipboard, RenderContext};

use super::{BlockArgs, build_context, config_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    block: BlockArgs,

    /// Render the block as it looks right after a copy (tooltip visible).
    #[arg(long)]
    copied: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.block.load_config()?;
        let block = self.block.read_block()?;
        let ctx = build_context(&config)?;

        tracing::info!(
            config = %config_source(&config),
            language = %block.language,
            "Rendering code block"
        );

        output.print(&render_html(&ctx, &block, self.copied))?;
        Ok(())
    }
}

/// Render `block` to HTML, optionally in its post-copy state.
fn render_html(ctx: &RenderContext, block: &CodeBlock, copied: bool) -> String {
    let mut view = CodeBlockView::mount(ctx);
    if copied {
        view.copy(block, &mut MemoryClipboard::new(), Instant::now());
    }
    let html = view.render(block).to_html();
    view.unmount();
    html
}
