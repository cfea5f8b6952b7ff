//! `nr copy` command implementation.

use std::time::Instant;

use clap::Args;
use nr_block::{CodeBlockView, SystemClipboard};

use super::{BlockArgs, build_context};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    #[command(flatten)]
    block: BlockArgs,

    /// Exit right after copying instead of holding the clipboard until the
    /// tooltip hides.
    #[arg(long)]
    no_wait: bool,
}

impl CopyArgs {
    /// Execute the copy command.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or the write fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.block.load_config()?;
        let block = self.block.read_block()?;
        let ctx = build_context(&config)?;

        // Some platforms drop clipboard contents with their owner, so the
        // clipboard lives as long as the view.
        let mut clipboard = SystemClipboard::new()?;
        let mut view = CodeBlockView::mount(&ctx);

        let outcome = view.copy(&block, &mut clipboard, Instant::now());
        if let Some(err) = outcome.clipboard_error {
            view.unmount();
            return Err(err.into());
        }
        output.success(&ctx.settings().tooltip_label);

        if self.no_wait {
            view.unmount();
            return Ok(());
        }

        while let Some(deadline) = view.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            if view.tick(Instant::now()) {
                output.note("Tooltip hidden");
            }
        }
        view.unmount();
        Ok(())
    }
}
