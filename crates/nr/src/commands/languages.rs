//! `nr languages` command implementation.

use std::path::PathBuf;

use clap::Args;
use nr_block::display_label;
use nr_config::Config;
use nr_highlight::GrammarRegistry;

use super::build_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the languages command.
#[derive(Args)]
pub(crate) struct LanguagesArgs {
    /// Path to configuration file (default: auto-discover nr.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl LanguagesArgs {
    /// Execute the languages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the registry has no plain grammar.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = build_registry(&config)?;

        for line in listing(&registry) {
            output.print(&line)?;
        }
        Ok(())
    }
}

/// One `key<TAB>Label` line per registered language, sorted by key.
fn listing(registry: &GrammarRegistry) -> Vec<String> {
    registry
        .languages()
        .map(|key| format!("{key}\t{}", display_label(key)))
        .collect()
}
