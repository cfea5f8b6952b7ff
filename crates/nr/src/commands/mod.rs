//! CLI command implementations.

pub(crate) mod copy;
pub(crate) mod languages;
pub(crate) mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use nr_block::{CodeBlock, RenderContext, ViewSettings};
use nr_config::{CliSettings, Config};
use nr_highlight::{GrammarEngine, GrammarRegistry, Highlighter, languages as grammars};
use serde::Deserialize;

use crate::error::CliError;

pub(crate) use copy::CopyArgs;
pub(crate) use languages::LanguagesArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by commands that read a code block.
#[derive(Args)]
pub(crate) struct BlockArgs {
    /// Code block JSON file (default: read stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover nr.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language key (overrides the block's language).
    #[arg(short, long)]
    language: Option<String>,

    /// Tooltip duration in milliseconds (overrides config).
    #[arg(long)]
    feedback_ms: Option<u64>,

    /// Copy button label (overrides config).
    #[arg(long)]
    copy_label: Option<String>,

    /// Tooltip label (overrides config).
    #[arg(long)]
    tooltip_label: Option<String>,
}

impl BlockArgs {
    /// Load config with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            copy_feedback_ms: self.feedback_ms,
            copy_label: self.copy_label.clone(),
            tooltip_label: self.tooltip_label.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Read and parse the code block.
    pub(crate) fn read_block(&self) -> Result<CodeBlock, CliError> {
        let source = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let mut block = parse_block(&source)?;
        if let Some(language) = &self.language {
            block.language.clone_from(language);
        }
        Ok(block)
    }
}

/// Accepted code block documents.
///
/// Either a full Notion block (`{"type": "code", "code": {...}}`) or the bare
/// `code` payload.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockInput {
    Wrapped { code: CodeBlock },
    Bare(CodeBlock),
}

fn parse_block(source: &str) -> Result<CodeBlock, serde_json::Error> {
    let input: BlockInput = serde_json::from_str(source)?;
    Ok(match input {
        BlockInput::Wrapped { code } | BlockInput::Bare(code) => code,
    })
}

/// Build the grammar registry: defaults plus config aliases.
pub(crate) fn build_registry(config: &Config) -> Result<GrammarRegistry, CliError> {
    let mut engine = GrammarEngine::new();
    engine.register(grammars::DEFAULT_LOADERS);
    for (key, target) in &config.grammars.aliases {
        engine.alias_key(key, target);
    }
    Ok(engine.freeze()?)
}

/// Build the render context for `config`.
pub(crate) fn build_context(config: &Config) -> Result<RenderContext, CliError> {
    let registry = Arc::new(build_registry(config)?);
    let settings = ViewSettings {
        copy_label: config.code.copy_label.clone(),
        tooltip_label: config.code.tooltip_label.clone(),
        feedback_duration: config.code.feedback_duration(),
    };
    Ok(RenderContext::new(Highlighter::new(registry)).with_settings(settings))
}

/// Display name of a config source, for status messages.
pub(crate) fn config_source(config: &Config) -> String {
    config
        .config_path
        .as_deref()
        .map_or_else(|| "defaults".to_owned(), |p: &Path| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_bare_block() {
        let block = parse_block(
            r#"{"rich_text": [{"plain_text": "print(1)"}], "language": "python"}"#,
        )
        .unwrap();
        assert_eq!(block, CodeBlock::new("print(1)", "python"));
    }

    #[test]
    fn test_parse_wrapped_block() {
        let json = r#"{
            "object": "block",
            "type": "code",
            "code": {
                "caption": [{"plain_text": "Example"}],
                "rich_text": [{"plain_text": "SELECT 1"}],
                "language": "sql"
            }
        }"#;
        let block = parse_block(json).unwrap();
        assert_eq!(block.language, "sql");
        assert_eq!(block.content(), "SELECT 1");
        assert_eq!(block.caption.len(), 1);
    }

    #[test]
    fn test_parse_invalid_block() {
        assert!(parse_block("[1, 2]").is_err());
    }

    #[test]
    fn test_read_block_with_language_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("block.json");
        std::fs::write(&path, r#"{"rich_text": [{"plain_text": "x"}], "language": "go"}"#)
            .unwrap();

        let args = BlockArgs {
            input: Some(path),
            config: None,
            language: Some("kotlin".to_owned()),
            feedback_ms: None,
            copy_label: None,
            tooltip_label: None,
        };
        assert_eq!(args.read_block().unwrap().language, "kotlin");
    }

    #[test]
    fn test_load_config_applies_label_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nr.toml");
        std::fs::write(&path, "[code]\ncopy_label = \"Kopieren\"\n").unwrap();

        let args = BlockArgs {
            input: None,
            config: Some(path),
            language: None,
            feedback_ms: Some(750),
            copy_label: Some("Copier".to_owned()),
            tooltip_label: Some("Copié".to_owned()),
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.code.copy_label, "Copier");
        assert_eq!(config.code.tooltip_label, "Copié");
        assert_eq!(config.code.copy_feedback_ms, 750);

        let ctx = build_context(&config).unwrap();
        assert_eq!(ctx.settings().tooltip_label, "Copié");
    }

    #[test]
    fn test_load_config_rejects_empty_label_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nr.toml");
        std::fs::write(&path, "").unwrap();

        let args = BlockArgs {
            input: None,
            config: Some(path),
            language: None,
            feedback_ms: None,
            copy_label: Some(String::new()),
            tooltip_label: None,
        };
        assert!(matches!(
            args.load_config(),
            Err(CliError::Config(nr_config::ConfigError::Validation(_)))
        ));
    }

    #[test]
    fn test_build_registry_applies_aliases() {
        let mut config = Config::default();
        config
            .grammars
            .aliases
            .insert("py".to_owned(), "python".to_owned());
        config
            .grammars
            .aliases
            .insert("nope".to_owned(), "unknown".to_owned());

        let registry = build_registry(&config).unwrap();
        assert!(registry.contains("py"));
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn test_build_context_uses_config_labels() {
        let mut config = Config::default();
        config.code.copy_label = "Copier".to_owned();
        config.code.copy_feedback_ms = 500;

        let ctx = build_context(&config).unwrap();
        assert_eq!(ctx.settings().copy_label, "Copier");
        assert_eq!(
            ctx.settings().feedback_duration,
            std::time::Duration::from_millis(500)
        );
    }

    #[test]
    fn test_config_source() {
        assert_eq!(config_source(&Config::default()), "defaults");
    }
}
