//! Configuration management for nr.
//!
//! Parses `nr.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [code]
//! copy_feedback_ms = 2000
//! copy_label = "Copy"
//! tooltip_label = "Copied"
//!
//! [grammars]
//! aliases = { ts = "typescript", py = "python" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override tooltip duration in milliseconds.
    pub copy_feedback_ms: Option<u64>,
    /// Override copy button label.
    pub copy_label: Option<String>,
    /// Override tooltip label.
    pub tooltip_label: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "nr.toml";

/// Upper bound for the tooltip duration.
const MAX_FEEDBACK_MS: u64 = 60_000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code block rendering configuration.
    pub code: CodeConfig,
    /// Grammar registration configuration.
    pub grammars: GrammarsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Code block rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// How long the "copied" tooltip stays visible, in milliseconds.
    pub copy_feedback_ms: u64,
    /// Copy button label.
    pub copy_label: String,
    /// Tooltip label.
    pub tooltip_label: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
            copy_label: "Copy".to_owned(),
            tooltip_label: "Copied".to_owned(),
        }
    }
}

impl CodeConfig {
    /// Tooltip duration.
    #[must_use]
    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// Grammar registration configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GrammarsConfig {
    /// Extra language keys mapped to already registered keys.
    pub aliases: BTreeMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `nr.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(ms) = settings.copy_feedback_ms {
            self.code.copy_feedback_ms = ms;
        }
        if let Some(label) = &settings.copy_label {
            self.code.copy_label.clone_from(label);
        }
        if let Some(label) = &settings.tooltip_label {
            self.code.tooltip_label.clone_from(label);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_code()?;
        self.validate_grammars()?;
        Ok(())
    }

    fn validate_code(&self) -> Result<(), ConfigError> {
        let ms = self.code.copy_feedback_ms;
        if ms == 0 {
            return Err(ConfigError::Validation(
                "code.copy_feedback_ms must be greater than 0".to_owned(),
            ));
        }
        if ms > MAX_FEEDBACK_MS {
            return Err(ConfigError::Validation(format!(
                "code.copy_feedback_ms cannot exceed {MAX_FEEDBACK_MS}"
            )));
        }

        require_non_empty(&self.code.copy_label, "code.copy_label")?;
        require_non_empty(&self.code.tooltip_label, "code.tooltip_label")?;
        Ok(())
    }

    fn validate_grammars(&self) -> Result<(), ConfigError> {
        for (key, target) in &self.grammars.aliases {
            require_non_empty(key, "grammars.aliases key")?;
            require_non_empty(target, &format!("grammars.aliases.{key}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.code.copy_feedback_ms, 2000);
        assert_eq!(config.code.copy_label, "Copy");
        assert_eq!(config.code.tooltip_label, "Copied");
        assert_eq!(config.code.feedback_duration(), Duration::from_millis(2000));
        assert!(config.grammars.aliases.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.code.copy_feedback_ms, 2000);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[code]
copy_feedback_ms = 1500
copy_label = "Copier"
tooltip_label = "Copié"

[grammars]
aliases = { ts = "typescript", py = "python" }
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.code.copy_feedback_ms, 1500);
        assert_eq!(config.code.copy_label, "Copier");
        assert_eq!(config.code.tooltip_label, "Copié");
        assert_eq!(
            config.grammars.aliases.get("ts").map(String::as_str),
            Some("typescript")
        );
        assert_eq!(config.grammars.aliases.len(), 2);
    }

    #[test]
    fn test_parse_partial_code_section() {
        let toml = r"
[code]
copy_feedback_ms = 500
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.code.copy_feedback_ms, 500);
        assert_eq!(config.code.copy_label, "Copy");
    }

    #[test]
    fn test_validate_zero_duration() {
        let mut config = Config::default();
        config.code.copy_feedback_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("copy_feedback_ms"));
    }

    #[test]
    fn test_validate_excessive_duration() {
        let mut config = Config::default();
        config.code.copy_feedback_ms = MAX_FEEDBACK_MS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_label() {
        let mut config = Config::default();
        config.code.tooltip_label = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("code.tooltip_label"));
    }

    #[test]
    fn test_validate_empty_alias() {
        let mut config = Config::default();
        config
            .grammars
            .aliases
            .insert("ts".to_owned(), String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grammars.aliases.ts"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            copy_feedback_ms: Some(100),
            tooltip_label: Some("Done".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.code.copy_feedback_ms, 100);
        assert_eq!(config.code.tooltip_label, "Done");
        assert_eq!(config.code.copy_label, "Copy"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.code.copy_feedback_ms, 2000);
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/nr.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[code]\ncopy_feedback_ms = 750\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.code.copy_feedback_ms, 750);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nr.toml");
        std::fs::write(&path, "[code\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nr.toml");
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            copy_feedback_ms: Some(0),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, nested.join(CONFIG_FILENAME));
    }
}
