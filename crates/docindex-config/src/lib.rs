//! Configuration management for docindex.
//!
//! Parses `docindex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `index.path` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the page index file.
    pub index_path: Option<PathBuf>,
    /// Override the page index format.
    pub format: Option<String>,
    /// Override whether lint issues fail `check`.
    pub deny_lint: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docindex.toml";

/// Accepted values for `index.format`.
const FORMATS: [&str; 3] = ["json", "yaml", "yml"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Index configuration (path is a relative string from TOML).
    index: IndexConfigRaw,
    /// Lint configuration.
    pub lint: LintConfig,

    /// Resolved index configuration (set after loading).
    #[serde(skip)]
    pub index_resolved: IndexConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw index configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct IndexConfigRaw {
    path: Option<String>,
    format: Option<String>,
}

/// Resolved index configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexConfig {
    /// Page index file. `None` selects the bundled index.
    pub path: Option<PathBuf>,
    /// Explicit format; detected from the file extension when `None`.
    pub format: Option<String>,
}

/// Lint configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Treat redirect lint issues as errors.
    pub deny: bool,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`index.path`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docindex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
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
        } else if let Some(discovered) = Self::discover_config() {
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
        if let Some(path) = &settings.index_path {
            self.index_resolved.path = Some(path.clone());
        }
        if let Some(format) = &settings.format {
            self.index_resolved.format = Some(format.clone());
        }
        if let Some(deny) = settings.deny_lint {
            self.lint.deny = deny;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
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
        if let Some(path) = &self.index_resolved.path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "index.path cannot be empty".to_owned(),
            ));
        }

        if let Some(format) = &self.index_resolved.format
            && !FORMATS.contains(&format.to_ascii_lowercase().as_str())
        {
            return Err(ConfigError::Validation(format!(
                "index.format must be one of {}, got {format:?}",
                FORMATS.join(", ")
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.index.path {
            self.index.path = Some(expand::expand_env(path, "index.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.index_resolved = IndexConfig {
            path: self
                .index
                .path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| config_dir.join(p)),
            format: self.index.format.clone(),
        };
    }
}
