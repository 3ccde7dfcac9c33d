//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod menu;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use docindex_config::{CliSettings, Config};
use docindex_tree::{IndexFormat, PageIndex};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use menu::MenuArgs;
pub(crate) use resolve::ResolveArgs;

/// Arguments shared by every command that loads an index.
#[derive(Args, Debug, Default)]
pub(crate) struct IndexArgs {
    /// Path to configuration file (default: auto-discover docindex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page index file (overrides config; default: bundled index).
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// Page index format: json or yaml (default: from file extension).
    #[arg(long)]
    format: Option<String>,
}

impl IndexArgs {
    /// Load configuration with these arguments applied as overrides.
    pub(crate) fn load_config(&self, deny_lint: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            index_path: self.index.clone(),
            format: self.format.clone(),
            deny_lint,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load the page index selected by the configuration.
pub(crate) fn load_index(config: &Config) -> Result<PageIndex, CliError> {
    let index = match (&config.index_resolved.path, &config.index_resolved.format) {
        (None, _) => docindex_tree::load_index()?,
        (Some(path), Some(format)) => {
            let format: IndexFormat = format.parse().map_err(CliError::Validation)?;
            PageIndex::from_path_with_format(path, format)?
        }
        (Some(path), None) => PageIndex::from_path(path)?,
    };
    tracing::debug!(
        roots = index.roots().len(),
        paths = index.path_count(),
        "Page index ready"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_index_defaults_to_bundled() {
        let config = Config::default();

        let index = load_index(&config).unwrap();

        assert!(index.title_page().is_some());
    }

    #[test]
    fn test_load_index_explicit_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.txt");
        std::fs::write(&path, "- Title: FAQ\n  type: PAGE\n  href: faq\n").unwrap();

        let mut config = Config::default();
        config.index_resolved.path = Some(path);
        config.index_resolved.format = Some("yaml".to_owned());

        let index = load_index(&config).unwrap();

        assert!(index.get("faq").is_some());
    }

    #[test]
    fn test_load_index_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, r#"[{"type": "HIDDEN_REDIRECT", "href": "backup"}]"#).unwrap();

        let mut config = Config::default();
        config.index_resolved.path = Some(path);

        let err = load_index(&config).unwrap_err();

        assert!(matches!(err, CliError::Load(_)));
    }
}
