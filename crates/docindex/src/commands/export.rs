//! `docindex export` command implementation.

use clap::{Args, ValueEnum};

use super::{IndexArgs, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Output format for export.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Output format.
    #[arg(long = "to", value_enum, default_value_t)]
    to: ExportFormat,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the index fails to load or serialize.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.index.load_config(None)?;
        let index = load_index(&config)?;

        let serialized = match self.to {
            ExportFormat::Json => index
                .to_json_pretty()
                .map_err(|e| CliError::Serialize(e.to_string()))?,
            ExportFormat::Yaml => index
                .to_yaml()
                .map_err(|e| CliError::Serialize(e.to_string()))?,
        };
        output.data(serialized.trim_end());

        Ok(())
    }
}
