//! `docindex resolve` command implementation.

use clap::Args;
use docindex_tree::Node;

use super::{IndexArgs, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// URL path to resolve (e.g. /api/backup or /api#analytics).
    path: String,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the index fails to load or the path does not resolve.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.index.load_config(None)?;
        let index = load_index(&config)?;

        let resolved = index.resolve(&self.path)?;

        for hop in &resolved.redirects {
            output.info(&format!("redirect: /{hop}"));
        }

        let location = match resolved.node {
            Node::Anchor(anchor) => format!("/{}{}", resolved.path, anchor.href),
            _ => format!("/{}", resolved.path),
        };
        output.data_with_note(
            &format!(
                "{location}  {}",
                resolved.node.title().unwrap_or_default()
            ),
            &format!("[{}]", resolved.node.kind()),
        );

        Ok(())
    }
}
