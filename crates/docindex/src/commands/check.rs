//! `docindex check` command implementation.

use clap::Args;

use super::{IndexArgs, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Fail when redirects are dangling or cyclic (overrides config).
    #[arg(long)]
    deny: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the index fails to load, or if lint issues are
    /// found while lint denial is enabled.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.index.load_config(self.deny.then_some(true))?;
        let index = load_index(&config)?;

        match &config.index_resolved.path {
            Some(path) => output.info(&format!("Index: {}", path.display())),
            None => output.info("Index: bundled"),
        }

        let menu_entries = index.flatten_menu().count();
        output.success(&format!(
            "Loaded {} root entries, {} paths, {menu_entries} menu entries",
            index.roots().len(),
            index.path_count(),
        ));

        match index.title_page().and_then(|node| node.title()) {
            Some(title) => output.info(&format!("Title page: {title}")),
            None => output.warning("No TITLE_PAGE entry"),
        }

        let issues = index.lint();
        for issue in &issues {
            output.warning(&format!("warning: {issue}"));
        }

        if issues.is_empty() {
            output.success("Redirects: ok");
        } else if config.lint.deny {
            return Err(CliError::Validation(format!(
                "{} redirect issue(s) found",
                issues.len()
            )));
        }

        Ok(())
    }
}
