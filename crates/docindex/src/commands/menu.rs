//! `docindex menu` command implementation.

use clap::Args;
use docindex_tree::{MenuEntry, NodeKind};

use super::{IndexArgs, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Only show entries up to this depth (0 = root entries).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Print the rendered navigation tree as JSON instead.
    #[arg(long, conflicts_with = "depth")]
    json: bool,
}

impl MenuArgs {
    /// Execute the menu command.
    ///
    /// # Errors
    ///
    /// Returns an error if the index fails to load.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.index.load_config(None)?;
        let index = load_index(&config)?;

        if self.json {
            let json = serde_json::to_string_pretty(&index.navigation())
                .map_err(|e| CliError::Serialize(e.to_string()))?;
            output.data(&json);
            return Ok(());
        }

        for entry in index
            .flatten_menu()
            .filter(|entry| self.depth.is_none_or(|max| entry.depth <= max))
        {
            let (line, note) = format_entry(&entry);
            if note.is_empty() {
                output.data(&line);
            } else {
                output.data_with_note(&line, &note);
            }
        }

        Ok(())
    }
}

/// Render one menu line: indented title and path, with the kind noted for
/// anything other than a plain page.
fn format_entry(entry: &MenuEntry<'_>) -> (String, String) {
    let line = format!(
        "{}{}  /{}",
        "  ".repeat(entry.depth),
        entry.node.title().unwrap_or_default(),
        entry.path
    );
    let note = match entry.node.kind() {
        NodeKind::Page => String::new(),
        kind => format!("[{kind}]"),
    };
    (line, note)
}
