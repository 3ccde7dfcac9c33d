//! Error types for loading and resolving the page index.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::node::NodeKind;

/// Structural invariant violated by a node.
///
/// `location` identifies the node by its position in the tree, e.g.
/// `[1].children[0]` for the first child of the second root node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A field required by the node kind is absent or empty.
    #[error("{location}: {kind} node requires a non-empty `{field}`")]
    MissingField {
        location: String,
        kind: NodeKind,
        field: &'static str,
    },
    /// A field that the node kind does not carry.
    #[error("{location}: `{field}` is not allowed on a {kind} node")]
    UnexpectedField {
        location: String,
        kind: NodeKind,
        field: &'static str,
    },
    /// Malformed `href` for the node kind.
    #[error("{location}: invalid href {href:?} on {kind} node ({reason})")]
    InvalidHref {
        location: String,
        kind: NodeKind,
        href: String,
        reason: &'static str,
    },
    /// Anchor whose parent is not a page.
    #[error("{location}: anchor {href:?} must be the child of a page")]
    MisplacedAnchor { location: String, href: String },
    /// Two anchors with the same href on one page.
    #[error("{location}: anchor {href:?} is declared twice on the same page")]
    DuplicateAnchor { location: String, href: String },
    /// Two nodes resolve to the same path.
    #[error("{location}: path {path:?} is already defined at {first}")]
    DuplicatePath {
        path: String,
        location: String,
        first: String,
    },
    /// More than one `TITLE_PAGE` in the tree.
    #[error("{second}: only one TITLE_PAGE is allowed (first at {first})")]
    MultipleTitlePages { first: String, second: String },
    /// `TITLE_PAGE` below the root level.
    #[error("{location}: TITLE_PAGE must be a root node")]
    NestedTitlePage { location: String },
}

/// Failure to produce a [`PageIndex`](crate::PageIndex) from storage.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// File extension does not map to a known format.
    #[error("Unsupported index format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Failure to resolve a path against a loaded index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No node at this path. Recoverable: callers render a not-found page.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Following redirects revisited a path. `chain` lists every hop,
    /// ending with the repeated path.
    #[error("Redirect cycle: {}", chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },
}

/// Render a child-index trail as `[1].children[0]`.
pub(crate) fn describe_location(location: &[usize]) -> String {
    let mut out = String::new();
    for (depth, index) in location.iter().enumerate() {
        if depth > 0 {
            out.push_str(".children");
        }
        let _ = write!(out, "[{index}]");
    }
    out
}
