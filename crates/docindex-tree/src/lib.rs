//! Page-index tree for a documentation site.
//!
//! This crate provides:
//! - [`Node`]: the closed set of entry kinds (pages, anchors, links, redirects, ...)
//! - [`PageIndex`]: a validated, immutable tree with path resolution
//! - Menu traversal, navigation tree and page view building for renderers
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = docindex_tree::load_index()?;
//!
//! // Resolve a URL path, following hidden redirects
//! let node = index.find_by_href("/api/backup")?;
//! assert_eq!(node.title(), Some("Backup & Restore"));
//!
//! // Walk the menu
//! for entry in index.flatten_menu() {
//!     let _ = (entry.depth, entry.path);
//! }
//! # Ok(())
//! # }
//! ```

mod bundled;
mod error;
mod index;
mod lint;
mod menu;
mod node;
mod raw;

pub use bundled::{BUNDLED_INDEX, load_index};
pub use error::{LoadError, LookupError, SchemaError};
pub use index::{IndexFormat, PageIndex, Resolved};
pub use lint::LintIssue;
pub use menu::{BreadcrumbItem, MenuEntry, MenuIter, NavItem, PageView};
pub use node::{Anchor, Directory, Link, Node, NodeKind, Page, ReactPage, Redirect, TitlePage};
