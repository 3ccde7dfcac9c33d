//! The documentation tree shipped with the crate.

use crate::error::LoadError;
use crate::index::PageIndex;

/// Serialized page index for the TimescaleDB documentation site.
pub const BUNDLED_INDEX: &str = include_str!("../data/page-index.json");

/// Load and validate the bundled documentation tree.
///
/// Load once at startup and share the result by reference; the index is
/// immutable.
pub fn load_index() -> Result<PageIndex, LoadError> {
    PageIndex::from_json(BUNDLED_INDEX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{Node, NodeKind};

    #[test]
    fn test_bundled_index_loads() {
        let index = load_index().unwrap();
        assert_eq!(index.roots().len(), 9);
        assert_eq!(index.roots()[0].title(), Some("Overview"));
    }

    #[test]
    fn test_bundled_index_has_single_title_page() {
        let index = load_index().unwrap();

        let node = index.find_by_href("main").unwrap();

        assert_eq!(node.kind(), NodeKind::TitlePage);
        assert_eq!(node.title(), Some("Main"));
    }

    #[test]
    fn test_bundled_index_lints_clean() {
        let index = load_index().unwrap();
        assert_eq!(index.lint(), Vec::new());
    }

    #[test]
    fn test_bundled_api_backup_redirect() {
        let index = load_index().unwrap();

        let resolved = index.resolve("/api/backup").unwrap();

        assert_eq!(resolved.path, "using-timescaledb/backup");
        assert_eq!(resolved.node.title(), Some("Backup & Restore"));
    }

    #[test]
    fn test_bundled_installation_options() {
        let index = load_index().unwrap();

        let node = index.find_by_href("getting-started/installation").unwrap();

        let Node::ReactPage(page) = node else {
            panic!("expected REACT_PAGE, got {}", node.kind());
        };
        assert_eq!(page.component, "InstallationPage");
        assert_eq!(
            page.option("pg_version"),
            Some(&serde_json::json!(["9.6", "10"]))
        );
        assert_eq!(page.children.len(), 3);
    }

    #[test]
    fn test_bundled_installation_variants_share_segment() {
        let index = load_index().unwrap();

        for platform in ["mac", "linux", "windows"] {
            let path = format!("getting-started/installation/{platform}/installation-docker");
            let node = index.get(&path).unwrap();
            assert_eq!(node.kind(), NodeKind::NonMenuPage);
        }
    }

    #[test]
    fn test_bundled_menu_counts_navigable_nodes() {
        let index = load_index().unwrap();

        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| usize::from(n.is_navigable()) + count(n.children()))
                .sum()
        }

        assert_eq!(index.flatten_menu().count(), count(index.roots()));
    }

    #[test]
    fn test_bundled_round_trip() {
        let index = load_index().unwrap();

        let reloaded = PageIndex::from_json(&index.to_json_pretty().unwrap()).unwrap();

        assert_eq!(reloaded, index);
    }
}
