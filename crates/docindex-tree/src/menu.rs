//! Menu traversal, navigation tree and page views.
//!
//! Three read-only views over a [`PageIndex`]:
//! - [`PageIndex::flatten_menu`]: depth-first walk over every navigable node
//! - [`PageIndex::navigation`]: the sidebar tree a renderer draws
//! - [`PageIndex::page_view`]: one page with its in-page anchors, links and breadcrumbs

use std::slice;

use serde::Serialize;

use crate::error::LookupError;
use crate::index::{Entry, PageIndex};
use crate::node::{Anchor, Link, Node, NodeKind};

/// One step of [`PageIndex::flatten_menu`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuEntry<'a> {
    pub node: &'a Node,
    /// Zero for root nodes.
    pub depth: usize,
    /// Full path without leading slash.
    pub path: &'a str,
}

/// Lazy depth-first iterator over navigable nodes.
///
/// Holds only a cursor into the index's pre-ordered entry list, so a new
/// iterator always starts from the first root.
pub struct MenuIter<'a> {
    index: &'a PageIndex,
    entries: slice::Iter<'a, Entry>,
    position: usize,
}

impl<'a> Iterator for MenuIter<'a> {
    type Item = MenuEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.entries.next()?;
            let idx = self.position;
            self.position += 1;
            if entry.kind.is_navigable() {
                return Some(MenuEntry {
                    node: self.index.entry_node(idx),
                    depth: entry.depth,
                    path: &entry.path,
                });
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Full path for pages, absolute URL for links.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
}

/// A resolved page together with the leaves a page view renders.
#[derive(Debug)]
pub struct PageView<'a> {
    pub node: &'a Node,
    /// Canonical full path.
    pub path: String,
    /// Redirects followed to reach the page.
    pub redirects: Vec<String>,
    /// In-page anchors, in declaration order.
    pub anchors: Vec<&'a Anchor>,
    /// External links listed under the page, in declaration order.
    pub links: Vec<&'a Link>,
    /// Home followed by ancestors, excluding the page itself.
    pub breadcrumbs: Vec<BreadcrumbItem>,
}

impl PageIndex {
    /// Walk every navigable node depth-first in declaration order.
    ///
    /// Anchors, links and redirects are skipped. Each call returns a fresh
    /// iterator.
    #[must_use]
    pub fn flatten_menu(&self) -> MenuIter<'_> {
        MenuIter {
            index: self,
            entries: self.entries().iter(),
            position: 0,
        }
    }

    /// Build the rendered navigation tree.
    ///
    /// Pages, component pages and the title page become entries; links
    /// become leaf entries. Non-menu pages, platform directories, anchors and
    /// redirects are left out, together with everything beneath them.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavItem> {
        build_nav_items(self.roots(), "")
    }

    /// Resolve a path and collect what a page view renders.
    ///
    /// # Errors
    ///
    /// Same as [`PageIndex::resolve`]. A `#fragment` on `path` is ignored; a
    /// redirect target's fragment still has to name an anchor of its page.
    pub fn page_view(&self, path: &str) -> Result<PageView<'_>, LookupError> {
        let path = path.split_once('#').map_or(path, |(path, _)| path);
        let resolved = self.resolve(path)?;
        let node = self.entry_node(resolved.entry);

        let links = node
            .children()
            .iter()
            .filter_map(|child| match child {
                Node::Link(link) => Some(link),
                _ => None,
            })
            .collect();

        Ok(PageView {
            node,
            anchors: self.anchors(resolved.entry).collect(),
            links,
            breadcrumbs: self.breadcrumbs(resolved.entry),
            path: resolved.path,
            redirects: resolved.redirects,
        })
    }

    /// Build breadcrumbs for an entry.
    ///
    /// Starts with the title page (when the tree has one and the entry is not
    /// the title page itself), followed by ancestors root-first.
    fn breadcrumbs(&self, entry: usize) -> Vec<BreadcrumbItem> {
        let entries = self.entries();
        let mut breadcrumbs = Vec::new();

        if let Some(home) = self.title_page_entry()
            && home != entry
        {
            breadcrumbs.push(self.breadcrumb(home));
        }

        let mut ancestors = Vec::new();
        let mut current = entries[entry].parent;
        while let Some(i) = current {
            ancestors.push(i);
            current = entries[i].parent;
        }
        breadcrumbs.extend(ancestors.into_iter().rev().map(|i| self.breadcrumb(i)));

        breadcrumbs
    }

    fn breadcrumb(&self, entry: usize) -> BreadcrumbItem {
        BreadcrumbItem {
            title: self.entry_node(entry).title().unwrap_or_default().to_owned(),
            path: self.entries()[entry].path.clone(),
        }
    }
}

fn build_nav_items(nodes: &[Node], parent_path: &str) -> Vec<NavItem> {
    nodes
        .iter()
        .filter_map(|node| {
            let kind = node.kind();
            let title = node.title().unwrap_or_default().to_owned();
            match kind {
                NodeKind::Page | NodeKind::ReactPage | NodeKind::TitlePage => {
                    let path = if parent_path.is_empty() {
                        node.href().to_owned()
                    } else {
                        format!("{parent_path}/{}", node.href())
                    };
                    Some(NavItem {
                        title,
                        children: build_nav_items(node.children(), &path),
                        path,
                        kind,
                    })
                }
                NodeKind::Link => Some(NavItem {
                    title,
                    path: node.href().to_owned(),
                    kind,
                    children: Vec::new(),
                }),
                _ => None,
            }
        })
        .collect()
}
