//! Loaded, validated page index.
//!
//! # Architecture
//!
//! The tree itself is kept as the ordered root sequence of [`Node`]s. During
//! construction every navigable node and every redirect is also recorded as an
//! [`Entry`] in a flat list, in depth-first pre-order, with its full path
//! (`/`-joined `href` segments), its depth, the index of its parent entry and
//! the child-index trail that locates it in the tree. This provides:
//! - O(1) path lookups via `path_index` `HashMap`
//! - O(d) breadcrumb building where d is the node depth
//! - menu traversal as a filtered walk over the entry list
//!
//! Construction is the only place invariants are checked. Once a
//! [`PageIndex`] exists it is structurally valid and never changes.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use crate::error::{LoadError, LookupError, SchemaError, describe_location};
use crate::node::{Anchor, Node, NodeKind};
use crate::raw::{self, RawNode};

/// Serialized tree format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexFormat {
    Json,
    Yaml,
}

impl IndexFormat {
    /// Detect the format from a file extension (`json`, `yaml`, `yml`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl FromStr for IndexFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown index format {other:?} (expected json or yaml)")),
        }
    }
}

/// Flat record for a node that owns a path.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) kind: NodeKind,
    pub(crate) path: String,
    pub(crate) depth: usize,
    pub(crate) parent: Option<usize>,
    location: Vec<usize>,
}

/// Result of resolving a path.
#[derive(Debug)]
pub struct Resolved<'a> {
    /// The node the path resolves to (an anchor when the path has a `#fragment`).
    pub node: &'a Node,
    /// Canonical full path of the resolved page, without the fragment.
    pub path: String,
    /// Paths of the redirects followed, in order.
    pub redirects: Vec<String>,
    pub(crate) entry: usize,
}

/// The validated, immutable page-index tree.
#[derive(Debug)]
pub struct PageIndex {
    roots: Vec<Node>,
    entries: Vec<Entry>,
    path_index: HashMap<String, usize>,
    title_page: Option<usize>,
}

impl PartialEq for PageIndex {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots
    }
}

impl PageIndex {
    /// Build an index from typed nodes, checking every invariant.
    pub fn from_nodes(roots: Vec<Node>) -> Result<Self, SchemaError> {
        let mut builder = IndexBuilder::default();
        let mut location = Vec::new();
        builder.visit_all(&roots, &mut location, None, None)?;

        if builder.title_page.is_none() {
            tracing::warn!("Page index has no TITLE_PAGE entry");
        }
        tracing::debug!(
            roots = roots.len(),
            paths = builder.entries.len(),
            "Page index loaded"
        );

        Ok(Self {
            roots,
            entries: builder.entries,
            path_index: builder.path_index,
            title_page: builder.title_page,
        })
    }

    /// Parse and validate a serialized tree.
    pub fn parse(content: &str, format: IndexFormat) -> Result<Self, LoadError> {
        let records: Vec<RawNode> = match format {
            IndexFormat::Json => serde_json::from_str(content)?,
            IndexFormat::Yaml => serde_yaml::from_str(content)?,
        };
        let roots = raw::into_nodes(records)?;
        Ok(Self::from_nodes(roots)?)
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, IndexFormat::Json)
    }

    pub fn from_yaml(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, IndexFormat::Yaml)
    }

    /// Load a tree from a file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let format = IndexFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
        Self::from_path_with_format(path, format)
    }

    /// Load a tree from a file in the given format.
    pub fn from_path_with_format(path: &Path, format: IndexFormat) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    /// Ordered root sequence.
    #[must_use]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Number of nodes that own a path (navigable nodes and redirects).
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.entries.len()
    }

    /// The `TITLE_PAGE` node, if the tree has one.
    #[must_use]
    pub fn title_page(&self) -> Option<&Node> {
        self.title_page.map(|i| self.entry_node(i))
    }

    /// Exact lookup by full path, without following redirects.
    ///
    /// # Arguments
    ///
    /// * `path` - Full path, leading and trailing `/` ignored (e.g. "/api/backup")
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.path_index
            .get(normalize_path(path))
            .map(|&i| self.entry_node(i))
    }

    /// Resolve a path to its node, following redirects.
    pub fn find_by_href(&self, path: &str) -> Result<&Node, LookupError> {
        self.resolve(path).map(|resolved| resolved.node)
    }

    /// Resolve a path, following `REDIRECT` / `HIDDEN_REDIRECT` chains.
    ///
    /// An empty path resolves to the title page. A `#fragment` suffix selects
    /// the anchor with that name on the resolved page. A fragment on a
    /// redirect target replaces the one the path came with.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` for unknown paths, dangling redirect
    /// targets and unknown fragments, and `LookupError::RedirectCycle` when a
    /// redirect chain revisits a path.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, LookupError> {
        let (path, mut fragment) = split_fragment(path);

        let mut current = normalize_path(path).to_owned();
        let mut redirects: Vec<String> = Vec::new();
        let entry = loop {
            let idx = self.lookup_entry(&current)?;
            let Some(target) = self.entry_node(idx).redirect_target() else {
                break idx;
            };

            let (target, target_fragment) = split_fragment(target);
            if target_fragment.is_some() {
                fragment = target_fragment;
            }
            let next = normalize_path(target).to_owned();
            redirects.push(std::mem::replace(&mut current, next));
            if redirects.contains(&current) {
                redirects.push(current);
                return Err(LookupError::RedirectCycle { chain: redirects });
            }
            tracing::debug!(
                from = redirects.last().map_or("", String::as_str),
                to = %current,
                "Following redirect"
            );
        };

        let path = self.entries[entry].path.clone();
        let page = self.entry_node(entry);
        let node = match fragment {
            Some(fragment) => page
                .children()
                .iter()
                .find(|child| matches!(child, Node::Anchor(anchor) if anchor.name() == fragment))
                .ok_or_else(|| LookupError::NotFound(format!("{path}#{fragment}")))?,
            None => page,
        };

        Ok(Resolved {
            node,
            path,
            redirects,
            entry,
        })
    }

    /// Anchors declared directly under the node at `entry`.
    pub(crate) fn anchors(&self, entry: usize) -> impl Iterator<Item = &Anchor> {
        self.entry_node(entry).children().iter().filter_map(|child| match child {
            Node::Anchor(anchor) => Some(anchor),
            _ => None,
        })
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn title_page_entry(&self) -> Option<usize> {
        self.title_page
    }

    /// Node for an entry index.
    pub(crate) fn entry_node(&self, idx: usize) -> &Node {
        let location = &self.entries[idx].location;
        let mut node = &self.roots[location[0]];
        for &i in &location[1..] {
            node = &node.children()[i];
        }
        node
    }

    fn lookup_entry(&self, path: &str) -> Result<usize, LookupError> {
        if path.is_empty()
            && let Some(title) = self.title_page
        {
            return Ok(title);
        }
        self.path_index
            .get(path)
            .copied()
            .ok_or_else(|| LookupError::NotFound(path.to_owned()))
    }

    /// Serialize the tree as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.roots)
    }

    /// Serialize the tree as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.roots)
    }
}

/// Split `path#fragment` at the first `#`.
fn split_fragment(path: &str) -> (&str, Option<&str>) {
    match path.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (path, None),
    }
}

/// Strip leading and trailing slashes from a path.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Check a navigable or redirect `href`: a single, non-empty path segment.
fn segment_error(href: &str) -> Option<&'static str> {
    if href.is_empty() {
        Some("must not be empty")
    } else if href.contains('/') {
        Some("must be a single path segment")
    } else if href.contains('#') {
        Some("only anchors may contain '#'")
    } else {
        None
    }
}

fn is_absolute_url(href: &str) -> bool {
    ["http://", "https://", "//"]
        .iter()
        .any(|scheme| href.len() > scheme.len() && href.starts_with(scheme))
}

#[derive(Default)]
struct IndexBuilder {
    entries: Vec<Entry>,
    path_index: HashMap<String, usize>,
    title_page: Option<usize>,
}

impl IndexBuilder {
    fn visit_all(
        &mut self,
        nodes: &[Node],
        location: &mut Vec<usize>,
        parent: Option<usize>,
        parent_kind: Option<NodeKind>,
    ) -> Result<(), SchemaError> {
        let mut anchors = HashSet::new();
        for (i, node) in nodes.iter().enumerate() {
            location.push(i);
            if let Node::Anchor(anchor) = node
                && !anchors.insert(anchor.href.as_str())
            {
                return Err(SchemaError::DuplicateAnchor {
                    location: describe_location(location),
                    href: anchor.href.clone(),
                });
            }
            self.visit(node, location, parent, parent_kind)?;
            location.pop();
        }
        Ok(())
    }

    fn visit(
        &mut self,
        node: &Node,
        location: &mut Vec<usize>,
        parent: Option<usize>,
        parent_kind: Option<NodeKind>,
    ) -> Result<(), SchemaError> {
        let kind = node.kind();
        check_fields(node, location)?;

        match node {
            Node::Anchor(anchor) => {
                if !parent_kind.is_some_and(NodeKind::is_page) {
                    return Err(SchemaError::MisplacedAnchor {
                        location: describe_location(location),
                        href: anchor.href.clone(),
                    });
                }
                if anchor.href.len() < 2 || !anchor.href.starts_with('#') {
                    return Err(invalid_href(node, location, "must be '#' followed by a name"));
                }
                Ok(())
            }
            Node::Link(link) => {
                if is_absolute_url(&link.href) {
                    Ok(())
                } else {
                    Err(invalid_href(node, location, "must be an absolute URL"))
                }
            }
            _ => {
                if let Some(reason) = segment_error(node.href()) {
                    return Err(invalid_href(node, location, reason));
                }
                let idx = self.add_entry(node, location, parent)?;
                if kind == NodeKind::TitlePage {
                    if parent.is_some() {
                        return Err(SchemaError::NestedTitlePage {
                            location: describe_location(location),
                        });
                    }
                    if let Some(first) = self.title_page {
                        return Err(SchemaError::MultipleTitlePages {
                            first: describe_location(&self.entries[first].location),
                            second: describe_location(location),
                        });
                    }
                    self.title_page = Some(idx);
                }
                self.visit_all(node.children(), location, Some(idx), Some(kind))
            }
        }
    }

    fn add_entry(
        &mut self,
        node: &Node,
        location: &[usize],
        parent: Option<usize>,
    ) -> Result<usize, SchemaError> {
        let (path, depth) = match parent {
            Some(p) => (
                format!("{}/{}", self.entries[p].path, node.href()),
                self.entries[p].depth + 1,
            ),
            None => (node.href().to_owned(), 0),
        };

        if let Some(&first) = self.path_index.get(&path) {
            return Err(SchemaError::DuplicatePath {
                path,
                location: describe_location(location),
                first: describe_location(&self.entries[first].location),
            });
        }

        let idx = self.entries.len();
        self.path_index.insert(path.clone(), idx);
        self.entries.push(Entry {
            kind: node.kind(),
            path,
            depth,
            parent,
            location: location.to_vec(),
        });
        Ok(idx)
    }
}

fn invalid_href(node: &Node, location: &[usize], reason: &'static str) -> SchemaError {
    SchemaError::InvalidHref {
        location: describe_location(location),
        kind: node.kind(),
        href: node.href().to_owned(),
        reason,
    }
}

/// Required string fields must be non-empty. The typed model makes presence
/// structural; emptiness is checked here for trees built in code.
fn check_fields(node: &Node, location: &[usize]) -> Result<(), SchemaError> {
    let missing = |field| SchemaError::MissingField {
        location: describe_location(location),
        kind: node.kind(),
        field,
    };

    if node.title().is_some_and(str::is_empty) {
        return Err(missing("Title"));
    }
    match node {
        Node::ReactPage(page) if page.component.is_empty() => Err(missing("component")),
        Node::Directory(dir) if dir.src.is_empty() => Err(missing("src")),
        Node::Redirect(redirect) | Node::HiddenRedirect(redirect)
            if normalize_path(split_fragment(&redirect.to).0).is_empty() =>
        {
            Err(missing("to"))
        }
        _ => Ok(()),
    }
}
