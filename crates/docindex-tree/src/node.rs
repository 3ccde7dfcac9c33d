//! Page-index node model.
//!
//! Every entry in the tree is a [`Node`]. Each variant wraps a struct that
//! carries only the fields valid for that kind: anchors and links have no
//! `children`, redirects have no title. The storage format is a flat record
//! keyed by `type`; this module is the typed view the rest of the crate
//! works with.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Node kind, as written in the `type` field of the storage format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Navigable document.
    Page,
    /// Navigable document hidden from rendered menus.
    NonMenuPage,
    /// Page rendered by an external interactive component.
    ReactPage,
    /// Platform grouping inside installation sub-trees.
    Directory,
    /// In-page jump target.
    Anchor,
    /// External URL.
    Link,
    /// Path alias (reserved, resolves like a hidden redirect).
    Redirect,
    /// Path alias never shown in menus.
    HiddenRedirect,
    /// Root/home entry.
    TitlePage,
}

impl NodeKind {
    /// Name used in the storage format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "PAGE",
            Self::NonMenuPage => "NON_MENU_PAGE",
            Self::ReactPage => "REACT_PAGE",
            Self::Directory => "DIRECTORY",
            Self::Anchor => "ANCHOR",
            Self::Link => "LINK",
            Self::Redirect => "REDIRECT",
            Self::HiddenRedirect => "HIDDEN_REDIRECT",
            Self::TitlePage => "TITLE_PAGE",
        }
    }

    /// True for kinds that own a path and resolve to content.
    #[must_use]
    pub fn is_navigable(self) -> bool {
        matches!(
            self,
            Self::Page | Self::NonMenuPage | Self::ReactPage | Self::Directory | Self::TitlePage
        )
    }

    /// True for `REDIRECT` and `HIDDEN_REDIRECT`.
    #[must_use]
    pub fn is_redirect(self) -> bool {
        matches!(self, Self::Redirect | Self::HiddenRedirect)
    }

    /// True for kinds that may carry anchor children.
    #[must_use]
    pub fn is_page(self) -> bool {
        matches!(self, Self::Page | Self::NonMenuPage | Self::ReactPage)
    }

    /// True for kinds whose variant has a `children` field.
    #[must_use]
    pub fn has_children(self) -> bool {
        matches!(
            self,
            Self::Page | Self::NonMenuPage | Self::ReactPage | Self::Directory
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by `PAGE` and `NON_MENU_PAGE`.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub title: String,
    /// Path segment, relative to the parent page.
    pub href: String,
    pub children: Vec<Node>,
}

/// A page rendered by a named component.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactPage {
    pub title: String,
    pub href: String,
    /// Component identifier, resolved by the renderer's registry.
    pub component: String,
    /// Component configuration, passed through verbatim (e.g. `pg_version`).
    pub options: BTreeMap<String, serde_json::Value>,
    /// Enables the newsletter sign-up form next to the component.
    pub show_newsletter_form: bool,
    pub children: Vec<Node>,
}

impl ReactPage {
    /// Look up a configuration value by key.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }
}

/// Platform grouping with an icon.
#[derive(Clone, Debug, PartialEq)]
pub struct Directory {
    pub title: String,
    pub href: String,
    /// Icon URL, handed to the asset loader as-is.
    pub src: String,
    pub children: Vec<Node>,
}

/// In-page jump target. `href` includes the leading `#`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub title: String,
    pub href: String,
}

impl Anchor {
    /// Fragment name without the leading `#`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }
}

/// External link with an absolute URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub href: String,
}

/// Path alias: `href` is the old segment, `to` the absolute target path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub href: String,
    pub to: String,
}

/// Root/home entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitlePage {
    pub title: String,
    pub href: String,
}

/// One entry of the page-index tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Page(Page),
    NonMenuPage(Page),
    ReactPage(ReactPage),
    Directory(Directory),
    Anchor(Anchor),
    Link(Link),
    Redirect(Redirect),
    HiddenRedirect(Redirect),
    TitlePage(TitlePage),
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Page(_) => NodeKind::Page,
            Self::NonMenuPage(_) => NodeKind::NonMenuPage,
            Self::ReactPage(_) => NodeKind::ReactPage,
            Self::Directory(_) => NodeKind::Directory,
            Self::Anchor(_) => NodeKind::Anchor,
            Self::Link(_) => NodeKind::Link,
            Self::Redirect(_) => NodeKind::Redirect,
            Self::HiddenRedirect(_) => NodeKind::HiddenRedirect,
            Self::TitlePage(_) => NodeKind::TitlePage,
        }
    }

    /// Display title. Redirects have none.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Page(p) | Self::NonMenuPage(p) => Some(&p.title),
            Self::ReactPage(p) => Some(&p.title),
            Self::Directory(d) => Some(&d.title),
            Self::Anchor(a) => Some(&a.title),
            Self::Link(l) => Some(&l.title),
            Self::TitlePage(t) => Some(&t.title),
            Self::Redirect(_) | Self::HiddenRedirect(_) => None,
        }
    }

    /// Raw `href` value: a path segment, `#fragment`, or URL depending on kind.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Page(p) | Self::NonMenuPage(p) => &p.href,
            Self::ReactPage(p) => &p.href,
            Self::Directory(d) => &d.href,
            Self::Anchor(a) => &a.href,
            Self::Link(l) => &l.href,
            Self::Redirect(r) | Self::HiddenRedirect(r) => &r.href,
            Self::TitlePage(t) => &t.href,
        }
    }

    /// Ordered children. Empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Page(p) | Self::NonMenuPage(p) => &p.children,
            Self::ReactPage(p) => &p.children,
            Self::Directory(d) => &d.children,
            Self::Anchor(_)
            | Self::Link(_)
            | Self::Redirect(_)
            | Self::HiddenRedirect(_)
            | Self::TitlePage(_) => &[],
        }
    }

    /// Target path for redirect kinds.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(r) | Self::HiddenRedirect(r) => Some(&r.to),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.kind().is_navigable()
    }
}

/// Borrowed storage-format record used for serialization.
#[derive(Serialize)]
struct NodeRecord<'a> {
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "type")]
    kind: NodeKind,
    href: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a BTreeMap<String, serde_json::Value>>,
    #[serde(rename = "showNewsletterForm", skip_serializing_if = "is_false")]
    show_newsletter_form: bool,
    #[serde(skip_serializing_if = "<[Node]>::is_empty")]
    children: &'a [Node],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl<'a> From<&'a Node> for NodeRecord<'a> {
    fn from(node: &'a Node) -> Self {
        let mut record = NodeRecord {
            title: node.title(),
            kind: node.kind(),
            href: node.href(),
            to: node.redirect_target(),
            src: None,
            component: None,
            options: None,
            show_newsletter_form: false,
            children: node.children(),
        };
        match node {
            Node::ReactPage(p) => {
                record.component = Some(&p.component);
                record.options = (!p.options.is_empty()).then_some(&p.options);
                record.show_newsletter_form = p.show_newsletter_form;
            }
            Node::Directory(d) => record.src = Some(&d.src),
            _ => {}
        }
        record
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRecord::from(self).serialize(serializer)
    }
}
