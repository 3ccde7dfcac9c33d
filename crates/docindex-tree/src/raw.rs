//! Storage-format records.
//!
//! The serialized tree is a list of flat records keyed by `type`, where each
//! kind uses a subset of the optional fields. [`RawNode`] mirrors that shape
//! and is converted into the typed [`Node`] model, rejecting missing fields
//! and fields the kind does not carry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{SchemaError, describe_location};
use crate::node::{Anchor, Directory, Link, Node, NodeKind, Page, ReactPage, Redirect, TitlePage};

/// One record as read from JSON or YAML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawNode {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "type")]
    kind: NodeKind,
    href: Option<String>,
    to: Option<String>,
    src: Option<String>,
    component: Option<String>,
    options: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(rename = "showNewsletterForm")]
    show_newsletter_form: Option<bool>,
    children: Option<Vec<RawNode>>,
}

/// Convert a root sequence of records into typed nodes.
pub(crate) fn into_nodes(records: Vec<RawNode>) -> Result<Vec<Node>, SchemaError> {
    let mut location = Vec::new();
    convert_all(records, &mut location)
}

fn convert_all(records: Vec<RawNode>, location: &mut Vec<usize>) -> Result<Vec<Node>, SchemaError> {
    let mut nodes = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        location.push(i);
        nodes.push(record.into_node(location)?);
        location.pop();
    }
    Ok(nodes)
}

impl RawNode {
    fn into_node(self, location: &mut Vec<usize>) -> Result<Node, SchemaError> {
        let kind = self.kind;
        let here = describe_location(location);
        let has_children = self.children.as_ref().is_some_and(|c| !c.is_empty());
        let unexpected = [
            ("Title", self.title.is_some() && kind.is_redirect()),
            ("to", self.to.is_some() && !kind.is_redirect()),
            ("src", self.src.is_some() && kind != NodeKind::Directory),
            ("component", self.component.is_some() && kind != NodeKind::ReactPage),
            ("options", self.options.is_some() && kind != NodeKind::ReactPage),
            (
                "showNewsletterForm",
                self.show_newsletter_form.is_some() && kind != NodeKind::ReactPage,
            ),
            ("children", has_children && !kind.has_children()),
        ];
        if let Some((field, _)) = unexpected.iter().find(|(_, present)| *present) {
            return Err(SchemaError::UnexpectedField {
                location: here,
                kind,
                field: *field,
            });
        }

        let require = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SchemaError::MissingField {
                    location: here.clone(),
                    kind,
                    field,
                })
        };

        let node = match kind {
            NodeKind::Page | NodeKind::NonMenuPage => {
                let page = Page {
                    title: require(self.title, "Title")?,
                    href: require(self.href, "href")?,
                    children: convert_all(self.children.unwrap_or_default(), location)?,
                };
                if kind == NodeKind::Page {
                    Node::Page(page)
                } else {
                    Node::NonMenuPage(page)
                }
            }
            NodeKind::ReactPage => Node::ReactPage(ReactPage {
                title: require(self.title, "Title")?,
                href: require(self.href, "href")?,
                component: require(self.component, "component")?,
                options: self.options.unwrap_or_default(),
                show_newsletter_form: self.show_newsletter_form.unwrap_or(false),
                children: convert_all(self.children.unwrap_or_default(), location)?,
            }),
            NodeKind::Directory => Node::Directory(Directory {
                title: require(self.title, "Title")?,
                href: require(self.href, "href")?,
                src: require(self.src, "src")?,
                children: convert_all(self.children.unwrap_or_default(), location)?,
            }),
            NodeKind::Anchor => Node::Anchor(Anchor {
                title: require(self.title, "Title")?,
                href: require(self.href, "href")?,
            }),
            NodeKind::Link => Node::Link(Link {
                title: require(self.title, "Title")?,
                href: require(self.href, "href")?,
            }),
            NodeKind::TitlePage => Node::TitlePage(TitlePage {
                title: require(self.title, "Title")?,
                href: require(self.href, "href")?,
            }),
            NodeKind::Redirect | NodeKind::HiddenRedirect => {
                let redirect = Redirect {
                    href: require(self.href, "href")?,
                    to: require(self.to, "to")?,
                };
                if kind == NodeKind::Redirect {
                    Node::Redirect(redirect)
                } else {
                    Node::HiddenRedirect(redirect)
                }
            }
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> Result<Vec<Node>, SchemaError> {
        let records: Vec<RawNode> = serde_json::from_str(json).unwrap();
        into_nodes(records)
    }

    #[test]
    fn test_page_with_children() {
        let nodes = parse(
            r#"[{"Title": "Overview", "type": "PAGE", "href": "introduction",
                 "children": [{"Title": "Architecture", "type": "PAGE", "href": "architecture"}]}]"#,
        )
        .unwrap();

        assert_eq!(
            nodes,
            vec![Node::Page(Page {
                title: "Overview".to_owned(),
                href: "introduction".to_owned(),
                children: vec![Node::Page(Page {
                    title: "Architecture".to_owned(),
                    href: "architecture".to_owned(),
                    children: Vec::new(),
                })],
            })]
        );
    }

    #[test]
    fn test_empty_children_list_is_accepted() {
        let nodes = parse(
            r#"[{"Title": "Forecasting", "type": "PAGE", "href": "tutorial-forecasting", "children": []}]"#,
        )
        .unwrap();
        assert!(nodes[0].children().is_empty());
    }

    #[test]
    fn test_react_page_defaults() {
        let nodes = parse(
            r#"[{"Title": "Installing", "type": "REACT_PAGE", "href": "installation",
                 "component": "InstallationPage"}]"#,
        )
        .unwrap();

        let Node::ReactPage(page) = &nodes[0] else {
            panic!("expected REACT_PAGE");
        };
        assert_eq!(page.component, "InstallationPage");
        assert!(page.options.is_empty());
        assert!(!page.show_newsletter_form);
    }

    #[test]
    fn test_react_page_requires_component() {
        let err = parse(r#"[{"Title": "Installing", "type": "REACT_PAGE", "href": "installation"}]"#)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingField {
                location: "[0]".to_owned(),
                kind: NodeKind::ReactPage,
                field: "component",
            }
        );
    }

    #[test]
    fn test_redirect_missing_to() {
        let err = parse(r#"[{"type": "HIDDEN_REDIRECT", "href": "backup"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "to", .. }));
    }

    #[test]
    fn test_redirect_with_empty_to() {
        let err = parse(r#"[{"type": "REDIRECT", "href": "backup", "to": ""}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "to", .. }));
    }

    #[test]
    fn test_redirect_with_title_rejected() {
        let err = parse(r#"[{"Title": "Backup", "type": "HIDDEN_REDIRECT", "href": "backup", "to": "/b"}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnexpectedField {
                field: "Title",
                kind: NodeKind::HiddenRedirect,
                ..
            }
        ));
    }

    #[test]
    fn test_anchor_with_children_rejected() {
        let err = parse(
            r##"[{"Title": "API", "type": "PAGE", "href": "api", "children": [
                  {"Title": "Analytics", "type": "ANCHOR", "href": "#analytics",
                   "children": [{"Title": "X", "type": "PAGE", "href": "x"}]}]}]"##,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnexpectedField {
                location: "[0].children[0]".to_owned(),
                kind: NodeKind::Anchor,
                field: "children",
            }
        );
    }

    #[test]
    fn test_src_only_on_directory() {
        let err = parse(r#"[{"Title": "GitHub", "type": "LINK", "href": "https://github.com", "src": "//x.svg"}]"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedField { field: "src", .. }));
    }

    #[test]
    fn test_directory_requires_src() {
        let err = parse(r#"[{"Title": "Mac", "type": "DIRECTORY", "href": "mac"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "src", .. }));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let result: Result<Vec<RawNode>, _> =
            serde_json::from_str(r#"[{"Title": "X", "type": "SIDEBAR", "href": "x"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let result: Result<Vec<RawNode>, _> =
            serde_json::from_str(r#"[{"Title": "X", "type": "PAGE", "href": "x", "icon": "y"}]"#);
        assert!(result.is_err());
    }
}
