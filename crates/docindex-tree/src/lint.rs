//! Redirect checks that do not fail a load.
//!
//! A redirect whose target is missing, or that takes part in a cycle, is
//! structurally valid but fails at lookup time. [`PageIndex::lint`] runs
//! every redirect through the resolver up front so these show up before a
//! router hits them.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::LookupError;
use crate::index::PageIndex;

/// A redirect that will fail when resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LintIssue {
    /// Following the redirect at `path` ends at a path that does not exist.
    DanglingRedirect { path: String, target: String },
    /// A set of redirects that point at each other.
    RedirectCycle { chain: Vec<String> },
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingRedirect { path, target } => {
                write!(f, "redirect {path} points to missing path {target}")
            }
            Self::RedirectCycle { chain } => write!(f, "redirect cycle {}", chain.join(" -> ")),
        }
    }
}

impl PageIndex {
    /// Resolve every redirect and report the ones that fail.
    ///
    /// Each cycle is reported once, from the first of its redirects in
    /// declaration order.
    #[must_use]
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        let mut seen_cycles: HashSet<BTreeSet<String>> = HashSet::new();

        for entry in self.entries().iter().filter(|entry| entry.kind.is_redirect()) {
            match self.resolve(&entry.path) {
                Ok(_) => {}
                Err(LookupError::NotFound(target)) => issues.push(LintIssue::DanglingRedirect {
                    path: entry.path.clone(),
                    target,
                }),
                Err(LookupError::RedirectCycle { chain }) => {
                    // The chain may start with a lead-in before the loop closes.
                    let repeated = chain.last().cloned().unwrap_or_default();
                    let start = chain.iter().position(|p| *p == repeated).unwrap_or(0);
                    let members: BTreeSet<String> = chain[start..].iter().cloned().collect();
                    if seen_cycles.insert(members) {
                        issues.push(LintIssue::RedirectCycle {
                            chain: chain[start..].to_vec(),
                        });
                    }
                }
            }
        }

        if !issues.is_empty() {
            tracing::debug!(count = issues.len(), "Redirect lint found issues");
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{Anchor, Node, Page, Redirect};

    fn hidden(href: &str, to: &str) -> Node {
        Node::HiddenRedirect(Redirect {
            href: href.to_owned(),
            to: to.to_owned(),
        })
    }

    fn page(href: &str) -> Node {
        Node::Page(Page {
            title: href.to_uppercase(),
            href: href.to_owned(),
            children: Vec::new(),
        })
    }

    #[test]
    fn test_lint_clean_tree() {
        let index = PageIndex::from_nodes(vec![page("a"), hidden("old-a", "/a")]).unwrap();
        assert!(index.lint().is_empty());
    }

    #[test]
    fn test_lint_accepts_redirect_to_anchor() {
        let index = PageIndex::from_nodes(vec![
            Node::Page(Page {
                title: "API".to_owned(),
                href: "api".to_owned(),
                children: vec![Node::Anchor(Anchor {
                    title: "Analytics".to_owned(),
                    href: "#analytics".to_owned(),
                })],
            }),
            hidden("analytics", "/api#analytics"),
        ])
        .unwrap();

        assert_eq!(index.lint(), Vec::new());
    }

    #[test]
    fn test_lint_dangling_redirect() {
        let index = PageIndex::from_nodes(vec![hidden("old", "/gone")]).unwrap();

        assert_eq!(
            index.lint(),
            vec![LintIssue::DanglingRedirect {
                path: "old".to_owned(),
                target: "gone".to_owned(),
            }]
        );
    }

    #[test]
    fn test_lint_reports_cycle_once() {
        let index = PageIndex::from_nodes(vec![hidden("a", "/b"), hidden("b", "/a")]).unwrap();

        let issues = index.lint();

        assert_eq!(
            issues,
            vec![LintIssue::RedirectCycle {
                chain: vec!["a".to_owned(), "b".to_owned(), "a".to_owned()],
            }]
        );
    }

    #[test]
    fn test_lint_cycle_with_lead_in() {
        let index = PageIndex::from_nodes(vec![
            hidden("entry", "/a"),
            hidden("a", "/b"),
            hidden("b", "/a"),
        ])
        .unwrap();

        let issues = index.lint();

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "redirect cycle a -> b -> a"
        );
    }
}
