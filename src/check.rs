//! Link-integrity checking.
//!
//! The engine accepts any sidebar it is given. A leaf pointing at a missing
//! document only shows up as a 404 at serve time, and a document nobody links
//! to never shows up at all. This module catches both at build time by
//! walking the sidebar and cross-checking it against the scanned documents.
//!
//! ## Rules
//!
//! | Issue | Severity | Condition |
//! |-------|----------|-----------|
//! | `EmptyText` | error | a node with a blank label |
//! | `AmbiguousNode` | error | a node with both `link` and `items` |
//! | `EmptyGroup` | warning | a node with neither |
//! | `DanglingLink` | error | a link with no document behind it |
//! | `DuplicateLink` | error | two nodes resolving to one document |
//! | `OrphanDocument` | error | a document no node references (outside `exclude`) |
//! | `TitleMismatch` | warning | leaf label differs from the document's `#` heading |
//! | `DanglingNavLink` | error | a top-nav link with no document behind it |
//! | `Config` | error | the configuration fails validation |
//!
//! External links are never resolved and never count as references.

use crate::config::SiteConfig;
use crate::nav::{LinkTarget, normalize_link};
use crate::scan::ContentIndex;
use crate::types::NavNode;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding. `location` is the 1-based sibling path, e.g. `3.9` for the
/// ninth item of the third chapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("sidebar {location}: empty text")]
    EmptyText { location: String },
    #[error("sidebar {location} \"{text}\": has both a link and child items")]
    AmbiguousNode { location: String, text: String },
    #[error("sidebar {location} \"{text}\": has neither a link nor child items")]
    EmptyGroup { location: String, text: String },
    #[error("sidebar {location} \"{text}\": link {link} has no document at {document}")]
    DanglingLink {
        location: String,
        text: String,
        link: String,
        document: String,
    },
    #[error("sidebar {location} \"{text}\": {document} is already linked by \"{first}\"")]
    DuplicateLink {
        location: String,
        text: String,
        document: String,
        first: String,
    },
    #[error("{document}: not referenced by any sidebar entry")]
    OrphanDocument { document: String },
    #[error("sidebar {location}: label \"{text}\" differs from {document} heading \"{heading}\"")]
    TitleMismatch {
        location: String,
        text: String,
        document: String,
        heading: String,
    },
    #[error("nav \"{text}\": link {link} has no document at {document}")]
    DanglingNavLink {
        text: String,
        link: String,
        document: String,
    },
    #[error("config: {0}")]
    Config(String),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::EmptyGroup { .. } | Issue::TitleMismatch { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Variant name, for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::EmptyText { .. } => "EmptyText",
            Issue::AmbiguousNode { .. } => "AmbiguousNode",
            Issue::EmptyGroup { .. } => "EmptyGroup",
            Issue::DanglingLink { .. } => "DanglingLink",
            Issue::DuplicateLink { .. } => "DuplicateLink",
            Issue::OrphanDocument { .. } => "OrphanDocument",
            Issue::TitleMismatch { .. } => "TitleMismatch",
            Issue::DanglingNavLink { .. } => "DanglingNavLink",
            Issue::Config(_) => "Config",
        }
    }
}

/// All findings from one check, in discovery order: sidebar issues in tree
/// order, then orphans by path, then nav and config issues.
#[derive(Debug, Default)]
pub struct Report {
    pub issues: Vec<Issue>,
    /// Documents referenced by at least one sidebar entry.
    pub referenced: usize,
    /// Documents found under `src_dir`.
    pub scanned: usize,
}

impl Report {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Cross-check the resolved sidebar and nav against the scanned documents.
pub fn check(config: &SiteConfig, content: &ContentIndex) -> Report {
    let mut issues = Vec::new();

    if let Err(e) = config.validate() {
        issues.push(Issue::Config(e.to_string()));
    }

    let sidebar = config.sidebar();
    let mut walk = SidebarWalk {
        content,
        seen: HashMap::new(),
        issues: &mut issues,
    };
    walk.visit(&sidebar, "");
    let referenced: HashSet<String> = walk
        .seen
        .into_keys()
        .filter(|document| content.contains(document))
        .collect();

    for doc in &content.documents {
        if !referenced.contains(&doc.relative_path) && !config.is_excluded(&doc.relative_path) {
            issues.push(Issue::OrphanDocument {
                document: doc.relative_path.clone(),
            });
        }
    }

    for nav in &config.theme.nav {
        if let LinkTarget::Document(document) = normalize_link(&nav.link)
            && !content.contains(&document)
        {
            issues.push(Issue::DanglingNavLink {
                text: nav.text.clone(),
                link: nav.link.clone(),
                document,
            });
        }
    }

    Report {
        issues,
        referenced: referenced.len(),
        scanned: content.len(),
    }
}

struct SidebarWalk<'a> {
    content: &'a ContentIndex,
    /// Document path → label of the first node that linked it, existing or not.
    seen: HashMap<String, String>,
    issues: &'a mut Vec<Issue>,
}

impl SidebarWalk<'_> {
    fn visit(&mut self, nodes: &[NavNode], parent: &str) {
        for (i, node) in nodes.iter().enumerate() {
            let location = if parent.is_empty() {
                (i + 1).to_string()
            } else {
                format!("{parent}.{}", i + 1)
            };
            self.visit_node(node, &location);
            self.visit(&node.items, &location);
        }
    }

    fn visit_node(&mut self, node: &NavNode, location: &str) {
        if node.text.trim().is_empty() {
            self.issues.push(Issue::EmptyText {
                location: location.to_string(),
            });
        }

        match (&node.link, node.items.is_empty()) {
            (Some(_), false) => self.issues.push(Issue::AmbiguousNode {
                location: location.to_string(),
                text: node.text.clone(),
            }),
            (None, true) => self.issues.push(Issue::EmptyGroup {
                location: location.to_string(),
                text: node.text.clone(),
            }),
            _ => {}
        }

        let Some(link) = &node.link else {
            return;
        };
        let LinkTarget::Document(document) = normalize_link(link) else {
            return;
        };

        // Uniqueness holds whether or not the target exists.
        if let Some(first) = self.seen.get(&document) {
            self.issues.push(Issue::DuplicateLink {
                location: location.to_string(),
                text: node.text.clone(),
                document,
                first: first.clone(),
            });
            return;
        }
        self.seen.insert(document.clone(), node.text.clone());

        let Some(doc) = self.content.get(&document) else {
            self.issues.push(Issue::DanglingLink {
                location: location.to_string(),
                text: node.text.clone(),
                link: link.clone(),
                document,
            });
            return;
        };

        if node.is_leaf() && doc.title != node.text.trim() {
            self.issues.push(Issue::TitleMismatch {
                location: location.to_string(),
                text: node.text.clone(),
                document,
                heading: doc.title.clone(),
            });
        }
    }
}
