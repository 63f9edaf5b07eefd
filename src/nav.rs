//! Sidebar tree traversal and link resolution.
//!
//! The rendering engine derives two things from the sidebar: the nested menu,
//! and the "previous / next" footer links. The second comes from flattening
//! the tree depth-first, so sibling order in [`NavNode::items`] is the reading
//! order of the book. Everything here is read-only over a borrowed forest.
//!
//! ## Link forms
//!
//! The engine accepts several spellings of the same document link. All of
//! these resolve to `ch-intro/ts-vs-js.md` under `src_dir`:
//!
//! ```text
//! /ch-intro/ts-vs-js
//! ch-intro/ts-vs-js.md
//! /ch-intro/ts-vs-js.html#key-points
//! ```
//!
//! A trailing slash names the directory's `index.md`. Links carrying a URL
//! scheme (`https://`, `mailto:`) or starting with `//` are external and never
//! resolve to a document.

use crate::types::NavNode;

/// What a sidebar or nav link points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// A content document, as a `/`-separated path relative to `src_dir`.
    Document(String),
    /// An off-site URL, kept verbatim.
    External(String),
}

impl LinkTarget {
    pub fn document(&self) -> Option<&str> {
        match self {
            LinkTarget::Document(path) => Some(path),
            LinkTarget::External(_) => None,
        }
    }
}

/// Whether a link carries a URL scheme or is protocol-relative.
pub fn is_external(link: &str) -> bool {
    let link = link.trim();
    if link.starts_with("//") {
        return true;
    }
    match link.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Resolve a link to the document it names.
pub fn normalize_link(link: &str) -> LinkTarget {
    let trimmed = link.trim();
    if is_external(trimmed) {
        return LinkTarget::External(trimmed.to_string());
    }

    let without_fragment = trimmed.split(['#', '?']).next().unwrap_or_default();
    let path = without_fragment
        .trim_start_matches("./")
        .trim_start_matches('/');
    let path = if path.is_empty() || path.ends_with('/') {
        format!("{path}index")
    } else {
        path.to_string()
    };
    let stem = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".html"))
        .unwrap_or(&path);
    LinkTarget::Document(format!("{stem}.md"))
}

/// A node visited while walking the tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    /// 0 for top-level groups.
    pub depth: usize,
    /// 1-based position among siblings.
    pub position: usize,
    pub node: &'a NavNode,
}

/// Walk the forest depth-first, parents before children.
pub fn walk_tree(nodes: &[NavNode]) -> Vec<TreeNode<'_>> {
    let mut out = Vec::new();
    walk_tree_recursive(nodes, 0, &mut out);
    out
}

fn walk_tree_recursive<'a>(nodes: &'a [NavNode], depth: usize, out: &mut Vec<TreeNode<'a>>) {
    for (i, node) in nodes.iter().enumerate() {
        out.push(TreeNode {
            depth,
            position: i + 1,
            node,
        });
        walk_tree_recursive(&node.items, depth + 1, out);
    }
}

/// Leaves that point at content documents, in reading order.
///
/// External links are left out: the engine never puts them in the
/// previous/next sequence.
pub fn reading_order(nodes: &[NavNode]) -> Vec<&NavNode> {
    walk_tree(nodes)
        .into_iter()
        .map(|t| t.node)
        .filter(|n| {
            n.is_leaf()
                && n.link
                    .as_deref()
                    .is_some_and(|link| normalize_link(link).document().is_some())
        })
        .collect()
}

/// The footer links around one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a NavNode>,
    pub next: Option<&'a NavNode>,
}

/// Find the pages before and after the one `link` resolves to.
///
/// Returns `None` when no leaf resolves to that document. If the document is
/// referenced twice, the first occurrence wins, matching the engine.
pub fn neighbors<'a>(nodes: &'a [NavNode], link: &str) -> Option<Neighbors<'a>> {
    let target = normalize_link(link);
    let order = reading_order(nodes);
    let idx = order.iter().position(|n| {
        n.link
            .as_deref()
            .is_some_and(|l| normalize_link(l) == target)
    })?;
    Some(Neighbors {
        prev: idx.checked_sub(1).map(|i| order[i]),
        next: order.get(idx + 1).copied(),
    })
}
