//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what a reader of the book sees (chapter and item labels,
//! reading-order positions) and shows file paths as secondary context on
//! indented lines. The same entity looks the same whether it comes from the
//! sidebar, the scan, or the check report.
//!
//! # Output Format
//!
//! ## Sidebar
//!
//! ```text
//! 001 Chapter 1: Getting to Know TypeScript
//!     001 Item 1: Understand the Relationship Between TypeScript and JavaScript
//!         Link: /ch-intro/ts-vs-js
//!     ...
//!
//! 10 groups, 83 pages
//! ```
//!
//! ## Scan
//!
//! ```text
//! ch-design/avoid-optional.md
//!     Item 37: Limit the Use of Optional Properties
//!     Sections: 要点, 正文
//!
//! 84 documents
//! ```
//!
//! ## Check
//!
//! ```text
//! error: sidebar 2.1 "Two": link /ch-b/two has no document at ch-b/two.md
//! warning: sidebar 1.1: label "One" differs from ch-a/one.md heading "Item 1: One"
//!
//! 83 of 84 documents referenced, 1 error, 1 warning
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::check::{Report, Severity};
use crate::nav::{Neighbors, TreeNode, walk_tree};
use crate::scan::ContentIndex;
use crate::types::NavNode;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 error`, `2 warnings`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Sidebar
// ============================================================================

/// Format the sidebar tree with per-level positions and leaf links.
pub fn format_sidebar(sidebar: &[NavNode]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut groups = 0;
    let mut pages = 0;

    for TreeNode {
        depth,
        position,
        node,
    } in walk_tree(sidebar)
    {
        let base_indent = indent(depth);
        lines.push(format!("{}{} {}", base_indent, format_index(position), node.text));
        if let Some(link) = &node.link {
            lines.push(format!("{}    Link: {}", base_indent, link));
        }
        if node.is_leaf() {
            pages += 1;
        } else {
            groups += 1;
        }
    }

    lines.push(String::new());
    lines.push(format!("{}, {}", plural(groups, "group"), plural(pages, "page")));
    lines
}

pub fn print_sidebar(sidebar: &[NavNode]) {
    for line in format_sidebar(sidebar) {
        println!("{}", line);
    }
}

// ============================================================================
// Neighbors
// ============================================================================

/// Format the doc-footer links around one page.
pub fn format_neighbors(neighbors: &Neighbors<'_>, prev_label: &str, next_label: &str) -> Vec<String> {
    let side = |label: &str, node: Option<&NavNode>| match node {
        Some(n) => format!(
            "{}: {} ({})",
            label,
            n.text,
            n.link.as_deref().unwrap_or_default()
        ),
        None => format!("{}: (none)", label),
    };
    vec![
        side(prev_label, neighbors.prev),
        side(next_label, neighbors.next),
    ]
}

pub fn print_neighbors(neighbors: &Neighbors<'_>, prev_label: &str, next_label: &str) {
    for line in format_neighbors(neighbors, prev_label, next_label) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the content inventory: path first, title and sections indented.
pub fn format_scan_output(content: &ContentIndex) -> Vec<String> {
    let mut lines = Vec::new();
    for doc in &content.documents {
        lines.push(doc.relative_path.clone());
        lines.push(format!("    {}", doc.title));
        if !doc.headers.is_empty() {
            lines.push(format!("    Sections: {}", doc.headers.join(", ")));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(plural(content.len(), "document"));
    lines
}

pub fn print_scan_output(content: &ContentIndex) {
    for line in format_scan_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a check report: one line per issue, then a summary.
pub fn format_check_report(report: &Report) -> Vec<String> {
    let mut lines: Vec<String> = report
        .issues
        .iter()
        .map(|issue| {
            let prefix = match issue.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            format!("{}: {}", prefix, issue)
        })
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} of {} referenced, {}, {}",
        report.referenced,
        plural(report.scanned, "document"),
        plural(report.errors().count(), "error"),
        plural(report.warnings().count(), "warning"),
    ));
    lines
}

pub fn print_check_report(report: &Report) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Issue;
    use crate::types::Document;

    fn small_sidebar() -> Vec<NavNode> {
        vec![
            NavNode::group(
                "Chapter 1",
                vec![
                    NavNode::leaf("Item 1: One", "/ch-a/one"),
                    NavNode::leaf("Item 2: Two", "/ch-a/two"),
                ],
            ),
            NavNode::group("Chapter 2", vec![NavNode::leaf("Item 3: Three", "/ch-b/three")]),
        ]
    }

    #[test]
    fn sidebar_lines_nest_and_number() {
        let lines = format_sidebar(&small_sidebar());
        assert_eq!(
            lines,
            vec![
                "001 Chapter 1",
                "    001 Item 1: One",
                "        Link: /ch-a/one",
                "    002 Item 2: Two",
                "        Link: /ch-a/two",
                "002 Chapter 2",
                "    001 Item 3: Three",
                "        Link: /ch-b/three",
                "",
                "2 groups, 3 pages",
            ]
        );
    }

    #[test]
    fn sidebar_summary_singular() {
        let lines = format_sidebar(&[NavNode::group("Only", vec![NavNode::leaf("Page", "/p")])]);
        assert_eq!(lines.last().unwrap(), "1 group, 1 page");
    }

    #[test]
    fn neighbors_lines() {
        let sidebar = small_sidebar();
        let n = crate::nav::neighbors(&sidebar, "/ch-a/two").unwrap();
        assert_eq!(
            format_neighbors(&n, "上一页", "下一页"),
            vec![
                "上一页: Item 1: One (/ch-a/one)",
                "下一页: Item 3: Three (/ch-b/three)",
            ]
        );
    }

    #[test]
    fn neighbors_missing_side() {
        let sidebar = small_sidebar();
        let n = crate::nav::neighbors(&sidebar, "/ch-a/one").unwrap();
        assert_eq!(format_neighbors(&n, "Prev", "Next")[0], "Prev: (none)");
    }

    #[test]
    fn scan_lines_show_sections() {
        let content = ContentIndex {
            documents: vec![
                Document {
                    relative_path: "ch-design/avoid-optional.md".to_string(),
                    title: "Item 37: Limit the Use of Optional Properties".to_string(),
                    headers: vec!["要点".to_string(), "正文".to_string()],
                },
                Document {
                    relative_path: "index.md".to_string(),
                    title: "Home".to_string(),
                    headers: vec![],
                },
            ],
        };
        assert_eq!(
            format_scan_output(&content),
            vec![
                "ch-design/avoid-optional.md",
                "    Item 37: Limit the Use of Optional Properties",
                "    Sections: 要点, 正文",
                "index.md",
                "    Home",
                "",
                "2 documents",
            ]
        );
    }

    #[test]
    fn empty_scan() {
        assert_eq!(format_scan_output(&ContentIndex::default()), vec!["0 documents"]);
    }

    #[test]
    fn check_report_lines() {
        let report = Report {
            issues: vec![
                Issue::OrphanDocument {
                    document: "ch-b/three.md".to_string(),
                },
                Issue::EmptyGroup {
                    location: "3".to_string(),
                    text: "Appendix".to_string(),
                },
            ],
            referenced: 2,
            scanned: 3,
        };
        assert_eq!(
            format_check_report(&report),
            vec![
                "error: ch-b/three.md: not referenced by any sidebar entry",
                "warning: sidebar 3 \"Appendix\": has neither a link nor child items",
                "",
                "2 of 3 documents referenced, 1 error, 1 warning",
            ]
        );
    }

    #[test]
    fn clean_report_is_summary_only() {
        let report = Report {
            issues: vec![],
            referenced: 83,
            scanned: 84,
        };
        assert_eq!(
            format_check_report(&report),
            vec!["83 of 84 documents referenced, 0 errors, 0 warnings"]
        );
    }
}
