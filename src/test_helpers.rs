//! Shared test utilities for the booksite test suite.
//!
//! Provides fixture builders that lay out Markdown documents in a temp
//! directory, and report lookups that panic with context on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_book(tmp.path());
//! let report = check(&SiteConfig::default(), &scan(tmp.path()).unwrap());
//!
//! assert_eq!(issue_kinds(&report), Vec::<&str>::new());
//! ```

use std::fs;
use std::path::Path;

use crate::book::build_sidebar;
use crate::check::{Issue, Report};
use crate::nav::{normalize_link, reading_order};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write one document, creating parent directories.
pub fn write_doc(root: &Path, relative_path: &str, content: &str) {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Lay out the whole book: `index.md` plus one document per outline item,
/// each opening with a heading equal to its sidebar label.
pub fn write_book(root: &Path) {
    write_doc(root, "index.md", "# Effective TypeScript\n");
    let sidebar = build_sidebar();
    for leaf in reading_order(&sidebar) {
        let link = leaf.link.as_deref().unwrap();
        let path = normalize_link(link);
        let path = path.document().unwrap();
        write_doc(
            root,
            path,
            &format!("# {}\n\n## 要点\n\n- ...\n\n## 正文\n\n...\n", leaf.text),
        );
    }
}

// =========================================================================
// Report lookups
// =========================================================================

/// First issue matching `pred`. Panics with the full issue list on a miss.
pub fn find_issue<'a>(report: &'a Report, pred: impl Fn(&Issue) -> bool) -> &'a Issue {
    report
        .issues
        .iter()
        .find(|i| pred(i))
        .unwrap_or_else(|| panic!("no matching issue. Report: {:?}", report.issues))
}

/// Issue kinds in report order.
pub fn issue_kinds(report: &Report) -> Vec<&'static str> {
    report.issues.iter().map(Issue::kind).collect()
}
