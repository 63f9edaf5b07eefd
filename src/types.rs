//! Shared types used across configuration, checking, and export.
//!
//! [`NavNode`] serializes the same way in `site.toml` and in the engine JSON,
//! so a sidebar written by hand and one produced by
//! [`book::build_sidebar`](crate::book::build_sidebar) are interchangeable.

use serde::{Deserialize, Serialize};

/// A node in the sidebar tree: either a group of children or a leaf pointing
/// at one content document.
///
/// The type does not force the two shapes apart. The engine accepts both
/// fields on one node, so [`check`](crate::check) reports nodes that
/// populate both (or neither) instead of rejecting them at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavNode {
    /// Display label.
    pub text: String,
    /// Content reference, leaves only (`/ch-intro/ts-vs-js`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Ordered children, groups only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavNode>,
    /// Whether the group renders folded. `None` means not collapsible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl NavNode {
    pub fn leaf(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            items: Vec::new(),
            collapsed: None,
        }
    }

    pub fn group(text: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self {
            text: text.into(),
            link: None,
            items,
            collapsed: None,
        }
    }

    /// Mark a group as collapsible, starting folded or unfolded.
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }
}

/// A Markdown document found under `src_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Path relative to `src_dir`, always `/`-separated (`ch-design/avoid-optional.md`).
    pub relative_path: String,
    /// First `# heading`, or the file stem with dashes as spaces.
    pub title: String,
    /// Level-2 headings in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        sidebar: Vec<NavNode>,
    }

    #[test]
    fn nested_sidebar_from_toml() {
        let parsed: Wrapper = toml::from_str(
            r#"
[[sidebar]]
text = "Chapter 1"
collapsed = false

[[sidebar.items]]
text = "Item 1: One"
link = "/ch-a/one"
"#,
        )
        .unwrap();
        assert_eq!(
            parsed.sidebar,
            vec![NavNode::group("Chapter 1", vec![NavNode::leaf("Item 1: One", "/ch-a/one")]).with_collapsed(false)]
        );
    }

    #[test]
    fn unknown_node_key_rejected() {
        let result: Result<Wrapper, _> = toml::from_str("[[sidebar]]\ntext = \"A\"\nhref = \"/a\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn leaf_serializes_without_group_fields() {
        let json = serde_json::to_value(NavNode::leaf("One", "/one")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "One", "link": "/one" }));
    }

    #[test]
    fn group_without_items_is_leaf_shaped() {
        assert!(NavNode::group("Empty", Vec::new()).is_leaf());
        assert!(!NavNode::group("G", vec![NavNode::leaf("A", "/a")]).is_leaf());
    }
}
