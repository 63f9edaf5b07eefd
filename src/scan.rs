//! Content directory scanning.
//!
//! Walks `src_dir` and records every Markdown document with the page data the
//! engine would derive from it: the relative path, the title (first `#`
//! heading), and the level-2 section headings.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                            # src_dir
//! ├── index.md                     # Home page (excluded from the sidebar)
//! ├── public/                      # Static assets, skipped
//! ├── .vitepress/                  # Engine config and cache, skipped
//! ├── ch-intro/
//! │   ├── ts-vs-js.md              # "# Item 1: Understand the ..."
//! │   └── ts-options.md
//! └── ch-design/
//!     └── avoid-optional.md
//! ```
//!
//! Hidden entries, `public/`, and `node_modules/` are never descended into.
//! YAML front matter is skipped, so a `title:` line there is not mistaken for
//! a heading.

use crate::naming::title_from_stem;
use crate::types::Document;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content directory not found: {0}")]
    MissingSource(PathBuf),
}

/// Directories under `src_dir` that never hold book content.
const SKIPPED_DIRS: &[&str] = &["public", "node_modules"];

/// Every Markdown document under `src_dir`, sorted by relative path.
#[derive(Debug, Default, Serialize)]
pub struct ContentIndex {
    pub documents: Vec<Document>,
}

impl ContentIndex {
    pub fn get(&self, relative_path: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|d| d.relative_path == relative_path)
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.get(relative_path).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub fn scan(src: &Path) -> Result<ContentIndex, ScanError> {
    if !src.is_dir() {
        return Err(ScanError::MissingSource(src.to_path_buf()));
    }

    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let relative_path = relative_path(src, entry.path());
        let content = fs::read_to_string(entry.path())?;
        documents.push(parse_document(relative_path, &content));
    }

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(ContentIndex { documents })
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&&*name))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// `/`-separated path of `path` below `src`, independent of the host OS.
fn relative_path(src: &Path, path: &Path) -> String {
    path.strip_prefix(src)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a [`Document`] from a file's path and Markdown source.
pub fn parse_document(relative_path: String, content: &str) -> Document {
    let mut title = None;
    let mut headers = Vec::new();
    let mut heading: Option<(HeadingLevel, String)> = None;

    let parser = Parser::new_ext(content, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => heading = Some((level, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = heading.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = heading.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, buf)) = heading.take() {
                    let text = buf.trim().to_string();
                    match level {
                        HeadingLevel::H1 if title.is_none() && !text.is_empty() => {
                            title = Some(text)
                        }
                        HeadingLevel::H2 => headers.push(text),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    let title = title.unwrap_or_else(|| {
        let file_name = relative_path.rsplit('/').next().unwrap_or(&relative_path);
        let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
        title_from_stem(stem)
    });

    Document {
        relative_path,
        title,
        headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_doc;
    use tempfile::TempDir;

    const AVOID_OPTIONAL: &str = "\
# Item 37: Limit the Use of Optional Properties

## 要点

- Optional properties can prevent the type checker from finding bugs.

## 正文

```ts
interface FormattedValue {
  value: number;
  units?: string;
}
```
";

    #[test]
    fn title_and_headers_from_markdown() {
        let doc = parse_document("ch-design/avoid-optional.md".into(), AVOID_OPTIONAL);
        assert_eq!(doc.title, "Item 37: Limit the Use of Optional Properties");
        assert_eq!(doc.headers, vec!["要点", "正文"]);
    }

    #[test]
    fn inline_code_kept_in_title() {
        let doc = parse_document(
            "ch-migrate/allowjs.md".into(),
            "# Item 81: Use `allowJs` to Mix TypeScript and JavaScript\n",
        );
        assert_eq!(
            doc.title,
            "Item 81: Use allowJs to Mix TypeScript and JavaScript"
        );
    }

    #[test]
    fn front_matter_is_not_a_heading() {
        let content = "---\ntitle: Not This\n---\n\n# Item 23: Be Consistent in Your Use of Aliases\n";
        let doc = parse_document("ch-inference/avoid-aliasing.md".into(), content);
        assert_eq!(doc.title, "Item 23: Be Consistent in Your Use of Aliases");
        assert!(doc.headers.is_empty());
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let doc = parse_document("ch-intro/ts-vs-js.md".into(), "No heading here.\n");
        assert_eq!(doc.title, "ts vs js");
    }

    #[test]
    fn numbered_stem_keeps_its_number() {
        let doc = parse_document("notes/2024-retrospective.md".into(), "Plain text.\n");
        assert_eq!(doc.title, "2024 retrospective");
    }

    #[test]
    fn first_h1_wins() {
        let doc = parse_document("a.md".into(), "# First\n\n# Second\n");
        assert_eq!(doc.title, "First");
    }

    #[test]
    fn h3_not_recorded() {
        let doc = parse_document("a.md".into(), "# T\n\n## A\n\n### deep\n\n## B\n");
        assert_eq!(doc.headers, vec!["A", "B"]);
    }

    #[test]
    fn scan_collects_nested_documents_sorted() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "ch-intro/ts-vs-js.md", "# Item 1: A");
        write_doc(tmp.path(), "ch-design/avoid-optional.md", AVOID_OPTIONAL);
        write_doc(tmp.path(), "index.md", "# Home");

        let index = scan(tmp.path()).unwrap();
        let paths: Vec<&str> = index
            .documents
            .iter()
            .map(|d| d.relative_path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec!["ch-design/avoid-optional.md", "ch-intro/ts-vs-js.md", "index.md"]
        );
        assert_eq!(index.get("ch-intro/ts-vs-js.md").unwrap().title, "Item 1: A");
    }

    #[test]
    fn scan_skips_engine_and_asset_dirs() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "ch-intro/ts-vs-js.md", "# A");
        write_doc(tmp.path(), ".vitepress/cache/readme.md", "# cache");
        write_doc(tmp.path(), "public/notes.md", "# asset");
        write_doc(tmp.path(), "node_modules/pkg/README.md", "# dep");
        write_doc(tmp.path(), "ch-intro/.draft.md", "# hidden");

        let index = scan(tmp.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.contains("ch-intro/ts-vs-js.md"));
    }

    #[test]
    fn scan_ignores_non_markdown() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "ch-intro/ts-vs-js.md", "# A");
        write_doc(tmp.path(), "ch-intro/diagram.svg", "<svg/>");

        let index = scan(tmp.path()).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn uppercase_extension_accepted() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "README.MD", "# Readme");
        let index = scan(tmp.path()).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("docs"));
        assert!(matches!(result, Err(ScanError::MissingSource(_))));
    }

    #[test]
    fn empty_source_yields_empty_index() {
        let tmp = TempDir::new().unwrap();
        let index = scan(tmp.path()).unwrap();
        assert!(index.is_empty());
    }
}
