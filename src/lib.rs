//! # Booksite
//!
//! Site configuration and sidebar outline for the Effective TypeScript book
//! site. A static documentation engine renders the Markdown under `docs/`;
//! this crate owns everything the engine is told about the site: metadata,
//! top navigation, the 83-item chapter sidebar, and theme settings. It also
//! checks that every sidebar link lands on a real document before the engine
//! ever runs.
//!
//! # Pipeline
//!
//! ```text
//! site.toml  →  SiteConfig ─┐
//!                           ├─ check  →  Report   (dangling links, orphans, ...)
//! docs/      →  scan     ───┘
//! SiteConfig →  export   →  site.json             (engine-shaped config)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, stock defaults, merging, and validation |
//! | [`book`] | The book outline: 10 chapters, 83 items, built into the default sidebar |
//! | [`types`] | Shared types: the `NavNode` sidebar tree and scanned `Document`s |
//! | [`nav`] | Link normalization, tree walking, reading order, prev/next neighbors |
//! | [`naming`] | File-stem to title fallback for documents without a heading |
//! | [`scan`] | Walks `src_dir` and extracts each document's title and sections |
//! | [`check`] | Cross-checks the sidebar and nav against the scanned documents |
//! | [`export`] | Maps `SiteConfig` onto the engine's camelCase JSON shape |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Outline as Data
//!
//! The chapter outline is a static table in [`book`], not a directory
//! convention. Item numbers are global across chapters, so labels like
//! `Item 37: ...` come from the table's order and stay stable when a chapter
//! gains or loses a document.
//!
//! ## Checks Instead of Trust
//!
//! The engine accepts any sidebar and turns a bad link into a 404 at serve
//! time. [`check::check`] resolves every link the way the engine does and
//! reports dangling links, duplicates, and unreferenced documents up front.

pub mod book;
pub mod check;
pub mod config;
pub mod export;
pub mod naming;
pub mod nav;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
