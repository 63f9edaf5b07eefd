//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults
//! describe the Effective TypeScript site; a `site.toml` in the project root
//! overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Effective TypeScript"
//! description = "83 Specific Ways to Improve Your TypeScript"
//! lang = "zh-CN"
//! base = "/effective-typescript/"   # must start and end with "/"
//! src_dir = "docs"                  # root of the Markdown documents
//! out_dir = "docs/.vitepress/dist"  # where the engine writes the site
//! appearance = "auto"               # auto | light | dark
//! clean_urls = true
//! last_updated = false
//! exclude = ["index.md"]            # documents the sidebar need not reference
//!
//! [[head]]
//! tag = "link"
//! attrs = { rel = "icon", href = "/effective-typescript/favicon.ico" }
//!
//! [theme.doc_footer]
//! prev = "上一页"
//! next = "下一页"
//!
//! [theme.outline]
//! level = [2, 3]
//! label = "页面导航"
//!
//! [theme.search]
//! provider = "local"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! base = "/"
//!
//! [theme.edit_link]
//! pattern = "https://github.com/owner/repo/edit/main/docs/:path"
//! ```
//!
//! Tables merge key by key; arrays (`head`, `theme.nav`, `theme.sidebar`)
//! replace the stock value wholesale. Unknown keys are rejected to catch
//! typos early.

use crate::book;
use crate::types::NavNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::{Host, Url};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

/// Document path used to prove an edit link pattern produces a real URL.
pub const SAMPLE_DOC_PATH: &str = "ch-intro/ts-vs-js.md";

/// Elements the engine accepts in `head`.
const HEAD_TAGS: &[&str] = &["base", "link", "meta", "noscript", "script", "style", "title"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site display name.
    pub title: String,
    pub description: String,
    /// `lang` attribute of the generated `<html>`.
    pub lang: String,
    /// URL path prefix the site is served under.
    pub base: String,
    /// Root of the Markdown documents, relative to the project root.
    pub src_dir: String,
    /// Build output location, relative to the project root.
    pub out_dir: String,
    pub appearance: Appearance,
    /// Serve `/ch-intro/ts-vs-js` instead of `/ch-intro/ts-vs-js.html`.
    pub clean_urls: bool,
    /// Show each page's git modification time.
    pub last_updated: bool,
    /// Documents under `src_dir` that no sidebar leaf is expected to reference.
    pub exclude: Vec<String>,
    /// Tags injected verbatim into every page's `<head>`.
    pub head: Vec<HeadTag>,
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Effective TypeScript".to_string(),
            description: "83 Specific Ways to Improve Your TypeScript".to_string(),
            lang: "zh-CN".to_string(),
            base: "/effective-typescript/".to_string(),
            src_dir: "docs".to_string(),
            out_dir: "docs/.vitepress/dist".to_string(),
            appearance: Appearance::Auto,
            clean_urls: true,
            last_updated: false,
            exclude: vec!["index.md".to_string()],
            head: vec![
                HeadTag::new("link")
                    .attr("rel", "icon")
                    .attr("href", "/effective-typescript/favicon.ico"),
                HeadTag::new("meta")
                    .attr("name", "keywords")
                    .attr("content", "TypeScript, Effective TypeScript, 类型系统, 前端"),
            ],
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        validate_base(&self.base)?;
        if self.src_dir.trim().is_empty() {
            return Err(ConfigError::Validation("src_dir must not be empty".into()));
        }
        for tag in &self.head {
            tag.validate()?;
        }
        self.theme.validate()
    }

    /// The sidebar handed to the engine: the configured override, or the
    /// book outline when none is set.
    pub fn sidebar(&self) -> Vec<NavNode> {
        match &self.theme.sidebar {
            Some(sidebar) => sidebar.clone(),
            None => book::build_sidebar(),
        }
    }

    /// Absolute location of the Markdown documents.
    pub fn src_path(&self, root: &Path) -> PathBuf {
        root.join(&self.src_dir)
    }

    /// Whether a scanned document is exempt from the orphan check.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.exclude.iter().any(|e| e == relative_path)
    }
}

/// `base` must start and end with `/` (`/` alone is fine).
pub fn validate_base(base: &str) -> Result<(), ConfigError> {
    if !base.starts_with('/') || !base.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base must start and end with '/': {base:?}"
        )));
    }
    Ok(())
}

/// Default color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Follow the reader's system preference, with a toggle.
    #[default]
    Auto,
    Light,
    Dark,
}

/// One element injected into `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inline text, e.g. an analytics snippet inside `<script>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl HeadTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: None,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !HEAD_TAGS.contains(&self.tag.as_str()) {
            return Err(ConfigError::Validation(format!(
                "head tag must be one of {HEAD_TAGS:?}, got {:?}",
                self.tag
            )));
        }
        Ok(())
    }
}

/// Theme settings consumed by the engine's default theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Top navigation bar entries.
    pub nav: Vec<NavLink>,
    /// Sidebar override. When absent the book outline is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Vec<NavNode>>,
    pub social_links: Vec<SocialLink>,
    /// "Edit this page" link. Disabled when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,
    pub doc_footer: DocFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    pub outline: OutlineConfig,
    pub search: SearchConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav: vec![
                NavLink::new("首页", "/"),
                NavLink::new("开始阅读", "/ch-intro/ts-vs-js"),
            ],
            sidebar: None,
            social_links: Vec::new(),
            edit_link: None,
            doc_footer: DocFooter::default(),
            footer: None,
            outline: OutlineConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ThemeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(link) = self.nav.iter().find(|l| l.text.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "theme.nav entry for {:?} has empty text",
                link.link
            )));
        }
        for social in &self.social_links {
            if social.icon.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "theme.social_links icon must not be empty".into(),
                ));
            }
            if !is_valid_url(&social.link) {
                return Err(ConfigError::Validation(format!(
                    "theme.social_links link is not a valid URL: {:?}",
                    social.link
                )));
            }
        }
        if let Some(edit_link) = &self.edit_link {
            edit_link.validate()?;
        }
        self.outline.validate()?;
        self.search.validate()
    }
}

/// A top navigation bar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub text: String,
    pub link: String,
    /// Regex the engine matches against the current path to highlight this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_match: Option<String>,
}

impl NavLink {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            active_match: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Engine icon name (`github`, `x`, `discord`, ...).
    pub icon: String,
    pub link: String,
}

/// Pattern for the "edit this page" URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditLink {
    /// URL with a single `:path` placeholder for the document's relative path.
    pub pattern: String,
    #[serde(default = "default_edit_link_text")]
    pub text: String,
}

fn default_edit_link_text() -> String {
    "在 GitHub 上编辑此页".to_string()
}

impl EditLink {
    /// Substitute `:path` with a document path relative to `src_dir`.
    pub fn url_for(&self, relative_path: &str) -> String {
        self.pattern
            .replacen(":path", relative_path.trim_start_matches('/'), 1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let placeholders = self.pattern.matches(":path").count();
        if placeholders != 1 {
            return Err(ConfigError::Validation(format!(
                "theme.edit_link.pattern must contain exactly one ':path', found {placeholders}"
            )));
        }
        let sample = self.url_for(SAMPLE_DOC_PATH);
        if !is_valid_url(&sample) {
            return Err(ConfigError::Validation(format!(
                "theme.edit_link.pattern does not produce a valid URL: {sample:?}"
            )));
        }
        Ok(())
    }
}

/// Labels for the previous/next controls under each page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocFooter {
    pub prev: String,
    pub next: String,
}

impl Default for DocFooter {
    fn default() -> Self {
        Self {
            prev: "上一页".to_string(),
            next: "下一页".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Right-hand "on this page" outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    /// Inclusive heading level range, `[from, to]`.
    pub level: [u8; 2],
    pub label: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            level: [2, 3],
            label: "页面导航".to_string(),
        }
    }
}

impl OutlineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let [from, to] = self.level;
        if !(1..=6).contains(&from) || !(1..=6).contains(&to) || from > to {
            return Err(ConfigError::Validation(format!(
                "theme.outline.level must be an ascending range within 1-6, got [{from}, {to}]"
            )));
        }
        Ok(())
    }
}

/// Search provider: the engine's offline index or a hosted Algolia index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase", deny_unknown_fields)]
pub enum SearchConfig {
    Local {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Algolia(AlgoliaConfig),
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::Local {
            placeholder: Some("搜索文档".to_string()),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let SearchConfig::Algolia(algolia) = self else {
            return Ok(());
        };
        for (name, value) in [
            ("app_id", &algolia.app_id),
            ("api_key", &algolia.api_key),
            ("index_name", &algolia.index_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "theme.search.{name} must not be empty for the algolia provider"
                )));
            }
        }
        Ok(())
    }
}

/// Hosted search credentials. The API key is the public search-only key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgoliaConfig {
    pub app_id: String,
    pub api_key: String,
    pub index_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Whether `url` parses as an absolute `http(s)` URL with a host.
///
/// Whitespace is rejected outright rather than percent-encoded, and domain
/// hosts may not contain empty labels (`a..b`, `.example.com`).
pub fn is_valid_url(url: &str) -> bool {
    if url.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host() {
        Some(Host::Domain(domain)) => !domain
            .strip_suffix('.')
            .unwrap_or(domain)
            .split('.')
            .any(str::is_empty),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A root without `site.toml` gets the defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(&root.join(CONFIG_FILE))?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Like [`load_config`], for an explicitly named file. The file must exist.
pub fn load_config_file(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    match load_raw_config(config_path)? {
        Some(overlay) => resolve_config(stock_defaults_value(), Some(overlay)),
        None => Err(ConfigError::MissingFile(config_path.to_path_buf())),
    }
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# booksite configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge with the defaults key by key. Arrays (head, theme.nav,
# theme.sidebar) replace the default array entirely.
# Unknown keys will cause an error.

title = "Effective TypeScript"
description = "83 Specific Ways to Improve Your TypeScript"

# lang attribute of the generated <html> element.
lang = "zh-CN"

# URL path prefix the site is served under. Must start and end with "/".
base = "/effective-typescript/"

# Root of the Markdown documents, relative to the project root (--root),
# wherever this file lives.
src_dir = "docs"

# Where the rendering engine writes the built site, relative to the project root.
out_dir = "docs/.vitepress/dist"

# Default color scheme: "auto", "light" or "dark".
appearance = "auto"

# Serve pages without the .html extension.
clean_urls = true

# Show each page's last modification time.
last_updated = false

# Documents the sidebar is not expected to reference (the home page).
exclude = ["index.md"]

# ---------------------------------------------------------------------------
# <head> tags, injected verbatim into every page
# ---------------------------------------------------------------------------
[[head]]
tag = "link"
attrs = { href = "/effective-typescript/favicon.ico", rel = "icon" }

[[head]]
tag = "meta"
attrs = { content = "TypeScript, Effective TypeScript, 类型系统, 前端", name = "keywords" }

# An analytics snippet looks like this:
# [[head]]
# tag = "script"
# attrs = { async = "", src = "https://www.googletagmanager.com/gtag/js?id=G-XXXXXXX" }

# ---------------------------------------------------------------------------
# Top navigation bar
# ---------------------------------------------------------------------------
[[theme.nav]]
text = "首页"
link = "/"

[[theme.nav]]
text = "开始阅读"
link = "/ch-intro/ts-vs-js"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
# Leave unset to use the built-in book outline (10 chapters, 83 items).
# Setting it replaces the outline:
#
# [[theme.sidebar]]
# text = "Chapter 1: Getting to Know TypeScript"
# collapsed = false
# items = [
#     { text = "Item 1: ...", link = "/ch-intro/ts-vs-js" },
# ]

# ---------------------------------------------------------------------------
# Links and labels
# ---------------------------------------------------------------------------
# [[theme.social_links]]
# icon = "github"
# link = "https://github.com/owner/repo"

# "Edit this page" link; :path is replaced with the document path.
# [theme.edit_link]
# pattern = "https://github.com/owner/repo/edit/main/docs/:path"
# text = "在 GitHub 上编辑此页"

[theme.doc_footer]
prev = "上一页"
next = "下一页"

# [theme.footer]
# message = "Released under the MIT License."
# copyright = "Copyright © 2024"

[theme.outline]
# Heading levels shown in the "on this page" outline, [from, to].
level = [2, 3]
label = "页面导航"

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
# provider = "local" builds an offline index into the site.
# provider = "algolia" uses a hosted index and needs app_id, api_key
# (the public search-only key) and index_name.
[theme.search]
provider = "local"
placeholder = "搜索文档"
"##
}
