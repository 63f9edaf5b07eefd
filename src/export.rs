//! Engine-facing configuration export.
//!
//! The rendering engine reads a camelCase object (`srcDir`, `themeConfig`,
//! `docFooter`, ...), while `site.toml` uses snake_case keys. This module maps
//! one onto the other and writes the result as JSON. The sidebar is always
//! the resolved one: the configured override or the book outline.
//!
//! Head tags are emitted as the engine's `[tag, attrs]` / `[tag, attrs,
//! content]` tuples, and search as `{ provider, options }`.

use crate::config::{
    Appearance, DocFooter, EditLink, Footer, HeadTag, NavLink, SearchConfig, SiteConfig,
    SocialLink,
};
use crate::types::NavNode;
use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The site-configuration object the engine accepts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub lang: &'a str,
    pub base: &'a str,
    pub src_dir: &'a str,
    pub out_dir: &'a str,
    pub appearance: Appearance,
    pub clean_urls: bool,
    pub last_updated: bool,
    pub head: Vec<EngineHeadTag<'a>>,
    pub theme_config: EngineTheme<'a>,
}

/// `[tag, attrs]`, or `[tag, attrs, content]` when the tag carries inline text.
#[derive(Debug)]
pub struct EngineHeadTag<'a>(&'a HeadTag);

impl Serialize for EngineHeadTag<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tag = self.0;
        let len = if tag.content.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&tag.tag)?;
        seq.serialize_element(&tag.attrs)?;
        if let Some(content) = &tag.content {
            seq.serialize_element(content)?;
        }
        seq.end()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineTheme<'a> {
    pub nav: Vec<EngineNavLink<'a>>,
    pub sidebar: Vec<NavNode>,
    pub social_links: &'a [SocialLink],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<&'a EditLink>,
    pub doc_footer: &'a DocFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<&'a Footer>,
    pub outline: EngineOutline<'a>,
    pub search: EngineSearch<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineNavLink<'a> {
    pub text: &'a str,
    pub link: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_match: Option<&'a str>,
}

impl<'a> From<&'a NavLink> for EngineNavLink<'a> {
    fn from(link: &'a NavLink) -> Self {
        Self {
            text: &link.text,
            link: &link.link,
            active_match: link.active_match.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EngineOutline<'a> {
    pub level: [u8; 2],
    pub label: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EngineSearch<'a> {
    pub provider: &'static str,
    pub options: BTreeMap<&'static str, &'a str>,
}

impl<'a> From<&'a SearchConfig> for EngineSearch<'a> {
    fn from(search: &'a SearchConfig) -> Self {
        let mut options = BTreeMap::new();
        match search {
            SearchConfig::Local { placeholder } => {
                if let Some(p) = placeholder {
                    options.insert("placeholder", p.as_str());
                }
                Self {
                    provider: "local",
                    options,
                }
            }
            SearchConfig::Algolia(algolia) => {
                options.insert("appId", algolia.app_id.as_str());
                options.insert("apiKey", algolia.api_key.as_str());
                options.insert("indexName", algolia.index_name.as_str());
                if let Some(p) = &algolia.placeholder {
                    options.insert("placeholder", p.as_str());
                }
                Self {
                    provider: "algolia",
                    options,
                }
            }
        }
    }
}

/// Map a site config onto the engine's shape.
pub fn engine_config(config: &SiteConfig) -> EngineConfig<'_> {
    let theme = &config.theme;
    EngineConfig {
        title: &config.title,
        description: &config.description,
        lang: &config.lang,
        base: &config.base,
        src_dir: &config.src_dir,
        out_dir: &config.out_dir,
        appearance: config.appearance,
        clean_urls: config.clean_urls,
        last_updated: config.last_updated,
        head: config.head.iter().map(EngineHeadTag).collect(),
        theme_config: EngineTheme {
            nav: theme.nav.iter().map(EngineNavLink::from).collect(),
            sidebar: config.sidebar(),
            social_links: &theme.social_links,
            edit_link: theme.edit_link.as_ref(),
            doc_footer: &theme.doc_footer,
            footer: theme.footer.as_ref(),
            outline: EngineOutline {
                level: theme.outline.level,
                label: &theme.outline.label,
            },
            search: EngineSearch::from(&theme.search),
        },
    }
}

/// Pretty-printed engine JSON.
pub fn to_json(config: &SiteConfig) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&engine_config(config))?)
}

/// Write the engine JSON to `path`, creating parent directories.
pub fn write_json(config: &SiteConfig, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(config)?)?;
    Ok(())
}
