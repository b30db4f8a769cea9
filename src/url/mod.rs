//! URL handling module for Linktrace
//!
//! This module provides the canonical page identifier type, the site
//! description it is interpreted against, and link normalization.

mod normalize;

use crate::config::SiteConfig;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

pub use normalize::normalize;

/// Canonical identifier for a page within the site.
///
/// A `PageId` is the percent-decoded path of the page (e.g. `/wiki/Foo Bar`);
/// two raw links that normalize to the same path are the same node. Values are
/// produced by [`normalize`]; `PageId::new` exists for already-canonical paths
/// such as test fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Wraps an already-normalized path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The decoded path of the page
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The site a search runs against: base URL, content selector, and the
/// namespace accept-list that separates article links from navigation/meta.
#[derive(Debug, Clone)]
pub struct Site {
    base: Url,
    content_selector: String,
    namespace_prefixes: Vec<String>,
}

impl Site {
    /// Creates a site description from pre-parsed parts
    pub fn new(base: Url, content_selector: String, namespace_prefixes: Vec<String>) -> Self {
        Self {
            base,
            content_selector,
            namespace_prefixes,
        }
    }

    /// Builds a site description from its configuration section
    pub fn from_config(config: &SiteConfig) -> UrlResult<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| UrlError::Parse(e.to_string()))?;
        Ok(Self::new(
            base,
            config.content_selector.clone(),
            config.namespace_prefixes.clone(),
        ))
    }

    /// The site's base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// CSS selector for the main content area
    pub fn content_selector(&self) -> &str {
        &self.content_selector
    }

    /// Selector matching followable anchors within the content area
    pub fn anchor_selector(&self) -> String {
        format!("{} a[href]", self.content_selector)
    }

    /// Returns true if the page lies within the site's content namespace
    pub fn in_namespace(&self, id: &PageId) -> bool {
        self.namespace_prefixes
            .iter()
            .any(|prefix| id.as_str().starts_with(prefix.as_str()))
    }

    /// The absolute URL of a page; the `Url` type re-encodes the decoded path
    pub fn absolute_url(&self, id: &PageId) -> UrlResult<Url> {
        self.base
            .join(id.as_str())
            .map_err(|e| UrlError::Parse(format!("{}: {}", id, e)))
    }
}
