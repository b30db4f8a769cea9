//! Page fetching and link extraction
//!
//! This module is the search's only contact with the network and with markup
//! shape: it fetches a page, queries the parsed document for anchors inside
//! the configured content area, and returns the in-namespace links in
//! document order. Everything above it works purely with [`PageId`] values.

use crate::url::{normalize, PageId, Site};
use crate::UrlError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Errors from fetching or parsing a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("invalid anchor selector '{selector}'")]
    Selector { selector: String },

    #[error("bad page address: {0}")]
    Address(#[from] UrlError),
}

/// Fetches the raw body of a URL
///
/// Non-2xx responses and transport failures both surface as typed errors;
/// the caller decides whether the page is fatal (start page) or simply
/// contributes nothing (everything else).
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })
}

/// Fetches a page and returns the in-namespace links it carries
///
/// The returned list is deduplicated while preserving first-occurrence
/// document order; that enumeration order is what makes the search's
/// tie-break among equal-length paths deterministic.
pub async fn fetch_links(
    client: &Client,
    site: &Site,
    page: &PageId,
) -> Result<Vec<PageId>, FetchError> {
    let url = site.absolute_url(page)?;
    let body = fetch_page(client, &url).await?;
    extract_links(&body, site)
}

/// Extracts in-namespace links from an HTML body
///
/// Anchors are selected through the site's content selector, so navigation
/// and meta links never enter the search. Links that fail to normalize are
/// skipped, not fatal.
pub fn extract_links(html: &str, site: &Site) -> Result<Vec<PageId>, FetchError> {
    let selector_str = site.anchor_selector();
    let selector = Selector::parse(&selector_str).map_err(|_| FetchError::Selector {
        selector: selector_str.clone(),
    })?;

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let id = match normalize(site, href) {
            Ok(id) => id,
            Err(e) => {
                tracing::trace!("skipping link '{}': {}", href, e);
                continue;
            }
        };

        if !site.in_namespace(&id) {
            continue;
        }

        if seen.insert(id.clone()) {
            links.push(id);
        }
    }

    Ok(links)
}
