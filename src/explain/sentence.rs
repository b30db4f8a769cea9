//! Sentence extraction for path explanation
//!
//! For each hop of a found path, the source page is re-fetched and the
//! sentence containing the link to the next page is extracted: locate the
//! anchor whose resolved target is the hop's destination, ascend to the
//! nearest paragraph-level block, and cut the sentence around the anchor
//! with markup stripped and whitespace collapsed. Sentence boundaries use a
//! bounded heuristic (uppercase/digit start, period end), not full natural
//! language segmentation.

use crate::search::{fetch_page, FetchError};
use crate::url::{normalize, PageId, Site};
use crate::UrlError;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;
use url::Url;

/// Block-level elements a sentence is cut from
const BLOCK_ELEMENTS: &[&str] = &["p", "li", "blockquote", "dd"];

/// Errors raised while explaining a single hop
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("no link to {target} found on page {page}")]
    LinkNotFound { page: PageId, target: PageId },

    #[error("link to {target} found on page {page} but no explanatory sentence around it")]
    SentenceUnavailable { page: PageId, target: PageId },

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),
}

/// The explanatory evidence for one hop
#[derive(Debug, Clone)]
pub struct Sentence {
    /// 1-based hop index within the path
    pub hop: usize,

    /// The sentence containing the link, markup stripped
    pub text: String,

    /// Absolute URL of the hop's destination
    pub target_url: Url,
}

/// Outcome of explaining one hop; failures are per-hop and never abort the
/// remaining hops
#[derive(Debug)]
pub struct HopReport {
    pub hop: usize,
    pub source: PageId,
    pub target: PageId,
    pub outcome: Result<Sentence, ExplainError>,
}

/// Explains every hop of a path
///
/// Runs strictly after the search; each hop performs a fresh fetch of its
/// source page (the search retains no page bodies). Hops are reported in
/// path order.
pub async fn explain(client: &Client, site: &Site, path: &[PageId]) -> Vec<HopReport> {
    let mut reports = Vec::new();

    for (index, pair) in path.windows(2).enumerate() {
        let hop = index + 1;
        let source = &pair[0];
        let target = &pair[1];

        let outcome = explain_hop(client, site, source, target, hop).await;
        if let Err(e) = &outcome {
            tracing::warn!("hop {} ({} -> {}): {}", hop, source, target, e);
        }

        reports.push(HopReport {
            hop,
            source: source.clone(),
            target: target.clone(),
            outcome,
        });
    }

    reports
}

/// Explains a single hop from `source` to `target`
async fn explain_hop(
    client: &Client,
    site: &Site,
    source: &PageId,
    target: &PageId,
    hop: usize,
) -> Result<Sentence, ExplainError> {
    let url = site.absolute_url(source)?;
    let body = fetch_page(client, &url).await?;

    let text = extract_sentence(&body, site, source, target)?;

    Ok(Sentence {
        hop,
        text,
        target_url: site.absolute_url(target)?,
    })
}

/// Extracts the sentence around the anchor pointing at `target`
///
/// Pure with respect to the page body, which keeps it directly testable
/// against HTML fixtures.
pub fn extract_sentence(
    html: &str,
    site: &Site,
    source: &PageId,
    target: &PageId,
) -> Result<String, ExplainError> {
    let selector_str = site.anchor_selector();
    let selector = Selector::parse(&selector_str).map_err(|_| {
        ExplainError::Fetch(FetchError::Selector {
            selector: selector_str.clone(),
        })
    })?;

    let document = Html::parse_document(html);

    let anchor = document
        .select(&selector)
        .find(|element| {
            element
                .value()
                .attr("href")
                .and_then(|href| normalize(site, href).ok())
                .is_some_and(|id| &id == target)
        })
        .ok_or_else(|| ExplainError::LinkNotFound {
            page: source.clone(),
            target: target.clone(),
        })?;

    let block = enclosing_block(anchor).ok_or_else(|| ExplainError::SentenceUnavailable {
        page: source.clone(),
        target: target.clone(),
    })?;

    let (text, anchor_start, anchor_end) = flatten_block(block, anchor);
    let sentence = cut_sentence(&text, anchor_start, anchor_end);

    if sentence.is_empty() {
        return Err(ExplainError::SentenceUnavailable {
            page: source.clone(),
            target: target.clone(),
        });
    }

    Ok(sentence)
}

/// Ascends from the anchor to the nearest enclosing paragraph-level block
fn enclosing_block<'a>(anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut current = anchor.parent();

    while let Some(node) = current {
        if let Some(element) = ElementRef::wrap(node) {
            if BLOCK_ELEMENTS.contains(&element.value().name()) {
                return Some(element);
            }
        }
        current = node.parent();
    }

    None
}

/// Flattens a block's text with whitespace collapsed, returning the collapsed
/// text and the byte span the anchor occupies in it
fn flatten_block(block: ElementRef<'_>, anchor: ElementRef<'_>) -> (String, usize, usize) {
    use ego_tree::iter::Edge;

    let anchor_id = anchor.id();
    let mut text = String::new();
    let mut anchor_start = 0;
    let mut anchor_end = 0;

    for edge in block.traverse() {
        match edge {
            Edge::Open(node) => {
                if node.id() == anchor_id {
                    anchor_start = text.len();
                }
                if let Node::Text(fragment) = node.value() {
                    push_collapsed(&mut text, &fragment);
                }
            }
            Edge::Close(node) => {
                if node.id() == anchor_id {
                    anchor_end = text.len();
                }
            }
        }
    }

    (text, anchor_start, anchor_end)
}

/// Appends a text fragment, collapsing any whitespace run to a single space
fn push_collapsed(out: &mut String, fragment: &str) {
    for ch in fragment.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

/// Cuts the sentence around the anchor span
///
/// The sentence starts at the latest sentence-initial boundary (an uppercase
/// letter or digit at the start of the text or after a sentence terminal) at
/// or before the anchor, and ends at the first period at or after the anchor.
fn cut_sentence(text: &str, anchor_start: usize, anchor_end: usize) -> String {
    let mut start = 0;
    let mut prev_non_space: Option<char> = None;

    for (index, ch) in text.char_indices() {
        if index > anchor_start {
            break;
        }
        if (ch.is_uppercase() || ch.is_ascii_digit())
            && matches!(prev_non_space, None | Some('.') | Some('!') | Some('?'))
        {
            start = index;
        }
        if !ch.is_whitespace() {
            prev_non_space = Some(ch);
        }
    }

    let end = match text[anchor_end..].find('.') {
        Some(offset) => anchor_end + offset + 1,
        None => text.len(),
    };

    text[start..end].trim().to_string()
}
