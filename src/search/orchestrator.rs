//! BFS orchestrator - level-synchronized search over the link graph
//!
//! The orchestrator drives the search one depth at a time:
//! - a single sequential admission pass over the current level decides which
//!   candidate links are expanded, so "first admitted wins" is well defined
//! - admitted candidates are fetched concurrently, gated by a semaphore
//! - awaiting every dispatched fetch is the mandatory barrier that keeps
//!   depths strictly ordered and the returned path shortest
//! - finding the target aborts every fetch still in flight for the level

use crate::search::fetcher::{fetch_links, FetchError};
use crate::search::frontier::{FrontierEntry, Level, VisitedRegistry};
use crate::url::{PageId, Site};
use crate::TraceError;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Limits applied to one search run
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum number of page fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Maximum depth in hops; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 64,
            max_depth: None,
        }
    }
}

/// Terminal artifact of a successful search
#[derive(Debug)]
pub struct SearchOutcome {
    /// Shortest path from start to target, start first
    pub path: Vec<PageId>,

    /// Every page admitted during the search, in admission order
    pub visited: Vec<PageId>,
}

impl SearchOutcome {
    /// Number of hops in the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Drives the incremental breadth-first search
pub struct Orchestrator {
    client: Client,
    site: Site,
    limits: SearchLimits,
}

impl Orchestrator {
    pub fn new(client: Client, site: Site, limits: SearchLimits) -> Self {
        Self {
            client,
            site,
            limits,
        }
    }

    /// Runs the search from `start` to `target`
    ///
    /// All search state (visited registry, frontier) lives inside this call;
    /// nothing is shared across invocations.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchOutcome)` - Shortest path found
    /// * `Err(TraceError::StartPageUnreachable)` - The very first fetch failed
    /// * `Err(TraceError::NoPathFound)` - Frontier exhausted without the target
    /// * `Err(TraceError::DepthLimit)` - Configured depth cap reached
    pub async fn run(&self, start: &PageId, target: &PageId) -> Result<SearchOutcome, TraceError> {
        let mut visited = VisitedRegistry::new();
        visited.try_admit(start);

        if start == target {
            return Ok(SearchOutcome {
                path: vec![start.clone()],
                visited: visited.into_pages(),
            });
        }

        // Init: the start page itself. A failure here is fatal since no
        // search can proceed.
        let links = fetch_links(&self.client, &self.site, start)
            .await
            .map_err(|e| TraceError::StartPageUnreachable {
                page: start.clone(),
                source: e,
            })?;

        tracing::info!("start page {} carries {} links", start, links.len());

        // Direct hit: no further fetches are dispatched
        if links.contains(target) {
            visited.try_admit(target);
            return Ok(SearchOutcome {
                path: vec![start.clone(), target.clone()],
                visited: visited.into_pages(),
            });
        }

        let semaphore = Arc::new(Semaphore::new(self.limits.max_concurrent_fetches));
        let mut level: Level = vec![FrontierEntry {
            path: vec![start.clone()],
            links,
        }];
        let mut depth: usize = 1;

        loop {
            if let Some(limit) = self.limits.max_depth {
                if depth > limit {
                    return Err(TraceError::DepthLimit {
                        limit,
                        visited: visited.len(),
                    });
                }
            }

            match self.expand_level(&level, target, &mut visited, &semaphore) {
                Expansion::Found(path) => {
                    visited.try_admit(target);
                    tracing::info!("target reached after {} hops", path.len() - 1);
                    return Ok(SearchOutcome {
                        path,
                        visited: visited.into_pages(),
                    });
                }
                Expansion::Dispatched(dispatched) => {
                    if dispatched.is_empty() {
                        // Exhausted: nothing left to expand and no target
                        return Err(TraceError::NoPathFound {
                            depth,
                            visited: visited.len(),
                        });
                    }

                    level = Self::await_level(dispatched).await;
                    tracing::info!(
                        "depth {} complete: {} pages fetched, {} visited",
                        depth,
                        level.len(),
                        visited.len()
                    );
                    depth += 1;
                }
            }
        }
    }

    /// The single sequential admission pass over one level
    ///
    /// Iterates entries in level order and each entry's links in document
    /// order; on the first occurrence of the target all fetches already
    /// dispatched for this level are aborted and the winning path returned.
    fn expand_level(
        &self,
        level: &Level,
        target: &PageId,
        visited: &mut VisitedRegistry,
        semaphore: &Arc<Semaphore>,
    ) -> Expansion {
        let mut dispatched: Vec<DispatchedFetch> = Vec::new();

        for entry in level {
            for link in &entry.links {
                if link == target {
                    for fetch in &dispatched {
                        fetch.handle.abort();
                    }
                    let mut path = entry.path.clone();
                    path.push(target.clone());
                    return Expansion::Found(path);
                }

                if !visited.try_admit(link) {
                    continue;
                }

                let mut path = entry.path.clone();
                path.push(link.clone());

                let client = self.client.clone();
                let site = self.site.clone();
                let page = link.clone();
                let permit_source = Arc::clone(semaphore);

                let handle = tokio::spawn(async move {
                    let _permit = permit_source.acquire_owned().await.ok();
                    fetch_links(&client, &site, &page).await
                });

                dispatched.push(DispatchedFetch { path, handle });
            }
        }

        Expansion::Dispatched(dispatched)
    }

    /// Level barrier: waits for every dispatched fetch and builds the next
    /// level in dispatch order. A failed page logs a warning and contributes
    /// zero links; the search continues.
    async fn await_level(dispatched: Vec<DispatchedFetch>) -> Level {
        let mut next: Level = Vec::with_capacity(dispatched.len());

        for fetch in dispatched {
            match fetch.handle.await {
                Ok(Ok(links)) => next.push(FrontierEntry {
                    path: fetch.path,
                    links,
                }),
                Ok(Err(e)) => {
                    tracing::warn!("fetch failed, page contributes no links: {}", e);
                }
                Err(e) => {
                    tracing::warn!("fetch task did not complete: {}", e);
                }
            }
        }

        next
    }
}

/// A fetch dispatched during one admission pass, tagged with the path that
/// will become the next level's entry if it succeeds
struct DispatchedFetch {
    path: Vec<PageId>,
    handle: JoinHandle<Result<Vec<PageId>, FetchError>>,
}

enum Expansion {
    Found(Vec<PageId>),
    Dispatched(Vec<DispatchedFetch>),
}
