//! Frontier and admission-control types for the level-synchronized search

use crate::url::PageId;
use std::collections::HashSet;

/// One not-yet-expanded entry of the current BFS level: the path that led to
/// a page, plus the links discovered on that page. Produced by a fetch,
/// consumed exactly once when the next level is built.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// Ordered path from the start page to this entry's page, inclusive
    pub path: Vec<PageId>,

    /// In-namespace links found on the page, in document order, deduplicated
    pub links: Vec<PageId>,
}

/// The complete frontier at one depth
pub type Level = Vec<FrontierEntry>;

/// The set of pages ever admitted into the search.
///
/// A page is admitted at the moment it is first chosen for expansion, which
/// is what guarantees the first path reaching it is a shortest path. Admission
/// decisions are made only by the orchestrator's single sequential pass, so a
/// plain check-and-insert gives the exactly-once guarantee. Insertion order is
/// retained for the run log.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    seen: HashSet<PageId>,
    order: Vec<PageId>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a page, returning true iff it was not previously admitted
    pub fn try_admit(&mut self, id: &PageId) -> bool {
        if self.seen.insert(id.clone()) {
            self.order.push(id.clone());
            true
        } else {
            false
        }
    }

    /// Number of admitted pages
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the registry, yielding admitted pages in admission order
    pub fn into_pages(self) -> Vec<PageId> {
        self.order
    }
}
