//! Cursor-based pagination over ordered document ids.
//!
//! The store hands back pages bounded by an anchor id; the [`Pager`]
//! keeps the stack of `(first, last)` page boundary pairs needed to walk
//! backward. The pager itself never touches the store: it turns
//! navigation into [`PageRequest`]s and records the results, so it stays
//! explicit session state passed into pure functions rather than ambient
//! globals.

use serde::{Deserialize, Serialize};

use crate::models::Document;

/// Scan direction relative to the anchor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ids greater than or equal to the anchor.
    #[default]
    Forward,
    /// Ids less than or equal to the anchor.
    Backward,
}

/// A bounded, ordered page fetch: up to `batch_size` documents on the
/// anchor side given by `direction`, always ordered by id ascending.
/// An absent anchor means the start of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub anchor: Option<String>,
    pub direction: Direction,
    pub batch_size: usize,
}

impl PageRequest {
    /// Request the first page of a collection.
    pub fn start(batch_size: usize) -> Self {
        Self {
            anchor: None,
            direction: Direction::Forward,
            batch_size,
        }
    }

    /// Request the page at the given anchor. Empty anchors degrade to
    /// the start of the collection rather than erroring.
    pub fn at(anchor: &str, direction: Direction, batch_size: usize) -> Self {
        Self {
            anchor: if anchor.is_empty() {
                None
            } else {
                Some(anchor.to_string())
            },
            direction,
            batch_size,
        }
    }
}

/// The `(first, last)` id pair of one fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    pub first: String,
    pub last: String,
}

/// Boundary-stack pager state for one viewing session.
#[derive(Debug, Clone, Default)]
pub struct Pager {
    batch_size: usize,
    bounds: Vec<PageBounds>,
}

impl Pager {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            bounds: Vec::new(),
        }
    }

    /// The request for the first page.
    pub fn start(&self) -> PageRequest {
        PageRequest::start(self.batch_size)
    }

    /// Boundary pair of the page currently on screen, if any.
    pub fn current(&self) -> Option<&PageBounds> {
        self.bounds.last()
    }

    /// Record a fetched page. Empty results leave the stack untouched.
    pub fn record_page(&mut self, docs: &[Document]) {
        if let (Some(first), Some(last)) = (docs.first(), docs.last()) {
            self.bounds.push(PageBounds {
                first: first.id.clone(),
                last: last.id.clone(),
            });
        }
    }

    /// Request the page after the current one, anchored at the current
    /// page's last id. With no recorded page this is the start request.
    pub fn next(&self) -> PageRequest {
        match self.current() {
            Some(bounds) => PageRequest::at(&bounds.last, Direction::Forward, self.batch_size),
            None => self.start(),
        }
    }

    /// Request the previous page: the current bounds are popped and
    /// discarded, and the request re-anchors at the first id of the pair
    /// beneath them. The caller records the re-fetched page, which
    /// pushes that pair back.
    ///
    /// With fewer than two recorded pages there is nothing to go back
    /// to: the stack is left usable and the returned request re-fetches
    /// the current page (or the start), so the caller silently stays put.
    pub fn previous(&mut self) -> PageRequest {
        if self.bounds.len() < 2 {
            return match self.bounds.pop() {
                Some(bounds) => {
                    PageRequest::at(&bounds.first, Direction::Forward, self.batch_size)
                }
                None => self.start(),
            };
        }
        self.bounds.pop();
        match self.bounds.pop() {
            Some(previous) => {
                PageRequest::at(&previous.first, Direction::Forward, self.batch_size)
            }
            None => self.start(),
        }
    }

    /// Restart pagination from the beginning. Required whenever search
    /// criteria change: stale boundaries belong to the old result set.
    pub fn reset(&mut self) {
        self.bounds.clear();
    }

    /// Depth of the boundary stack.
    pub fn depth(&self) -> usize {
        self.bounds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document {
                id: id.to_string(),
                text: String::new(),
                word: vec![],
                lms: vec![],
                lang: None,
            })
            .collect()
    }

    #[test]
    fn test_start_request_has_no_anchor() {
        let pager = Pager::new(20);
        let req = pager.start();
        assert_eq!(req.anchor, None);
        assert_eq!(req.direction, Direction::Forward);
        assert_eq!(req.batch_size, 20);
    }

    #[test]
    fn test_empty_anchor_means_start_of_collection() {
        let req = PageRequest::at("", Direction::Forward, 10);
        assert_eq!(req, PageRequest::start(10));
    }

    #[test]
    fn test_record_page_pushes_bounds() {
        let mut pager = Pager::new(3);
        pager.record_page(&docs(&["a", "b", "c"]));
        assert_eq!(
            pager.current(),
            Some(&PageBounds { first: "a".to_string(), last: "c".to_string() })
        );
    }

    #[test]
    fn test_empty_result_does_not_push() {
        let mut pager = Pager::new(3);
        pager.record_page(&docs(&[]));
        assert_eq!(pager.depth(), 0);
    }

    #[test]
    fn test_next_anchors_at_current_last() {
        let mut pager = Pager::new(3);
        pager.record_page(&docs(&["a", "b", "c"]));
        let req = pager.next();
        assert_eq!(req.anchor.as_deref(), Some("c"));
        assert_eq!(req.direction, Direction::Forward);
    }

    #[test]
    fn test_forward_then_backward_restores_original_bounds() {
        let mut pager = Pager::new(3);

        // Page 1: a..c, page 2: c..e (anchor is inclusive).
        pager.record_page(&docs(&["a", "b", "c"]));
        let next = pager.next();
        assert_eq!(next.anchor.as_deref(), Some("c"));
        pager.record_page(&docs(&["c", "d", "e"]));

        // Going back re-anchors at page 1's first id.
        let prev = pager.previous();
        assert_eq!(prev.anchor.as_deref(), Some("a"));

        // Re-fetching pushes the original pair back.
        pager.record_page(&docs(&["a", "b", "c"]));
        assert_eq!(
            pager.current(),
            Some(&PageBounds { first: "a".to_string(), last: "c".to_string() })
        );
        assert_eq!(pager.depth(), 1);
    }

    #[test]
    fn test_previous_on_empty_stack_stays_put() {
        let mut pager = Pager::new(5);
        let req = pager.previous();
        assert_eq!(req, pager.start());
        assert_eq!(pager.depth(), 0);
    }

    #[test]
    fn test_previous_on_first_page_refetches_it() {
        let mut pager = Pager::new(3);
        pager.record_page(&docs(&["a", "b", "c"]));
        let req = pager.previous();
        assert_eq!(req.anchor.as_deref(), Some("a"));
        pager.record_page(&docs(&["a", "b", "c"]));
        assert_eq!(pager.depth(), 1);
    }

    #[test]
    fn test_reset_clears_boundary_stack() {
        let mut pager = Pager::new(3);
        pager.record_page(&docs(&["a", "b", "c"]));
        pager.record_page(&docs(&["c", "d", "e"]));
        pager.reset();
        assert_eq!(pager.depth(), 0);
        assert_eq!(pager.next(), pager.start());
    }
}
