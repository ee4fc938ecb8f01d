//! List-panel paging state.

use serde::{Deserialize, Serialize};

/// Paging state persisted by list panels across page loads.
///
/// Stored as a single storage record under [`keys::PAGINATION`]
/// (see [`crate::keys`]).
///
/// # Example
///
/// ```
/// use vantage_types::PaginationState;
///
/// let page = PaginationState::new(25).with_totals(120, 5);
/// assert_eq!(page.current_page, 1);
/// assert_eq!(page.total_pages, 5);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationState {
    /// 1-based current page.
    pub current_page: u32,

    /// Total pages reported by the backend.
    pub total_pages: u32,

    /// Total record count reported by the backend.
    pub total_count: u64,

    /// Page size.
    pub limit: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            limit: 25,
        }
    }
}

impl PaginationState {
    /// Creates a fresh first-page state with the given page size.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Returns a copy updated with backend totals.
    #[must_use]
    pub fn with_totals(mut self, total_count: u64, total_pages: u32) -> Self {
        self.total_count = total_count;
        self.total_pages = total_pages;
        self
    }

    /// Returns `true` if a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns the zero-based record offset for the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let page = PaginationState::default();
        assert_eq!(page.current_page, 1);
        assert!(!page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn navigation_predicates() {
        let mut page = PaginationState::new(10).with_totals(35, 4);
        assert!(page.has_next());
        assert!(!page.has_prev());

        page.current_page = 4;
        assert!(!page.has_next());
        assert!(page.has_prev());
        assert_eq!(page.offset(), 30);
    }

    #[test]
    fn round_trips_through_json() {
        let page = PaginationState::new(50).with_totals(1000, 20);
        let json = serde_json::to_string(&page).unwrap();
        let back: PaginationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }
}
