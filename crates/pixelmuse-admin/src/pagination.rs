//! Pagination engine for the admin user listing
//!
//! Computes the ordered sequence of page markers a pagination control
//! displays, and tracks the current page against a fixed page size.

use pixelmuse_core::types::PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// A single entry in a pagination control
///
/// The two ellipsis slots are distinct variants so a renderer can key them
/// by position rather than value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PageMarker {
    /// A concrete page number (1-based)
    Page(u32),
    /// Ellipsis before the middle window
    LeadingEllipsis,
    /// Ellipsis after the middle window
    TrailingEllipsis,
}

impl std::fmt::Display for PageMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::LeadingEllipsis | Self::TrailingEllipsis => write!(f, "\u{2026}"),
        }
    }
}

/// Compute the page markers for a pagination control
///
/// With five or fewer pages every page is listed. Beyond that, page 1 and
/// the last page are always shown, a window of up to three pages tracks
/// `current_page`, and the gaps are collapsed to ellipses. The edge
/// adjustment branches are ordered deliberately: the low-edge branch wins
/// when both could apply.
#[must_use]
pub fn page_markers(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    let total_pages = total_pages.max(1);
    let mut markers = Vec::new();

    if total_pages <= 5 {
        for page in 1..=total_pages {
            markers.push(PageMarker::Page(page));
        }
        return markers;
    }

    markers.push(PageMarker::Page(1));

    let mut start_page = current_page.saturating_sub(1).max(2);
    let mut end_page = (current_page + 1).min(total_pages - 1);

    if current_page <= 2 {
        end_page = 4;
    } else if current_page >= total_pages - 1 {
        start_page = total_pages - 3;
    }

    if start_page > 2 {
        markers.push(PageMarker::LeadingEllipsis);
    }

    for page in start_page..=end_page {
        markers.push(PageMarker::Page(page));
    }

    if end_page < total_pages - 1 {
        markers.push(PageMarker::TrailingEllipsis);
    }

    markers.push(PageMarker::Page(total_pages));

    markers
}

/// Current page and page count for a fixed page size of [`PAGE_SIZE`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page (1-based)
    current_page: u32,

    /// Total number of pages (always at least 1)
    total_pages: u32,
}

impl PaginationState {
    /// Create state positioned on the first of one page
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total number of pages
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Recompute the page count from a total row count
    ///
    /// An empty result set collapses to a single page; the current page is
    /// clamped back into range when rows disappear underneath it.
    pub fn set_total_items(&mut self, total_items: u64) {
        let pages = total_items.div_ceil(u64::from(PAGE_SIZE));
        self.total_pages = u32::try_from(pages).unwrap_or(u32::MAX).max(1);
        self.current_page = self.current_page.min(self.total_pages);
    }

    /// Move to the given page, clamped into `[1, total_pages]`
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages);
    }

    /// Whether a next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Row offset of the current page
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.current_page as i64 - 1) * PAGE_SIZE as i64
    }

    /// Markers for the current position
    #[must_use]
    pub fn markers(&self) -> Vec<PageMarker> {
        page_markers(self.current_page, self.total_pages)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}
