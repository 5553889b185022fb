//! Pure page math shared by the menus and command handlers.
//!
//! Heads are 0-based; user-facing page numbers are 1-based.

/// Compute the number of pages for a list of `item_count` items.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a 0-based head into the valid range of a set with `total_pages` pages.
pub fn clamp_head(head: usize, total_pages: usize) -> usize {
    head.min(total_pages.max(1) - 1)
}

/// Return start/end item indices for the page at `head`.
pub fn page_window(total_items: usize, per_page: usize, head: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = head.saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Parse a one-based page argument into a 0-based head.
///
/// A missing argument means the first page; `0` and non-numbers are rejected.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|page| *page >= 1)
            .map(|page| page - 1),
        None => Some(0),
    }
}
