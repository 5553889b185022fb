//! Splitting ordered items into pages under item-count and length budgets.

use thiserror::Error;

/// Error raised while splitting items into pages.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginateError {
    /// A single item can never fit on a page.
    #[error("item {index} is {length} characters long, the limit is {limit}")]
    ItemTooLarge {
        index: usize,
        length: usize,
        limit: usize,
    },
}

/// One page of items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    index: usize,
    total: usize,
    items: Vec<String>,
}

impl Page {
    /// 0-based position within its page set.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of pages in the owning set.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Footer text such as `Page 2/5`.
    pub fn footer(&self) -> String {
        format!("Page {}/{}", self.index + 1, self.total)
    }
}

/// Ordered, non-empty sequence of pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    fn from_chunks(chunks: Vec<Vec<String>>) -> Self {
        let chunks = if chunks.is_empty() {
            vec![Vec::new()]
        } else {
            chunks
        };
        let total = chunks.len();

        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(index, items)| Page {
                index,
                total,
                items,
            })
            .collect();

        Self { pages }
    }

    /// Always at least 1.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Never true; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl<'a> IntoIterator for &'a PageSet {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Length of a window once every item carries its separator.
pub fn joined_length<S: AsRef<str>>(items: &[S], separator_overhead: usize) -> usize {
    items
        .iter()
        .map(|item| item.as_ref().chars().count() + separator_overhead)
        .sum()
}

/// Split `items` into pages of at most `max_items_per_page` items whose joined length,
/// counting `separator_overhead` for every item, stays within `max_total_length`.
///
/// Lengths are measured in characters. Each page takes the longest prefix of the remaining
/// items that fits, found with a running sum so every item is measured once.
pub fn paginate<S: AsRef<str>>(
    items: &[S],
    max_items_per_page: usize,
    max_total_length: usize,
    separator_overhead: usize,
) -> Result<PageSet, PaginateError> {
    let item_limit = max_total_length.checked_sub(separator_overhead);
    let mut lengths = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let length = item.as_ref().chars().count();
        match item_limit {
            Some(limit) if length <= limit => lengths.push(length),
            _ => {
                return Err(PaginateError::ItemTooLarge {
                    index,
                    length,
                    limit: item_limit.unwrap_or(0),
                });
            }
        }
    }

    let per_page = max_items_per_page.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < items.len() {
        let mut size = 0;
        let mut total = 0usize;
        for length in &lengths[start..] {
            let next = total.saturating_add(length + separator_overhead);
            if size == per_page || (size > 0 && next > max_total_length) {
                break;
            }
            total = next;
            size += 1;
        }

        chunks.push(
            items[start..start + size]
                .iter()
                .map(|item| item.as_ref().to_owned())
                .collect(),
        );
        start += size;
    }

    Ok(PageSet::from_chunks(chunks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(pages: &PageSet) -> Vec<String> {
        pages
            .iter()
            .flat_map(|page| page.items().iter().cloned())
            .collect()
    }

    #[test]
    fn splits_by_item_count() {
        let items: Vec<String> = (0..25).map(|i| format!("item {i}")).collect();
        let pages = paginate(&items, 10, 2000, 0).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages.iter().map(Page::len).collect::<Vec<_>>(),
            vec![10, 10, 5]
        );
        assert_eq!(flatten(&pages), items);
    }

    #[test]
    fn windows_fit_the_length_budget() {
        let items = vec!["a".repeat(40), "b".repeat(40), "c".repeat(40), "d".repeat(5)];
        let pages = paginate(&items, 10, 100, 5).unwrap();

        for page in &pages {
            assert!(joined_length(page.items(), 5) <= 100);
        }
        assert_eq!(pages.len(), 2);
        assert_eq!(flatten(&pages), items);
    }

    #[test]
    fn never_drops_items_when_pages_close_early() {
        let items: Vec<String> = (0..30)
            .map(|i| "x".repeat(if i % 3 == 0 { 90 } else { 10 }))
            .collect();
        let pages = paginate(&items, 7, 120, 2).unwrap();

        for page in &pages {
            assert!(page.len() <= 7);
            assert!(joined_length(page.items(), 2) <= 120);
        }
        assert_eq!(flatten(&pages), items);
    }

    #[test]
    fn unbounded_item_count_scales_to_large_inputs() {
        let items: Vec<String> = (0..50_000).map(|i| format!("line {i:05}")).collect();
        let pages = paginate(&items, usize::MAX, 1_000, 1).unwrap();

        // Every line is 10 characters plus 1 of overhead.
        assert_eq!(pages.len(), 50_000usize.div_ceil(90));
        for page in &pages {
            assert!(joined_length(page.items(), 1) <= 1_000);
        }
        assert_eq!(flatten(&pages), items);
    }

    #[test]
    fn rejects_items_longer_than_the_budget() {
        let items = vec!["ok".to_owned(), "y".repeat(96)];
        let err = paginate(&items, 10, 100, 5).unwrap_err();

        assert_eq!(
            err,
            PaginateError::ItemTooLarge {
                index: 1,
                length: 96,
                limit: 95
            }
        );
    }

    #[test]
    fn item_exactly_at_the_limit_fits_alone() {
        let items = vec!["z".repeat(95), "z".repeat(95)];
        let pages = paginate(&items, 10, 100, 5).unwrap();

        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn overhead_above_budget_rejects_everything() {
        let err = paginate(&["a"], 10, 3, 5).unwrap_err();
        assert!(matches!(err, PaginateError::ItemTooLarge { index: 0, .. }));
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let items: Vec<String> = Vec::new();
        let pages = paginate(&items, 10, 100, 0).unwrap();

        assert_eq!(pages.len(), 1);
        assert!(pages.get(0).is_some_and(Page::is_empty));
    }

    #[test]
    fn zero_items_per_page_is_treated_as_one() {
        let pages = paginate(&["a", "b"], 0, 100, 0).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn footers_are_one_based() {
        let pages = paginate(&["a", "b", "c"], 1, 100, 0).unwrap();
        let footers: Vec<String> = pages.iter().map(Page::footer).collect();

        assert_eq!(footers, vec!["Page 1/3", "Page 2/3", "Page 3/3"]);
    }
}
