use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

/// Default and ceiling for requested page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// A normalized page request: `page >= 1` and `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, &PageLimits::default())
    }
}

impl PageRequest {
    /// Normalize raw values. Missing size takes the default, oversized values
    /// are capped, and anything below 1 becomes 1.
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>, limits: &PageLimits) -> Self {
        let page = page.map_or(1, |p| usize::try_from(p.max(1)).unwrap_or(1));
        let max = limits.max_page_size.max(1);
        let page_size = page_size.map_or(limits.default_page_size, |s| {
            usize::try_from(s.max(1)).unwrap_or(max)
        });
        Self {
            page,
            page_size: page_size.clamp(1, max),
        }
    }

    /// `max(1, ceil(total / page_size))`.
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        let pages = total.div_ceil(self.page_size);
        if pages == 0 { 1 } else { pages }
    }

    /// The requested page clamped into `[1, total_pages]`.
    #[must_use]
    pub fn clamped_page(&self, total: usize) -> usize {
        self.page.clamp(1, self.total_pages(total))
    }

    /// Number of items to skip for the clamped page.
    #[must_use]
    pub fn offset(&self, total: usize) -> usize {
        (self.clamped_page(total) - 1) * self.page_size
    }
}

/// One discrete page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Assemble page metadata around items that were already sliced
    /// elsewhere (for example by a storage-level `LIMIT/OFFSET`).
    #[must_use]
    pub fn from_slice(items: Vec<T>, total: usize, request: PageRequest) -> Self {
        let total_pages = request.total_pages(total);
        let page = request.clamped_page(total);
        Self {
            items,
            total,
            total_pages,
            page,
            page_size: request.page_size,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
            page: self.page,
            page_size: self.page_size,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Slice one page out of an already ordered sequence.
#[must_use]
pub fn paginate<T: Clone>(ordered: &[T], request: PageRequest) -> Page<T> {
    let total = ordered.len();
    let start = request.offset(total).min(total);
    let end = (start + request.page_size).min(total);
    Page::from_slice(ordered[start..end].to_vec(), total, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn defaults_apply_when_missing() {
        let req = PageRequest::new(None, None, &PageLimits::default());
        assert_eq!(req, PageRequest { page: 1, page_size: 10 });
    }

    #[test]
    fn page_size_is_capped_and_floored() {
        let limits = PageLimits::default();
        assert_eq!(PageRequest::new(None, Some(500), &limits).page_size, 50);
        assert_eq!(PageRequest::new(None, Some(0), &limits).page_size, 1);
        assert_eq!(PageRequest::new(Some(-3), None, &limits).page, 1);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let page = paginate(&items(25), PageRequest { page: 2, page_size: 10 });
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn page_beyond_end_clamps_to_last() {
        let page = paginate(&items(25), PageRequest { page: 99, page_size: 10 });
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next);
    }

    #[test]
    fn empty_input_still_has_one_page() {
        let page = paginate::<usize>(&[], PageRequest { page: 4, page_size: 10 });
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let page = paginate(&items(50), PageRequest { page: 5, page_size: 10 });
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn offset_follows_clamped_page() {
        let req = PageRequest { page: 7, page_size: 10 };
        assert_eq!(req.offset(48), 40);
        assert_eq!(req.offset(0), 0);
    }
}
