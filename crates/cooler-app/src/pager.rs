//! Log pagination

/// 1-based page cursor over the log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPager {
    page: usize,
    size: usize,
}

/// One control in the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Pages shown on each side of the current one
pub const PAGINATION_BETWEEN: usize = 3;
/// Pages always shown at each end
pub const PAGINATION_ELLIPSIS: usize = 1;

impl LogPager {
    pub fn new(size: usize) -> Self {
        Self {
            page: 1,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pages for `total` entries
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }

    /// Entries on the current page; empty when the page is past the end
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.size).min(items.len());
        &items[start..end]
    }

    /// Jump to `page` without clamping
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next(&mut self, total: usize) {
        if self.page < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn last(&mut self, total: usize) {
        self.page = self.page_count(total).max(1);
    }

    /// Controls for the pagination bar around the current page
    pub fn items(&self, total: usize) -> Vec<PageItem> {
        pagination_items(
            self.page,
            self.page_count(total),
            PAGINATION_BETWEEN,
            PAGINATION_ELLIPSIS,
        )
    }
}

/// Pagination controls: `ellipsis` pages at each end, `between` pages either
/// side of `page`, and an ellipsis marker for every gap wider than one page.
pub fn pagination_items(
    page: usize,
    total_pages: usize,
    between: usize,
    ellipsis: usize,
) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let page = page.clamp(1, total_pages);

    let mut pages: Vec<usize> = (1..=ellipsis.min(total_pages)).collect();
    pages.extend(page.saturating_sub(between).max(1)..=(page + between).min(total_pages));
    pages.extend((total_pages + 1).saturating_sub(ellipsis).max(1)..=total_pages);
    pages.retain(|p| (1..=total_pages).contains(p));
    pages.sort_unstable();
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() + 2);
    let mut prev = 0;
    for p in pages {
        match p - prev {
            1 => {}
            // A single hidden page is shown instead of an ellipsis.
            2 => items.push(PageItem::Page(p - 1)),
            _ => items.push(PageItem::Ellipsis),
        }
        items.push(PageItem::Page(p));
        prev = p;
    }
    items
}
