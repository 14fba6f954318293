use atelier_model::{PageMeta, Paginated};
use atelier_model::page::total_pages;

/// One page of a list plus the metadata needed to render its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PageResult<T> {
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::compute(0, 1, limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<Paginated<T>> for PageResult<T> {
    /// Server pages are trusted for their items; metadata is recomputed so
    /// an older API that reports `totalPages: 0` still renders page 1 of 1.
    fn from(page: Paginated<T>) -> Self {
        let meta =
            PageMeta::compute(page.meta.total, page.meta.page, page.meta.limit);
        Self {
            items: page.data,
            meta,
        }
    }
}

/// Clamp `page` into `[1, total_pages(total, page_size)]`.
pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
    page.clamp(1, total_pages(total, page_size))
}

/// Slice out page `page` (1-based) of `items`.
///
/// Zero `page` or `page_size` are treated as 1. A page beyond the end yields
/// no items but keeps the requested page number in the metadata.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageResult<T> {
    let meta = PageMeta::compute(items.len() as u64, page, page_size);
    let start = (meta.page as usize - 1).saturating_mul(meta.limit as usize);
    let items = items
        .iter()
        .skip(start)
        .take(meta.limit as usize)
        .cloned()
        .collect();
    PageResult { items, meta }
}
