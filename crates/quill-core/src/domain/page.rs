use serde::{Deserialize, Serialize};

/// Fixed page size for every listing in the application.
pub const PAGE_SIZE: u64 = 10;

/// One page of a listing, with enough metadata for a client to paginate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from a fetched slice and the total row count.
    pub fn new(items: Vec<T>, page: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            page_size: PAGE_SIZE,
            total_items,
            total_pages: total_items.div_ceil(PAGE_SIZE),
        }
    }
}
