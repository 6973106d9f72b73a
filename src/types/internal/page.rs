/// Default and maximum page sizes for list endpoints
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// 1-based page request, normalized on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// `page` is capped so the row offset `(page - 1) * size` fits a signed 64-bit SQL OFFSET
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let last_page = i64::MAX as u64 / size;
        Self {
            page: page.unwrap_or(1).clamp(1, last_page),
            size,
        }
    }

    /// Zero-based page index as the paginator counts pages
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of active records plus the counts the envelope reports
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    /// No matches, without touching storage
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page: request.page,
            size: request.size,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}
