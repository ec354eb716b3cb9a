//! Offset pagination helpers shared by listings and cached snapshots.

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated pagination window: 0-based page index and a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Result<Self, PaginationError> {
        if size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of matching records to skip: `page * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the metadata derived from the total match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let number = request.page();
        let size = request.size();
        let total_pages = total_pages(total_elements, size);
        Self {
            empty: content.is_empty(),
            first: number == 0,
            last: is_last_page(number, total_pages),
            content,
            total_elements,
            total_pages,
            number,
            size,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }
}

/// `ceil(total_elements / size)`, or 0 when either operand is 0.
pub fn total_pages(total_elements: u64, size: u32) -> u64 {
    if size == 0 || total_elements == 0 {
        return 0;
    }
    total_elements.div_ceil(u64::from(size))
}

/// A page is last when no page follows it; an empty result set has only a last page.
pub fn is_last_page(number: u32, total_pages: u64) -> bool {
    u64::from(number) + 1 >= total_pages
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("page size {size} exceeds the maximum of {max}")]
    PageSizeTooLarge { size: u32, max: u32 },
}
