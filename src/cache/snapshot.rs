//! Serializable copy of one result page, the unit that crosses the cache boundary.

use serde::{Deserialize, Serialize};

use crate::application::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub is_first: bool,
    pub is_last: bool,
    pub is_empty: bool,
}

impl<T: Clone> PageSnapshot<T> {
    /// Copy a live page; the page itself is still handed to the caller.
    pub fn from_page(page: &Page<T>) -> Self {
        Self {
            content: page.content.clone(),
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            page_number: page.number,
            page_size: page.size,
            is_first: page.first,
            is_last: page.last,
            is_empty: page.empty,
        }
    }
}

impl<T> PageSnapshot<T> {
    /// Rebuild a page for `request`, trusting the stored total.
    ///
    /// Derived metadata is recomputed instead of copied, so a snapshot written by an
    /// older layout cannot disagree with the request it is served for. Content beyond
    /// the requested size is dropped.
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        let mut content = self.content;
        content.truncate(request.size() as usize);
        Page::new(content, request, self.total_elements)
    }
}
