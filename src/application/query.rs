//! Composition of category filter, field sort and pagination into one product query.
//!
//! The builder never talks to storage. It produces a [`ProductQuery`] that a
//! repository executes twice: once with sort and pagination to fetch the page,
//! and once through [`ProductQuery::filter`] alone to count every match.

use crate::domain::types::{SortDirection, SortField};

use super::pagination::PageRequest;

/// Constraint set shared by the page fetch and the total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    category: Option<String>,
}

impl ProductFilter {
    /// Unconstrained filter over the whole product collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// Equality on category; blank or absent input means no constraint.
    pub fn by_category(category: Option<&str>) -> Self {
        Self {
            category: normalize_category(category),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
    }

    pub fn matches(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_none_or(|expected| expected == category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ProductSort {
    /// A sort exists only when both halves were requested.
    pub fn from_parts(field: Option<SortField>, direction: Option<SortDirection>) -> Option<Self> {
        match (field, direction) {
            (Some(field), Some(direction)) => Some(Self { field, direction }),
            _ => None,
        }
    }
}

/// Fully composed query: filter, optional ordering, skip and limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    filter: ProductFilter,
    sort: Option<ProductSort>,
    page: PageRequest,
}

impl ProductQuery {
    pub fn builder() -> ProductQueryBuilder {
        ProductQueryBuilder::default()
    }

    /// Filter to reuse for the count query; sort and pagination are not part of it.
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub fn sort(&self) -> Option<ProductSort> {
        self.sort
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn skip(&self) -> u64 {
        self.page.offset()
    }

    pub fn limit(&self) -> u64 {
        self.page.limit()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductQueryBuilder {
    filter: ProductFilter,
    sort_field: Option<SortField>,
    sort_direction: Option<SortDirection>,
    page: PageRequest,
}

impl ProductQueryBuilder {
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.filter = ProductFilter::by_category(category);
        self
    }

    pub fn sort_field(mut self, field: Option<SortField>) -> Self {
        self.sort_field = field;
        self
    }

    pub fn sort_direction(mut self, direction: Option<SortDirection>) -> Self {
        self.sort_direction = direction;
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// A field without a direction (or the reverse) yields an unsorted query.
    pub fn build(self) -> ProductQuery {
        ProductQuery {
            filter: self.filter,
            sort: ProductSort::from_parts(self.sort_field, self.sort_direction),
            page: self.page,
        }
    }
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
