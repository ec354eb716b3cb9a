//! Read side of the catalog: executes composed product queries against the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest};
use crate::application::query::ProductQuery;
use crate::application::repos::{ProductsRepo, RepoError};
use crate::domain::entities::ProductRecord;
use crate::domain::types::{SortDirection, SortField};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("product `{0}` not found")]
    NotFound(Uuid),
}

/// Response shape of one product; also the element type of cached snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

impl From<ProductRecord> for ProductView {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            category: record.category,
        }
    }
}

/// Inbound listing parameters before they are composed into a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    pub category: Option<String>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: PageRequest,
}

impl ListingRequest {
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery::builder()
            .category(self.category.as_deref())
            .sort_field(self.sort_field)
            .sort_direction(self.sort_direction)
            .page(self.page)
            .build()
    }
}

#[derive(Clone)]
pub struct CatalogQueryService {
    reader: Arc<dyn ProductsRepo>,
}

impl CatalogQueryService {
    pub fn new(reader: Arc<dyn ProductsRepo>) -> Self {
        Self { reader }
    }

    /// Fetch one page of `query` together with the count of every match.
    ///
    /// The count reuses the query's filter and nothing else.
    #[instrument(skip(self), fields(page = query.page().page(), size = query.page().size()))]
    pub async fn execute(&self, query: &ProductQuery) -> Result<Page<ProductView>, CatalogError> {
        let (records, total) = tokio::try_join!(
            self.reader.find_products(query),
            self.reader.count_products(query.filter()),
        )?;

        let content = records.into_iter().map(ProductView::from).collect();
        Ok(Page::new(content, query.page(), total))
    }

    pub async fn list_all(&self, page: PageRequest) -> Result<Page<ProductView>, CatalogError> {
        let query = ProductQuery::builder().page(page).build();
        self.execute(&query).await
    }

    pub async fn list_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> Result<Page<ProductView>, CatalogError> {
        let query = ProductQuery::builder()
            .category(Some(category))
            .page(page)
            .build();
        self.execute(&query).await
    }

    pub async fn filter_and_sort(
        &self,
        request: &ListingRequest,
    ) -> Result<Page<ProductView>, CatalogError> {
        self.execute(&request.to_query()).await
    }

    /// Case-insensitive name search; a blank keyword lists everything.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<ProductView>, CatalogError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_all(page).await;
        }

        let (records, total) = tokio::try_join!(
            self.reader.search_products(keyword, page),
            self.reader.count_search(keyword),
        )?;

        let content = records.into_iter().map(ProductView::from).collect();
        Ok(Page::new(content, page, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductView, CatalogError> {
        self.reader
            .find_by_id(id)
            .await?
            .map(ProductView::from)
            .ok_or(CatalogError::NotFound(id))
    }
}
