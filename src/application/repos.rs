//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::query::{ProductFilter, ProductQuery};
use crate::domain::entities::ProductRecord;
use crate::domain::types::ProductCategory;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity violation: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductParams {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
}

#[derive(Debug, Clone)]
pub struct UpdateProductParams {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
}

#[async_trait]
pub trait ProductsRepo: Send + Sync {
    /// Execute a composed query: filter, optional sort, then skip/limit.
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<ProductRecord>, RepoError>;

    /// Count every record matching `filter`, ignoring sort and pagination.
    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, RepoError>;

    /// Case-insensitive substring match on the product name.
    async fn search_products(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, RepoError>;

    async fn count_search(&self, keyword: &str) -> Result<u64, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait ProductsWriteRepo: Send + Sync {
    async fn create_product(&self, params: CreateProductParams)
    -> Result<ProductRecord, RepoError>;

    async fn update_product(&self, params: UpdateProductParams)
    -> Result<ProductRecord, RepoError>;

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Liveness probe for the backing store, used by the health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
