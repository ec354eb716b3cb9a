#![allow(dead_code)]

use std::cmp::Ordering as CmpOrdering;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use catalog::application::catalog::CatalogQueryService;
use catalog::application::listing::CachedListingFacade;
use catalog::application::pagination::PageRequest;
use catalog::application::products::ProductService;
use catalog::application::query::{ProductFilter, ProductQuery};
use catalog::application::repos::{
    CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, StoreHealth,
    UpdateProductParams,
};
use catalog::cache::providers::MemoryCacheBackend;
use catalog::cache::{CacheBackend, CacheConfig, CacheError, CacheResult, CacheStore};
use catalog::domain::entities::ProductRecord;
use catalog::domain::types::{SortDirection, SortField};

pub const TEST_PREFIX: &str = "product-catalog-test:";

/// Product table kept in insertion order, with a counter of store round trips.
#[derive(Default)]
pub struct InMemoryProducts {
    records: Mutex<Vec<ProductRecord>>,
    page_fetches: AtomicUsize,
}

impl InMemoryProducts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, name: &str, price: f64, category: &str) -> ProductRecord {
        let now = OffsetDateTime::now_utc();
        let record = ProductRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.records.lock().await.push(record.clone());
        record
    }

    /// Number of page fetches that reached the store.
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    fn compare(a: &ProductRecord, b: &ProductRecord, field: SortField) -> CmpOrdering {
        let ordering = match field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }

    fn window(records: Vec<ProductRecord>, skip: u64, limit: u64) -> Vec<ProductRecord> {
        records
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect()
    }

    fn name_matches(record: &ProductRecord, keyword: &str) -> bool {
        record
            .name
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

#[async_trait]
impl ProductsRepo for InMemoryProducts {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<ProductRecord>, RepoError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        let mut matching: Vec<ProductRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| query.filter().matches(&record.category))
            .cloned()
            .collect();

        if let Some(sort) = query.sort() {
            matching.sort_by(|a, b| {
                let ordering = Self::compare(a, b, sort.field);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        Ok(Self::window(matching, query.skip(), query.limit()))
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, RepoError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|record| filter.matches(&record.category))
            .count() as u64)
    }

    async fn search_products(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        let matching: Vec<ProductRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| Self::name_matches(record, keyword))
            .cloned()
            .collect();
        Ok(Self::window(matching, page.offset(), page.limit()))
    }

    async fn count_search(&self, keyword: &str) -> Result<u64, RepoError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|record| Self::name_matches(record, keyword))
            .count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError> {
        let records = self.records.lock().await;
        Ok(records.iter().any(|record| record.name == name))
    }
}

#[async_trait]
impl ProductsWriteRepo for InMemoryProducts {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let mut records = self.records.lock().await;
        if records.iter().any(|record| record.name == params.name) {
            return Err(RepoError::Duplicate {
                constraint: "products_name_key".to_string(),
            });
        }
        let now = OffsetDateTime::now_utc();
        let record = ProductRecord {
            id: Uuid::new_v4(),
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == params.id)
            .ok_or(RepoError::NotFound)?;
        record.name = params.name;
        record.description = params.description;
        record.price = params.price;
        record.category = params.category.as_str().to_string();
        record.updated_at = OffsetDateTime::now_utc();
        Ok(record.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for InMemoryProducts {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Backend whose every call fails, standing in for an unreachable Redis.
#[derive(Default)]
pub struct FailingBackend {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connection("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connection("connection refused".into()))
    }

    async fn delete_pattern(&self, _pattern: &str) -> CacheResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connection("connection refused".into()))
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Err(CacheError::Connection("connection refused".into()))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

pub fn memory_backend() -> Arc<MemoryCacheBackend> {
    Arc::new(MemoryCacheBackend::new(
        NonZeroUsize::new(64).expect("non-zero capacity"),
    ))
}

pub fn test_cache_config() -> CacheConfig {
    CacheConfig::default().with_prefix(TEST_PREFIX)
}

pub fn facade(repo: Arc<InMemoryProducts>, backend: Arc<dyn CacheBackend>) -> CachedListingFacade {
    let catalog = CatalogQueryService::new(repo);
    CachedListingFacade::new(catalog, CacheStore::new(backend), test_cache_config())
        .expect("test prefix is valid")
}

pub fn product_service(repo: Arc<InMemoryProducts>, listings: CachedListingFacade) -> ProductService {
    ProductService::new(repo.clone(), repo, listings)
}

pub fn page(page: u32, size: u32) -> PageRequest {
    PageRequest::new(page, size).expect("valid page request")
}
