//! Cache-aside front for product listings.
//!
//! "List all" and "list by category" are served from [`PageSnapshot`]s when present
//! and populate them on a miss. Sorted listings and keyword search always go to the
//! store. Every write evicts the whole key namespace.

use std::future::Future;

use tracing::warn;

use crate::application::catalog::{CatalogError, CatalogQueryService, ListingRequest, ProductView};
use crate::application::pagination::{Page, PageRequest};
use crate::cache::{
    CacheConfig, CacheKeyBuilder, CacheKeyError, CacheLookup, CacheOperation, CacheStore,
    KeyParam, PageSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Cache,
    Store,
}

/// A page plus where it came from. The source never changes the page itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub page: Page<T>,
    pub source: ListingSource,
}

impl<T> Listing<T> {
    fn from_store(page: Page<T>) -> Self {
        Self {
            page,
            source: ListingSource::Store,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == ListingSource::Cache
    }
}

#[derive(Clone)]
pub struct CachedListingFacade {
    catalog: CatalogQueryService,
    store: CacheStore,
    keys: CacheKeyBuilder,
    config: CacheConfig,
}

impl CachedListingFacade {
    pub fn new(
        catalog: CatalogQueryService,
        store: CacheStore,
        config: CacheConfig,
    ) -> Result<Self, CacheKeyError> {
        let keys = CacheKeyBuilder::new(config.key_prefix.clone())?;
        Ok(Self {
            catalog,
            store,
            keys,
            config,
        })
    }

    pub fn catalog(&self) -> &CatalogQueryService {
        &self.catalog
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub async fn list_all(&self, page: PageRequest) -> Result<Listing<ProductView>, CatalogError> {
        let operation = CacheOperation::LIST_ALL;
        let key = self.keys.build_key(
            &operation,
            &[
                KeyParam::new("page", page.page()),
                KeyParam::new("size", page.size()),
            ],
        );
        self.cache_aside(&operation, &key, page, || self.catalog.list_all(page))
            .await
    }

    /// Category listing; an absent or blank category shares the "list all" entries.
    pub async fn list_by_category(
        &self,
        category: Option<&str>,
        page: PageRequest,
    ) -> Result<Listing<ProductView>, CatalogError> {
        let Some(category) = category.filter(|value| !value.trim().is_empty()) else {
            return self.list_all(page).await;
        };

        let operation = CacheOperation::BY_CATEGORY;
        let key = self.keys.build_key(
            &operation,
            &[
                KeyParam::new("category", category),
                KeyParam::new("page", page.page()),
                KeyParam::new("size", page.size()),
            ],
        );
        self.cache_aside(&operation, &key, page, || {
            self.catalog.list_by_category(category, page)
        })
        .await
    }

    /// Filtered and sorted listing. Never cached.
    pub async fn filter_and_sort(
        &self,
        request: &ListingRequest,
    ) -> Result<Listing<ProductView>, CatalogError> {
        let page = self.catalog.filter_and_sort(request).await?;
        Ok(Listing::from_store(page))
    }

    /// Keyword search. Never cached.
    pub async fn search(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Listing<ProductView>, CatalogError> {
        let page = self.catalog.search(keyword, page).await?;
        Ok(Listing::from_store(page))
    }

    /// Evict every cached listing of this deployment. Returns the number of removed keys.
    pub async fn invalidate_all(&self) -> u64 {
        self.store
            .evict_by_pattern(&self.keys.namespace_pattern())
            .await
    }

    async fn cache_aside<F, Fut>(
        &self,
        operation: &CacheOperation,
        key: &str,
        request: PageRequest,
        load: F,
    ) -> Result<Listing<ProductView>, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<ProductView>, CatalogError>>,
    {
        match self.store.lookup::<PageSnapshot<ProductView>>(key).await {
            CacheLookup::Hit(snapshot) => {
                return Ok(Listing {
                    page: snapshot.into_page(request),
                    source: ListingSource::Cache,
                });
            }
            CacheLookup::Miss => {}
            CacheLookup::Failed(err) => {
                warn!(
                    key,
                    provider = self.store.provider_name(),
                    error = %err,
                    "cache read failed; serving from store"
                );
            }
        }

        let page = load().await?;
        let ttl = self.config.ttl_for(operation);
        self.store
            .set(key, &PageSnapshot::from_page(&page), ttl)
            .await;

        Ok(Listing::from_store(page))
    }
}
