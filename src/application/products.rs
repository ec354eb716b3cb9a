//! Single-product reads and writes. Every successful write evicts cached listings.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::catalog::{CatalogError, ProductView};
use crate::application::listing::CachedListingFacade;
use crate::application::repos::{
    CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, UpdateProductParams,
};
use crate::domain::error::DomainError;
use crate::domain::products::{ProductDraft, ProductInput};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("product `{0}` not found")]
    NotFound(Uuid),
    #[error("product named `{0}` already exists")]
    Duplicate(String),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<CatalogError> for ProductError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::NotFound(id),
            CatalogError::Repo(err) => Self::Repo(err),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    reader: Arc<dyn ProductsRepo>,
    writer: Arc<dyn ProductsWriteRepo>,
    listings: CachedListingFacade,
}

impl ProductService {
    pub fn new(
        reader: Arc<dyn ProductsRepo>,
        writer: Arc<dyn ProductsWriteRepo>,
        listings: CachedListingFacade,
    ) -> Self {
        Self {
            reader,
            writer,
            listings,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductView, ProductError> {
        Ok(self.listings.catalog().get(id).await?)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Result<ProductView, ProductError> {
        let draft = ProductDraft::validate(input)?;

        if self
            .reader
            .exists_by_name(&draft.name)
            .await
            .map_err(ProductError::Repo)?
        {
            return Err(ProductError::Duplicate(draft.name));
        }

        let name = draft.name.clone();
        let record = self
            .writer
            .create_product(CreateProductParams {
                name: draft.name,
                description: draft.description,
                price: draft.price,
                category: draft.category,
            })
            .await
            .map_err(|err| map_write_error(err, &name, None))?;

        info!(product_id = %record.id, "product created");
        self.listings.invalidate_all().await;
        Ok(record.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: ProductInput) -> Result<ProductView, ProductError> {
        let draft = ProductDraft::validate(input)?;

        if self
            .reader
            .find_by_id(id)
            .await
            .map_err(ProductError::Repo)?
            .is_none()
        {
            return Err(ProductError::NotFound(id));
        }

        let name = draft.name.clone();
        let record = self
            .writer
            .update_product(UpdateProductParams {
                id,
                name: draft.name,
                description: draft.description,
                price: draft.price,
                category: draft.category,
            })
            .await
            .map_err(|err| map_write_error(err, &name, Some(id)))?;

        info!(product_id = %record.id, "product updated");
        self.listings.invalidate_all().await;
        Ok(record.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ProductError> {
        self.writer
            .delete_product(id)
            .await
            .map_err(|err| map_write_error(err, "", Some(id)))?;

        info!(product_id = %id, "product deleted");
        self.listings.invalidate_all().await;
        Ok(())
    }
}

fn map_write_error(err: RepoError, name: &str, id: Option<Uuid>) -> ProductError {
    match (err, id) {
        (RepoError::Duplicate { .. }, _) => ProductError::Duplicate(name.to_string()),
        (RepoError::NotFound, Some(id)) => ProductError::NotFound(id),
        (err, _) => ProductError::Repo(err),
    }
}
