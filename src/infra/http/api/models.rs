use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::application::listing::Listing;
use crate::application::pagination::{Page, PageRequest, PaginationError};
use crate::domain::products::ProductInput;
use crate::domain::types::{SortDirection, SortField};

use super::error::ApiError;

pub const MESSAGE_SUCCESS: &str = "Success";
pub const MESSAGE_SUCCESS_CACHED: &str = "Success (Cached)";

const DEFAULT_PAGE: u32 = 0;
const DEFAULT_SIZE: u32 = 10;

/// Success envelope shared by every product route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self::with_status(StatusCode::OK, Some(result))
    }

    pub fn created(result: T) -> Self {
        Self::with_status(StatusCode::CREATED, Some(result))
    }

    pub fn empty() -> Self {
        Self::with_status(StatusCode::OK, None)
    }

    fn with_status(status: StatusCode, result: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: MESSAGE_SUCCESS,
            result,
            cached: false,
        }
    }
}

impl<T> ApiResponse<Page<T>> {
    pub fn listing(listing: Listing<T>) -> Self {
        let cached = listing.is_cached();
        Self {
            code: StatusCode::OK.as_u16(),
            message: if cached {
                MESSAGE_SUCCESS_CACHED
            } else {
                MESSAGE_SUCCESS
            },
            result: Some(listing.page),
            cached,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub category: String,
}

impl From<ProductRequest> for ProductInput {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
        }
    }
}

fn page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest, PaginationError> {
    PageRequest::new(page.unwrap_or(DEFAULT_PAGE), size.unwrap_or(DEFAULT_SIZE))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        Ok(page_request(self.page, self.size)?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl FilterQuery {
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        Ok(page_request(self.page, self.size)?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub category: Option<String>,
    pub field: Option<String>,
    pub direction: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SortQuery {
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        Ok(page_request(self.page, self.size)?)
    }

    /// Blank values count as absent; anything else must name a known field.
    pub fn sort_field(&self) -> Result<Option<SortField>, ApiError> {
        non_blank(self.field.as_deref())
            .map(str::parse::<SortField>)
            .transpose()
            .map_err(ApiError::from)
    }

    pub fn sort_direction(&self) -> Result<Option<SortDirection>, ApiError> {
        non_blank(self.direction.as_deref())
            .map(str::parse::<SortDirection>)
            .transpose()
            .map_err(ApiError::from)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SearchQuery {
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        Ok(page_request(self.page, self.size)?)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub cache: CacheHealth,
}

#[derive(Debug, Serialize)]
pub struct CacheHealth {
    pub provider: &'static str,
    pub status: &'static str,
}
