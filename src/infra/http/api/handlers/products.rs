//! Product listing and CRUD handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::catalog::{ListingRequest, ProductView};
use crate::application::pagination::Page;

use crate::infra::http::api::error::{ApiError, catalog_to_api, product_to_api};
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

type ListingResponse = Json<ApiResponse<Page<ProductView>>>;

pub async fn list_products(
    State(state): State<ApiState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ListingResponse, ApiError> {
    let Query(query) = query?;
    let listing = state
        .listings
        .list_all(query.page_request()?)
        .await
        .map_err(catalog_to_api)?;

    Ok(Json(ApiResponse::listing(listing)))
}

pub async fn filter_products(
    State(state): State<ApiState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<ListingResponse, ApiError> {
    let Query(query) = query?;
    let listing = state
        .listings
        .list_by_category(query.category.as_deref(), query.page_request()?)
        .await
        .map_err(catalog_to_api)?;

    Ok(Json(ApiResponse::listing(listing)))
}

pub async fn sort_products(
    State(state): State<ApiState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<ListingResponse, ApiError> {
    let Query(query) = query?;
    let request = ListingRequest {
        category: query.category.clone(),
        sort_field: query.sort_field()?,
        sort_direction: query.sort_direction()?,
        page: query.page_request()?,
    };

    let listing = state
        .listings
        .filter_and_sort(&request)
        .await
        .map_err(catalog_to_api)?;

    Ok(Json(ApiResponse::listing(listing)))
}

pub async fn search_products(
    State(state): State<ApiState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<ListingResponse, ApiError> {
    let Query(query) = query?;
    let listing = state
        .listings
        .search(query.keyword.as_deref().unwrap_or(""), query.page_request()?)
        .await
        .map_err(catalog_to_api)?;

    Ok(Json(ApiResponse::listing(listing)))
}

pub async fn get_product(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<ProductView>>, ApiError> {
    let Path(id) = id?;
    let product = state.products.get(id).await.map_err(product_to_api)?;
    Ok(Json(ApiResponse::ok(product)))
}

pub async fn create_product(
    State(state): State<ApiState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let product = state
        .products
        .create(payload.into())
        .await
        .map_err(product_to_api)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(product))))
}

pub async fn update_product(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProductView>>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let product = state
        .products
        .update(id, payload.into())
        .await
        .map_err(product_to_api)?;

    Ok(Json(ApiResponse::ok(product)))
}

pub async fn delete_product(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = id?;
    state.products.delete(id).await.map_err(product_to_api)?;
    Ok(Json(ApiResponse::empty()))
}
