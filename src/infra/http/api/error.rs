use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::catalog::CatalogError;
use crate::application::error::ErrorReport;
use crate::application::pagination::PaginationError;
use crate::application::products::ProductError;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const VALIDATION: &str = "validation_failed";
    pub const NOT_FOUND: &str = "not_found";
    pub const DUPLICATE: &str = "duplicate";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INTEGRITY: &str = "integrity_error";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub error: &'static str,
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    messages: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, messages: Vec<String>) -> Self {
        Self {
            status,
            code,
            messages,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::BAD_REQUEST,
            vec![message.into()],
        )
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::VALIDATION, messages)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, vec![message.into()])
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self
            .messages
            .first()
            .cloned()
            .unwrap_or_else(|| self.code.to_string());
        let report = ErrorReport::from_message(
            "infra::http::api",
            self.status,
            format!("{}: {detail}", self.code),
        );
        let body = ApiErrorBody {
            code: self.status.as_u16(),
            error: self.code,
            errors: self.messages,
        };
        let mut response = (self.status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { messages } => ApiError::validation(messages),
            DomainError::NotFound { entity } => ApiError::not_found(format!("{entity} not found")),
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            rejection.status(),
            codes::BAD_REQUEST,
            vec![rejection.body_text()],
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

pub fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            vec![format!("duplicate record ({constraint})")],
        ),
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            vec![message],
        ),
        RepoError::Integrity { message } => {
            ApiError::new(StatusCode::CONFLICT, codes::INTEGRITY, vec![message])
        }
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            vec!["database timeout".to_string()],
        ),
        RepoError::Persistence(message) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            vec![message],
        ),
    }
}

pub fn catalog_to_api(err: CatalogError) -> ApiError {
    match err {
        CatalogError::Repo(err) => repo_to_api(err),
        CatalogError::NotFound(id) => ApiError::not_found(format!("product `{id}` not found")),
    }
}

pub fn product_to_api(err: ProductError) -> ApiError {
    match err {
        ProductError::Domain(err) => err.into(),
        ProductError::NotFound(id) => ApiError::not_found(format!("product `{id}` not found")),
        ProductError::Duplicate(name) => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            vec![format!("product named `{name}` already exists")],
        ),
        ProductError::Repo(err) => repo_to_api(err),
    }
}
