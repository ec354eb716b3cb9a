use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::ErrorReport;
use crate::infra::http::api::models::{CacheHealth, HealthReport};
use crate::infra::http::api::state::ApiState;

/// Store reachability decides the status code; the cache is reported but never fails the probe.
pub async fn health(State(state): State<ApiState>) -> Response {
    let store = state.store.ping().await;
    let cache = state.listings.store();
    let cache_up = cache.health_check().await;

    let report = HealthReport {
        status: if store.is_ok() { "UP" } else { "DOWN" },
        database: if store.is_ok() { "UP" } else { "DOWN" },
        cache: CacheHealth {
            provider: cache.provider_name(),
            status: if cache_up { "UP" } else { "DOWN" },
        },
    };

    match store {
        Ok(()) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            let mut response = (StatusCode::SERVICE_UNAVAILABLE, Json(report)).into_response();
            ErrorReport::from_error(
                "infra::http::health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
