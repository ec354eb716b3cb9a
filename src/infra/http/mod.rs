//! HTTP surface: JSON product routes plus a health probe.

pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router as build_router};
pub use middleware::RequestContext;
