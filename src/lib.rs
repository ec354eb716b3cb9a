//! Product catalog service: filtered, sorted, paginated listings served
//! through a cache-aside layer.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
