//! Application services: query composition, cache-aside listings and product writes.

pub mod catalog;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod products;
pub mod query;
pub mod repos;
