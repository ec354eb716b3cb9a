//! API handlers organized by resource.

mod health;
mod products;

pub use health::*;
pub use products::*;
