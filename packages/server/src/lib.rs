// Listing Optimizer - API Core
//
// Scrapes storefront product listings, rewrites them through a
// text-generation provider, and keeps original/optimized pairs with history.
//
// Products domain actions live in domains/products/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
