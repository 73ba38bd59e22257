//! Product actions - entry-point functions for product operations
//!
//! These are called directly from the HTTP routes. Actions are
//! self-contained: they take raw input, handle identifier parsing, and
//! return final models.

mod optimize;
mod queries;
mod reoptimize;

pub use optimize::optimize_product;
pub use queries::{get_history, get_product, list_products};
pub use reoptimize::reoptimize_from_history;
