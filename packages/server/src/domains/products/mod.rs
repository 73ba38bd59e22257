//! Products domain: optimize listings, re-optimize from history, and read
//! back stored products.

pub mod actions;
pub mod data;
pub mod error;
pub mod models;

pub use data::*;
pub use error::OptimizeError;
