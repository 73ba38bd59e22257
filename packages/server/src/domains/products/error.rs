use thiserror::Error;

use listing_extraction::{AsinError, ExtractionError};

use crate::kernel::StoreError;

/// Request-level failures of product actions.
///
/// Rewrite failures never appear here; actions absorb them into the
/// fallback-to-original path.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to fetch product page: {0}")]
    Fetch(#[from] ExtractionError),

    #[error("Storage error: {0}")]
    Persistence(#[from] StoreError),
}

impl From<AsinError> for OptimizeError {
    fn from(err: AsinError) -> Self {
        Self::Validation(err.to_string())
    }
}
