use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Failures reported by the product catalog collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    #[error("Catalog rejected product: {0}")]
    Rejected(String),
    #[error("Catalog call {operation} timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::Rejected(reason) => CatalogError::Rejected(reason),
            other => CatalogError::Unavailable(other.to_string()),
        }
    }
}
