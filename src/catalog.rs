//! The product catalog seam.
//!
//! The catalog is a remote authority for price, category and stock. The core
//! treats it as fallible and non-transactional: every call goes through a
//! [`CatalogHandle`], which bounds it with a timeout and never retries.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::Product;
use crate::product_actor::CatalogError;

/// Operations the order engine needs from the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one product, or `CatalogError::NotFound`.
    async fn get_product(&self, id: &str) -> Result<Product, CatalogError>;

    /// Fetch several products in request order. Unknown ids are skipped.
    async fn list_products(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError>;

    /// Overwrite the available quantity of a product (absolute, not a delta).
    async fn set_quantity(&self, id: &str, quantity: u32) -> Result<(), CatalogError>;
}

/// Shared, timeout-bounded access to a [`Catalog`].
#[derive(Clone)]
pub struct CatalogHandle {
    inner: Arc<dyn Catalog>,
    timeout: Duration,
}

impl CatalogHandle {
    pub fn new(inner: Arc<dyn Catalog>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, CatalogError>>,
    ) -> Result<T, CatalogError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, millis, "Catalog call timed out");
                Err(CatalogError::Timeout { operation, millis })
            }
        }
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        debug!(product_id = %id, "Fetching product");
        self.bounded("get_product", self.inner.get_product(id)).await
    }

    pub async fn list_products(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        debug!(count = ids.len(), "Fetching products");
        self.bounded("list_products", self.inner.list_products(ids)).await
    }

    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Result<(), CatalogError> {
        debug!(product_id = %id, quantity, "Setting product quantity");
        self.bounded("set_quantity", self.inner.set_quantity(id, quantity)).await
    }
}
