use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::domain::Product;
use crate::product_actor::{CatalogError, ProductAction};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for the in-memory product catalog actor.
///
/// Stands in for the remote catalog service: it implements [`Catalog`], so the
/// order engine cannot tell it apart from a networked implementation.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, CatalogError, entry, entries);

impl ProductClient {
    /// Adds or replaces a catalog entry.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn upsert_product(&self, product: Product) -> Result<String, CatalogError> {
        debug!("Sending request");
        let id = product.id.clone();
        self.inner.put(product).await?;
        Ok(id)
    }
}

#[async_trait]
impl Catalog for ProductClient {
    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner
            .get(id.to_string())
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_products(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.get_many(ids.to_vec()).await?)
    }

    #[instrument(skip(self))]
    async fn set_quantity(&self, id: &str, quantity: u32) -> Result<(), CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), ProductAction::SetQuantity(quantity)).await {
            Ok(product) => {
                debug!(available = product.available_quantity, "Quantity updated");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => Err(CatalogError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;

    fn start() -> ProductClient {
        let (actor, inner) = ResourceActor::<Product>::new(16);
        tokio::spawn(actor.run());
        ProductClient::new(inner)
    }

    #[tokio::test]
    async fn test_get_and_set_quantity() {
        let client = start();
        client.upsert_product(Product::new("p1", "Lamp", "standard", 12.5, 4)).await.unwrap();

        client.set_quantity("p1", 1).await.unwrap();
        let product = client.get_product("p1").await.unwrap();
        assert_eq!(product.available_quantity, 1);
        assert_eq!(client.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let client = start();
        assert_eq!(client.get_product("nope").await, Err(CatalogError::NotFound("nope".to_string())));
        assert_eq!(client.set_quantity("nope", 3).await, Err(CatalogError::NotFound("nope".to_string())));
        assert_eq!(client.get_entry("nope".to_string()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_list_products_skips_missing() {
        let client = start();
        client.upsert_product(Product::new("a", "A", "standard", 1.0, 1)).await.unwrap();
        client.upsert_product(Product::new("b", "B", "premium", 2.0, 1)).await.unwrap();

        let ids = vec!["b".to_string(), "x".to_string(), "a".to_string()];
        let found: Vec<String> = client.list_products(&ids).await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(found, vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let client = start();
        let err = client.upsert_product(Product::new("p1", "Bad", "standard", -1.0, 1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(_)));
    }
}
