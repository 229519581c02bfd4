use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::catalog::CatalogHandle;
use crate::clients::{OrderClient, OrderStore, ProductClient};
use crate::config::AppConfig;
use crate::domain::{OrderRecord, Product};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    pub fn new(config: &AppConfig) -> Self {
        info!(
            buffer_size = config.actor_buffer_size,
            catalog_timeout_ms = config.catalog_timeout.as_millis() as u64,
            "Starting order system"
        );

        // 1. Setup the in-memory product catalog
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(config.actor_buffer_size);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Setup the order store
        let (order_actor, order_resource_client) = ResourceActor::<OrderRecord>::new(config.actor_buffer_size);
        let order_store = OrderStore::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        // 3. Wire the orchestration client with its dependencies
        let catalog = CatalogHandle::new(Arc::new(product_client.clone()), config.catalog_timeout);
        let order_client = OrderClient::new(order_store, catalog);

        Self {
            order_client,
            product_client,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Stops the actors and waits for them to finish.
    ///
    /// Actors stop once every client (and clone of one) has been dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
