mod actor_framework;
mod app_system;
mod catalog;
mod clients;
mod config;
mod domain;
mod order_actor;
mod product_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, OrderSystem};
use crate::clients::ProductClient;
use crate::config::AppConfig;
use crate::domain::{OrderItemRequest, PlaceOrderRequest, Product};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load application configuration");
        e.to_string()
    })?;

    info!("Starting application with complete order system");
    let system = OrderSystem::new(&config);

    if config.seed_catalog {
        seed_catalog(&system.product_client).await.map_err(|e| e.to_string())?;
    }

    // Three premium lines unlock the volume discount
    let request = PlaceOrderRequest::new([
        OrderItemRequest::new("espresso-machine", 1),
        OrderItemRequest::new("grinder", 1),
        OrderItemRequest::new("kettle", 2),
        OrderItemRequest::new("filters", 5),
    ]);

    let span = tracing::info_span!("order_processing");
    let placed = async {
        info!("Placing order");
        system.order_client.place_order(request).await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(view) => {
            info!(order_id = %view.id, amount = view.amount, discount = view.discount_percent, "Order placed");

            match system.order_client.update_status(&view.id, "dispatched").await {
                Ok(view) => info!(order_id = %view.id, status = %view.status, "Order dispatched"),
                Err(e) => error!(error = %e, "Dispatch failed"),
            }

            // Moving back to an earlier status is always refused
            if let Err(e) = system.order_client.update_status(&view.id, "placed").await {
                warn!(error = %e, "Rejected as expected");
            }
        }
        Err(e) => error!(error = %e, kind = ?e.kind(), retryable = e.is_retryable(), "Order placement failed"),
    }

    let orders = system.order_client.list_orders().await.map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&orders).map_err(|e| e.to_string())?;
    println!("{json}");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn seed_catalog(products: &ProductClient) -> Result<(), crate::product_actor::CatalogError> {
    let seed = [
        Product::new("espresso-machine", "Espresso Machine", "premium", 349.0, 4)
            .with_description("Dual boiler, 58mm portafilter"),
        Product::new("grinder", "Burr Grinder", "premium", 189.0, 7).with_description("Conical burrs"),
        Product::new("kettle", "Gooseneck Kettle", "premium", 79.0, 12),
        Product::new("filters", "Paper Filters", "standard", 4.5, 200).with_description("Pack of 100"),
    ];
    let count = seed.len();
    for product in seed {
        products.upsert_product(product).await?;
    }
    info!(count, "Catalog seeded");
    Ok(())
}
