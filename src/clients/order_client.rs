use chrono::Utc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::CatalogHandle;
use crate::clients::projection::project;
use crate::clients::{OrderStore, OrderView};
use crate::domain::{quote, Order, OrderLine, OrderLineItem, OrderRecord, OrderStatus, PlaceOrderRequest, Product};
use crate::order_actor::OrderError;
use crate::product_actor::CatalogError;

/// Client for placing and managing orders.
///
/// This client handles the orchestration: structural validation, catalog
/// lookups, pricing, persistence through the [`OrderStore`], and inventory
/// adjustment with compensation.
#[derive(Clone)]
pub struct OrderClient {
    store: OrderStore,
    catalog: CatalogHandle,
}

impl OrderClient {
    pub fn new(store: OrderStore, catalog: CatalogHandle) -> Self {
        Self { store, catalog }
    }

    /// Places a new order.
    ///
    /// Validation and stock checks run to completion before anything is
    /// written. If inventory adjustment fails after the order is stored, the
    /// adjustments already made are undone and the order is cancelled.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderView, OrderError> {
        info!("Processing place_order request");

        // Step 1: Structural validation
        let lines = request.validate().map_err(|e| {
            warn!(error = %e, "Order request rejected");
            e
        })?;

        // Step 2: Existence and stock check for every line
        let snapshots = self.check_stock(&lines).await?;

        // Step 3: Pricing
        let quote = quote(snapshots.iter().zip(&lines).map(|(product, line)| (product, line.quantity)));
        info!(subtotal = quote.subtotal, discount = quote.discount_percent, amount = quote.amount, "Order priced");

        // Step 4: Persist order and line items together
        let order_id = Uuid::new_v4().to_string();
        let order = Order::placed(order_id.clone(), quote.amount, quote.discount_percent, Utc::now());
        let items: Vec<OrderLineItem> = snapshots
            .iter()
            .zip(&lines)
            .map(|(product, line)| OrderLineItem::from_snapshot(order_id.clone(), product, line.quantity))
            .collect();
        self.store.put(order, items).await?;
        info!(order_id = %order_id, "Order stored");

        // Step 5: Inventory adjustment
        self.adjust_inventory(&order_id, &lines).await?;
        info!(order_id = %order_id, "Inventory updated");

        // Step 6: Projection
        self.get_order(&order_id).await
    }

    #[instrument(skip(self, lines))]
    async fn check_stock(&self, lines: &[OrderLine]) -> Result<Vec<Product>, OrderError> {
        let mut snapshots = Vec::with_capacity(lines.len());
        for line in lines {
            let product = match self.catalog.get_product(&line.product_id).await {
                Ok(product) => product,
                Err(CatalogError::NotFound(_)) => {
                    error!(product_id = %line.product_id, "Product not found");
                    return Err(OrderError::ProductNotFound(line.product_id.clone()));
                }
                Err(e) => {
                    error!(product_id = %line.product_id, error = %e, "Product lookup failed");
                    return Err(e.into());
                }
            };

            if !product.price.is_finite() || product.price < 0.0 {
                error!(product_id = %line.product_id, price = product.price, "Catalog reported an invalid price");
                return Err(CatalogError::Rejected(format!(
                    "{} has invalid price {}",
                    line.product_id, product.price
                ))
                .into());
            }

            if product.available_quantity < line.quantity {
                error!(
                    product_id = %line.product_id,
                    requested = line.quantity,
                    available = product.available_quantity,
                    "Insufficient inventory"
                );
                return Err(OrderError::InsufficientInventory {
                    product_id: line.product_id.clone(),
                    requested: line.quantity,
                    available: product.available_quantity,
                });
            }
            snapshots.push(product);
        }
        Ok(snapshots)
    }

    /// Decrements stock line by line; on the first failure, compensates and
    /// reports which product could not be adjusted.
    #[instrument(skip(self, lines))]
    async fn adjust_inventory(&self, order_id: &str, lines: &[OrderLine]) -> Result<(), OrderError> {
        let mut adjusted: Vec<&OrderLine> = Vec::with_capacity(lines.len());

        for line in lines {
            if let Err(reason) = self.decrement(line).await {
                error!(product_id = %line.product_id, %reason, "Inventory adjustment failed, compensating");
                self.compensate(order_id, &adjusted).await;
                return Err(OrderError::InventoryAdjustment {
                    order_id: order_id.to_string(),
                    product_id: line.product_id.clone(),
                    reason,
                });
            }
            adjusted.push(line);
        }
        Ok(())
    }

    /// Re-reads current availability and writes the decremented value.
    async fn decrement(&self, line: &OrderLine) -> Result<(), String> {
        let current = self.catalog.get_product(&line.product_id).await.map_err(|e| e.to_string())?;
        let remaining = current.available_quantity.checked_sub(line.quantity).ok_or_else(|| {
            format!(
                "stock dropped to {} since the order was checked, {} requested",
                current.available_quantity, line.quantity
            )
        })?;
        self.catalog
            .set_quantity(&line.product_id, remaining)
            .await
            .map_err(|e| e.to_string())
    }

    /// Gives back stock taken by this placement and cancels the order.
    ///
    /// Best effort: each failure is logged and the rest still run.
    async fn compensate(&self, order_id: &str, adjusted: &[&OrderLine]) {
        for line in adjusted {
            let restored = match self.catalog.get_product(&line.product_id).await {
                Ok(current) => {
                    let quantity = current.available_quantity.saturating_add(line.quantity);
                    self.catalog.set_quantity(&line.product_id, quantity).await
                }
                Err(e) => Err(e),
            };
            if let Err(e) = restored {
                error!(order_id, product_id = %line.product_id, error = %e, "Could not restore inventory");
            }
        }

        match self.store.transition(order_id, OrderStatus::Cancelled, Utc::now()).await {
            Ok(_) => warn!(order_id, "Order cancelled after failed inventory adjustment"),
            Err(e) => error!(order_id, error = %e, "Could not cancel order after failed inventory adjustment"),
        }
    }

    /// Moves an order to the status named by `status`.
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: &str, status: &str) -> Result<OrderView, OrderError> {
        info!("Processing update_status request");
        let target: OrderStatus = status.parse()?;

        let record = self.store.transition(order_id, target, Utc::now()).await.map_err(|e| {
            warn!(error = %e, "Status update rejected");
            e
        })?;
        info!(status = %record.order.status, "Order status updated");

        Ok(project(record, &self.catalog).await)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<OrderView, OrderError> {
        let order = self.store.get(order_id).await?;
        let items = self.store.get_items(order_id).await?;
        Ok(project(OrderRecord { order, items }, &self.catalog).await)
    }

    /// All orders, oldest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderView>, OrderError> {
        let mut orders = self.store.list_all().await?;
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.store.get_items(&order.id).await?;
            views.push(project(OrderRecord { order, items }, &self.catalog).await);
        }
        Ok(views)
    }
}
