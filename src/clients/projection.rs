//! Read-only views of stored orders.
//!
//! Each line item is shown with live catalog data when the catalog answers,
//! and with the snapshot captured at placement otherwise. Reading an order
//! never fails because of the catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{instrument, warn};

use crate::catalog::CatalogHandle;
use crate::domain::{OrderLineItem, OrderRecord, OrderStatus, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Current catalog price, or the purchase price when the catalog did not answer.
    pub price: f64,
    pub purchase_price: f64,
    pub quantity: u32,
    /// False when the fields above come from the placement-time snapshot.
    pub live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: String,
    pub items: Vec<OrderItemView>,
    #[serde(rename = "discount", skip_serializing_if = "is_zero")]
    pub discount_percent: u8,
    pub amount: f64,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn is_zero(value: &u8) -> bool {
    *value == 0
}

impl OrderItemView {
    fn live(item: &OrderLineItem, product: &Product) -> Self {
        Self {
            id: item.product_id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            purchase_price: item.unit_price,
            quantity: item.quantity,
            live: true,
        }
    }

    fn snapshot(item: &OrderLineItem) -> Self {
        Self {
            id: item.product_id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            price: item.unit_price,
            purchase_price: item.unit_price,
            quantity: item.quantity,
            live: false,
        }
    }
}

/// Pairs each line item with its live product, if any.
///
/// `live` is `None` when the catalog could not be reached. Otherwise every
/// line without a live match is returned in the second vector.
fn merge_items(
    items: &[OrderLineItem],
    live: Option<&HashMap<String, Product>>,
) -> (Vec<OrderItemView>, Vec<String>) {
    let mut missing = Vec::new();
    let views: Vec<OrderItemView> = items
        .iter()
        .map(|item| match live.map(|products| products.get(&item.product_id)) {
            Some(Some(product)) => OrderItemView::live(item, product),
            Some(None) => {
                missing.push(item.product_id.clone());
                OrderItemView::snapshot(item)
            }
            None => OrderItemView::snapshot(item),
        })
        .collect();
    (views, missing)
}

/// Joins a stored order with catalog data.
#[instrument(skip(record, catalog), fields(order_id = %record.order.id))]
pub async fn project(record: OrderRecord, catalog: &CatalogHandle) -> OrderView {
    let ids: Vec<String> = record.items.iter().map(|item| item.product_id.clone()).collect();

    let live: Option<HashMap<String, Product>> = match catalog.list_products(&ids).await {
        Ok(products) => Some(products.into_iter().map(|p| (p.id.clone(), p)).collect()),
        Err(e) => {
            warn!(error = %e, "Catalog unavailable, showing placement snapshot");
            None
        }
    };

    let (items, missing) = merge_items(&record.items, live.as_ref());
    for product_id in &missing {
        warn!(%product_id, "Product no longer in catalog, showing placement snapshot");
    }

    let order = record.order;
    OrderView {
        id: order.id,
        items,
        discount_percent: order.discount_percent,
        amount: order.amount,
        status: order.status,
        dispatched_at: order.dispatched_at,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}
