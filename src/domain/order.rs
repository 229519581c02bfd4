use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{check_transition, OrderStatus, Product, TransitionError};
use crate::order_actor::ValidationError;

pub const MIN_ITEM_QUANTITY: i64 = 1;
pub const MAX_ITEM_QUANTITY: i64 = 10;

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    /// Total charge after discount, fixed at placement.
    pub amount: f64,
    pub discount_percent: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a freshly placed order.
    pub fn placed(id: impl Into<String>, amount: f64, discount_percent: u8, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            status: OrderStatus::Placed,
            amount,
            discount_percent,
            created_at: now,
            updated_at: now,
            dispatched_at: None,
        }
    }

    /// Moves the order to `to` if the lifecycle allows it.
    ///
    /// `dispatched_at` is stamped only on entering Dispatched; `updated_at`
    /// on every accepted transition.
    pub fn apply_transition(&mut self, to: OrderStatus, at: DateTime<Utc>) -> Result<(), TransitionError> {
        check_transition(self.status, to)?;
        self.status = to;
        if to == OrderStatus::Dispatched {
            self.dispatched_at = Some(at);
        }
        self.updated_at = at;
        Ok(())
    }
}

/// One product line of an order, with the display fields captured at placement.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub unit_price: f64,
}

impl OrderLineItem {
    pub fn from_snapshot(order_id: impl Into<String>, product: &Product, quantity: u32) -> Self {
        Self {
            order_id: order_id.into(),
            product_id: product.id.clone(),
            quantity,
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            unit_price: product.price,
        }
    }
}

/// An order together with its line items, stored as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order: Order,
    pub items: Vec<OrderLineItem>,
}

/// A requested line as delivered by the transport layer, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

impl OrderItemRequest {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self { product_id: product_id.into(), quantity }
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

/// A line that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

impl PlaceOrderRequest {
    pub fn new(items: impl IntoIterator<Item = OrderItemRequest>) -> Self {
        Self { items: items.into_iter().collect() }
    }

    /// Structural checks that need no catalog access.
    ///
    /// Repeated ids are reported before any per-line problem; after that,
    /// lines are checked in request order and the first offending line
    /// decides the reported reason.
    pub fn validate(&self) -> Result<Vec<OrderLine>, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyItems);
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        if let Some(repeated) = self.items.iter().find(|item| !seen.insert(item.product_id.to_lowercase())) {
            return Err(ValidationError::DuplicateProduct(repeated.product_id.clone()));
        }

        let mut lines = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            if item.product_id.trim().is_empty() {
                return Err(ValidationError::BlankProductId { index });
            }
            if !(MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY).contains(&item.quantity) {
                return Err(ValidationError::QuantityOutOfRange {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                });
            }
            lines.push(OrderLine {
                product_id: item.product_id.clone(),
                // Range check above keeps this lossless
                quantity: item.quantity as u32,
            });
        }

        Ok(lines)
    }
}
