use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderLineItem, OrderRecord, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};

/// Client for the order store actor.
///
/// The actor owns the only copy of the map, so every read and write here is
/// serialized. Status changes go through [`OrderStore::transition`], which
/// performs its read-check-write inside the actor.
#[derive(Clone)]
pub struct OrderStore {
    inner: ResourceClient<OrderRecord>,
}

impl_basic_client!(OrderStore, OrderRecord, OrderError, record, records);

impl OrderStore {
    /// Writes an order and its line items as one unit, overwriting any existing entry.
    #[instrument(skip(self, order, items), fields(order_id = %order.id, items = items.len()))]
    pub async fn put(&self, order: Order, items: Vec<OrderLineItem>) -> Result<(), OrderError> {
        debug!("Sending request");
        if self.inner.put(OrderRecord { order, items }).await?.is_some() {
            info!("Existing order overwritten");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Order, OrderError> {
        self.get_record(id.to_string())
            .await?
            .map(|record| record.order)
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
    }

    /// Line items in placement order; empty for an unknown id.
    #[instrument(skip(self))]
    pub async fn get_items(&self, id: &str) -> Result<Vec<OrderLineItem>, OrderError> {
        Ok(self.get_record(id.to_string()).await?.map(|record| record.items).unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.list_records().await?.into_iter().map(|record| record.order).collect())
    }

    /// Atomically applies a status change to a stored order.
    #[instrument(skip(self, at))]
    pub async fn transition(&self, id: &str, to: OrderStatus, at: DateTime<Utc>) -> Result<OrderRecord, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id.to_string(), OrderAction::Transition { to, at })
            .await?
            .map_err(|source| OrderError::InvalidTransition { order_id: id.to_string(), source })
    }
}
