use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::actor_framework::Entity;
use crate::domain::{OrderRecord, OrderStatus, TransitionError};

/// Custom actions for stored orders.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order to a new status, checked against the lifecycle rules.
    Transition { to: OrderStatus, at: DateTime<Utc> },
}

impl Entity for OrderRecord {
    type Id = String;
    type Action = OrderAction;
    type ActionResult = Result<OrderRecord, TransitionError>;

    fn id(&self) -> &String { &self.order.id }

    /// Rejects records whose line items do not belong to the order or repeat a product.
    fn on_put(&mut self) -> Result<(), String> {
        let mut products = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.order_id != self.order.id {
                return Err(format!(
                    "line item for product {} belongs to order {}, not {}",
                    item.product_id, item.order_id, self.order.id
                ));
            }
            if !products.insert(item.product_id.to_lowercase()) {
                return Err(format!("product {} appears twice in order {}", item.product_id, self.order.id));
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderRecord, TransitionError> {
        match action {
            OrderAction::Transition { to, at } => {
                self.order.apply_transition(to, at)?;
                Ok(self.clone())
            }
        }
    }
}
