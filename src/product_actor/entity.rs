use crate::actor_framework::Entity;
use crate::domain::Product;
use super::actions::ProductAction;

impl Entity for Product {
    type Id = String;
    type Action = ProductAction;
    type ActionResult = Product;

    fn id(&self) -> &String { &self.id }

    /// Rejects products that could never be ordered.
    fn on_put(&mut self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("product id must not be blank".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("invalid price {} for product {}", self.price, self.id));
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `SetQuantity(quantity)`: Replaces the available stock
    fn handle_action(&mut self, action: ProductAction) -> Product {
        match action {
            ProductAction::SetQuantity(quantity) => {
                self.available_quantity = quantity;
                self.clone()
            }
        }
    }
}
