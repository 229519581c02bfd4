use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::TransitionError;
use crate::product_actor::CatalogError;

/// Structural problems with a request, detected before any catalog call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("items not provided")]
    EmptyItems,
    #[error("invalid product id at item {index}: product id must not be blank")]
    BlankProductId { index: usize },
    #[error("quantity {quantity} for product {product_id} must be between 1 and 10")]
    QuantityOutOfRange { product_id: String, quantity: i64 },
    #[error("product id is repeated: {0}")]
    DuplicateProduct(String),
    #[error("invalid order status: {0:?}")]
    UnknownStatus(String),
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid status transition for order {order_id}: {source}")]
    InvalidTransition {
        order_id: String,
        source: TransitionError,
    },
    #[error("Product with id: {0} does not exist")]
    ProductNotFound(String),
    #[error("Product with id: {product_id} does not have enough inventory: requested {requested}, available {available}")]
    InsufficientInventory {
        product_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Order with id: {0} does not exist")]
    OrderNotFound(String),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Inventory for product with id: {product_id} could not be updated, order {order_id} was cancelled: {reason}")]
    InventoryAdjustment {
        order_id: String,
        product_id: String,
        reason: String,
    },
    #[error("Order store rejected write: {0}")]
    StoreRejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Coarse classification the transport layer maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Dependency,
    Internal,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_) | OrderError::InvalidTransition { .. } => ErrorKind::Validation,
            OrderError::ProductNotFound(_) | OrderError::OrderNotFound(_) => ErrorKind::NotFound,
            OrderError::InsufficientInventory { .. } => ErrorKind::Conflict,
            OrderError::Catalog(CatalogError::NotFound(_)) => ErrorKind::NotFound,
            OrderError::Catalog(_) | OrderError::InventoryAdjustment { .. } => ErrorKind::Dependency,
            OrderError::StoreRejected(_) | OrderError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may retry the whole request unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Dependency
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::OrderNotFound(id),
            FrameworkError::Rejected(reason) => OrderError::StoreRejected(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;

    #[test]
    fn test_error_kinds() {
        assert_eq!(OrderError::from(ValidationError::EmptyItems).kind(), ErrorKind::Validation);
        assert_eq!(OrderError::OrderNotFound("o1".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            OrderError::InsufficientInventory { product_id: "p1".into(), requested: 3, available: 1 }.kind(),
            ErrorKind::Conflict
        );
        let timeout = OrderError::from(CatalogError::Timeout { operation: "get_product", millis: 10 });
        assert_eq!(timeout.kind(), ErrorKind::Dependency);
        assert!(timeout.is_retryable());
        assert!(!OrderError::ProductNotFound("p1".into()).is_retryable());
    }

    #[test]
    fn test_messages_name_the_offending_id() {
        let err = OrderError::InvalidTransition {
            order_id: "o-42".into(),
            source: TransitionError::NotForward { from: OrderStatus::Dispatched, to: OrderStatus::Dispatched },
        };
        let message = err.to_string();
        assert!(message.contains("o-42"));
        assert!(message.contains("same-or-lower rank"));

        assert!(OrderError::ProductNotFound("p-9".into()).to_string().contains("p-9"));
    }

    #[test]
    fn test_framework_errors_map_to_order_errors() {
        assert_eq!(
            OrderError::from(FrameworkError::NotFound("o1".into())),
            OrderError::OrderNotFound("o1".into())
        );
        assert!(matches!(
            OrderError::from(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }
}
