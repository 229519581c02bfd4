//! Clients for the actors in the system, plus the order orchestration on top of them.

#[macro_use]
mod macros;

pub mod order_client;
pub mod order_store;
pub mod product_client;
pub mod projection;

pub use order_client::*;
pub use order_store::*;
pub use product_client::*;
pub use projection::OrderView;
