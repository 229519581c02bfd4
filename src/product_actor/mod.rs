//! Product-specific domain logic for the in-memory catalog, including stock actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
