//! Order-specific domain logic: the stored order entity, its lifecycle action, and errors.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
