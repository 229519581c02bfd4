pub mod order;
pub mod pricing;
pub mod product;
pub mod status;

pub use order::*;
pub use pricing::*;
pub use product::*;
pub use status::*;
