use serde::{Deserialize, Serialize};

/// A product as reported by the catalog at the moment of the query.
///
/// Never cached across requests: the placement workflow and the projection
/// always fetch a fresh copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub available_quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Display name
    /// * `category` - Category label, e.g. "premium" or "standard"
    /// * `price` - Unit price
    /// * `available_quantity` - Stock currently available
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        available_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            available_quantity,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_premium(&self) -> bool {
        self.category.eq_ignore_ascii_case(crate::domain::PREMIUM_CATEGORY)
    }
}
