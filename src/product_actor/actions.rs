/// Custom actions for Product entities.
///
/// These actions represent catalog operations beyond plain reads and upserts.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Overwrites the available quantity with an absolute value.
    SetQuantity(u32),
}
