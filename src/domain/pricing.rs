use crate::domain::Product;

pub const PREMIUM_CATEGORY: &str = "premium";
/// Number of premium line items that unlocks the volume discount.
pub const PREMIUM_ITEMS_FOR_DISCOUNT: usize = 3;
pub const VOLUME_DISCOUNT_PERCENT: u8 = 10;

/// Price of an order, fixed at placement time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub subtotal: f64,
    pub discount_percent: u8,
    pub amount: f64,
}

/// Prices a set of (product snapshot, quantity) lines.
///
/// Premium items are counted per line, not per unit.
pub fn quote<'a>(lines: impl IntoIterator<Item = (&'a Product, u32)>) -> Quote {
    let mut subtotal = 0.0;
    let mut premium_lines = 0;

    for (product, quantity) in lines {
        subtotal += product.price * f64::from(quantity);
        if product.is_premium() {
            premium_lines += 1;
        }
    }

    let discount_percent = if premium_lines >= PREMIUM_ITEMS_FOR_DISCOUNT {
        VOLUME_DISCOUNT_PERCENT
    } else {
        0
    };
    let amount = subtotal - subtotal * f64::from(discount_percent) / 100.0;

    Quote { subtotal, discount_percent, amount }
}
