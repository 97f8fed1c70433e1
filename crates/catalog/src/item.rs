use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendo_core::ValueObject;

/// Price/quantity record for one selection.
///
/// `price` is fixed at construction; `quantity` is the mutable stock level.
/// Range policy (non-negativity) is enforced by the loader on the way in and
/// by the vending machine on every decrement, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    price: Decimal,
    pub quantity: Decimal,
}

impl Item {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl ValueObject for Item {}
