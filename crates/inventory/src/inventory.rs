//! The validated selection→item mapping and its decoder.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendo_catalog::{Item, ProductSelection};

use crate::source::RawConfig;

/// Failures while decoding raw configuration into an [`Inventory`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A raw key named no known product selection. The whole load fails;
    /// no partial inventory is produced.
    #[error("unrecognized product key: {0}")]
    InvalidKey(String),
}

/// Shape expected of each raw entry value.
#[derive(Debug, Deserialize)]
struct RawItem {
    price: Decimal,
    quantity: Decimal,
}

/// The full selection→item mapping. Keys are unique, order carries no
/// meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory(HashMap<ProductSelection, Item>);

impl Inventory {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Decode an untyped key/value mapping into a validated inventory.
    ///
    /// Entries whose value is not a record with numeric, non-negative
    /// `price` and `quantity` fields are skipped with a warning. A
    /// recognized shape under an unrecognized key fails the whole load with
    /// [`InventoryError::InvalidKey`]. If the raw source carried duplicate
    /// keys, the last one wins.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, InventoryError> {
        let mut inventory = HashMap::new();

        for (key, value) in raw {
            let entry = match serde_json::from_value::<RawItem>(value.clone()) {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%key, %err, "skipping malformed inventory entry");
                    continue;
                }
            };

            if entry.price < Decimal::ZERO || entry.quantity < Decimal::ZERO {
                tracing::warn!(%key, "skipping inventory entry with negative price or quantity");
                continue;
            }

            let selection: ProductSelection = key
                .parse()
                .map_err(|_| InventoryError::InvalidKey(key.clone()))?;

            inventory.insert(selection, Item::new(entry.price, entry.quantity));
        }

        Ok(Self(inventory))
    }

    pub fn get(&self, selection: ProductSelection) -> Option<&Item> {
        self.0.get(&selection)
    }

    pub fn get_mut(&mut self, selection: ProductSelection) -> Option<&mut Item> {
        self.0.get_mut(&selection)
    }

    pub fn insert(&mut self, selection: ProductSelection, item: Item) {
        self.0.insert(selection, item);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductSelection, &Item)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("test fixture must be an object, got {other:?}"),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn well_formed_config_loads_exactly_its_keys() {
        let raw = raw(json!({
            "Soda": {"price": 1.25, "quantity": 5},
            "Gum": {"price": 0.50, "quantity": 20},
            "Sandwich": {"price": 3.50, "quantity": 4},
        }));

        let inventory = Inventory::from_raw(&raw).unwrap();
        assert_eq!(inventory.len(), 3);

        let soda = inventory.get(ProductSelection::Soda).unwrap();
        assert_eq!(soda.price(), dec("1.25"));
        assert_eq!(soda.quantity, dec("5"));

        assert!(inventory.get(ProductSelection::Water).is_none());
    }

    #[test]
    fn unrecognized_key_fails_the_whole_load() {
        let raw = raw(json!({
            "Soda": {"price": 1.25, "quantity": 5},
            "Espresso": {"price": 2.75, "quantity": 3},
        }));

        let err = Inventory::from_raw(&raw).unwrap_err();
        assert_eq!(err, InventoryError::InvalidKey("Espresso".to_string()));
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let raw = raw(json!({
            "Soda": {"price": 1.25, "quantity": 5},
            "Chips": {"price": 1.00},
            "Cookie": {"price": "a lot", "quantity": []},
            "Water": "not a record",
        }));

        let inventory = Inventory::from_raw(&raw).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(inventory.get(ProductSelection::Soda).is_some());
    }

    #[test]
    fn negative_price_or_quantity_is_skipped() {
        let raw = raw(json!({
            "Soda": {"price": -1.25, "quantity": 5},
            "Gum": {"price": 0.50, "quantity": -1},
            "Water": {"price": 1.00, "quantity": 12},
        }));

        let inventory = Inventory::from_raw(&raw).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(inventory.get(ProductSelection::Water).is_some());
    }

    #[test]
    fn malformed_entry_under_unknown_key_is_still_skipped() {
        // Shape is checked before the key, so a malformed value under an
        // unknown key never reaches the key check.
        let raw = raw(json!({
            "Espresso": {"price": "free"},
            "Soda": {"price": 1.25, "quantity": 5},
        }));

        let inventory = Inventory::from_raw(&raw).unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn empty_config_loads_an_empty_inventory() {
        let inventory = Inventory::from_raw(&RawConfig::new()).unwrap();
        assert!(inventory.is_empty());
    }
}
