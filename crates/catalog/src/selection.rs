use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string named no known product selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown product selection: {0}")]
pub struct UnknownSelection(pub String);

/// The closed set of products a machine can carry.
///
/// Each selection round-trips to/from its exact external string name, which
/// is also the key format of the inventory resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductSelection {
    Soda,
    DietSoda,
    Chips,
    Cookie,
    Sandwich,
    Wrap,
    CandyBar,
    PopTart,
    Water,
    FruitJuice,
    SportsDrink,
    Gum,
}

impl ProductSelection {
    /// Every selection, in the fixed order the machine face displays them.
    pub const ALL: [ProductSelection; 12] = [
        ProductSelection::Soda,
        ProductSelection::DietSoda,
        ProductSelection::Chips,
        ProductSelection::Cookie,
        ProductSelection::Sandwich,
        ProductSelection::Wrap,
        ProductSelection::CandyBar,
        ProductSelection::PopTart,
        ProductSelection::Water,
        ProductSelection::FruitJuice,
        ProductSelection::SportsDrink,
        ProductSelection::Gum,
    ];

    /// The external string name (inventory resource key).
    pub fn name(&self) -> &'static str {
        match self {
            ProductSelection::Soda => "Soda",
            ProductSelection::DietSoda => "DietSoda",
            ProductSelection::Chips => "Chips",
            ProductSelection::Cookie => "Cookie",
            ProductSelection::Sandwich => "Sandwich",
            ProductSelection::Wrap => "Wrap",
            ProductSelection::CandyBar => "CandyBar",
            ProductSelection::PopTart => "PopTart",
            ProductSelection::Water => "Water",
            ProductSelection::FruitJuice => "FruitJuice",
            ProductSelection::SportsDrink => "SportsDrink",
            ProductSelection::Gum => "Gum",
        }
    }
}

impl core::fmt::Display for ProductSelection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ProductSelection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductSelection::ALL
            .iter()
            .copied()
            .find(|selection| selection.name() == s)
            .ok_or_else(|| UnknownSelection(s.to_string()))
    }
}
