//! Product catalog: the closed selection set and per-selection item records.
//!
//! Pure domain data (no IO, no HTTP, no storage).

pub mod item;
pub mod selection;

pub use item::Item;
pub use selection::{ProductSelection, UnknownSelection};
