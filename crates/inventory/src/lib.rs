//! Inventory: the selection→item mapping and the startup pipeline that
//! builds it from an untyped configuration resource.
//!
//! Reading the resource ([`ConfigSource`]) and decoding it
//! ([`Inventory::from_raw`]) are separate steps with separate failure
//! surfaces, so the decoder stays free of IO.

pub mod inventory;
pub mod source;

pub use inventory::{Inventory, InventoryError};
pub use source::{ConfigSource, JsonFileSource, RawConfig, ResourceError};
