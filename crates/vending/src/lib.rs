//! Vending domain module (event-sourced).
//!
//! This crate contains the business rules for the vending ledger — deposited
//! funds and the vend transaction — implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod machine;

pub use machine::{
    CreateMachine, DepositFunds, FundsDeposited, ItemVended, MachineCommand, MachineCreated,
    MachineEvent, VendError, VendItem, VendingMachine,
};
