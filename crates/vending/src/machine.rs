use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendo_catalog::{Item, ProductSelection};
use vendo_core::{Aggregate, AggregateRoot, DomainEvent, MachineId};
use vendo_inventory::Inventory;

/// Failure surface of the vending ledger.
///
/// All variants are recoverable: callers translate them into user feedback
/// and the machine stays consistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VendError {
    /// The machine has already been stocked and installed.
    #[error("machine already exists")]
    AlreadyExists,

    /// No machine has been created yet.
    #[error("machine not found")]
    NotFound,

    /// The command addresses a different machine.
    #[error("machine_id mismatch")]
    MachineMismatch,

    /// Requested quantity must be greater than zero.
    #[error("requested quantity must be greater than zero")]
    InvalidQuantity,

    /// Deposits cannot be negative.
    #[error("deposit amount cannot be negative")]
    NegativeDeposit,

    /// The selection is not carried by this machine.
    #[error("invalid selection: {0}")]
    InvalidSelection(ProductSelection),

    /// Stock cannot cover the requested quantity.
    #[error("out of stock: {0}")]
    OutOfStock(ProductSelection),

    /// The deposited balance cannot cover the total price.
    #[error("insufficient funds: {required} more required")]
    InsufficientFunds { required: Decimal },
}

/// Aggregate root: VendingMachine.
///
/// Owns the inventory and the deposited balance. `handle` decides, `apply`
/// evolves; a vend is two related decrements (stock, then balance) that
/// only ever land together, through a single applied event. The aggregate
/// itself is synchronous and single-threaded — callers sharing a machine
/// across threads must wrap it in their own lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingMachine {
    id: MachineId,
    inventory: Inventory,
    amount_deposited: Decimal,
    version: u64,
    created: bool,
}

impl VendingMachine {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: MachineId) -> Self {
        Self {
            id,
            inventory: Inventory::new(),
            amount_deposited: Decimal::ZERO,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> MachineId {
        self.id
    }

    /// Current deposited balance.
    pub fn amount_deposited(&self) -> Decimal {
        self.amount_deposited
    }

    /// Read-only item lookup, used to display price × quantity before a
    /// purchase. No side effects.
    pub fn item_for_selection(&self, selection: ProductSelection) -> Option<&Item> {
        self.inventory.get(selection)
    }

    /// The fixed ordering of selections on the machine face.
    pub fn selections(&self) -> &'static [ProductSelection] {
        &ProductSelection::ALL
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Handle a command and immediately apply the emitted events.
    ///
    /// The synchronous single-call surface for callers that do not persist
    /// events: each call completes at once with a definite result, and a
    /// failed command leaves the machine untouched.
    pub fn execute(&mut self, command: &MachineCommand) -> Result<Vec<MachineEvent>, VendError> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}

impl AggregateRoot for VendingMachine {
    type Id = MachineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateMachine (stock and install).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMachine {
    pub machine_id: MachineId,
    pub inventory: Inventory,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DepositFunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositFunds {
    pub machine_id: MachineId,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: VendItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendItem {
    pub machine_id: MachineId,
    pub selection: ProductSelection,
    pub quantity: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineCommand {
    CreateMachine(CreateMachine),
    DepositFunds(DepositFunds),
    VendItem(VendItem),
}

/// Event: MachineCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineCreated {
    pub machine_id: MachineId,
    pub inventory: Inventory,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsDeposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsDeposited {
    pub machine_id: MachineId,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemVended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemVended {
    pub machine_id: MachineId,
    pub selection: ProductSelection,
    pub quantity: Decimal,
    /// `price × quantity` at decision time; the amount debited on apply.
    pub total_price: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineEvent {
    MachineCreated(MachineCreated),
    FundsDeposited(FundsDeposited),
    ItemVended(ItemVended),
}

impl DomainEvent for MachineEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MachineEvent::MachineCreated(_) => "vending.machine.created",
            MachineEvent::FundsDeposited(_) => "vending.machine.funds_deposited",
            MachineEvent::ItemVended(_) => "vending.machine.item_vended",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MachineEvent::MachineCreated(e) => e.occurred_at,
            MachineEvent::FundsDeposited(e) => e.occurred_at,
            MachineEvent::ItemVended(e) => e.occurred_at,
        }
    }
}

impl Aggregate for VendingMachine {
    type Command = MachineCommand;
    type Event = MachineEvent;
    type Error = VendError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            MachineEvent::MachineCreated(e) => {
                self.id = e.machine_id;
                self.inventory = e.inventory.clone();
                self.amount_deposited = Decimal::ZERO;
                self.created = true;
            }
            MachineEvent::FundsDeposited(e) => {
                self.amount_deposited += e.amount;
            }
            MachineEvent::ItemVended(e) => {
                if let Some(item) = self.inventory.get_mut(e.selection) {
                    item.quantity -= e.quantity;
                }
                self.amount_deposited -= e.total_price;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            MachineCommand::CreateMachine(cmd) => self.handle_create(cmd),
            MachineCommand::DepositFunds(cmd) => self.handle_deposit(cmd),
            MachineCommand::VendItem(cmd) => self.handle_vend(cmd),
        }
    }
}

impl VendingMachine {
    fn ensure_machine_id(&self, machine_id: MachineId) -> Result<(), VendError> {
        if self.id != machine_id {
            return Err(VendError::MachineMismatch);
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateMachine) -> Result<Vec<MachineEvent>, VendError> {
        if self.created {
            return Err(VendError::AlreadyExists);
        }

        Ok(vec![MachineEvent::MachineCreated(MachineCreated {
            machine_id: cmd.machine_id,
            inventory: cmd.inventory.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &DepositFunds) -> Result<Vec<MachineEvent>, VendError> {
        if !self.created {
            return Err(VendError::NotFound);
        }
        self.ensure_machine_id(cmd.machine_id)?;

        if cmd.amount < Decimal::ZERO {
            return Err(VendError::NegativeDeposit);
        }

        Ok(vec![MachineEvent::FundsDeposited(FundsDeposited {
            machine_id: cmd.machine_id,
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_vend(&self, cmd: &VendItem) -> Result<Vec<MachineEvent>, VendError> {
        if !self.created {
            return Err(VendError::NotFound);
        }
        self.ensure_machine_id(cmd.machine_id)?;

        if cmd.quantity <= Decimal::ZERO {
            return Err(VendError::InvalidQuantity);
        }

        let item = self
            .inventory
            .get(cmd.selection)
            .ok_or(VendError::InvalidSelection(cmd.selection))?;

        // Stock must cover the whole request; a partial vend would drive
        // quantity negative.
        if item.quantity < cmd.quantity {
            return Err(VendError::OutOfStock(cmd.selection));
        }

        let total_price = item.price() * cmd.quantity;
        if self.amount_deposited < total_price {
            return Err(VendError::InsufficientFunds {
                required: total_price - self.amount_deposited,
            });
        }

        tracing::debug!(
            selection = %cmd.selection,
            quantity = %cmd.quantity,
            %total_price,
            "vend accepted"
        );

        Ok(vec![MachineEvent::ItemVended(ItemVended {
            machine_id: cmd.machine_id,
            selection: cmd.selection,
            quantity: cmd.quantity,
            total_price,
            occurred_at: cmd.occurred_at,
        })])
    }
}
