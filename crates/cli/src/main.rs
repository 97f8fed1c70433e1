//! Line-oriented front for the vending machine core.
//!
//! Loads the inventory resource, builds a machine, then drives deposits and
//! vends from stdin. Every domain error becomes user feedback; only startup
//! failures end the process, as an error return rather than an abort.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;

use vendo_catalog::ProductSelection;
use vendo_core::MachineId;
use vendo_inventory::{ConfigSource, Inventory, JsonFileSource};
use vendo_vending::{CreateMachine, DepositFunds, MachineCommand, MachineEvent, VendItem, VendingMachine};

const DEFAULT_RESOURCE: &str = "VendingInventory.json";

fn main() -> anyhow::Result<()> {
    vendo_observability::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_RESOURCE.to_string());

    let raw = JsonFileSource::new(&path)
        .read()
        .with_context(|| format!("reading inventory resource {path}"))?;
    let inventory = Inventory::from_raw(&raw).context("decoding inventory resource")?;
    tracing::info!(%path, items = inventory.len(), "inventory loaded");

    let machine_id = MachineId::new();
    let mut machine = VendingMachine::empty(machine_id);
    machine.execute(&MachineCommand::CreateMachine(CreateMachine {
        machine_id,
        inventory,
        occurred_at: Utc::now(),
    }))?;

    // Opening float so the first purchase works without a deposit.
    machine.execute(&MachineCommand::DepositFunds(DepositFunds {
        machine_id,
        amount: Decimal::new(1000, 2),
        occurred_at: Utc::now(),
    }))?;

    println!("vendo — type `help` for commands");
    print_menu(&machine);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "menu" => print_menu(&machine),
            "balance" => println!("balance: ${}", machine.amount_deposited()),
            "item" => match parse_selection(parts.next()) {
                Ok(selection) => match machine.item_for_selection(selection) {
                    Some(item) => {
                        println!("{selection}: ${} each, {} in stock", item.price(), item.quantity)
                    }
                    None => println!("{selection} is not stocked"),
                },
                Err(feedback) => println!("{feedback}"),
            },
            "deposit" => match parse_amount(parts.next()) {
                Ok(amount) => {
                    let deposit = MachineCommand::DepositFunds(DepositFunds {
                        machine_id,
                        amount,
                        occurred_at: Utc::now(),
                    });
                    match machine.execute(&deposit) {
                        Ok(_) => println!("balance: ${}", machine.amount_deposited()),
                        Err(err) => println!("{err}"),
                    }
                }
                Err(feedback) => println!("{feedback}"),
            },
            "vend" => match (parse_selection(parts.next()), parse_amount(parts.next())) {
                (Ok(selection), Ok(quantity)) => {
                    let vend = MachineCommand::VendItem(VendItem {
                        machine_id,
                        selection,
                        quantity,
                        occurred_at: Utc::now(),
                    });
                    match machine.execute(&vend) {
                        Ok(events) => {
                            if let Some(MachineEvent::ItemVended(vended)) = events.first() {
                                println!(
                                    "dispensing {} × {} for ${}",
                                    vended.quantity, vended.selection, vended.total_price
                                );
                            }
                            println!("balance: ${}", machine.amount_deposited());
                        }
                        Err(err) => println!("{err}"),
                    }
                }
                (Err(feedback), _) | (_, Err(feedback)) => println!("{feedback}"),
            },
            other => println!("unknown command: {other} (try `help`)"),
        }
    }

    Ok(())
}

fn parse_selection(arg: Option<&str>) -> Result<ProductSelection, String> {
    let name = arg.ok_or("expected a selection name (try `menu`)")?;
    name.parse::<ProductSelection>().map_err(|err| err.to_string())
}

fn parse_amount(arg: Option<&str>) -> Result<Decimal, String> {
    let raw = arg.ok_or("expected an amount")?;
    raw.parse::<Decimal>()
        .map_err(|_| format!("not a number: {raw}"))
}

fn print_help() {
    println!("commands:");
    println!("  menu                  show selections and stock");
    println!("  item <selection>      show price and stock for one selection");
    println!("  balance               show the deposited balance");
    println!("  deposit <amount>      add funds");
    println!("  vend <selection> <n>  buy n of a selection");
    println!("  quit                  leave");
}

fn print_menu(machine: &VendingMachine) {
    for selection in machine.selections() {
        match machine.item_for_selection(*selection) {
            Some(item) => {
                println!("  {selection:<12} ${:<6} {} in stock", item.price(), item.quantity)
            }
            None => println!("  {selection:<12} (not stocked)"),
        }
    }
}
