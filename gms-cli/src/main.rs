use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use gms_core::{InputScanner, Item};

use crate::cli::{Cli, Commands};
use crate::display::{format_item, format_summary, supports_color, table_header, table_rule};
use crate::error::{CliError, Result};
use crate::storage::RecordStorage;

mod cli;
mod config;
mod display;
mod error;
mod logging;
mod storage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let cfg: config::Config = confy::load("gms", None)?;
    let storage = RecordStorage::new(cfg.inventory_path());
    debug!(path = %storage.path().display(), "using inventory file");

    match cli.command {
        Commands::List {
            detailed,
            sort,
            json,
            no_color,
        } => {
            let inventory = storage.load()?;
            let items = inventory.sorted(sort.into());

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No products found.");
            } else {
                let use_color = !no_color && supports_color();

                if detailed {
                    for item in &items {
                        println!("{}\n", format_item(item, true));
                    }
                } else {
                    println!("{}", table_header());
                    println!("{}", table_rule());
                    for item in &items {
                        println!("{}", format_item(item, false));
                    }
                    println!();
                }

                let below_needed = items
                    .iter()
                    .filter(|item| item.quantity() < item.quantity_needed())
                    .count();
                println!(
                    "{}",
                    format_summary(items.len(), below_needed, inventory.total_value(), use_color)
                );
            }
        }

        Commands::Show { sku } => {
            let inventory = storage.load()?;
            let item = inventory.get(&sku)?;
            println!("{}", format_item(item, true));
        }

        Commands::Add { perishable } => {
            let mut inventory = storage.load()?;
            let mut item = if perishable {
                Item::create_perishable()
            } else {
                Item::create_product()
            };

            let stdin = io::stdin();
            let mut input = InputScanner::new(stdin.lock());
            let mut stdout = io::stdout();
            item.read(&mut input, &mut stdout)?;
            println!();

            if let Some(err) = input.take_io_error() {
                return Err(CliError::io("Failed to read product", err));
            }
            if !item.is_clear() {
                return Err(CliError::validation(
                    "input",
                    item.product().error_state().message(),
                ));
            }

            let sku = item.sku().to_string();
            inventory.insert(item)?;
            storage.save(&inventory)?;
            println!("Product added: {}", sku);
        }

        Commands::Restock { sku, units } => {
            let mut inventory = storage.load()?;
            let item = inventory.get_mut(&sku)?;
            let on_hand = item.add_units(units);
            if !item.is_clear() {
                return Err(CliError::validation(
                    "units",
                    item.product().error_state().message(),
                ));
            }
            println!("Restocked {}: {} on hand", sku, on_hand);
            storage.save(&inventory)?;
        }

        Commands::Count { sku, quantity } => {
            let mut inventory = storage.load()?;
            inventory.get_mut(&sku)?.set_quantity(quantity);
            println!("Counted {}: {} on hand", sku, quantity);
            storage.save(&inventory)?;
        }

        Commands::Remove { sku } => {
            let mut inventory = storage.load()?;
            let removed = inventory.remove(&sku)?;
            println!("Removed: {} {}", removed.sku(), removed.name().unwrap_or(""));
            storage.save(&inventory)?;
        }

        Commands::Recover { force } => {
            if !storage.backup_exists() {
                return Err(CliError::storage("No backup file found"));
            }

            if !force && !confirm("Restore inventory from backup? Current records will be replaced.")? {
                println!("Cancelled.");
                return Ok(());
            }

            let recovered = storage.recover()?;
            storage.save(&recovered)?;
            println!("Recovered {} products from backup.", recovered.len());
        }
    }

    Ok(())
}

/// Ask user for confirmation
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}
