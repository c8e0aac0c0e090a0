//! Catalog CLI commands
//!
//! Products, tour groups and ticket availability are saved from JSON files,
//! since most of their fields come from the booking platform.

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::TourdeskResult;
use crate::models::{Product, TicketsAvailability, TourGroup};
use crate::services::CatalogService;
use crate::storage::{read_json_required, Storage};

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// Save a product from a JSON file (creates or replaces by id)
    Save { file: PathBuf },
    /// List products
    List,
}

/// Tour group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Save a tour group from a JSON file
    Save { file: PathBuf },
    /// List tour groups by date
    List,
}

/// Ticket availability subcommands
#[derive(Subcommand)]
pub enum TicketsCommands {
    /// Save ticket availability from a JSON file
    Save { file: PathBuf },
}

pub fn handle_product_command(storage: &Storage, cmd: ProductCommands) -> TourdeskResult<()> {
    let service = CatalogService::new(storage);

    match cmd {
        ProductCommands::Save { file } => {
            let product: Product = read_json_required(&file)?;
            let product = service.save_product(product)?;
            println!(
                "Saved product: {}",
                product.title.as_deref().unwrap_or("(untitled)")
            );
            println!("  Slug: {}", product.slug.as_deref().unwrap_or("-"));
            println!("  ID:   {}", product.id);
        }
        ProductCommands::List => {
            let products = service.list_products()?;
            if products.is_empty() {
                println!("No products found.");
            }
            for product in products {
                println!(
                    "  {:<12}  {:<32}  {}",
                    product.id.to_string(),
                    product.title.as_deref().unwrap_or("(untitled)"),
                    product.slug.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

pub fn handle_group_command(storage: &Storage, cmd: GroupCommands) -> TourdeskResult<()> {
    let service = CatalogService::new(storage);

    match cmd {
        GroupCommands::Save { file } => {
            let group: TourGroup = read_json_required(&file)?;
            let group = service.save_tour_group(group)?;
            println!("Saved tour group: {}", group.id);
            println!("  Product: {}", group.product);
        }
        GroupCommands::List => {
            let groups = service.list_tour_groups()?;
            if groups.is_empty() {
                println!("No tour groups found.");
            }
            for group in groups {
                println!(
                    "  {:<12}  {} {}  #{}  {} ({} bookings)",
                    group.id.to_string(),
                    group.date,
                    group.time,
                    group.index,
                    group.product,
                    group.bookings.len()
                );
            }
        }
    }

    Ok(())
}

pub fn handle_tickets_command(storage: &Storage, cmd: TicketsCommands) -> TourdeskResult<()> {
    let service = CatalogService::new(storage);

    match cmd {
        TicketsCommands::Save { file } => {
            let tickets: TicketsAvailability = read_json_required(&file)?;
            let tickets = service.save_tickets(tickets)?;
            println!("Saved ticket availability: {}", tickets.id);
            for slot in &tickets.slots {
                println!("  {:<12} {:>6}", slot.zone, slot.avail);
            }
        }
    }

    Ok(())
}
