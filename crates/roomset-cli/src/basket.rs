//! `cart` and `wishlist` command handlers. Both work offline against the
//! files under the configured data directory.

use anyhow::Context;
use clap::Subcommand;
use roomset_core::{format_price, AppConfig, LineItem};
use roomset_store::{CartStore, FileStorage, LineStore, PersistedRecord, WishlistStore};
use uuid::Uuid;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Print every cart line and the subtotal
    Show {
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove one line
    Remove { line_id: Uuid },
    /// Change a line's quantity; 0 removes it
    SetQty { line_id: Uuid, quantity: u32 },
    /// Remove every line
    Clear,
}

/// Sub-commands available under `wishlist`.
#[derive(Debug, Subcommand)]
pub enum WishlistCommands {
    /// Print every saved line
    Show {
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove one saved line
    Remove { line_id: Uuid },
}

pub(crate) fn open_cart(config: &AppConfig) -> anyhow::Result<CartStore> {
    let path = config.cart_path();
    CartStore::open(FileStorage::new(&path))
        .with_context(|| format!("failed to open cart at {}", path.display()))
}

pub(crate) fn open_wishlist(config: &AppConfig) -> anyhow::Result<WishlistStore> {
    let path = config.wishlist_path();
    WishlistStore::open(FileStorage::new(&path))
        .with_context(|| format!("failed to open wishlist at {}", path.display()))
}

pub(crate) fn run_cart(config: &AppConfig, command: CartCommands) -> anyhow::Result<()> {
    let mut cart = open_cart(config)?;
    match command {
        CartCommands::Show { json } => {
            if json {
                return print_json(cart.items(), cart.item_count());
            }
            if cart.items().is_empty() {
                println!("cart is empty");
                return Ok(());
            }
            print_lines(cart.items());
            println!(
                "{} items, subtotal {}",
                cart.item_count(),
                format_price(cart.subtotal())
            );
        }
        CartCommands::Remove { line_id } => report(cart.remove(line_id)?, line_id, "removed"),
        CartCommands::SetQty { line_id, quantity } => {
            report(cart.update_quantity(line_id, quantity)?, line_id, "updated");
        }
        CartCommands::Clear => {
            cart.clear()?;
            println!("cart cleared");
        }
    }
    Ok(())
}

pub(crate) fn run_wishlist(config: &AppConfig, command: WishlistCommands) -> anyhow::Result<()> {
    let mut wishlist = open_wishlist(config)?;
    match command {
        WishlistCommands::Show { json } => {
            if json {
                return print_json(wishlist.items(), wishlist.item_count());
            }
            if wishlist.items().is_empty() {
                println!("wishlist is empty");
                return Ok(());
            }
            print_lines(wishlist.items());
            println!("{} saved", wishlist.item_count());
        }
        WishlistCommands::Remove { line_id } => {
            report(wishlist.remove(line_id)?, line_id, "removed");
        }
    }
    Ok(())
}

fn report(found: bool, line_id: Uuid, verb: &str) {
    if found {
        println!("{verb} {line_id}");
    } else {
        println!("no line {line_id}");
    }
}

fn print_json(items: &[LineItem], item_count: u32) -> anyhow::Result<()> {
    let record = PersistedRecord {
        items: items.to_vec(),
        item_count,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn line_key(line: &LineItem) -> String {
    let key = line.kind.foreign_key();
    match line.kind.product_id() {
        Some(product_id) if product_id != key => {
            format!("{} {key}/{product_id}", line.kind.line_type())
        }
        _ => format!("{} {key}", line.kind.line_type()),
    }
}

fn print_lines(lines: &[LineItem]) {
    println!(
        "{:<38}{:<22}{:<5}{:>12}  {:<12}NAME",
        "LINE", "TYPE", "QTY", "PRICE", "ADDED"
    );
    for line in lines {
        let color = line
            .selected_color
            .as_ref()
            .map(|c| format!(" ({})", c.name))
            .unwrap_or_default();
        println!(
            "{:<38}{:<22}{:<5}{:>12}  {:<12}{}{}",
            line.id.to_string(),
            line_key(line),
            line.quantity,
            format_price(line.price),
            line.added_at.format("%Y-%m-%d").to_string(),
            line.name,
            color
        );
    }
}
