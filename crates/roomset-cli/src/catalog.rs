//! `products` command handlers.

use clap::Subcommand;
use roomset_client::{CategoryListing, ProductSearch};
use roomset_core::{format_price, AppConfig, Product};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Show one product with its pricing and finishes
    Show { product_id: String },
    /// List a category page: all, new, bestsellers, or a room type
    Category {
        name: String,
        /// Narrow a room type to one subcategory
        #[arg(long)]
        subcategory: Option<String>,
    },
    /// Search products by category and subcategory
    Search {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
    },
}

/// Maps a category argument onto a listing. Reserved names win over room
/// types.
pub(crate) fn listing_for(name: &str, subcategory: Option<String>) -> CategoryListing {
    match name.trim().to_ascii_lowercase().as_str() {
        "all" => CategoryListing::All,
        "new" => CategoryListing::New,
        "bestsellers" => CategoryListing::Bestsellers,
        _ => CategoryListing::Room {
            room_type: name.trim().to_owned(),
            subcategory,
        },
    }
}

pub(crate) async fn run(config: &AppConfig, command: ProductCommands) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    match command {
        ProductCommands::Show { product_id } => {
            let Some(product) = client.product(&product_id).await? else {
                println!("product '{product_id}' not found");
                return Ok(());
            };
            print_product(&product);
        }
        ProductCommands::Category { name, subcategory } => {
            let products = client
                .category_products(&listing_for(&name, subcategory))
                .await?;
            print_products(&products);
        }
        ProductCommands::Search {
            category,
            subcategory,
        } => {
            let products = client
                .search_products(&ProductSearch {
                    category,
                    subcategory,
                })
                .await?;
            print_products(&products);
        }
    }
    Ok(())
}

fn print_product(product: &Product) {
    let discount = product.discount();
    println!("{} ({})", product.name, product.id);
    if let Some(designer) = product.designer.as_deref() {
        println!("designer: {designer}");
    }
    if discount.has_discount {
        println!(
            "price:    {} (was {}, -{}%)",
            format_price(product.unit_price()),
            format_price(discount.original_price),
            discount.discount_percent
        );
    } else {
        println!("price:    {}", format_price(product.unit_price()));
    }
    let finishes: Vec<String> = product
        .colors()
        .into_iter()
        .map(|c| format!("{} {}", c.name, c.hex))
        .collect();
    if !finishes.is_empty() {
        println!("finishes: {}", finishes.join(", "));
    }
    println!(
        "stock:    {}",
        if product.is_in_stock() {
            "in stock"
        } else {
            "out of stock"
        }
    );
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("no products found");
        return;
    }
    println!("{:<10}{:>12}  NAME", "ID", "PRICE");
    for product in products {
        println!(
            "{:<10}{:>12}  {}",
            product.id,
            format_price(product.unit_price()),
            product.name
        );
    }
}
