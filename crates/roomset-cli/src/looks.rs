//! `looks` command handlers.

use anyhow::Context;
use clap::Subcommand;
use roomset_client::{LookQuery, StorefrontClient};
use roomset_core::{format_price, AppConfig, DesignLook};
use roomset_looks::{
    add_complete_room_to_cart, toggle_all_in_wishlist, AddedLooks, EnsureOutcome, Framing,
    ImageCarousel, LookCache, LookState, MaterializeOutcome, ResolvedLook, WishlistToggle,
};
use roomset_store::LineStore;

use crate::basket::{open_cart, open_wishlist};

/// Sub-commands available under `looks`.
#[derive(Debug, Subcommand)]
pub enum LookCommands {
    /// List looks, optionally filtered
    List {
        #[command(flatten)]
        filter: LookFilterArgs,
    },
    /// Show the style, room type and designer facets
    Filters,
    /// Resolve one look and print its images, hotspots and shopping list
    Show {
        look_id: String,
    },
    /// Put every product of a look in the cart
    AddToCart {
        look_id: String,
        /// Attribute the lines to the look as a designer collection
        #[arg(long)]
        as_collection: bool,
    },
    /// Wishlist every product of a look, or unwishlist them if all are saved
    Wishlist {
        look_id: String,
    },
    /// Resolve every listed look concurrently and print their totals
    LoadAll {
        #[command(flatten)]
        filter: LookFilterArgs,
        /// Overrides ROOMSET_MAX_CONCURRENT_LOOKS
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct LookFilterArgs {
    #[arg(long)]
    pub style: Option<String>,
    #[arg(long)]
    pub room_type: Option<String>,
    #[arg(long)]
    pub designer: Option<String>,
}

impl From<LookFilterArgs> for LookQuery {
    fn from(args: LookFilterArgs) -> Self {
        LookQuery {
            style: args.style,
            room_type: args.room_type,
            designer_id: args.designer,
        }
    }
}

pub(crate) async fn run(config: &AppConfig, command: LookCommands) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    match command {
        LookCommands::List { filter } => run_looks_list(&client, filter.into()).await,
        LookCommands::Filters => run_looks_filters(&client).await,
        LookCommands::Show { look_id } => run_look_show(&client, &look_id).await,
        LookCommands::AddToCart {
            look_id,
            as_collection,
        } => {
            let framing = if as_collection {
                Framing::DesignerCollection
            } else {
                Framing::IndividualProducts
            };
            run_look_add_to_cart(config, &client, &look_id, framing).await
        }
        LookCommands::Wishlist { look_id } => run_look_wishlist(config, &client, &look_id).await,
        LookCommands::LoadAll {
            filter,
            concurrency,
        } => {
            let max = concurrency.unwrap_or(config.max_concurrent_looks);
            run_looks_load_all(&client, filter.into(), max).await
        }
    }
}

async fn run_looks_list(client: &StorefrontClient, query: LookQuery) -> anyhow::Result<()> {
    let looks = client.list_looks(&query).await?;
    if looks.is_empty() {
        println!("no looks match these filters");
        return Ok(());
    }

    println!("{:<10}{:<14}{:<16}TITLE", "ID", "STYLE", "ROOM");
    for look in &looks {
        println!(
            "{:<10}{:<14}{:<16}{}",
            look.id,
            look.style.as_deref().unwrap_or("-"),
            look.room_type.as_deref().unwrap_or("-"),
            look.title
        );
    }
    Ok(())
}

async fn run_looks_filters(client: &StorefrontClient) -> anyhow::Result<()> {
    let filters = client.look_filters().await?;
    println!("styles:     {}", filters.styles.join(", "));
    println!("room types: {}", filters.room_types.join(", "));
    println!("designers:");
    for designer in &filters.designers {
        println!("  {:<8}{}", designer.id, designer.name);
    }
    Ok(())
}

/// Fetches the listing entry for `look_id`; the resolution endpoints do not
/// return title or designer.
async fn find_look(client: &StorefrontClient, look_id: &str) -> anyhow::Result<DesignLook> {
    client
        .list_looks(&LookQuery::default())
        .await?
        .into_iter()
        .find(|look| look.id == look_id)
        .with_context(|| format!("look '{look_id}' not found"))
}

/// Loads one look through the cache. A failed look is logged and left
/// empty, so callers fall through to their zero state.
async fn load_one(client: &StorefrontClient, cache: &LookCache, look_id: &str) {
    if cache.ensure_loaded(client, look_id).await == EnsureOutcome::Failed {
        if let LookState::Failed(message) = cache.state(look_id) {
            tracing::warn!(look_id, error = %message, "look failed to load");
        }
    }
}

async fn run_look_show(client: &StorefrontClient, look_id: &str) -> anyhow::Result<()> {
    let cache = LookCache::new();
    load_one(client, &cache, look_id).await;
    for line in render_look(cache.resolved(look_id).as_deref()) {
        println!("{line}");
    }
    Ok(())
}

/// Images with their hotspots, then the shopping list and total. A look
/// that is not loaded renders as an empty list with a zero total.
pub(crate) fn render_look(look: Option<&ResolvedLook>) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(look) = look else {
        lines.push("no products".to_owned());
        lines.push(format!("total: {}", format_price(0.0)));
        return lines;
    };

    let carousel = ImageCarousel::new(look.images.clone());
    for (position, image) in carousel.images().iter().enumerate() {
        lines.push(format!(
            "image {}/{} {}  {}",
            position + 1,
            carousel.len(),
            image.label.as_deref().unwrap_or(""),
            image.image_url
        ));
        for spot in look.spots_for_image(&image.id) {
            let target = spot
                .product
                .as_ref()
                .map_or("(no product)", |product| product.name.as_str());
            lines.push(format!(
                "    spot {:<6} at {:>5.1}% {:>5.1}%  {}",
                spot.id, spot.x_percent, spot.y_percent, target
            ));
        }
    }

    let products = look.unique_products();
    if products.is_empty() {
        lines.push("no products".to_owned());
    } else {
        lines.push(String::new());
        lines.push(format!("{:<8}{:<5}{:>12}  NAME", "ID", "QTY", "PRICE"));
        for entry in &products {
            lines.push(format!(
                "{:<8}{:<5}{:>12}  {}",
                entry.product.id,
                entry.count,
                format_price(entry.product.unit_price()),
                entry.product.name
            ));
        }
    }
    lines.push(format!("total: {}", format_price(look.total_price())));
    lines
}

async fn run_look_add_to_cart(
    config: &AppConfig,
    client: &StorefrontClient,
    look_id: &str,
    framing: Framing,
) -> anyhow::Result<()> {
    let look = find_look(client, look_id).await?;
    let cache = LookCache::new();
    load_one(client, &cache, look_id).await;
    let products = cache.unique_products(look_id);

    let mut cart = open_cart(config)?;
    let mut added = AddedLooks::from_lines(cart.items());
    match add_complete_room_to_cart(&mut cart, &look, &products, framing, &mut added)? {
        MaterializeOutcome::Added { lines } => println!(
            "added {lines} products from '{}' to the cart (cart total {})",
            look.title,
            format_price(cart.subtotal())
        ),
        MaterializeOutcome::Nothing => println!("'{}' has no products to add", look.title),
        MaterializeOutcome::AlreadyAdded => println!("'{}' is already in the cart", look.title),
    }
    Ok(())
}

async fn run_look_wishlist(
    config: &AppConfig,
    client: &StorefrontClient,
    look_id: &str,
) -> anyhow::Result<()> {
    let look = find_look(client, look_id).await?;
    let cache = LookCache::new();
    load_one(client, &cache, look_id).await;
    let products = cache.unique_products(look_id);

    let mut wishlist = open_wishlist(config)?;
    match toggle_all_in_wishlist(&mut wishlist, &look, &products)? {
        WishlistToggle::Added(n) => println!("saved {n} products from '{}'", look.title),
        WishlistToggle::Removed(n) => println!("removed {n} products of '{}'", look.title),
        WishlistToggle::Nothing => println!("'{}' has no products to save", look.title),
    }
    Ok(())
}

async fn run_looks_load_all(
    client: &StorefrontClient,
    query: LookQuery,
    max_concurrent: usize,
) -> anyhow::Result<()> {
    let looks = client.list_looks(&query).await?;
    let ids: Vec<String> = looks.iter().map(|look| look.id.clone()).collect();

    let cache = LookCache::new();
    let summary = cache.load_all(client, &ids, max_concurrent).await;

    for look in &looks {
        let status = match cache.state(&look.id) {
            LookState::Loaded(_) => format_price(cache.total_price(&look.id)),
            LookState::Failed(_) => "failed".to_owned(),
            LookState::Unloaded | LookState::Loading => "-".to_owned(),
        };
        println!("{:<10}{:>12}  {}", look.id, status, look.title);
    }
    println!(
        "loaded {} looks, {} failed",
        summary.loaded, summary.failed
    );
    Ok(())
}
