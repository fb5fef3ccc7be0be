mod basket;
mod catalog;
mod looks;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::basket::{CartCommands, WishlistCommands};
use crate::catalog::ProductCommands;
use crate::looks::LookCommands;

#[derive(Debug, Parser)]
#[command(name = "roomset")]
#[command(about = "Browse designer room looks and manage a local cart and wishlist")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Designer room looks
    Looks {
        #[command(subcommand)]
        command: LookCommands,
    },
    /// Catalog products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// The local cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// The local wishlist
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("roomset: run with --help to list commands");
        return Ok(());
    };

    let config = roomset_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, data_dir = %config.data_dir.display(), "config loaded");

    match command {
        Commands::Looks { command } => looks::run(&config, command).await,
        Commands::Products { command } => catalog::run(&config, command).await,
        Commands::Cart { command } => basket::run_cart(&config, command),
        Commands::Wishlist { command } => basket::run_wishlist(&config, command),
    }
}

fn build_client(config: &roomset_core::AppConfig) -> anyhow::Result<roomset_client::StorefrontClient> {
    roomset_client::StorefrontClient::from_config(config)
        .with_context(|| format!("invalid API base URL {}", config.api_base_url))
}
