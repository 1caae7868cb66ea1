//! Tío Pelotte CLI - catalog seeding and order inspection.
//!
//! # Usage
//!
//! ```bash
//! # Push a starter catalog to the backend
//! pelotte-cli seed catalog -f seed/catalog.json
//!
//! # Show the most recent orders
//! pelotte-cli orders recent
//!
//! # Show only pending orders
//! pelotte-cli orders recent -e Pendiente
//! ```
//!
//! # Commands
//!
//! - `seed catalog` - Create products and ingredients from a JSON file
//! - `orders recent` - List recent orders from the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pelotte-cli")]
#[command(author, version, about = "Tío Pelotte CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the backend with catalog data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create products and ingredients from a JSON file
    Catalog {
        /// Path to the JSON seed file
        #[arg(short, long)]
        file: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List recent orders, newest first
    Recent {
        /// Filter by status (`Pendiente`, `En camino`, ...)
        #[arg(short, long)]
        estado: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed {
            target: SeedTarget::Catalog { file },
        } => commands::seed::catalog(&file).await,
        Commands::Orders {
            action: OrdersAction::Recent { estado },
        } => commands::orders::recent(estado.as_deref()).await,
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
