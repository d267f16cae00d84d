//! Catalyst cart CLI

use std::{io, process::ExitCode};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalyst::{
    catalog::{Catalog, CatalogError},
    config::CartConfig,
    products::ProductId,
    store::CartStore,
    summary::{OrderSummary, SummaryError},
    sync::Hydration,
};

/// Catalyst shopping cart
#[derive(Debug, Parser)]
#[command(name = "catalyst", about = "Catalyst shopping cart", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CartConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the cart and its order summary
    Show,

    /// Add one unit of a catalog product
    Add {
        /// Catalog product id
        id: u64,
    },

    /// Remove a product's line
    Remove {
        /// Catalog product id
        id: u64,
    },

    /// Set a line's quantity; zero or less removes it
    SetQuantity {
        /// Catalog product id
        id: u64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Add one to a line's quantity
    Increment {
        /// Catalog product id
        id: u64,
    },

    /// Take one from a line's quantity, removing the line at one
    Decrement {
        /// Catalog product id
        id: u64,
    },

    /// Empty the cart
    Clear,

    /// List the catalog
    Products,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no catalog configured; pass --catalog or set CATALYST_CATALOG")]
    MissingCatalog,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

fn load_catalog(config: &CartConfig) -> Result<Catalog, CliError> {
    let path = config.catalog.as_ref().ok_or(CliError::MissingCatalog)?;

    Ok(Catalog::load(path)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { config, command } = cli;

    let command = command.unwrap_or(Command::Show);

    if matches!(command, Command::Products) {
        load_catalog(&config)?.write_to(io::stdout().lock(), config.currency)?;

        return Ok(());
    }

    let mut store = CartStore::new();
    let (hydration, _subscription) = config.synchronizer().attach(&mut store);

    if let Hydration::Restored(lines) = hydration {
        info!(lines, key = %config.cart_key, "opened cart");
    }

    match command {
        Command::Show | Command::Products => {}
        Command::Add { id } => {
            let catalog = load_catalog(&config)?;

            store.add(catalog.product(ProductId::new(id))?);
        }
        Command::Remove { id } => store.remove(ProductId::new(id)),
        Command::SetQuantity { id, quantity } => store.set_quantity(ProductId::new(id), quantity),
        Command::Increment { id } => store.increment(ProductId::new(id)),
        Command::Decrement { id } => store.decrement(ProductId::new(id)),
        Command::Clear => store.clear(),
    }

    OrderSummary::new(store.cart(), config.tax_rate).write_to(
        io::stdout().lock(),
        store.cart(),
        config.currency,
    )?;

    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[expect(
                clippy::print_stderr,
                reason = "the error must reach the user even when logging is filtered out"
            )]
            {
                eprintln!("Error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}
