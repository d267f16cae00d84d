//! Configuration
//!
//! Settings shared by every cart session, read from CLI flags with environment
//! variable fallbacks. A `.env` file in the working directory is loaded first.

use std::path::PathBuf;

use clap::Args;
use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{storage::FileStorage, sync::CartSynchronizer};

/// Configuration value errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Cart session configuration
#[derive(Debug, Clone, Args)]
pub struct CartConfig {
    /// Directory holding persisted cart slots
    #[arg(long, env = "CATALYST_STORAGE_DIR", default_value = ".catalyst")]
    pub storage_dir: PathBuf,

    /// Storage slot the cart is persisted under
    #[arg(long, env = "CATALYST_CART_KEY", default_value = crate::storage::DEFAULT_CART_KEY)]
    pub cart_key: String,

    /// Estimated tax rate, e.g. "10%" or "0.10"
    #[arg(long, env = "CATALYST_TAX_RATE", default_value = "10%", value_parser = parse_percentage)]
    pub tax_rate: Percentage,

    /// Currency prices are displayed in (USD, GBP, EUR)
    #[arg(long, env = "CATALYST_CURRENCY", default_value = "USD", value_parser = parse_currency)]
    pub currency: &'static Currency,

    /// Product catalog file (YAML fixture or JSON list response)
    #[arg(long, env = "CATALYST_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl CartConfig {
    /// File storage rooted at the configured directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }

    /// Synchronizer for the configured slot.
    pub fn synchronizer(&self) -> CartSynchronizer<FileStorage> {
        CartSynchronizer::new(self.storage(), &self.cart_key)
    }
}

/// Parse percentage string (e.g., "10%" or "0.10") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string is not a number, or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();
    let invalid = || ConfigError::InvalidPercentage(s.to_string());

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| invalid())?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?
    } else {
        trimmed.parse::<Decimal>().map_err(|_err| invalid())?
    };

    if fraction.is_sign_negative() {
        return Err(invalid());
    }

    Ok(Percentage::from(fraction))
}

/// Parse an ISO currency code into one of the supported currencies.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for anything but USD, GBP or EUR.
pub fn parse_currency(s: &str) -> Result<&'static Currency, ConfigError> {
    match s.trim().to_ascii_uppercase().as_str() {
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        _ => Err(ConfigError::UnknownCurrency(s.to_string())),
    }
}
