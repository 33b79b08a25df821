//! Application settings loading from config.toml
//!
//! Checkout parameters (delivery fee, order-number prefix, one-time-code
//! lifetime and attempt limit) and the initial menu live in a TOML file.
//! Every checkout field has a default, so a config file that only lists menu
//! items is valid.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Checkout parameters
    #[serde(default)]
    pub checkout: CheckoutSettings,
    /// Menu items to seed on first run
    #[serde(default)]
    pub menu: Vec<MenuItemSeed>,
}

/// Checkout and verification parameters
#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutSettings {
    /// Fixed surcharge applied when the order type is DELIVERY
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,
    /// Prefix for human-readable order numbers
    #[serde(default = "default_order_number_prefix")]
    pub order_number_prefix: String,
    /// How long an issued one-time code stays valid, in minutes
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: i64,
    /// How many wrong guesses void a one-time code
    #[serde(default = "default_otp_max_attempts")]
    pub otp_max_attempts: i32,
}

/// Configuration for a single seeded menu item
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemSeed {
    /// Name of the item
    pub name: String,
    /// Menu description
    pub description: String,
    /// Price in euros
    pub price: f64,
    /// Category (e.g., "momos", "curries", "drinks")
    pub category: String,
    /// Whether the item is vegetarian
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Spice level 0-3
    #[serde(default)]
    pub spice_level: i32,
}

const fn default_delivery_fee() -> f64 {
    3.50
}

fn default_order_number_prefix() -> String {
    "EK".to_string()
}

const fn default_otp_ttl_minutes() -> i64 {
    5
}

const fn default_otp_max_attempts() -> i32 {
    3
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            delivery_fee: default_delivery_fee(),
            order_number_prefix: default_order_number_prefix(),
            otp_ttl_minutes: default_otp_ttl_minutes(),
            otp_max_attempts: default_otp_max_attempts(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}
