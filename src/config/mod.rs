//! Configuration loading and management for the Rate Card Engine.
//!
//! This module loads authored rate cards from YAML files, validates them and
//! serves lookups by identifier or by lane, carrier and date.
//!
//! # Example
//!
//! ```no_run
//! use rate_card_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded {} rate cards", config.rate_cards().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::RateCardCatalog;
