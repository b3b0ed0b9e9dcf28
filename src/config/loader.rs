//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate cards
//! from YAML files.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculation::validate_rate_card;
use crate::error::{EngineError, EngineResult};
use crate::models::RateCard;

use super::types::RateCardCatalog;

/// Loads and provides access to configured rate cards.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── rate_cards/
///     ├── syd_mel_coldline.yaml   # one rate card per file
///     └── bne_syd_polar.yaml
/// ```
///
/// Every rate card is validated when loaded; a card that fails authoring
/// validation rejects the whole configuration.
///
/// # Example
///
/// ```no_run
/// use rate_card_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let card = loader.find_rate_card("SYD-MEL", "coldline", date).unwrap();
/// println!("Rate card: {}", card.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: RateCardCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The `rate_cards` directory is missing or contains no YAML files
    /// - Any file contains invalid YAML or an unconstructible charge
    /// - Any rate card fails validation, or two cards share an id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rate_cards_dir = path.as_ref().join("rate_cards");
        let rate_cards = Self::load_rate_cards(&rate_cards_dir)?;

        let loader = Self::from_rate_cards(rate_cards)?;
        info!(
            path = %rate_cards_dir.display(),
            rate_cards = loader.rate_cards().len(),
            "Loaded rate card configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from rate cards constructed in memory, validating each.
    pub fn from_rate_cards(rate_cards: Vec<RateCard>) -> EngineResult<Self> {
        let mut ids = HashSet::new();
        for card in &rate_cards {
            validate_rate_card(card)?;
            if !ids.insert(card.id.as_str()) {
                return Err(EngineError::InvalidRateCard {
                    id: card.id.clone(),
                    message: "duplicate rate card id".to_string(),
                });
            }
        }

        Ok(Self {
            catalog: RateCardCatalog::new(rate_cards),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate card files from the rate cards directory, in file name order.
    fn load_rate_cards(rate_cards_dir: &Path) -> EngineResult<Vec<RateCard>> {
        let dir_str = rate_cards_dir.display().to_string();

        let entries = fs::read_dir(rate_cards_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate card files found)", dir_str),
            });
        }

        paths.iter().map(|p| Self::load_yaml::<RateCard>(p)).collect()
    }

    /// Returns the underlying rate card catalog.
    pub fn catalog(&self) -> &RateCardCatalog {
        &self.catalog
    }

    /// Returns all configured rate cards.
    pub fn rate_cards(&self) -> &[RateCard] {
        self.catalog.rate_cards()
    }

    /// Gets a rate card by its identifier.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rate_card_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// let card = loader.get_rate_card("syd_mel_coldline_2025")?;
    /// println!("Charges: {}", card.charges.len());
    /// # Ok::<(), rate_card_engine::error::EngineError>(())
    /// ```
    pub fn get_rate_card(&self, id: &str) -> EngineResult<&RateCard> {
        self.catalog
            .get(id)
            .ok_or_else(|| EngineError::RateCardNotFound { id: id.to_string() })
    }

    /// Gets a rate card by identifier, requiring it to be effective on `date`.
    pub fn get_effective_rate_card(&self, id: &str, date: NaiveDate) -> EngineResult<&RateCard> {
        let card = self.get_rate_card(id)?;
        if !card.is_effective_on(date) {
            return Err(EngineError::RateCardNotEffective {
                id: id.to_string(),
                date,
            });
        }
        Ok(card)
    }

    /// Finds the most recent rate card for a lane and carrier effective on `date`.
    pub fn find_rate_card(&self, lane: &str, carrier: &str, date: NaiveDate) -> EngineResult<&RateCard> {
        self.catalog
            .find(lane, carrier, date)
            .ok_or_else(|| EngineError::RateCardNotFound {
                id: format!("{}/{} on {}", lane, carrier, date),
            })
    }
}
