//! Configuration types for rate card pricing.

use chrono::NaiveDate;

use crate::models::RateCard;

/// The set of configured rate cards.
///
/// Cards are kept sorted by `valid_from`, newest first, so that lookups by
/// lane and carrier return the most recent card effective on a date.
#[derive(Debug, Clone, Default)]
pub struct RateCardCatalog {
    rate_cards: Vec<RateCard>,
}

impl RateCardCatalog {
    /// Creates a catalog from loaded rate cards.
    pub fn new(rate_cards: Vec<RateCard>) -> Self {
        let mut sorted = rate_cards;
        sorted.sort_by(|a, b| b.valid_from.cmp(&a.valid_from).then_with(|| a.id.cmp(&b.id)));
        Self { rate_cards: sorted }
    }

    /// Returns all rate cards.
    pub fn rate_cards(&self) -> &[RateCard] {
        &self.rate_cards
    }

    /// Returns the rate card with the given identifier.
    pub fn get(&self, id: &str) -> Option<&RateCard> {
        self.rate_cards.iter().find(|c| c.id == id)
    }

    /// Returns the most recent card for the lane and carrier effective on `date`.
    pub fn find(&self, lane: &str, carrier: &str, date: NaiveDate) -> Option<&RateCard> {
        self.rate_cards
            .iter()
            .find(|c| c.lane == lane && c.carrier == carrier && c.is_effective_on(date))
    }
}
