//! Rate card model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::charge::ChargeDefinition;
use super::thermal::ThermalModifier;

/// A time-bounded set of pricing rules for a lane/carrier combination.
///
/// The evaluator treats a rate card as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Unique identifier of the rate card.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// The lane this card prices (e.g. "SYD-MEL").
    pub lane: String,
    /// The carrier this card belongs to.
    pub carrier: String,
    /// The single thermal profile this card is authored for, if any.
    #[serde(default)]
    pub thermal_profile: Option<String>,
    /// First day the card is valid (inclusive).
    pub valid_from: NaiveDate,
    /// Last day the card is valid (inclusive), open-ended when absent.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// The pricing rules.
    pub charges: Vec<ChargeDefinition>,
    /// Thermal modifiers, at most one per profile.
    #[serde(default)]
    pub thermal_modifiers: Vec<ThermalModifier>,
}

impl RateCard {
    /// Returns true if `date` falls inside the validity window.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        date >= self.valid_from && self.valid_to.is_none_or(|to| date <= to)
    }

    /// Returns the thermal modifier for `thermal_profile`, if the card has one.
    pub fn modifier_for(&self, thermal_profile: &str) -> Option<&ThermalModifier> {
        self.thermal_modifiers
            .iter()
            .find(|m| m.thermal_profile == thermal_profile)
    }
}
