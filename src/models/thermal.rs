//! Thermal profile modifiers and hybrid compartments.
//!
//! This module defines the [`ThermalModifier`] applied to a rate card's
//! subtotal, the [`Compartment`] used when a hybrid order is split across
//! temperature zones, and the caller-selected [`ThermalMode`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a thermal modifier adjusts an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    /// `amount × value`.
    Multiplier,
    /// `amount + value`.
    FixedAdd,
}

/// An adjustment to a rate card's subtotal, keyed by thermal profile.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{ModifierType, ThermalModifier};
/// use rust_decimal::Decimal;
///
/// let frozen = ThermalModifier::new("frozen", ModifierType::Multiplier, Decimal::new(11, 1));
/// assert_eq!(frozen.apply(Decimal::from(400)), Decimal::from(440));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermalModifier {
    /// The thermal profile this modifier applies to.
    pub thermal_profile: String,
    /// Multiplicative or additive.
    pub modifier_type: ModifierType,
    /// The multiplier or the amount added.
    pub value: Decimal,
}

impl ThermalModifier {
    /// Creates a new thermal modifier.
    pub fn new(thermal_profile: impl Into<String>, modifier_type: ModifierType, value: Decimal) -> Self {
        Self {
            thermal_profile: thermal_profile.into(),
            modifier_type,
            value,
        }
    }

    /// Applies this modifier to `amount`. Saturates instead of overflowing.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self.modifier_type {
            ModifierType::Multiplier => amount.saturating_mul(self.value),
            ModifierType::FixedAdd => amount.saturating_add(self.value),
        }
    }
}

/// One temperature compartment of a hybrid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compartment {
    /// The compartment's thermal profile.
    pub thermal_profile: String,
    /// The weight carried in this compartment.
    pub weight: Decimal,
}

impl Compartment {
    /// Creates a new compartment.
    pub fn new(thermal_profile: impl Into<String>, weight: Decimal) -> Self {
        Self {
            thermal_profile: thermal_profile.into(),
            weight,
        }
    }
}

/// The caller's choice of thermal adjustment for an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ThermalMode {
    /// At most one modifier is applied to the whole subtotal.
    Standard {
        /// The selected profile; falls back to the rate card's own profile.
        #[serde(default)]
        thermal_profile: Option<String>,
    },
    /// The subtotal is split across compartments by weight.
    Hybrid {
        /// The compartments carried.
        compartments: Vec<Compartment>,
    },
}

impl Default for ThermalMode {
    fn default() -> Self {
        ThermalMode::Standard {
            thermal_profile: None,
        }
    }
}
