//! Scenario model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The order dimensions a rate card is evaluated against.
///
/// For truck-capacity charges `weight` carries the vehicle's rated capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Weight (actual or rated capacity, depending on the charges priced).
    #[serde(default)]
    pub weight: Decimal,
    /// Distance travelled.
    #[serde(default)]
    pub distance: Decimal,
}

impl Scenario {
    /// Creates a new scenario.
    pub fn new(weight: Decimal, distance: Decimal) -> Self {
        Self { weight, distance }
    }
}
