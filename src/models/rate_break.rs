//! Rate break (tier) model and related types.
//!
//! This module defines the [`RateBreak`] tier row, the non-empty
//! [`RateBreaks`] table owned by per-weight charges, and the
//! [`MatchPolicy`] used to pick a tier for a lookup value.

use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a lookup value is matched against a tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First tier where `min <= value < max` (max unbounded when absent).
    Range,
    /// Tier with the greatest `min` that is `<= value`. Ranges may overlap.
    ClosestLower,
}

/// One tier of a tiered rate table.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::RateBreak;
/// use rust_decimal::Decimal;
///
/// let open_ended = RateBreak::new(Decimal::from(28), None, Decimal::from(380));
/// assert_eq!(open_ended.describe(), "28-+");
///
/// let exact = RateBreak::new(Decimal::from(10), Some(Decimal::from(10)), Decimal::from(300));
/// assert!(exact.is_exact());
/// assert_eq!(exact.describe(), "10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreak {
    /// Inclusive lower bound.
    pub min_value: Decimal,
    /// Upper bound, or `None` when the tier is unbounded above.
    #[serde(default)]
    pub max_value: Option<Decimal>,
    /// The rate applied when this tier matches.
    pub rate_value: Decimal,
}

impl RateBreak {
    /// Creates a new rate break.
    pub fn new(min_value: Decimal, max_value: Option<Decimal>, rate_value: Decimal) -> Self {
        Self {
            min_value,
            max_value,
            rate_value,
        }
    }

    /// Returns true when the tier denotes an exact point (`max == min`).
    pub fn is_exact(&self) -> bool {
        self.max_value == Some(self.min_value)
    }

    /// Returns true if `value` falls in `[min, max)`, or `[min, +inf)` when unbounded.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min_value && self.max_value.is_none_or(|max| value < max)
    }

    /// Describes the tier bounds for display, e.g. `"0-10"`, `"28-+"`, or `"10"`.
    pub fn describe(&self) -> String {
        if self.is_exact() {
            return self.min_value.normalize().to_string();
        }
        format!("{}-{}", self.min_value.normalize(), self.upper_label())
    }

    /// The upper bound as display text, `+` when unbounded.
    pub(crate) fn upper_label(&self) -> String {
        match self.max_value {
            Some(max) => max.normalize().to_string(),
            None => "+".to_string(),
        }
    }
}

/// A non-empty, ordered table of rate breaks.
///
/// Per-weight charges own one of these, so a per-weight charge without tiers
/// cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateBreaks(Vec<RateBreak>);

impl RateBreaks {
    /// Wraps `breaks`, returning `None` if the list is empty.
    pub fn new(breaks: Vec<RateBreak>) -> Option<Self> {
        if breaks.is_empty() {
            None
        } else {
            Some(Self(breaks))
        }
    }

    /// Consumes the table and returns the underlying tiers.
    pub fn into_vec(self) -> Vec<RateBreak> {
        self.0
    }
}

impl Deref for RateBreaks {
    type Target = [RateBreak];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
