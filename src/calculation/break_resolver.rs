//! Rate break resolution.
//!
//! This module finds the tier of a rate table that applies to a lookup value.
//! Tables are assumed to have passed authoring validation; on a malformed
//! table the resolver still returns a defined answer (the first partial match,
//! or nothing).

use rust_decimal::Decimal;

use crate::models::{MatchPolicy, RateBreak};

/// Resolves the tier that applies to `lookup_value` under `policy`.
///
/// - [`MatchPolicy::Range`] returns the first tier, in table order, where
///   `min <= lookup_value` and `lookup_value < max` (or `max` is unbounded).
/// - [`MatchPolicy::ClosestLower`] returns the tier with the greatest `min`
///   such that `min <= lookup_value`, regardless of `max`.
///
/// Returns `None` when no tier matches; callers fall back to the charge's
/// flat value.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::resolve_break;
/// use rate_card_engine::models::{MatchPolicy, RateBreak};
/// use rust_decimal::Decimal;
///
/// let breaks = vec![
///     RateBreak::new(Decimal::from(20), Some(Decimal::from(20)), Decimal::from(300)),
///     RateBreak::new(Decimal::from(28), Some(Decimal::from(28)), Decimal::from(380)),
/// ];
///
/// let matched = resolve_break(&breaks, Decimal::from(30), MatchPolicy::ClosestLower).unwrap();
/// assert_eq!(matched.rate_value, Decimal::from(380));
///
/// assert!(resolve_break(&breaks, Decimal::from(30), MatchPolicy::Range).is_none());
/// ```
pub fn resolve_break(
    breaks: &[RateBreak],
    lookup_value: Decimal,
    policy: MatchPolicy,
) -> Option<&RateBreak> {
    match policy {
        MatchPolicy::Range => breaks.iter().find(|b| b.contains(lookup_value)),
        MatchPolicy::ClosestLower => breaks
            .iter()
            .filter(|b| lookup_value >= b.min_value)
            .max_by(|a, b| a.min_value.cmp(&b.min_value)),
    }
}
