//! Authoring-time validation of rate breaks and rate cards.
//!
//! These checks run when charges are authored, edited or loaded from
//! configuration. The evaluator never calls them.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChargeSpec, RateBasis, RateBreak, RateCard, ThermalModifier, WeightSource};

/// A field-level validation failure, as surfaced to an authoring UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path of the offending field, e.g. `charges[1].breaks[0].max_value`.
    pub field: String,
    /// Stable error code, e.g. `OVERLAPPING_BREAKS`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue for `field` from an engine error.
    pub fn new(field: impl Into<String>, error: &EngineError) -> Self {
        Self {
            field: field.into(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Validates the structure of a tier table.
///
/// - Any break with `max_value < min_value` fails with `InvalidBreakBounds`.
/// - For [`WeightSource::Actual`] with two or more breaks, the table is sorted
///   by `min_value` and each break's upper bound (unbounded counts as +inf) must
///   stay strictly below the next break's `min_value`; touching ranges fail
///   with `OverlappingBreaks`.
/// - For [`WeightSource::TruckCapacity`] overlapping ranges are allowed.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::validate_breaks;
/// use rate_card_engine::models::{RateBreak, WeightSource};
/// use rust_decimal::Decimal;
///
/// let breaks = vec![
///     RateBreak::new(Decimal::from(0), Some(Decimal::from(10)), Decimal::from(50)),
///     RateBreak::new(Decimal::from(5), None, Decimal::from(40)),
/// ];
///
/// assert!(validate_breaks(&breaks, WeightSource::Actual).is_err());
/// assert!(validate_breaks(&breaks, WeightSource::TruckCapacity).is_ok());
/// ```
pub fn validate_breaks(breaks: &[RateBreak], weight_source: WeightSource) -> EngineResult<()> {
    for b in breaks {
        if let Some(max) = b.max_value.filter(|max| *max < b.min_value) {
            return Err(EngineError::InvalidBreakBounds {
                min: b.min_value,
                max,
            });
        }
    }

    if weight_source == WeightSource::TruckCapacity || breaks.len() < 2 {
        return Ok(());
    }

    let mut sorted: Vec<&RateBreak> = breaks.iter().collect();
    sorted.sort_by(|a, b| a.min_value.cmp(&b.min_value));

    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let overlaps = match current.max_value {
            Some(max) => max >= next.min_value,
            None => true,
        };
        if overlaps {
            return Err(EngineError::OverlappingBreaks {
                upper: current.upper_label(),
                next_min: next.min_value,
            });
        }
    }

    Ok(())
}

fn check_non_negative(issues: &mut Vec<ValidationIssue>, field: String, value: Decimal) {
    if value < Decimal::ZERO {
        let error = EngineError::NegativeValue {
            field: field.clone(),
            value,
        };
        issues.push(ValidationIssue::new(field, &error));
    }
}

/// Validates a rate card's charges in their authoring shape.
///
/// Returns every issue found, in charge order, so an editor can flag each
/// field. An empty result means the charges are valid.
///
/// Checks: non-negative values and bounds, tiers present on per-weight
/// charges, tier table structure (see [`validate_breaks`]; tiers on
/// non-per-weight charges are checked as actual-weight tables), and unique
/// priorities.
pub fn validate_charges(charges: &[ChargeSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_priorities = HashSet::new();

    for (index, charge) in charges.iter().enumerate() {
        let path = format!("charges[{}]", index);

        check_non_negative(&mut issues, format!("{}.value", path), charge.value);

        if !seen_priorities.insert(charge.priority) {
            let error = EngineError::DuplicatePriority {
                priority: charge.priority,
            };
            issues.push(ValidationIssue::new(format!("{}.priority", path), &error));
        }

        let breaks = charge.breaks.as_deref().unwrap_or_default();

        if charge.rate_basis == RateBasis::PerWeight && breaks.is_empty() {
            let error = EngineError::MissingBreaks {
                priority: charge.priority,
            };
            issues.push(ValidationIssue::new(format!("{}.breaks", path), &error));
            continue;
        }

        for (break_index, b) in breaks.iter().enumerate() {
            let break_path = format!("{}.breaks[{}]", path, break_index);
            check_non_negative(&mut issues, format!("{}.min_value", break_path), b.min_value);
            if let Some(max) = b.max_value {
                check_non_negative(&mut issues, format!("{}.max_value", break_path), max);
            }
            check_non_negative(&mut issues, format!("{}.rate_value", break_path), b.rate_value);
        }

        let weight_source = match charge.rate_basis {
            RateBasis::PerWeight => charge.weight_source.unwrap_or_default(),
            _ => WeightSource::Actual,
        };
        if let Err(error) = validate_breaks(breaks, weight_source) {
            issues.push(ValidationIssue::new(format!("{}.breaks", path), &error));
        }
    }

    issues
}

/// Checks that at most one modifier exists per thermal profile.
pub fn validate_thermal_modifiers(modifiers: &[ThermalModifier]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for modifier in modifiers {
        if !seen.insert(modifier.thermal_profile.as_str()) {
            return Err(EngineError::DuplicateThermalModifier {
                thermal_profile: modifier.thermal_profile.clone(),
            });
        }
    }
    Ok(())
}

/// Validates a constructed rate card, returning the first error found.
///
/// Applies [`validate_charges`] to the card's charges and
/// [`validate_thermal_modifiers`] to its modifiers.
pub fn validate_rate_card(card: &RateCard) -> EngineResult<()> {
    let specs: Vec<ChargeSpec> = card.charges.iter().cloned().map(ChargeSpec::from).collect();

    if let Some(issue) = validate_charges(&specs).into_iter().next() {
        return Err(EngineError::InvalidRateCard {
            id: card.id.clone(),
            message: format!("{}: {}", issue.field, issue.message),
        });
    }

    validate_thermal_modifiers(&card.thermal_modifiers).map_err(|e| {
        EngineError::InvalidRateCard {
            id: card.id.clone(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargeDefinition, ChargeType, ModifierType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(min: &str, max: Option<&str>, rate: &str) -> RateBreak {
        RateBreak::new(dec(min), max.map(dec), dec(rate))
    }

    fn spec(rate_basis: RateBasis, priority: i32, breaks: Option<Vec<RateBreak>>) -> ChargeSpec {
        ChargeSpec {
            charge_type: ChargeType::Freight,
            rate_basis,
            value: dec("10"),
            label: None,
            priority,
            is_active: true,
            apply_before_pct: false,
            weight_source: None,
            breaks,
        }
    }

    #[test]
    fn test_disjoint_actual_breaks_are_valid() {
        let breaks = vec![tier("0", Some("9.99"), "50"), tier("10", None, "40")];
        assert!(validate_breaks(&breaks, WeightSource::Actual).is_ok());
    }

    #[test]
    fn test_touching_actual_breaks_are_rejected() {
        let breaks = vec![tier("0", Some("10"), "50"), tier("10", None, "40")];
        match validate_breaks(&breaks, WeightSource::Actual) {
            Err(EngineError::OverlappingBreaks { upper, next_min }) => {
                assert_eq!(upper, "10");
                assert_eq!(next_min, dec("10"));
            }
            other => panic!("Expected OverlappingBreaks, got {:?}", other),
        }
    }

    #[test]
    fn test_unbounded_break_followed_by_another_is_rejected() {
        let breaks = vec![tier("50", Some("60"), "30"), tier("0", None, "50")];
        match validate_breaks(&breaks, WeightSource::Actual) {
            Err(EngineError::OverlappingBreaks { .. }) => {}
            other => panic!("Expected OverlappingBreaks, got {:?}", other),
        }

        // Sorted by min the unbounded break comes last and the table is valid
        let breaks = vec![
            tier("50", None, "30"),
            tier("0", Some("20"), "50"),
            tier("20.01", Some("49"), "45"),
        ];
        assert!(validate_breaks(&breaks, WeightSource::Actual).is_ok());
    }

    #[test]
    fn test_unsorted_actual_breaks_are_checked_after_sorting() {
        let breaks = vec![tier("10", Some("20"), "40"), tier("0", Some("15"), "50")];
        assert!(matches!(
            validate_breaks(&breaks, WeightSource::Actual),
            Err(EngineError::OverlappingBreaks { .. })
        ));
    }

    #[test]
    fn test_truck_capacity_allows_overlap() {
        let breaks = vec![tier("20", None, "300"), tier("28", None, "380")];
        assert!(validate_breaks(&breaks, WeightSource::TruckCapacity).is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected_for_every_source() {
        let breaks = vec![tier("20", Some("5"), "300")];
        for source in [WeightSource::Actual, WeightSource::TruckCapacity] {
            match validate_breaks(&breaks, source) {
                Err(EngineError::InvalidBreakBounds { min, max }) => {
                    assert_eq!(min, dec("20"));
                    assert_eq!(max, dec("5"));
                }
                other => panic!("Expected InvalidBreakBounds, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_single_break_is_valid() {
        let breaks = vec![tier("0", None, "40")];
        assert!(validate_breaks(&breaks, WeightSource::Actual).is_ok());
    }

    #[test]
    fn test_validate_charges_reports_missing_breaks() {
        let issues = validate_charges(&[spec(RateBasis::PerWeight, 0, None)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "charges[0].breaks");
        assert_eq!(issues[0].code, "MISSING_BREAKS");
    }

    #[test]
    fn test_validate_charges_reports_duplicate_priority() {
        let issues = validate_charges(&[
            spec(RateBasis::Flat, 1, None),
            spec(RateBasis::PerDistance, 2, None),
            spec(RateBasis::Percentage, 1, None),
        ]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "charges[2].priority");
        assert_eq!(issues[0].code, "DUPLICATE_PRIORITY");
    }

    #[test]
    fn test_validate_charges_reports_negative_values() {
        let mut charge = spec(
            RateBasis::PerWeight,
            0,
            Some(vec![tier("0", None, "-4")]),
        );
        charge.value = dec("-1");

        let issues = validate_charges(&[charge]);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["charges[0].value", "charges[0].breaks[0].rate_value"]
        );
        assert!(issues.iter().all(|i| i.code == "NEGATIVE_VALUE"));
    }

    #[test]
    fn test_validate_charges_uses_weight_source_policy() {
        let overlapping = vec![tier("20", None, "300"), tier("28", None, "380")];

        let mut capacity = spec(RateBasis::PerWeight, 0, Some(overlapping.clone()));
        capacity.weight_source = Some(WeightSource::TruckCapacity);
        assert!(validate_charges(&[capacity]).is_empty());

        let actual = spec(RateBasis::PerWeight, 0, Some(overlapping.clone()));
        let issues = validate_charges(&[actual]);
        assert_eq!(issues[0].code, "OVERLAPPING_BREAKS");

        // Non per-weight tiers are always range tables
        let mut distance = spec(RateBasis::PerDistance, 0, Some(overlapping));
        distance.weight_source = Some(WeightSource::TruckCapacity);
        assert_eq!(validate_charges(&[distance])[0].code, "OVERLAPPING_BREAKS");
    }

    #[test]
    fn test_valid_charges_have_no_issues() {
        let issues = validate_charges(&[
            spec(RateBasis::Flat, 0, None),
            spec(RateBasis::PerWeight, 1, Some(vec![tier("0", Some("9.99"), "50"), tier("10", None, "40")])),
            spec(RateBasis::Percentage, 2, None),
        ]);
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_duplicate_thermal_modifier_rejected() {
        let modifiers = vec![
            ThermalModifier::new("frozen", ModifierType::Multiplier, dec("1.1")),
            ThermalModifier::new("frozen", ModifierType::FixedAdd, dec("50")),
        ];
        match validate_thermal_modifiers(&modifiers) {
            Err(EngineError::DuplicateThermalModifier { thermal_profile }) => {
                assert_eq!(thermal_profile, "frozen");
            }
            other => panic!("Expected DuplicateThermalModifier, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rate_card_wraps_first_issue() {
        let card = RateCard {
            id: "rc_bad".to_string(),
            name: String::new(),
            lane: "SYD-MEL".to_string(),
            carrier: "coldline".to_string(),
            thermal_profile: None,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to: None,
            charges: vec![
                ChargeDefinition::try_from(spec(RateBasis::Flat, 0, None)).unwrap(),
                ChargeDefinition::try_from(spec(RateBasis::Flat, 0, None)).unwrap(),
            ],
            thermal_modifiers: vec![],
        };

        match validate_rate_card(&card) {
            Err(EngineError::InvalidRateCard { id, message }) => {
                assert_eq!(id, "rc_bad");
                assert_eq!(message, "charges[1].priority: Duplicate charge priority: 0");
            }
            other => panic!("Expected InvalidRateCard, got {:?}", other),
        }
    }
}
