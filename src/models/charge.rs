//! Charge definition model and related types.
//!
//! A [`ChargeDefinition`] is one pricing rule within a rate card. Its rate
//! basis, weight source and tier table are carried together by the closed
//! [`ChargeRule`] enum. [`ChargeSpec`] is the flat authoring shape used in
//! configuration files and API payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::rate_break::{MatchPolicy, RateBreak, RateBreaks};

/// Categorical tag of a charge. Informational only, never affects arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
    /// Base fee for the movement.
    Base,
    /// Freight charge.
    Freight,
    /// Distance-related charge.
    Distance,
    /// Fuel surcharge.
    Fuel,
    /// Hybrid (multi-temperature) surcharge.
    Hybrid,
}

/// The scenario dimension a charge's rate is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// A fixed amount; the dimension is ignored.
    Flat,
    /// Rate per unit of weight.
    PerWeight,
    /// Rate per unit of distance.
    PerDistance,
    /// Percentage of the running percentage base.
    Percentage,
}

/// Which weight a per-weight charge prices against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// The transported weight; tiers are matched by range.
    #[default]
    Actual,
    /// The vehicle's rated capacity; tiers are matched closest-lower.
    TruckCapacity,
}

impl WeightSource {
    /// Returns the tier matching policy for this weight source.
    pub fn policy(self) -> MatchPolicy {
        match self {
            WeightSource::Actual => MatchPolicy::Range,
            WeightSource::TruckCapacity => MatchPolicy::ClosestLower,
        }
    }
}

/// The rate basis of a charge together with the data that basis requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeRule {
    /// A fixed amount, optionally tiered.
    Flat {
        /// Optional tier table.
        breaks: Option<RateBreaks>,
    },
    /// Rate × scenario weight; tiers are mandatory.
    PerWeight {
        /// Governs which tier matching policy applies.
        weight_source: WeightSource,
        /// The tier table.
        breaks: RateBreaks,
    },
    /// Rate × scenario distance, optionally tiered.
    PerDistance {
        /// Optional tier table.
        breaks: Option<RateBreaks>,
    },
    /// Percentage of the running percentage base, optionally tiered.
    Percentage {
        /// Optional tier table.
        breaks: Option<RateBreaks>,
    },
}

impl ChargeRule {
    /// Returns the rate basis of this rule.
    pub fn rate_basis(&self) -> RateBasis {
        match self {
            ChargeRule::Flat { .. } => RateBasis::Flat,
            ChargeRule::PerWeight { .. } => RateBasis::PerWeight,
            ChargeRule::PerDistance { .. } => RateBasis::PerDistance,
            ChargeRule::Percentage { .. } => RateBasis::Percentage,
        }
    }

    /// Returns the tier table, if any.
    pub fn breaks(&self) -> Option<&RateBreaks> {
        match self {
            ChargeRule::PerWeight { breaks, .. } => Some(breaks),
            ChargeRule::Flat { breaks }
            | ChargeRule::PerDistance { breaks }
            | ChargeRule::Percentage { breaks } => breaks.as_ref(),
        }
    }

    /// Returns the tier matching policy. Only per-weight charges can select
    /// closest-lower matching.
    pub fn match_policy(&self) -> MatchPolicy {
        match self {
            ChargeRule::PerWeight { weight_source, .. } => weight_source.policy(),
            _ => MatchPolicy::Range,
        }
    }

    /// Returns the weight source for per-weight rules.
    pub fn weight_source(&self) -> Option<WeightSource> {
        match self {
            ChargeRule::PerWeight { weight_source, .. } => Some(*weight_source),
            _ => None,
        }
    }
}

/// One pricing rule within a rate card.
///
/// Serializes to and from the flat [`ChargeSpec`] shape; deserializing a
/// per-weight charge without breaks fails.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{ChargeDefinition, ChargeRule, ChargeType, RateBasis};
/// use rust_decimal::Decimal;
///
/// let charge = ChargeDefinition::new(
///     ChargeType::Base,
///     Decimal::from(100),
///     0,
///     ChargeRule::Flat { breaks: None },
/// )
/// .with_label("Base fee");
///
/// assert_eq!(charge.rate_basis(), RateBasis::Flat);
/// assert!(charge.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChargeSpec", into = "ChargeSpec")]
pub struct ChargeDefinition {
    /// Categorical tag.
    pub charge_type: ChargeType,
    /// Optional display label.
    pub label: Option<String>,
    /// Evaluation order, ascending.
    pub priority: i32,
    /// Inactive charges are excluded from evaluation.
    pub is_active: bool,
    /// Fold this charge's amount into the percentage base for later charges.
    pub apply_before_pct: bool,
    /// Flat/default rate used when no tier matches.
    pub value: Decimal,
    /// Rate basis and tiers.
    pub rule: ChargeRule,
}

impl ChargeDefinition {
    /// Creates an active charge with no label that does not feed the percentage base.
    pub fn new(charge_type: ChargeType, value: Decimal, priority: i32, rule: ChargeRule) -> Self {
        Self {
            charge_type,
            label: None,
            priority,
            is_active: true,
            apply_before_pct: false,
            value,
            rule,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets whether the amount feeds the percentage base.
    pub fn with_apply_before_pct(mut self, apply_before_pct: bool) -> Self {
        self.apply_before_pct = apply_before_pct;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns the rate basis.
    pub fn rate_basis(&self) -> RateBasis {
        self.rule.rate_basis()
    }

    /// Returns the tier table, if any.
    pub fn breaks(&self) -> Option<&RateBreaks> {
        self.rule.breaks()
    }

    /// Returns true if this charge's amount feeds later percentage charges.
    pub fn feeds_percentage_base(&self) -> bool {
        self.apply_before_pct && self.rate_basis() != RateBasis::Percentage
    }
}

fn default_active() -> bool {
    true
}

/// The flat authoring shape of a charge, as stored and edited.
///
/// Unlike [`ChargeDefinition`], this type can represent invalid charges (a
/// per-weight charge with no breaks), which is what authoring validation
/// inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSpec {
    /// Categorical tag.
    pub charge_type: ChargeType,
    /// Which scenario dimension the rate applies to.
    pub rate_basis: RateBasis,
    /// Flat/default rate.
    pub value: Decimal,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Evaluation order.
    #[serde(alias = "sort_order")]
    pub priority: i32,
    /// Whether the charge is evaluated.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Whether the amount feeds the percentage base.
    #[serde(default)]
    pub apply_before_pct: bool,
    /// Weight source for per-weight charges (defaults to actual).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_source: Option<WeightSource>,
    /// Optional tier table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<Vec<RateBreak>>,
}

impl TryFrom<ChargeSpec> for ChargeDefinition {
    type Error = EngineError;

    fn try_from(spec: ChargeSpec) -> Result<Self, Self::Error> {
        let breaks = spec.breaks.and_then(RateBreaks::new);

        let rule = match spec.rate_basis {
            RateBasis::Flat => ChargeRule::Flat { breaks },
            RateBasis::PerDistance => ChargeRule::PerDistance { breaks },
            RateBasis::Percentage => ChargeRule::Percentage { breaks },
            RateBasis::PerWeight => ChargeRule::PerWeight {
                weight_source: spec.weight_source.unwrap_or_default(),
                breaks: breaks.ok_or(EngineError::MissingBreaks {
                    priority: spec.priority,
                })?,
            },
        };

        Ok(Self {
            charge_type: spec.charge_type,
            label: spec.label,
            priority: spec.priority,
            is_active: spec.is_active,
            apply_before_pct: spec.apply_before_pct,
            value: spec.value,
            rule,
        })
    }
}

impl From<ChargeDefinition> for ChargeSpec {
    fn from(charge: ChargeDefinition) -> Self {
        let rate_basis = charge.rate_basis();
        let weight_source = charge.rule.weight_source();
        let breaks = match charge.rule {
            ChargeRule::PerWeight { breaks, .. } => Some(breaks.into_vec()),
            ChargeRule::Flat { breaks }
            | ChargeRule::PerDistance { breaks }
            | ChargeRule::Percentage { breaks } => breaks.map(RateBreaks::into_vec),
        };

        Self {
            charge_type: charge.charge_type,
            rate_basis,
            value: charge.value,
            label: charge.label,
            priority: charge.priority,
            is_active: charge.is_active,
            apply_before_pct: charge.apply_before_pct,
            weight_source,
            breaks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn per_weight_spec(breaks: Option<Vec<RateBreak>>) -> ChargeSpec {
        ChargeSpec {
            charge_type: ChargeType::Freight,
            rate_basis: RateBasis::PerWeight,
            value: dec("45"),
            label: Some("Freight".to_string()),
            priority: 1,
            is_active: true,
            apply_before_pct: true,
            weight_source: Some(WeightSource::TruckCapacity),
            breaks,
        }
    }

    #[test]
    fn test_weight_source_selects_policy() {
        assert_eq!(WeightSource::Actual.policy(), MatchPolicy::Range);
        assert_eq!(WeightSource::TruckCapacity.policy(), MatchPolicy::ClosestLower);
    }

    #[test]
    fn test_per_weight_spec_without_breaks_is_rejected() {
        let result = ChargeDefinition::try_from(per_weight_spec(None));
        match result {
            Err(EngineError::MissingBreaks { priority }) => assert_eq!(priority, 1),
            other => panic!("Expected MissingBreaks, got {:?}", other),
        }
    }

    #[test]
    fn test_per_weight_spec_with_empty_breaks_is_rejected() {
        let result = ChargeDefinition::try_from(per_weight_spec(Some(vec![])));
        assert!(matches!(result, Err(EngineError::MissingBreaks { .. })));
    }

    #[test]
    fn test_per_weight_spec_converts_with_weight_source() {
        let spec = per_weight_spec(Some(vec![RateBreak::new(dec("20"), Some(dec("20")), dec("300"))]));
        let charge = ChargeDefinition::try_from(spec).unwrap();

        assert_eq!(charge.rate_basis(), RateBasis::PerWeight);
        assert_eq!(charge.rule.match_policy(), MatchPolicy::ClosestLower);
        assert_eq!(charge.breaks().map(|b| b.len()), Some(1));
        assert!(charge.feeds_percentage_base());
    }

    #[test]
    fn test_empty_breaks_on_flat_charge_become_none() {
        let spec = ChargeSpec {
            charge_type: ChargeType::Base,
            rate_basis: RateBasis::Flat,
            value: dec("100"),
            label: None,
            priority: 0,
            is_active: true,
            apply_before_pct: false,
            weight_source: Some(WeightSource::TruckCapacity),
            breaks: Some(vec![]),
        };
        let charge = ChargeDefinition::try_from(spec).unwrap();

        assert!(charge.breaks().is_none());
        assert_eq!(charge.rule.match_policy(), MatchPolicy::Range);
    }

    #[test]
    fn test_percentage_charge_never_feeds_base() {
        let charge = ChargeDefinition::new(
            ChargeType::Fuel,
            dec("10"),
            3,
            ChargeRule::Percentage { breaks: None },
        )
        .with_apply_before_pct(true);

        assert!(!charge.feeds_percentage_base());
    }

    #[test]
    fn test_charge_deserializes_from_flat_json() {
        let json = r#"{
            "charge_type": "distance",
            "rate_basis": "per_distance",
            "value": "5.5",
            "sort_order": 2
        }"#;

        let charge: ChargeDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(charge.priority, 2);
        assert_eq!(charge.rate_basis(), RateBasis::PerDistance);
        assert!(charge.is_active);
        assert!(!charge.apply_before_pct);
        assert_eq!(charge.value, dec("5.5"));
    }

    #[test]
    fn test_charge_deserialization_reports_missing_breaks() {
        let json = r#"{
            "charge_type": "freight",
            "rate_basis": "per_weight",
            "value": "40",
            "priority": 4
        }"#;

        let error = serde_json::from_str::<ChargeDefinition>(json).unwrap_err();
        assert!(error.to_string().contains("priority 4 requires at least one rate break"));
    }

    #[test]
    fn test_charge_serializes_to_flat_shape() {
        let breaks = RateBreaks::new(vec![RateBreak::new(dec("0"), None, dec("40"))]).unwrap();
        let charge = ChargeDefinition::new(
            ChargeType::Freight,
            dec("40"),
            1,
            ChargeRule::PerWeight {
                weight_source: WeightSource::Actual,
                breaks,
            },
        );

        let json = serde_json::to_string(&charge).unwrap();
        assert!(json.contains("\"rate_basis\":\"per_weight\""));
        assert!(json.contains("\"weight_source\":\"actual\""));
        assert!(json.contains("\"breaks\":["));
        assert!(!json.contains("\"label\""));
    }
}
