//! Request and response bodies for the pricing simulator API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ValidationIssue;
use crate::error::{EngineError, EngineResult};
use crate::models::{ChargeDefinition, ChargeSpec, Scenario, ThermalMode, ThermalModifier};

/// Request body for the `/simulate` endpoint.
///
/// Either `rate_card_id` (a configured card) or `charges` (inline, as being
/// edited) must be provided, not both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// A configured rate card to price against.
    #[serde(default)]
    pub rate_card_id: Option<String>,
    /// Inline charges to price against.
    #[serde(default)]
    pub charges: Option<Vec<ChargeSpec>>,
    /// Thermal modifiers for inline charges.
    #[serde(default)]
    pub thermal_modifiers: Vec<ThermalModifier>,
    /// Default thermal profile for inline charges.
    #[serde(default)]
    pub thermal_profile: Option<String>,
    /// The scenario to price.
    pub scenario: Scenario,
    /// When set, a configured card must be effective on this date.
    #[serde(default)]
    pub on_date: Option<NaiveDate>,
    /// Thermal adjustment selection; standard with no profile by default.
    #[serde(default)]
    pub thermal: ThermalMode,
}

impl SimulationRequest {
    /// Converts the inline charges into charge definitions.
    ///
    /// Fails with `InvalidRequest` when there are no inline charges, or with
    /// `MissingBreaks` when a per-weight charge has no breaks.
    pub fn inline_charges(&self) -> EngineResult<Vec<ChargeDefinition>> {
        let specs = self.charges.as_ref().ok_or_else(|| EngineError::InvalidRequest {
            message: "either rate_card_id or charges is required".to_string(),
        })?;

        specs.iter().cloned().map(ChargeDefinition::try_from).collect()
    }
}

/// Request body for the `/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The charges being authored.
    pub charges: Vec<ChargeSpec>,
    /// The thermal modifiers being authored.
    #[serde(default)]
    pub thermal_modifiers: Vec<ThermalModifier>,
}

/// Response body for the `/validate` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// True when no issues were found.
    pub valid: bool,
    /// Every field-level issue found.
    pub issues: Vec<ValidationIssue>,
}

impl From<Vec<ValidationIssue>> for ValidationResponse {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateBasis;

    #[test]
    fn test_simulation_request_defaults() {
        let json = r#"{
            "charges": [
                {"charge_type": "base", "rate_basis": "flat", "value": "100", "priority": 0}
            ],
            "scenario": {"weight": "12", "distance": "380.5"}
        }"#;

        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert!(request.rate_card_id.is_none());
        assert!(request.thermal_modifiers.is_empty());
        assert_eq!(request.thermal, ThermalMode::default());

        let charges = request.inline_charges().unwrap();
        assert_eq!(charges[0].rate_basis(), RateBasis::Flat);
    }

    #[test]
    fn test_inline_charges_required_without_rate_card() {
        let json = r#"{"scenario": {"weight": "1", "distance": "1"}}"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(
            request.inline_charges(),
            Err(EngineError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_inline_per_weight_without_breaks_is_rejected() {
        let json = r#"{
            "charges": [
                {"charge_type": "freight", "rate_basis": "per_weight", "value": "40", "priority": 3}
            ],
            "scenario": {"weight": "12", "distance": "0"}
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(
            request.inline_charges(),
            Err(EngineError::MissingBreaks { priority: 3 })
        ));
    }

    #[test]
    fn test_validation_response_from_issues() {
        let response = ValidationResponse::from(vec![]);
        assert!(response.valid);

        let error = EngineError::DuplicatePriority { priority: 1 };
        let response = ValidationResponse::from(vec![ValidationIssue::new("charges[1].priority", &error)]);
        assert!(!response.valid);
        assert_eq!(response.issues[0].code, "DUPLICATE_PRIORITY");
    }
}
