//! Evaluation result models for the Rate Card Engine.
//!
//! This module contains the [`LineItem`] and [`RateCardEvaluation`] produced by
//! the evaluator, and the [`Quote`] envelope that adds thermal adjustment, an
//! identifier and a complete audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::charge::{ChargeType, RateBasis};
use super::scenario::Scenario;
use super::thermal::ModifierType;

/// The computed amount of one charge.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{ChargeType, LineItem, RateBasis};
/// use rust_decimal::Decimal;
///
/// let line = LineItem {
///     charge_type: ChargeType::Freight,
///     rate_basis: RateBasis::PerWeight,
///     label: Some("Freight".to_string()),
///     priority: 1,
///     dimension_value: Decimal::from(12),
///     effective_rate: Decimal::from(40),
///     amount: Decimal::from(480),
///     matched_break: Some("10-+".to_string()),
///     feeds_percentage_base: false,
/// };
/// assert_eq!(line.amount, line.effective_rate * line.dimension_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The charge's categorical tag.
    pub charge_type: ChargeType,
    /// The charge's rate basis.
    pub rate_basis: RateBasis,
    /// The charge's display label.
    #[serde(default)]
    pub label: Option<String>,
    /// The charge's priority.
    pub priority: i32,
    /// The scenario dimension the rate was applied to.
    pub dimension_value: Decimal,
    /// The rate used (tier rate or flat value).
    pub effective_rate: Decimal,
    /// The computed amount.
    pub amount: Decimal,
    /// Bounds of the matched tier, for display only.
    #[serde(default)]
    pub matched_break: Option<String>,
    /// Whether this amount was folded into the percentage base.
    pub feeds_percentage_base: bool,
}

/// A single step in the audit trace recording an evaluation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A degraded-path notice raised during evaluation.
///
/// Warnings never stop an evaluation; they explain why a fallback was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of evaluation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

/// The output of evaluating an ordered charge list against a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCardEvaluation {
    /// One line per active charge, in evaluation order.
    pub line_items: Vec<LineItem>,
    /// Sum of all line item amounts.
    pub subtotal: Decimal,
    /// One audit step per evaluated charge.
    pub audit_steps: Vec<AuditStep>,
}

/// The share of a hybrid subtotal allocated to one compartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentPortion {
    /// The compartment's thermal profile.
    pub thermal_profile: String,
    /// The compartment's weight.
    pub weight: Decimal,
    /// The unadjusted share of the subtotal.
    pub portion: Decimal,
    /// The share after the compartment's modifier.
    pub adjusted: Decimal,
    /// The type of modifier applied, if one was found.
    #[serde(default)]
    pub modifier_type: Option<ModifierType>,
}

/// Which thermal adjustment path produced a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentMode {
    /// Single modifier over the whole subtotal.
    Standard,
    /// Subtotal split across compartments.
    Hybrid,
}

/// How the subtotal was turned into a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermalBreakdown {
    /// The adjustment path taken.
    pub mode: AdjustmentMode,
    /// The profile whose modifier was applied (standard mode only).
    #[serde(default)]
    pub thermal_profile: Option<String>,
    /// The type of modifier applied (standard mode only).
    #[serde(default)]
    pub modifier_type: Option<ModifierType>,
    /// Per-compartment allocation (hybrid mode only).
    #[serde(default)]
    pub portions: Vec<CompartmentPortion>,
}

/// The complete result of pricing a scenario against a rate card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the quote.
    pub engine_version: String,
    /// The configured rate card used, if any.
    #[serde(default)]
    pub rate_card_id: Option<String>,
    /// The scenario priced.
    pub scenario: Scenario,
    /// Line items in evaluation order.
    pub line_items: Vec<LineItem>,
    /// Sum of line items before thermal adjustment.
    pub subtotal: Decimal,
    /// The thermal adjustment applied.
    pub thermal: ThermalBreakdown,
    /// The final amount after thermal adjustment.
    pub total: Decimal,
    /// Complete audit trace.
    pub audit_trace: AuditTrace,
}
