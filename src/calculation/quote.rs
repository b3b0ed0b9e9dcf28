//! Quote assembly.
//!
//! This module combines rate card evaluation and thermal adjustment into a
//! [`Quote`] with an identifier, timestamp and complete audit trace.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{AuditTrace, ChargeDefinition, Quote, RateCard, Scenario, ThermalMode, ThermalModifier};

use super::rate_card_evaluator::evaluate_rate_card_from_step;
use super::thermal_adjustment::apply_thermal;

/// The version of this engine, recorded on every quote.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The charges and modifiers a quote is priced from.
#[derive(Debug, Clone, Copy)]
pub struct PricingSource<'a> {
    /// The configured rate card identifier, if pricing a stored card.
    pub rate_card_id: Option<&'a str>,
    /// The charges to evaluate.
    pub charges: &'a [ChargeDefinition],
    /// Thermal modifiers available to the adjustment step.
    pub thermal_modifiers: &'a [ThermalModifier],
    /// The profile used when a standard selection names none.
    pub default_thermal_profile: Option<&'a str>,
}

impl<'a> From<&'a RateCard> for PricingSource<'a> {
    fn from(card: &'a RateCard) -> Self {
        Self {
            rate_card_id: Some(&card.id),
            charges: &card.charges,
            thermal_modifiers: &card.thermal_modifiers,
            default_thermal_profile: card.thermal_profile.as_deref(),
        }
    }
}

/// Prices a scenario and wraps the result in a [`Quote`].
///
/// The line items, subtotal and total are a pure function of the inputs; only
/// the quote identifier, timestamp and measured duration vary between calls.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::{PricingSource, calculate_quote};
/// use rate_card_engine::models::{
///     ChargeDefinition, ChargeRule, ChargeType, ModifierType, Scenario, ThermalMode, ThermalModifier,
/// };
/// use rust_decimal::Decimal;
///
/// let charges = vec![ChargeDefinition::new(
///     ChargeType::Base,
///     Decimal::from(1000),
///     0,
///     ChargeRule::Flat { breaks: None },
/// )];
/// let modifiers = vec![ThermalModifier::new("chilled", ModifierType::FixedAdd, Decimal::from(50))];
/// let source = PricingSource {
///     rate_card_id: None,
///     charges: &charges,
///     thermal_modifiers: &modifiers,
///     default_thermal_profile: Some("chilled"),
/// };
///
/// let quote = calculate_quote(source, Scenario::default(), &ThermalMode::default());
/// assert_eq!(quote.subtotal, Decimal::from(1000));
/// assert_eq!(quote.total, Decimal::from(1050));
/// ```
pub fn calculate_quote(source: PricingSource<'_>, scenario: Scenario, thermal: &ThermalMode) -> Quote {
    let start_time = Instant::now();

    let evaluation = evaluate_rate_card_from_step(source.charges, &scenario, 1);
    let next_step = evaluation.audit_steps.len() as u32 + 1;

    let adjustment = apply_thermal(
        evaluation.subtotal,
        thermal,
        source.thermal_modifiers,
        source.default_thermal_profile,
        next_step,
    );

    let mut steps = evaluation.audit_steps;
    steps.push(adjustment.audit_step);

    Quote {
        quote_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        rate_card_id: source.rate_card_id.map(str::to_string),
        scenario,
        line_items: evaluation.line_items,
        subtotal: evaluation.subtotal,
        thermal: adjustment.breakdown,
        total: adjustment.total,
        audit_trace: AuditTrace {
            steps,
            warnings: adjustment.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
