//! Charge line evaluation.
//!
//! This module computes the amount of a single charge for a scenario, given
//! the running percentage base accumulated by earlier charges.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AuditStep, ChargeDefinition, LineItem, RateBasis, Scenario};

use super::break_resolver::resolve_break;

/// The result of evaluating one charge, including the line item and audit step.
#[derive(Debug, Clone)]
pub struct ChargeLineResult {
    /// The computed line item.
    pub line_item: LineItem,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Returns the scenario dimension a rate basis is applied to.
///
/// Flat charges use a dimension of one; percentage charges use the running
/// percentage base.
pub fn dimension_value(rate_basis: RateBasis, scenario: &Scenario, running_pct_base: Decimal) -> Decimal {
    match rate_basis {
        RateBasis::Flat => Decimal::ONE,
        RateBasis::PerWeight => scenario.weight,
        RateBasis::PerDistance => scenario.distance,
        RateBasis::Percentage => running_pct_base,
    }
}

/// Evaluates a single charge against a scenario.
///
/// This function:
/// 1. Computes the dimension value from the rate basis
/// 2. Resolves the effective rate from the charge's breaks (using the charge's
///    match policy and the dimension as the lookup value), falling back to the
///    flat `value` when there are no breaks or none matches
/// 3. Computes the amount: `base × rate / 100` for percentage charges, the rate
///    itself for flat charges, `rate × dimension` otherwise
///
/// Evaluation never fails. Breaks are not validated here.
///
/// # Arguments
///
/// * `charge` - The charge to evaluate
/// * `scenario` - The order scenario
/// * `running_pct_base` - The sum of earlier amounts that feed percentage charges
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::evaluate_charge;
/// use rate_card_engine::models::{ChargeDefinition, ChargeRule, ChargeType, Scenario};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let charge = ChargeDefinition::new(
///     ChargeType::Distance,
///     Decimal::from_str("5.5").unwrap(),
///     0,
///     ChargeRule::PerDistance { breaks: None },
/// );
/// let scenario = Scenario::new(Decimal::ZERO, Decimal::from_str("380.5").unwrap());
///
/// let result = evaluate_charge(&charge, &scenario, Decimal::ZERO, 1);
/// assert_eq!(result.line_item.amount, Decimal::from_str("2092.75").unwrap());
/// ```
pub fn evaluate_charge(
    charge: &ChargeDefinition,
    scenario: &Scenario,
    running_pct_base: Decimal,
    step_number: u32,
) -> ChargeLineResult {
    let rate_basis = charge.rate_basis();
    let policy = charge.rule.match_policy();
    let dimension = dimension_value(rate_basis, scenario, running_pct_base);

    let matched = charge
        .breaks()
        .and_then(|breaks| resolve_break(breaks, dimension, policy));

    if matched.is_none() && charge.breaks().is_some() {
        debug!(
            priority = charge.priority,
            lookup_value = %dimension,
            ?policy,
            "No rate break matched, using flat value"
        );
    }

    let effective_rate = matched.map_or(charge.value, |b| b.rate_value);

    let amount = match rate_basis {
        RateBasis::Percentage => running_pct_base
            .saturating_mul(effective_rate)
            .checked_div(Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO),
        RateBasis::Flat => effective_rate,
        RateBasis::PerWeight | RateBasis::PerDistance => effective_rate.saturating_mul(dimension),
    };

    let matched_break = matched.map(|b| b.describe());

    let reasoning = match rate_basis {
        RateBasis::Percentage => format!(
            "{}% of ${} = ${}",
            effective_rate.normalize(),
            running_pct_base.normalize(),
            amount.normalize()
        ),
        RateBasis::Flat => format!("Flat charge of ${}", amount.normalize()),
        RateBasis::PerWeight | RateBasis::PerDistance => format!(
            "{} × ${} = ${}",
            dimension.normalize(),
            effective_rate.normalize(),
            amount.normalize()
        ),
    };
    let reasoning = match &matched_break {
        Some(bounds) => format!("{} (break {})", reasoning, bounds),
        None if charge.breaks().is_some() => format!("{} (no break matched, flat value used)", reasoning),
        None => reasoning,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "charge_evaluation".to_string(),
        rule_name: charge
            .label
            .clone()
            .unwrap_or_else(|| format!("{:?} charge", charge.charge_type)),
        input: serde_json::json!({
            "priority": charge.priority,
            "rate_basis": rate_basis,
            "match_policy": policy,
            "value": charge.value.normalize().to_string(),
            "dimension_value": dimension.normalize().to_string(),
            "running_pct_base": running_pct_base.normalize().to_string(),
            "break_count": charge.breaks().map_or(0, |b| b.len())
        }),
        output: serde_json::json!({
            "effective_rate": effective_rate.normalize().to_string(),
            "matched_break": matched_break,
            "amount": amount.normalize().to_string(),
            "feeds_percentage_base": charge.feeds_percentage_base()
        }),
        reasoning,
    };

    let line_item = LineItem {
        charge_type: charge.charge_type,
        rate_basis,
        label: charge.label.clone(),
        priority: charge.priority,
        dimension_value: dimension,
        effective_rate,
        amount,
        matched_break,
        feeds_percentage_base: charge.feeds_percentage_base(),
    };

    ChargeLineResult {
        line_item,
        audit_step,
    }
}
