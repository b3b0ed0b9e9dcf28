//! Rate card evaluation.
//!
//! This module evaluates an ordered charge list against a scenario. The only
//! state carried between charges is the running percentage base, threaded
//! through an explicit fold and discarded when the call returns.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ChargeDefinition, LineItem, RateCardEvaluation, Scenario};

use super::charge_line::evaluate_charge;

struct EvaluationState {
    running_pct_base: Decimal,
    line_items: Vec<LineItem>,
    audit_steps: Vec<AuditStep>,
    next_step: u32,
}

/// Evaluates a list of charges against a scenario.
///
/// Inactive charges are skipped. The remaining charges are evaluated in
/// ascending priority order (stable for equal priorities). After each
/// non-percentage charge with `apply_before_pct` set, its amount is added to
/// the running percentage base seen by later charges. Percentage charges never
/// feed the base.
///
/// The subtotal is the sum of every line item amount. The function is pure:
/// identical inputs produce identical outputs.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::evaluate_rate_card;
/// use rate_card_engine::models::{ChargeDefinition, ChargeRule, ChargeType, Scenario};
/// use rust_decimal::Decimal;
///
/// let charges = vec![
///     ChargeDefinition::new(ChargeType::Fuel, Decimal::from(10), 1, ChargeRule::Percentage { breaks: None }),
///     ChargeDefinition::new(ChargeType::Base, Decimal::from(1000), 0, ChargeRule::Flat { breaks: None })
///         .with_apply_before_pct(true),
/// ];
///
/// let evaluation = evaluate_rate_card(&charges, &Scenario::default());
/// let amounts: Vec<Decimal> = evaluation.line_items.iter().map(|l| l.amount).collect();
/// assert_eq!(amounts, vec![Decimal::from(1000), Decimal::from(100)]);
/// assert_eq!(evaluation.subtotal, Decimal::from(1100));
/// ```
pub fn evaluate_rate_card(charges: &[ChargeDefinition], scenario: &Scenario) -> RateCardEvaluation {
    evaluate_rate_card_from_step(charges, scenario, 1)
}

/// Evaluates charges like [`evaluate_rate_card`], numbering audit steps from
/// `start_step_number`.
pub fn evaluate_rate_card_from_step(
    charges: &[ChargeDefinition],
    scenario: &Scenario,
    start_step_number: u32,
) -> RateCardEvaluation {
    let mut active: Vec<&ChargeDefinition> = charges.iter().filter(|c| c.is_active).collect();
    active.sort_by_key(|c| c.priority);

    let initial = EvaluationState {
        running_pct_base: Decimal::ZERO,
        line_items: Vec::with_capacity(active.len()),
        audit_steps: Vec::with_capacity(active.len()),
        next_step: start_step_number,
    };

    let state = active.into_iter().fold(initial, |mut state, charge| {
        let result = evaluate_charge(charge, scenario, state.running_pct_base, state.next_step);

        if charge.feeds_percentage_base() {
            state.running_pct_base = state
                .running_pct_base
                .saturating_add(result.line_item.amount);
        }

        state.line_items.push(result.line_item);
        state.audit_steps.push(result.audit_step);
        state.next_step += 1;
        state
    });

    let subtotal = state
        .line_items
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.amount));

    RateCardEvaluation {
        line_items: state.line_items,
        subtotal,
        audit_steps: state.audit_steps,
    }
}
