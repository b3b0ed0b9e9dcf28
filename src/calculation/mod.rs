//! Calculation logic for the Rate Card Engine.
//!
//! This module contains the evaluation pipeline: break resolution, per-charge
//! evaluation, rate card evaluation with the running percentage base, thermal
//! adjustment and hybrid allocation, and quote assembly. It also contains the
//! authoring-time validation of rate breaks and rate cards, which the
//! evaluation functions never call.

mod break_resolver;
mod break_validator;
mod charge_line;
mod quote;
mod rate_card_evaluator;
mod thermal_adjustment;

pub use break_resolver::resolve_break;
pub use break_validator::{
    ValidationIssue, validate_breaks, validate_charges, validate_rate_card,
    validate_thermal_modifiers,
};
pub use charge_line::{ChargeLineResult, dimension_value, evaluate_charge};
pub use quote::{ENGINE_VERSION, PricingSource, calculate_quote};
pub use rate_card_evaluator::{evaluate_rate_card, evaluate_rate_card_from_step};
pub use thermal_adjustment::{
    ThermalAdjustmentResult, UNKNOWN_THERMAL_PROFILE, ZERO_COMPARTMENT_WEIGHT, allocate_hybrid,
    apply_modifier, apply_standard, apply_thermal, find_modifier,
};
