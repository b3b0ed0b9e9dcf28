//! Core data models for the Rate Card Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod charge;
mod quote;
mod rate_break;
mod rate_card;
mod scenario;
mod thermal;

pub use charge::{ChargeDefinition, ChargeRule, ChargeSpec, ChargeType, RateBasis, WeightSource};
pub use quote::{
    AdjustmentMode, AuditStep, AuditTrace, AuditWarning, CompartmentPortion, LineItem, Quote,
    RateCardEvaluation, ThermalBreakdown,
};
pub use rate_break::{MatchPolicy, RateBreak, RateBreaks};
pub use rate_card::RateCard;
pub use scenario::Scenario;
pub use thermal::{Compartment, ModifierType, ThermalMode, ThermalModifier};
