//! Thermal adjustment and hybrid allocation.
//!
//! This module turns a rate card subtotal into a total, either by applying a
//! single thermal modifier (standard orders) or by splitting the subtotal
//! across temperature compartments by weight and adjusting each share with its
//! own modifier (hybrid orders). Both paths share [`apply_modifier`].

use rust_decimal::Decimal;

use crate::models::{
    AdjustmentMode, AuditStep, AuditWarning, Compartment, CompartmentPortion, ThermalBreakdown,
    ThermalMode, ThermalModifier,
};

/// Warning code raised when hybrid compartments carry no weight.
pub const ZERO_COMPARTMENT_WEIGHT: &str = "ZERO_COMPARTMENT_WEIGHT";

/// Warning code raised when a selected thermal profile has no modifier.
pub const UNKNOWN_THERMAL_PROFILE: &str = "UNKNOWN_THERMAL_PROFILE";

/// The result of a thermal adjustment, including the total and audit records.
#[derive(Debug, Clone)]
pub struct ThermalAdjustmentResult {
    /// The adjusted total.
    pub total: Decimal,
    /// How the total was produced.
    pub breakdown: ThermalBreakdown,
    /// The audit step recording this adjustment.
    pub audit_step: AuditStep,
    /// Fallbacks taken, if any.
    pub warnings: Vec<AuditWarning>,
}

/// Applies an optional modifier to an amount. No modifier leaves the amount unchanged.
pub fn apply_modifier(amount: Decimal, modifier: Option<&ThermalModifier>) -> Decimal {
    modifier.map_or(amount, |m| m.apply(amount))
}

/// Finds the modifier for `thermal_profile` in `modifiers`.
pub fn find_modifier<'a>(
    modifiers: &'a [ThermalModifier],
    thermal_profile: &str,
) -> Option<&'a ThermalModifier> {
    modifiers.iter().find(|m| m.thermal_profile == thermal_profile)
}

/// Applies at most one modifier to the whole subtotal.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::apply_standard;
/// use rate_card_engine::models::{ModifierType, ThermalModifier};
/// use rust_decimal::Decimal;
///
/// let frozen = ThermalModifier::new("frozen", ModifierType::FixedAdd, Decimal::from(75));
/// let result = apply_standard(Decimal::from(1000), Some(&frozen), 1);
/// assert_eq!(result.total, Decimal::from(1075));
///
/// let result = apply_standard(Decimal::from(1000), None, 1);
/// assert_eq!(result.total, Decimal::from(1000));
/// ```
pub fn apply_standard(
    subtotal: Decimal,
    modifier: Option<&ThermalModifier>,
    step_number: u32,
) -> ThermalAdjustmentResult {
    let total = apply_modifier(subtotal, modifier);

    let reasoning = match modifier {
        Some(m) => format!(
            "Applied {:?} modifier {} for profile '{}': ${} -> ${}",
            m.modifier_type,
            m.value.normalize(),
            m.thermal_profile,
            subtotal.normalize(),
            total.normalize()
        ),
        None => format!("No thermal modifier applied: total = subtotal ${}", subtotal.normalize()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "thermal_adjustment".to_string(),
        rule_name: "Thermal Adjustment".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.normalize().to_string(),
            "thermal_profile": modifier.map(|m| m.thermal_profile.as_str()),
            "modifier_type": modifier.map(|m| m.modifier_type),
            "modifier_value": modifier.map(|m| m.value.normalize().to_string())
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "modifier_applied": modifier.is_some()
        }),
        reasoning,
    };

    ThermalAdjustmentResult {
        total,
        breakdown: ThermalBreakdown {
            mode: AdjustmentMode::Standard,
            thermal_profile: modifier.map(|m| m.thermal_profile.clone()),
            modifier_type: modifier.map(|m| m.modifier_type),
            portions: vec![],
        },
        audit_step,
        warnings: vec![],
    }
}

/// Splits the subtotal across compartments by weight and adjusts each share.
///
/// Each compartment receives `subtotal × weight / Σweights`, adjusted with the
/// modifier for its thermal profile (unchanged when there is none). The total
/// is the sum of the adjusted shares. When the compartments carry no weight in
/// total (or there are none), the subtotal is returned unadjusted with a
/// [`ZERO_COMPARTMENT_WEIGHT`] warning.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::allocate_hybrid;
/// use rate_card_engine::models::{Compartment, ModifierType, ThermalModifier};
/// use rust_decimal::Decimal;
///
/// let compartments = vec![
///     Compartment::new("frozen", Decimal::from(2)),
///     Compartment::new("chilled", Decimal::from(3)),
/// ];
/// let modifiers = vec![
///     ThermalModifier::new("frozen", ModifierType::Multiplier, Decimal::new(11, 1)),
///     ThermalModifier::new("chilled", ModifierType::FixedAdd, Decimal::from(50)),
/// ];
///
/// let result = allocate_hybrid(Decimal::from(1000), &compartments, &modifiers, 1);
/// assert_eq!(result.total, Decimal::from(1090));
/// ```
pub fn allocate_hybrid(
    subtotal: Decimal,
    compartments: &[Compartment],
    modifiers: &[ThermalModifier],
    step_number: u32,
) -> ThermalAdjustmentResult {
    let total_weight = compartments
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.weight));

    if total_weight <= Decimal::ZERO {
        let warning = AuditWarning {
            code: ZERO_COMPARTMENT_WEIGHT.to_string(),
            message: format!(
                "Hybrid compartments carry no weight ({} compartments); subtotal left unadjusted",
                compartments.len()
            ),
        };
        let audit_step = AuditStep {
            step_number,
            rule_id: "hybrid_allocation".to_string(),
            rule_name: "Hybrid Compartment Allocation".to_string(),
            input: serde_json::json!({
                "subtotal": subtotal.normalize().to_string(),
                "compartment_count": compartments.len(),
                "total_weight": total_weight.normalize().to_string()
            }),
            output: serde_json::json!({
                "total": subtotal.normalize().to_string(),
                "allocated": false
            }),
            reasoning: "Total compartment weight is zero - total = subtotal".to_string(),
        };

        return ThermalAdjustmentResult {
            total: subtotal,
            breakdown: ThermalBreakdown {
                mode: AdjustmentMode::Hybrid,
                thermal_profile: None,
                modifier_type: None,
                portions: vec![],
            },
            audit_step,
            warnings: vec![warning],
        };
    }

    let portions: Vec<CompartmentPortion> = compartments
        .iter()
        .map(|c| {
            let portion = subtotal
                .saturating_mul(c.weight)
                .checked_div(total_weight)
                .unwrap_or(Decimal::ZERO);
            let modifier = find_modifier(modifiers, &c.thermal_profile);
            CompartmentPortion {
                thermal_profile: c.thermal_profile.clone(),
                weight: c.weight,
                portion,
                adjusted: apply_modifier(portion, modifier),
                modifier_type: modifier.map(|m| m.modifier_type),
            }
        })
        .collect();

    let total = portions
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.adjusted));

    let audit_step = AuditStep {
        step_number,
        rule_id: "hybrid_allocation".to_string(),
        rule_name: "Hybrid Compartment Allocation".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.normalize().to_string(),
            "compartment_count": compartments.len(),
            "total_weight": total_weight.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "allocated": true,
            "portions": portions
                .iter()
                .map(|p| serde_json::json!({
                    "thermal_profile": p.thermal_profile,
                    "portion": p.portion.normalize().to_string(),
                    "adjusted": p.adjusted.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        reasoning: format!(
            "Split ${} across {} compartments by weight ({} total): adjusted total ${}",
            subtotal.normalize(),
            portions.len(),
            total_weight.normalize(),
            total.normalize()
        ),
    };

    ThermalAdjustmentResult {
        total,
        breakdown: ThermalBreakdown {
            mode: AdjustmentMode::Hybrid,
            thermal_profile: None,
            modifier_type: None,
            portions,
        },
        audit_step,
        warnings: vec![],
    }
}

/// Applies the caller-selected thermal mode to a subtotal.
///
/// In standard mode the selected profile falls back to `default_profile` (the
/// rate card's own profile). A profile with no matching modifier means no
/// adjustment and raises an [`UNKNOWN_THERMAL_PROFILE`] warning.
pub fn apply_thermal(
    subtotal: Decimal,
    mode: &ThermalMode,
    modifiers: &[ThermalModifier],
    default_profile: Option<&str>,
    step_number: u32,
) -> ThermalAdjustmentResult {
    match mode {
        ThermalMode::Standard { thermal_profile } => {
            let profile = thermal_profile.as_deref().or(default_profile);
            let modifier = profile.and_then(|p| find_modifier(modifiers, p));

            let mut result = apply_standard(subtotal, modifier, step_number);
            if let (Some(p), None) = (profile, modifier) {
                result.warnings.push(AuditWarning {
                    code: UNKNOWN_THERMAL_PROFILE.to_string(),
                    message: format!("No thermal modifier for profile '{}'; no adjustment applied", p),
                });
            }
            result
        }
        ThermalMode::Hybrid { compartments } => {
            allocate_hybrid(subtotal, compartments, modifiers, step_number)
        }
    }
}
