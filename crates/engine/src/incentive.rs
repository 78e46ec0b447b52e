//! Composed incentive computation: bindings → formula → thresholds →
//! multiplier → rounded payout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::context::build_bindings;
use crate::error::EngineError;
use crate::multiplier::resolve_multiplier;
use crate::thresholds::apply_thresholds;
use crate::types::{IncentivePolicy, StaffMetrics};

/// The currency scale every payout is rounded to.
const CURRENCY_SCALE: u32 = 2;

/// The parts of one incentive computation, kept for the UI's explanation
/// panel. `base`, `bonus`, and `multiplier` are exact intermediates;
/// `total` is `(base + bonus) × multiplier` rounded to 2 decimal places
/// with banker's rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveBreakdown {
    pub policy_name: String,
    pub base: Decimal,
    pub bonus: Decimal,
    pub multiplier: Decimal,
    pub total: Decimal,
}

/// Compute an incentive with its intermediate parts.
///
/// Formula errors (syntax, unknown variable, division by zero) propagate
/// unchanged — they are policy configuration defects, not faults to retry.
pub fn compute_incentive_breakdown(
    policy: &IncentivePolicy,
    metrics: &StaffMetrics,
    service_type_id: &str,
) -> Result<IncentiveBreakdown, EngineError> {
    let bindings = build_bindings(policy, metrics);
    let base = garagepay_formula::evaluate(&policy.formula_definition, &bindings)?;
    let bonus = apply_thresholds(&policy.thresholds, &bindings);
    let multiplier = resolve_multiplier(&policy.service_type_multipliers, service_type_id);

    let scaled = base
        .checked_add(bonus)
        .and_then(|sum| sum.checked_mul(multiplier))
        .ok_or_else(|| EngineError::Overflow("incentive total".to_string()))?;
    let mut total =
        scaled.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven);
    // Pad short scales so a payout always reads as currency ("240.00", not "240.0").
    total.rescale(CURRENCY_SCALE);

    Ok(IncentiveBreakdown {
        policy_name: policy.name.clone(),
        base,
        bonus,
        multiplier,
        total,
    })
}

/// Compute the final payout figure for one staff member under one policy.
pub fn compute_incentive(
    policy: &IncentivePolicy,
    metrics: &StaffMetrics,
    service_type_id: &str,
) -> Result<Decimal, EngineError> {
    Ok(compute_incentive_breakdown(policy, metrics, service_type_id)?.total)
}
