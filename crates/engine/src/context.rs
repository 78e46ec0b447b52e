//! Variable resolution: building the bindings map a formula evaluates
//! against.
//!
//! Precedence is fixed: policy variable defaults first, then the four
//! runtime metrics overlaid unconditionally. A policy variable that shares
//! a name with a metric is therefore always shadowed by the live metric
//! value.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{IncentivePolicy, StaffMetrics};

pub const METRIC_TOTAL_CREDIT_POINTS: &str = "totalCreditPoints";
pub const METRIC_TARGET_ACHIEVEMENT: &str = "targetAchievement";
pub const METRIC_COMPLETED_SERVICES: &str = "completedServices";
pub const METRIC_BASE_INCENTIVE_RATE: &str = "baseIncentiveRate";

/// The fixed metric names, always bound regardless of policy declarations.
pub const METRIC_NAMES: [&str; 4] = [
    METRIC_TOTAL_CREDIT_POINTS,
    METRIC_TARGET_ACHIEVEMENT,
    METRIC_COMPLETED_SERVICES,
    METRIC_BASE_INCENTIVE_RATE,
];

/// Whether `name` is one of the reserved runtime metric names.
pub fn is_metric_name(name: &str) -> bool {
    METRIC_NAMES.contains(&name)
}

/// Build the complete bindings map for one incentive run.
///
/// Infallible: every declared variable and every metric ends up bound, so
/// a formula over declared names can only fail for arithmetic reasons.
pub fn build_bindings(
    policy: &IncentivePolicy,
    metrics: &StaffMetrics,
) -> BTreeMap<String, Decimal> {
    let mut bindings = BTreeMap::new();
    for var in &policy.variables {
        bindings.insert(var.name.clone(), var.default_value);
    }
    bindings.insert(
        METRIC_TOTAL_CREDIT_POINTS.to_string(),
        metrics.total_credit_points,
    );
    bindings.insert(
        METRIC_TARGET_ACHIEVEMENT.to_string(),
        metrics.target_achievement,
    );
    bindings.insert(
        METRIC_COMPLETED_SERVICES.to_string(),
        metrics.completed_services,
    );
    bindings.insert(
        METRIC_BASE_INCENTIVE_RATE.to_string(),
        metrics.base_incentive_rate,
    );
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PolicyVariable;
    use std::str::FromStr;
    use time::macros::date;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn policy_with_variables(vars: Vec<PolicyVariable>) -> IncentivePolicy {
        IncentivePolicy {
            name: "p".to_string(),
            description: String::new(),
            formula_definition: "totalCreditPoints".to_string(),
            variables: vars,
            thresholds: vec![],
            service_type_multipliers: vec![],
            applicable_categories: vec![],
            active: true,
            effective_from: date!(2024 - 01 - 01),
            effective_to: None,
        }
    }

    #[test]
    fn defaults_and_metrics_both_present() {
        let policy = policy_with_variables(vec![PolicyVariable {
            name: "multiplier".to_string(),
            description: String::new(),
            default_value: dec("1"),
        }]);
        let metrics = StaffMetrics {
            total_credit_points: dec("50"),
            ..StaffMetrics::default()
        };
        let bindings = build_bindings(&policy, &metrics);
        assert_eq!(bindings["multiplier"], dec("1"));
        assert_eq!(bindings[METRIC_TOTAL_CREDIT_POINTS], dec("50"));
        assert_eq!(bindings.len(), 5);
    }

    #[test]
    fn runtime_metric_overrides_policy_default() {
        // A policy declaring a variable named like a metric loses to the
        // live metric value.
        let policy = policy_with_variables(vec![PolicyVariable {
            name: METRIC_TARGET_ACHIEVEMENT.to_string(),
            description: String::new(),
            default_value: dec("999"),
        }]);
        let metrics = StaffMetrics {
            target_achievement: dec("85"),
            ..StaffMetrics::default()
        };
        let bindings = build_bindings(&policy, &metrics);
        assert_eq!(bindings[METRIC_TARGET_ACHIEVEMENT], dec("85"));
    }

    #[test]
    fn all_four_metrics_always_bound() {
        let policy = policy_with_variables(vec![]);
        let bindings = build_bindings(&policy, &StaffMetrics::default());
        for name in METRIC_NAMES {
            assert_eq!(bindings[name], Decimal::ZERO);
        }
        assert_eq!(bindings.len(), 4);
    }
}
