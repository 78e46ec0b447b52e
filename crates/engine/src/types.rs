//! Domain records for incentive and cost calculation.
//!
//! These are the shapes the ERP backend serves over REST (camelCase JSON);
//! the engine never mutates them. Monetary and metric fields are
//! `rust_decimal::Decimal` — never `f64` — so form input like `0.1` stays
//! exact through every rollup. Validation lives on the records themselves
//! and is run at data-entry time, before any calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::EngineError;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ──────────────────────────────────────────────
// Incentive policies
// ──────────────────────────────────────────────

/// A named variable a policy makes available to its formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVariable {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub default_value: Decimal,
}

/// A flat bonus unlocked when a metric meets or exceeds a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusThreshold {
    pub metric_name: String,
    pub threshold: Decimal,
    pub bonus_amount: Decimal,
}

/// A scaling factor applied when the serviced work matches a service type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeMultiplier {
    pub service_type: String,
    pub multiplier: Decimal,
}

/// A named, time-bounded incentive calculation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentivePolicy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub formula_definition: String,
    #[serde(default)]
    pub variables: Vec<PolicyVariable>,
    #[serde(default)]
    pub thresholds: Vec<BonusThreshold>,
    #[serde(default)]
    pub service_type_multipliers: Vec<ServiceTypeMultiplier>,
    /// Staff category IDs this policy applies to.
    #[serde(default)]
    pub applicable_categories: Vec<String>,
    pub active: bool,
    #[serde(with = "iso_date")]
    pub effective_from: Date,
    /// Absent means no end date.
    #[serde(default, with = "iso_date::option")]
    pub effective_to: Option<Date>,
}

impl IncentivePolicy {
    /// Save-time validation: the checks the policy dialog runs before a
    /// policy is persisted. A formula that fails to parse, or that
    /// references a name neither declared as a variable nor one of the
    /// fixed metrics, is rejected here so calculation never sees it.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if self.formula_definition.trim().is_empty() {
            return Err(EngineError::validation(
                "formulaDefinition",
                "must not be empty",
            ));
        }
        let expr = garagepay_formula::parse(&self.formula_definition)?;
        for name in expr.variable_names() {
            let declared = self.variables.iter().any(|v| v.name == name);
            if !declared && !crate::context::is_metric_name(name) {
                return Err(EngineError::validation(
                    "formulaDefinition",
                    format!("references undeclared variable '{}'", name),
                ));
            }
        }
        for (i, var) in self.variables.iter().enumerate() {
            if var.name.trim().is_empty() {
                return Err(EngineError::validation(
                    format!("variables[{}].name", i),
                    "must not be empty",
                ));
            }
            if self.variables[..i].iter().any(|v| v.name == var.name) {
                return Err(EngineError::validation(
                    format!("variables[{}].name", i),
                    format!("duplicate variable name '{}'", var.name),
                ));
            }
        }
        for (i, stm) in self.service_type_multipliers.iter().enumerate() {
            if stm.multiplier < Decimal::ZERO {
                return Err(EngineError::validation(
                    format!("serviceTypeMultipliers[{}].multiplier", i),
                    "must be ≥ 0",
                ));
            }
        }
        if let Some(to) = self.effective_to {
            if to < self.effective_from {
                return Err(EngineError::validation(
                    "effectiveTo",
                    "must not precede effectiveFrom",
                ));
            }
        }
        Ok(())
    }

    /// Whether this policy's effective window covers `as_of`.
    pub fn covers(&self, as_of: Date) -> bool {
        as_of >= self.effective_from && self.effective_to.map_or(true, |to| as_of <= to)
    }
}

// ──────────────────────────────────────────────
// Staff
// ──────────────────────────────────────────────

/// A staff category (designation) with its pay baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCategory {
    pub id: String,
    pub name: String,
    pub base_salary: Decimal,
    /// Percentage, e.g. `5` means 5%.
    pub base_incentive_rate: Decimal,
    /// Months of experience required to hold this category.
    pub minimum_experience_months: u32,
    pub active: bool,
}

impl StaffCategory {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::validation("baseSalary", "must be ≥ 0"));
        }
        if self.base_incentive_rate < Decimal::ZERO {
            return Err(EngineError::validation("baseIncentiveRate", "must be ≥ 0"));
        }
        Ok(())
    }
}

/// Performance metrics computed upstream by the backend's analytics
/// endpoints. Absent fields deserialize to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffMetrics {
    pub total_credit_points: Decimal,
    pub target_achievement: Decimal,
    pub completed_services: Decimal,
    pub base_incentive_rate: Decimal,
}

// ──────────────────────────────────────────────
// Service orders
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
}

/// A technician assigned to a service item, with the credit points they
/// earn for it once credits are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianAssignment {
    pub technician_id: String,
    pub credit_points: Decimal,
    #[serde(default)]
    pub credits_assigned: bool,
}

/// One part line on a service item.
///
/// `quantity` is signed so that bad form input (`-1`) reaches the
/// aggregator's validation instead of failing opaquely at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLine {
    pub name: String,
    pub quantity: i64,
    pub unit_cost: Decimal,
}

/// One billable unit of work (labor + parts) within a service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technicians: Vec<TechnicianAssignment>,
    #[serde(default)]
    pub labor_hours: Decimal,
    pub labor_cost: Decimal,
    #[serde(default)]
    pub parts: Vec<PartLine>,
    pub status: ServiceStatus,
}

/// A service order: one or more service items on a vehicle visit.
///
/// The order's total cost is never stored; it is recomputed from the items
/// by [`crate::costs::aggregate`] every time it is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub service_items: Vec<ServiceItem>,
    #[serde(default)]
    pub mileage_at_service: u32,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(default, with = "iso_date::option")]
    pub estimated_completion_date: Option<Date>,
    pub payment_status: PaymentStatus,
}

impl ServiceOrder {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.service_items.is_empty() {
            return Err(EngineError::validation("serviceItems", "must not be empty"));
        }
        Ok(())
    }

    /// Recompute the order total from its items.
    pub fn total_cost(&self) -> Result<Decimal, EngineError> {
        self.validate()?;
        Ok(crate::costs::aggregate(&self.service_items)?.order_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use time::macros::date;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn minimal_policy() -> IncentivePolicy {
        IncentivePolicy {
            name: "Technician monthly".to_string(),
            description: String::new(),
            formula_definition: "baseIncentiveRate * totalCreditPoints".to_string(),
            variables: vec![],
            thresholds: vec![],
            service_type_multipliers: vec![],
            applicable_categories: vec!["cat-tech".to_string()],
            active: true,
            effective_from: date!(2024 - 01 - 01),
            effective_to: None,
        }
    }

    #[test]
    fn policy_json_round_trips_in_backend_shape() {
        let json = r#"{
            "name": "Specialist Q3",
            "formulaDefinition": "baseAmount + totalCreditPoints * multiplier",
            "variables": [
                { "name": "baseAmount", "description": "Flat base", "defaultValue": 1000 },
                { "name": "multiplier", "description": "Per-credit rate", "defaultValue": 12.5 }
            ],
            "thresholds": [
                { "metricName": "targetAchievement", "threshold": 90, "bonusAmount": 500 }
            ],
            "serviceTypeMultipliers": [
                { "serviceType": "svc-engine", "multiplier": 1.5 }
            ],
            "applicableCategories": ["cat-specialist"],
            "active": true,
            "effectiveFrom": "2024-06-01",
            "effectiveTo": "2024-09-30"
        }"#;
        let policy: IncentivePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.effective_from, date!(2024 - 06 - 01));
        assert_eq!(policy.effective_to, Some(date!(2024 - 09 - 30)));
        assert_eq!(policy.variables[1].default_value, dec("12.5"));
        policy.validate().unwrap();
    }

    #[test]
    fn policy_effective_to_before_from_rejected() {
        let mut policy = minimal_policy();
        policy.effective_to = Some(date!(2023 - 12 - 31));
        let err = policy.validate().unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation {
                field: "effectiveTo".to_string(),
                reason: "must not precede effectiveFrom".to_string(),
            }
        );
    }

    #[test]
    fn policy_malformed_formula_rejected_at_save_time() {
        let mut policy = minimal_policy();
        policy.formula_definition = "baseIncentiveRate * (totalCreditPoints".to_string();
        let err = policy.validate().unwrap_err();
        assert!(matches!(
            err,
            EngineError::Formula(garagepay_formula::FormulaError::Syntax { .. })
        ));
    }

    #[test]
    fn policy_undeclared_formula_variable_rejected() {
        let mut policy = minimal_policy();
        policy.formula_definition = "bonusRate * 2".to_string();
        let err = policy.validate().unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation {
                field: "formulaDefinition".to_string(),
                reason: "references undeclared variable 'bonusRate'".to_string(),
            }
        );
    }

    #[test]
    fn policy_duplicate_variable_names_rejected() {
        let mut policy = minimal_policy();
        policy.variables = vec![
            PolicyVariable {
                name: "rate".to_string(),
                description: String::new(),
                default_value: dec("1"),
            },
            PolicyVariable {
                name: "rate".to_string(),
                description: String::new(),
                default_value: dec("2"),
            },
        ];
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { field, .. } if field == "variables[1].name"));
    }

    #[test]
    fn policy_covers_open_ended_window() {
        let policy = minimal_policy();
        assert!(policy.covers(date!(2024 - 01 - 01)));
        assert!(policy.covers(date!(2030 - 12 - 31)));
        assert!(!policy.covers(date!(2023 - 12 - 31)));
    }

    #[test]
    fn metrics_absent_fields_default_to_zero() {
        let metrics: StaffMetrics =
            serde_json::from_str(r#"{ "totalCreditPoints": 50 }"#).unwrap();
        assert_eq!(metrics.total_credit_points, dec("50"));
        assert_eq!(metrics.target_achievement, Decimal::ZERO);
        assert_eq!(metrics.completed_services, Decimal::ZERO);
        assert_eq!(metrics.base_incentive_rate, Decimal::ZERO);
    }

    #[test]
    fn service_status_uses_backend_strings() {
        let status: ServiceStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(status, ServiceStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Cancelled).unwrap(),
            r#""cancelled""#
        );
    }

    #[test]
    fn category_negative_salary_rejected() {
        let category = StaffCategory {
            id: "cat-1".to_string(),
            name: "Technician".to_string(),
            base_salary: dec("-1"),
            base_incentive_rate: dec("5"),
            minimum_experience_months: 6,
            active: true,
        };
        let err = category.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { field, .. } if field == "baseSalary"));
    }

    #[test]
    fn empty_order_rejected() {
        let order = ServiceOrder {
            service_items: vec![],
            mileage_at_service: 42_000,
            start_date: date!(2024 - 03 - 15),
            estimated_completion_date: None,
            payment_status: PaymentStatus::Pending,
        };
        let err = order.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { field, .. } if field == "serviceItems"));
    }
}
