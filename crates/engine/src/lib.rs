//! garagepay-engine: staff incentive and service cost calculation.
//!
//! Pure, synchronous computation over caller-supplied records — no I/O, no
//! shared state, no retries. The UI/backend layer fetches policies, staff
//! metrics, and service orders; this crate turns them into payout figures
//! and cost rollups, or fails synchronously with a typed [`EngineError`].
//!
//! # Public API
//!
//! - [`build_bindings`] — policy defaults overlaid with runtime metrics
//! - [`apply_thresholds`] — flat bonuses for metrics at or past their floor
//! - [`resolve_multiplier`] — per-service-type scaling factor
//! - [`aggregate`] — per-item and per-order cost totals
//! - [`select_policy`] — which active policy covers a category on a date
//! - [`compute_incentive`] / [`compute_incentive_breakdown`] — the composed
//!   payout calculation
//! - [`run_incentive`] — select then compute, the full pipeline

pub mod context;
pub mod costs;
pub mod error;
pub mod incentive;
pub mod multiplier;
pub mod selector;
pub mod thresholds;
pub mod types;

use time::Date;

pub use context::{build_bindings, is_metric_name, METRIC_NAMES};
pub use costs::{aggregate, item_parts_cost, CostBreakdown};
pub use error::EngineError;
pub use incentive::{compute_incentive, compute_incentive_breakdown, IncentiveBreakdown};
pub use multiplier::resolve_multiplier;
pub use selector::select_policy;
pub use thresholds::apply_thresholds;
pub use types::{
    BonusThreshold, IncentivePolicy, PartLine, PaymentStatus, PolicyVariable, ServiceItem,
    ServiceOrder, ServiceStatus, ServiceTypeMultiplier, StaffCategory, StaffMetrics,
    TechnicianAssignment,
};

/// Select the applicable policy and compute the incentive in one call.
///
/// `Ok(None)` means no policy covers this staff category on `as_of` — no
/// incentive is owed. Errors are formula or validation defects in the
/// selected policy, never a consequence of the selection itself.
pub fn run_incentive(
    policies: &[IncentivePolicy],
    staff_category_id: &str,
    as_of: Date,
    metrics: &StaffMetrics,
    service_type_id: &str,
) -> Result<Option<IncentiveBreakdown>, EngineError> {
    match select_policy(policies, staff_category_id, as_of) {
        Some(policy) => Ok(Some(compute_incentive_breakdown(
            policy,
            metrics,
            service_type_id,
        )?)),
        None => Ok(None),
    }
}
