//! Threshold bonus calculation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::BonusThreshold;

/// Sum the flat bonuses whose metric is bound and meets its floor.
///
/// Thresholds are additive extras, not required inputs: an entry naming a
/// metric absent from the bindings contributes 0 rather than failing the
/// calculation. Pure summation, so entry order never changes the result.
pub fn apply_thresholds(
    thresholds: &[BonusThreshold],
    bindings: &BTreeMap<String, Decimal>,
) -> Decimal {
    thresholds
        .iter()
        .filter(|t| {
            bindings
                .get(&t.metric_name)
                .is_some_and(|value| *value >= t.threshold)
        })
        .map(|t| t.bonus_amount)
        .sum()
}
