//! Service cost rollup: per-item and per-order totals.
//!
//! Validation runs over every item before any summation starts, so a bad
//! record never yields partial totals. The aggregator holds no state;
//! calling it twice on the same input yields identical results.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::EngineError;
use crate::types::ServiceItem;

/// Aggregated costs for a service order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// `laborCost + partsCost` per item, in item order.
    pub item_totals: Vec<Decimal>,
    pub order_total: Decimal,
}

/// Roll up item and order totals.
///
/// Fails fast with a [`EngineError::Validation`] naming the offending
/// field path (e.g. `serviceItems[1].parts[0].unitCost`) when any
/// quantity or cost is out of range.
pub fn aggregate(service_items: &[ServiceItem]) -> Result<CostBreakdown, EngineError> {
    for (i, item) in service_items.iter().enumerate() {
        validate_item(i, item)?;
    }

    let mut item_totals = Vec::with_capacity(service_items.len());
    let mut order_total = Decimal::ZERO;
    for item in service_items {
        let total = item_total(item)?;
        order_total = order_total
            .checked_add(total)
            .ok_or_else(|| EngineError::Overflow("order total".to_string()))?;
        item_totals.push(total);
    }

    Ok(CostBreakdown {
        item_totals,
        order_total,
    })
}

/// Parts subtotal for one item: Σ quantity × unitCost.
///
/// Assumes the item has already passed validation.
pub fn item_parts_cost(item: &ServiceItem) -> Result<Decimal, EngineError> {
    let mut total = Decimal::ZERO;
    for part in &item.parts {
        let line = Decimal::from(part.quantity)
            .checked_mul(part.unit_cost)
            .ok_or_else(|| EngineError::Overflow(format!("part '{}' line cost", part.name)))?;
        total = total
            .checked_add(line)
            .ok_or_else(|| EngineError::Overflow("parts cost".to_string()))?;
    }
    Ok(total)
}

fn item_total(item: &ServiceItem) -> Result<Decimal, EngineError> {
    item.labor_cost
        .checked_add(item_parts_cost(item)?)
        .ok_or_else(|| EngineError::Overflow("item total".to_string()))
}

fn validate_item(index: usize, item: &ServiceItem) -> Result<(), EngineError> {
    if item.labor_cost < Decimal::ZERO {
        return Err(EngineError::validation(
            format!("serviceItems[{}].laborCost", index),
            "must be ≥ 0",
        ));
    }
    if item.labor_hours < Decimal::ZERO {
        return Err(EngineError::validation(
            format!("serviceItems[{}].laborHours", index),
            "must be ≥ 0",
        ));
    }
    for (j, part) in item.parts.iter().enumerate() {
        if part.quantity < 1 {
            return Err(EngineError::validation(
                format!("serviceItems[{}].parts[{}].quantity", index, j),
                "must be ≥ 1",
            ));
        }
        if part.unit_cost < Decimal::ZERO {
            return Err(EngineError::validation(
                format!("serviceItems[{}].parts[{}].unitCost", index, j),
                "must be ≥ 0",
            ));
        }
    }
    Ok(())
}
