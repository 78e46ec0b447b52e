//! Service-type multiplier resolution.

use rust_decimal::Decimal;

use crate::types::ServiceTypeMultiplier;

/// Resolve the scaling factor for a service type.
///
/// First matching entry wins — the policy dialog prevents duplicate
/// service types, but if a record carries them anyway the tie-break is
/// sequence order, not an error. No match means no scaling: `1`.
pub fn resolve_multiplier(
    multipliers: &[ServiceTypeMultiplier],
    service_type_id: &str,
) -> Decimal {
    multipliers
        .iter()
        .find(|m| m.service_type == service_type_id)
        .map(|m| m.multiplier)
        .unwrap_or(Decimal::ONE)
}
