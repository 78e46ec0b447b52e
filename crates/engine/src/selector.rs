//! Incentive policy selection.

use time::Date;

use crate::types::IncentivePolicy;

/// Choose the policy to apply for a staff category on a given date.
///
/// A candidate must be active, its effective window must cover `as_of`,
/// and its applicable categories must include `staff_category_id`. When
/// several qualify, the one with the latest `effectiveFrom` wins (the most
/// recently activated policy); among equal `effectiveFrom` dates the first
/// in input order is kept, so the choice is stable.
///
/// `None` is the defined "no incentive owed" outcome, not a fault.
pub fn select_policy<'a>(
    policies: &'a [IncentivePolicy],
    staff_category_id: &str,
    as_of: Date,
) -> Option<&'a IncentivePolicy> {
    let mut best: Option<&IncentivePolicy> = None;
    for policy in policies {
        if !policy.active
            || !policy.covers(as_of)
            || !policy
                .applicable_categories
                .iter()
                .any(|c| c == staff_category_id)
        {
            continue;
        }
        match best {
            Some(current) if policy.effective_from <= current.effective_from => {}
            _ => best = Some(policy),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn policy(name: &str, from: Date, to: Option<Date>, active: bool) -> IncentivePolicy {
        IncentivePolicy {
            name: name.to_string(),
            description: String::new(),
            formula_definition: "totalCreditPoints".to_string(),
            variables: vec![],
            thresholds: vec![],
            service_type_multipliers: vec![],
            applicable_categories: vec!["cat-tech".to_string()],
            active,
            effective_from: from,
            effective_to: to,
        }
    }

    #[test]
    fn latest_effective_from_wins() {
        let policies = vec![
            policy("january", date!(2024 - 01 - 01), None, true),
            policy("june", date!(2024 - 06 - 01), None, true),
        ];
        let selected = select_policy(&policies, "cat-tech", date!(2024 - 07 - 15)).unwrap();
        assert_eq!(selected.name, "june");
    }

    #[test]
    fn inactive_policies_never_selected() {
        let policies = vec![
            policy("old", date!(2024 - 01 - 01), None, true),
            policy("newer-but-inactive", date!(2024 - 06 - 01), None, false),
        ];
        let selected = select_policy(&policies, "cat-tech", date!(2024 - 07 - 15)).unwrap();
        assert_eq!(selected.name, "old");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let policies = vec![policy(
            "windowed",
            date!(2024 - 01 - 01),
            Some(date!(2024 - 06 - 30)),
            true,
        )];
        assert!(select_policy(&policies, "cat-tech", date!(2024 - 01 - 01)).is_some());
        assert!(select_policy(&policies, "cat-tech", date!(2024 - 06 - 30)).is_some());
        assert!(select_policy(&policies, "cat-tech", date!(2024 - 07 - 01)).is_none());
        assert!(select_policy(&policies, "cat-tech", date!(2023 - 12 - 31)).is_none());
    }

    #[test]
    fn category_must_match() {
        let policies = vec![policy("tech-only", date!(2024 - 01 - 01), None, true)];
        assert!(select_policy(&policies, "cat-specialist", date!(2024 - 07 - 15)).is_none());
    }

    #[test]
    fn no_candidates_is_none_not_an_error() {
        assert!(select_policy(&[], "cat-tech", date!(2024 - 07 - 15)).is_none());
    }

    #[test]
    fn equal_effective_from_keeps_first_in_order() {
        let policies = vec![
            policy("first", date!(2024 - 06 - 01), None, true),
            policy("second", date!(2024 - 06 - 01), None, true),
        ];
        let selected = select_policy(&policies, "cat-tech", date!(2024 - 07 - 15)).unwrap();
        assert_eq!(selected.name, "first");
    }
}
