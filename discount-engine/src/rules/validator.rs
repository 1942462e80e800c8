//! Rule Validator
//!
//! Draft sanitization plus structural and conflict validation. Pure
//! functions: the store calls them before committing a create/update, and
//! hosts can call them standalone for form-level feedback.
//!
//! Conflict detection deliberately ignores `status`: a disabled duplicate
//! still blocks creation, otherwise re-enabling it would stack silently.

use crate::money::money_eq;
use shared::error::{RuleError, RuleResult};
use shared::models::{Discount, DiscountKind, Rule, RuleDraft, RuleKind, Trigger, TriggerKind};

/// Sanitize a submission draft into a canonical rule candidate
///
/// Trims name/message/tokens, drops empty tokens, and clamps negative
/// values to zero. The returned rule carries `id = 0`; the store assigns
/// the real id on commit. Format errors are reported on the draft shape so
/// the caller sees them before anything is stored.
pub fn sanitize_draft(draft: &RuleDraft) -> RuleResult<Rule> {
    if draft.kind != Some(RuleKind::CartBased) {
        return Err(RuleError::MissingFields);
    }
    let (Some(trigger), Some(discount)) = (&draft.trigger, &draft.discount) else {
        return Err(RuleError::MissingFields);
    };

    let (Some(trigger_kind), Some(trigger_value)) = (trigger.kind, trigger.value) else {
        return Err(RuleError::MissingDetails);
    };
    let (Some(discount_kind), Some(discount_value)) = (discount.kind, discount.value) else {
        return Err(RuleError::MissingDetails);
    };
    if trigger_kind == TriggerKind::Unknown || discount_kind == DiscountKind::Unknown {
        return Err(RuleError::MissingDetails);
    }
    if !trigger_value.is_finite() || !discount_value.is_finite() {
        return Err(RuleError::InvalidNumbers);
    }

    Ok(Rule {
        id: 0,
        name: draft.name.as_deref().unwrap_or("").trim().to_string(),
        kind: RuleKind::CartBased,
        trigger: Some(Trigger {
            kind: trigger_kind,
            value: trigger_value.max(0.0),
            products: sanitize_tokens(trigger.products.as_deref()),
            categories: sanitize_tokens(trigger.categories.as_deref()),
        }),
        discount: Some(Discount {
            kind: discount_kind,
            value: discount_value.max(0.0),
        }),
        message: draft.message.as_deref().unwrap_or("").trim().to_string(),
        status: draft.status.unwrap_or_default(),
    })
}

fn sanitize_tokens(tokens: Option<&[String]>) -> Vec<String> {
    tokens
        .unwrap_or_default()
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Validate a candidate rule against the existing rule list
///
/// Checks structure first, then scans for trigger conflicts, skipping the
/// rule with `exclude_id` (the update target) and any existing rule without
/// a trigger. No conflict is possible across different trigger types or
/// differing trigger values.
pub fn validate_rule(
    candidate: &Rule,
    existing_rules: &[Rule],
    exclude_id: Option<i64>,
) -> RuleResult<()> {
    if candidate.kind != RuleKind::CartBased {
        return Err(RuleError::MissingFields);
    }
    let (Some(trigger), Some(discount)) = (&candidate.trigger, &candidate.discount) else {
        return Err(RuleError::MissingFields);
    };
    if trigger.kind == TriggerKind::Unknown || discount.kind == DiscountKind::Unknown {
        return Err(RuleError::MissingDetails);
    }
    if !trigger.value.is_finite() || !discount.value.is_finite() {
        return Err(RuleError::InvalidNumbers);
    }

    for rule in existing_rules {
        if exclude_id == Some(rule.id) {
            continue;
        }
        let Some(other) = &rule.trigger else {
            continue;
        };
        if !money_eq(trigger.value, other.value) {
            continue;
        }

        match (trigger.kind, other.kind) {
            (TriggerKind::CartTotal, TriggerKind::CartTotal) => {
                return Err(RuleError::DuplicateCartTotal);
            }
            (TriggerKind::ItemQuantity, TriggerKind::ItemQuantity) => {
                if trigger.is_catch_all() && other.is_catch_all() {
                    return Err(RuleError::DuplicateCatchAll);
                }
                if tokens_overlap(&trigger.products, &other.products)
                    || tokens_overlap(&trigger.categories, &other.categories)
                {
                    return Err(RuleError::OverlappingTargets);
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn tokens_overlap(a: &[String], b: &[String]) -> bool {
    a.iter().any(|t| b.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DiscountDraft, TriggerDraft};

    fn make_draft(trigger_kind: TriggerKind, value: f64) -> RuleDraft {
        RuleDraft {
            name: Some("promo".to_string()),
            kind: Some(RuleKind::CartBased),
            trigger: Some(TriggerDraft {
                kind: Some(trigger_kind),
                value: Some(value),
                products: None,
                categories: None,
            }),
            discount: Some(DiscountDraft {
                kind: Some(DiscountKind::Percentage),
                value: Some(10.0),
            }),
            message: None,
            status: None,
        }
    }

    fn make_rule(id: i64, trigger_kind: TriggerKind, value: f64) -> Rule {
        let mut rule = sanitize_draft(&make_draft(trigger_kind, value)).unwrap();
        rule.id = id;
        rule
    }

    fn with_products(mut rule: Rule, products: &[&str]) -> Rule {
        rule.trigger.as_mut().unwrap().products =
            products.iter().map(|p| p.to_string()).collect();
        rule
    }

    fn with_categories(mut rule: Rule, categories: &[&str]) -> Rule {
        rule.trigger.as_mut().unwrap().categories =
            categories.iter().map(|c| c.to_string()).collect();
        rule
    }

    // ========== Format errors ==========

    #[test]
    fn test_missing_type_rejected() {
        let mut draft = make_draft(TriggerKind::CartTotal, 100.0);
        draft.kind = None;
        assert_eq!(sanitize_draft(&draft), Err(RuleError::MissingFields));
    }

    #[test]
    fn test_missing_trigger_rejected() {
        let mut draft = make_draft(TriggerKind::CartTotal, 100.0);
        draft.trigger = None;
        assert_eq!(sanitize_draft(&draft), Err(RuleError::MissingFields));
    }

    #[test]
    fn test_missing_trigger_value_rejected() {
        let mut draft = make_draft(TriggerKind::CartTotal, 100.0);
        draft.trigger.as_mut().unwrap().value = None;
        assert_eq!(sanitize_draft(&draft), Err(RuleError::MissingDetails));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let mut draft = make_draft(TriggerKind::CartTotal, f64::NAN);
        assert_eq!(sanitize_draft(&draft), Err(RuleError::InvalidNumbers));
        draft = make_draft(TriggerKind::CartTotal, 100.0);
        draft.discount.as_mut().unwrap().value = Some(f64::INFINITY);
        assert_eq!(sanitize_draft(&draft), Err(RuleError::InvalidNumbers));
    }

    #[test]
    fn test_sanitize_trims_and_clamps() {
        let mut draft = make_draft(TriggerKind::ItemQuantity, -3.0);
        draft.name = Some("  promo  ".to_string());
        draft.trigger.as_mut().unwrap().products =
            Some(vec![" 42 ".to_string(), "".to_string(), "  ".to_string()]);
        draft.discount.as_mut().unwrap().value = Some(-5.0);

        let rule = sanitize_draft(&draft).unwrap();
        assert_eq!(rule.name, "promo");
        let trigger = rule.trigger.unwrap();
        assert_eq!(trigger.value, 0.0);
        assert_eq!(trigger.products, vec!["42".to_string()]);
        assert_eq!(rule.discount.unwrap().value, 0.0);
    }

    // ========== Conflict detection ==========

    #[test]
    fn test_duplicate_cart_total_within_epsilon() {
        let existing = vec![make_rule(1, TriggerKind::CartTotal, 100.0)];
        let candidate = make_rule(0, TriggerKind::CartTotal, 100.005);
        assert_eq!(
            validate_rule(&candidate, &existing, None),
            Err(RuleError::DuplicateCartTotal)
        );

        let far = make_rule(0, TriggerKind::CartTotal, 100.01);
        assert_eq!(validate_rule(&far, &existing, None), Ok(()));
    }

    #[test]
    fn test_conflict_symmetry() {
        let a = make_rule(1, TriggerKind::CartTotal, 50.0);
        let b = make_rule(2, TriggerKind::CartTotal, 50.0);
        assert_eq!(
            validate_rule(&a, std::slice::from_ref(&b), None),
            Err(RuleError::DuplicateCartTotal)
        );
        assert_eq!(
            validate_rule(&b, std::slice::from_ref(&a), None),
            Err(RuleError::DuplicateCartTotal)
        );
    }

    #[test]
    fn test_no_conflict_across_trigger_types() {
        let existing = vec![make_rule(1, TriggerKind::CartTotal, 5.0)];
        let candidate = make_rule(0, TriggerKind::ItemQuantity, 5.0);
        assert_eq!(validate_rule(&candidate, &existing, None), Ok(()));
    }

    #[test]
    fn test_duplicate_catch_all_quantity() {
        let existing = vec![make_rule(1, TriggerKind::ItemQuantity, 3.0)];
        let candidate = make_rule(0, TriggerKind::ItemQuantity, 3.0);
        assert_eq!(
            validate_rule(&candidate, &existing, None),
            Err(RuleError::DuplicateCatchAll)
        );
    }

    #[test]
    fn test_overlapping_products() {
        let existing = vec![with_products(
            make_rule(1, TriggerKind::ItemQuantity, 3.0),
            &["42", "43"],
        )];
        let candidate = with_products(make_rule(0, TriggerKind::ItemQuantity, 3.0), &["43"]);
        assert_eq!(
            validate_rule(&candidate, &existing, None),
            Err(RuleError::OverlappingTargets)
        );

        let disjoint = with_products(make_rule(0, TriggerKind::ItemQuantity, 3.0), &["99"]);
        assert_eq!(validate_rule(&disjoint, &existing, None), Ok(()));
    }

    #[test]
    fn test_overlapping_categories() {
        let existing = vec![with_categories(
            make_rule(1, TriggerKind::ItemQuantity, 2.0),
            &["Drinks"],
        )];
        let candidate =
            with_categories(make_rule(0, TriggerKind::ItemQuantity, 2.0), &["Drinks"]);
        assert_eq!(
            validate_rule(&candidate, &existing, None),
            Err(RuleError::OverlappingTargets)
        );
    }

    #[test]
    fn test_exclude_id_skips_update_target() {
        let existing = vec![make_rule(7, TriggerKind::CartTotal, 100.0)];
        let candidate = make_rule(7, TriggerKind::CartTotal, 100.0);
        assert_eq!(validate_rule(&candidate, &existing, Some(7)), Ok(()));
        assert_eq!(
            validate_rule(&candidate, &existing, None),
            Err(RuleError::DuplicateCartTotal)
        );
    }

    #[test]
    fn test_conflict_ignores_status() {
        let mut disabled = make_rule(1, TriggerKind::CartTotal, 100.0);
        disabled.status = shared::models::RuleStatus::Disabled;
        let candidate = make_rule(0, TriggerKind::CartTotal, 100.0);
        assert_eq!(
            validate_rule(&candidate, &[disabled], None),
            Err(RuleError::DuplicateCartTotal)
        );
    }

    #[test]
    fn test_existing_without_trigger_skipped() {
        let mut broken = make_rule(1, TriggerKind::CartTotal, 100.0);
        broken.trigger = None;
        let candidate = make_rule(0, TriggerKind::CartTotal, 100.0);
        assert_eq!(validate_rule(&candidate, &[broken], None), Ok(()));
    }
}
