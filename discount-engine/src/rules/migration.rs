//! Legacy rule migration
//!
//! Upgrades stored records from the old `minimum_spend` shape to the
//! current `cart_based` shape. Runs once when the host loads a legacy
//! store; records that decode to neither shape are logged and dropped.

use serde_json::Value;
use shared::models::{Discount, DiscountKind, Rule, RuleKind, RuleStatus, Trigger, TriggerKind};

/// Upgrade a stored record list to the current rule shape
pub fn upgrade_records(records: Vec<Value>) -> Vec<Rule> {
    let mut upgraded = Vec::with_capacity(records.len());

    for record in records {
        match record.get("type").and_then(Value::as_str) {
            Some("minimum_spend") => upgraded.push(convert_minimum_spend(&record)),
            Some("cart_based") => match serde_json::from_value::<Rule>(record) {
                Ok(rule) => upgraded.push(rule),
                Err(e) => tracing::warn!("dropping undecodable cart_based record: {e}"),
            },
            other => tracing::warn!("dropping rule record with unknown type {other:?}"),
        }
    }

    upgraded
}

/// Old minimum-spend records become cart-total triggers with a percentage
/// discount; id, name, and message carry over.
fn convert_minimum_spend(record: &Value) -> Rule {
    let text = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let number = |key: &str| record.get(key).and_then(Value::as_f64).unwrap_or(0.0);

    Rule {
        id: record.get("id").and_then(Value::as_i64).unwrap_or(0),
        name: text("name"),
        kind: RuleKind::CartBased,
        trigger: Some(Trigger {
            kind: TriggerKind::CartTotal,
            value: number("amount"),
            products: vec![],
            categories: vec![],
        }),
        discount: Some(Discount {
            kind: DiscountKind::Percentage,
            value: number("discount"),
        }),
        message: text("message"),
        status: RuleStatus::Enabled,
    }
}
