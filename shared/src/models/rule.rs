//! Discount Rule Model
//!
//! Persisted rule records plus the loosely-typed draft payloads accepted
//! from rule-authoring hosts. Unknown tag values deserialize into catch-all
//! variants so one bad stored record cannot poison the whole rule list.

use serde::{Deserialize, Serialize};

/// Rule family tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Cart-based rules (the only recognized family)
    CartBased,
    /// Unrecognized tag, rejected by validation and skipped by evaluation
    #[serde(other)]
    Unknown,
}

/// Trigger condition tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Fires when the cart-contents total reaches the trigger value
    CartTotal,
    /// Fires when the qualifying item quantity reaches the trigger value
    ItemQuantity,
    #[serde(other)]
    Unknown,
}

/// Discount calculation tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the base amount (value 10 = 10%)
    Percentage,
    /// Fixed amount, clamped to the base amount
    Fixed,
    #[serde(other)]
    Unknown,
}

/// Rule status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    #[default]
    Enabled,
    Disabled,
}

/// Trigger condition
///
/// `products`/`categories` hold authoring tokens: numeric ids or
/// case-insensitive display names. Empty on both sides means "all items"
/// (only meaningful for `item_quantity` triggers).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    pub value: f64,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Trigger {
    /// Whether this trigger names no specific products or categories
    pub fn is_catch_all(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }
}

/// Discount specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

/// Persisted rule entity
///
/// `trigger`/`discount` stay optional on the record: a rule missing either
/// is invalid but must still deserialize so the rest of the list survives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub trigger: Option<Trigger>,
    pub discount: Option<Discount>,
    /// Free-text override for the default success message ("" = use default)
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: RuleStatus,
}

impl Rule {
    /// Whether evaluation should consider this rule at all
    pub fn is_evaluable(&self) -> bool {
        self.status == RuleStatus::Enabled
            && self.kind == RuleKind::CartBased
            && self.trigger.is_some()
            && self.discount.is_some()
    }
}

/// Trigger submission payload (every field optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerDraft {
    #[serde(rename = "type")]
    pub kind: Option<TriggerKind>,
    pub value: Option<f64>,
    pub products: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
}

/// Discount submission payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountDraft {
    #[serde(rename = "type")]
    pub kind: Option<DiscountKind>,
    pub value: Option<f64>,
}

/// Rule submission payload (create and update)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleDraft {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<RuleKind>,
    pub trigger: Option<TriggerDraft>,
    pub discount: Option<DiscountDraft>,
    pub message: Option<String>,
    pub status: Option<RuleStatus>,
}

impl RuleDraft {
    /// Whether this draft only toggles `status` (bypasses validation on update)
    pub fn is_status_only(&self) -> bool {
        self.status.is_some()
            && self.name.is_none()
            && self.kind.is_none()
            && self.trigger.is_none()
            && self.discount.is_none()
            && self.message.is_none()
    }
}
