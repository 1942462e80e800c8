//! Rule Evaluation Engine
//!
//! Orchestrates one evaluation pass: reset the session's tracking state,
//! filter and partition the rule list by trigger type, run the matcher and
//! calculator per rule, and emit fee adjustments plus progress messages.
//! Rules in both trigger groups stack; evaluation never re-validates
//! conflicts (that happened at authoring time).
//!
//! A pass is synchronous and does no I/O. Re-running it against an
//! unchanged cart recomputes the same fees from scratch instead of
//! accumulating them.

use crate::catalog::ProductCatalog;
use shared::models::{CartSnapshot, Rule, RuleKind, RuleStatus, TriggerKind};
use uuid::Uuid;

use super::calculator::compute_discount;
use super::matcher::{ApplicableSet, applicable_items};
use super::messages::{
    BasicPriceFormatter, CartMessage, PriceFormatter, cart_total_success, cart_total_threshold,
    discount_label, item_quantity_success, item_quantity_threshold,
};

/// Negative line item representing an applied discount
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FeeAdjustment {
    /// Random-suffixed id, prefixed by trigger family
    pub id: String,
    /// Display label, e.g. "10% Discount"
    pub name: String,
    /// Always negative
    pub amount: f64,
    /// Discount fees are never taxed
    pub taxable: bool,
}

impl FeeAdjustment {
    fn new(prefix: &str, name: String, discount_amount: f64) -> Self {
        Self {
            id: format!("{prefix}{}", Uuid::new_v4().simple()),
            name,
            amount: -discount_amount,
            taxable: false,
        }
    }
}

/// One applied discount with the rule that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountResult {
    pub rule: Rule,
    pub amount: f64,
    /// The matched line items for item-quantity rules, `None` for
    /// cart-total rules
    pub applied_to: Option<ApplicableSet>,
}

/// Everything one evaluation pass produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationOutcome {
    pub fees: Vec<FeeAdjustment>,
    pub discounts: Vec<DiscountResult>,
    pub messages: Vec<CartMessage>,
}

/// Per-cart evaluation state
///
/// One session per cart; hosts serving concurrent carts must not share a
/// session between them. All tracking fields are cleared at the start of
/// every pass.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    in_progress: bool,
    pub discount_applied: bool,
    pub discounts: Vec<DiscountResult>,
    pub applied_rule_ids: Vec<i64>,
    pub messages: Vec<CartMessage>,
    messages_rendered: bool,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pass as started; returns false when one is already running
    ///
    /// The engine calls this itself. It is public so hosts whose cart
    /// recalculation hooks can re-enter (e.g. a fee change retriggering
    /// totals) can guard their own call sites the same way.
    pub fn begin_pass(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        true
    }

    pub fn finish_pass(&mut self) {
        self.in_progress = false;
    }

    /// Latch the render-once flag; returns false if already rendered
    pub(crate) fn latch_rendered(&mut self) -> bool {
        if self.messages_rendered {
            return false;
        }
        self.messages_rendered = true;
        true
    }

    fn reset_tracking(&mut self) {
        self.discount_applied = false;
        self.discounts.clear();
        self.applied_rule_ids.clear();
        self.messages.clear();
        self.messages_rendered = false;
    }
}

/// The discount engine
///
/// Stateless apart from the injected price formatter; all per-cart state
/// lives in the [`CartSession`] passed into [`DiscountEngine::evaluate`].
#[derive(Debug, Clone, Default)]
pub struct DiscountEngine<F: PriceFormatter = BasicPriceFormatter> {
    formatter: F,
}

impl DiscountEngine<BasicPriceFormatter> {
    pub fn new() -> Self {
        Self {
            formatter: BasicPriceFormatter,
        }
    }
}

impl<F: PriceFormatter> DiscountEngine<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    /// Run one evaluation pass
    ///
    /// Returns an empty outcome without touching anything when the session
    /// already has a pass in progress. Malformed rules are logged and
    /// skipped; they never abort the rest of the list.
    pub fn evaluate(
        &self,
        session: &mut CartSession,
        cart: &CartSnapshot,
        catalog: &dyn ProductCatalog,
        rules: &[Rule],
    ) -> EvaluationOutcome {
        if !session.begin_pass() {
            tracing::debug!("evaluation already in progress, skipping nested pass");
            return EvaluationOutcome::default();
        }
        session.reset_tracking();

        let mut cart_total_rules = Vec::new();
        let mut item_quantity_rules = Vec::new();
        for rule in rules {
            match Self::partition_key(rule) {
                Some(TriggerKind::CartTotal) => cart_total_rules.push(rule),
                Some(TriggerKind::ItemQuantity) => item_quantity_rules.push(rule),
                _ => {}
            }
        }

        let mut outcome = EvaluationOutcome::default();
        for rule in cart_total_rules {
            self.evaluate_cart_total(rule, cart, &mut outcome);
        }
        for rule in item_quantity_rules {
            self.evaluate_item_quantity(rule, cart, catalog, &mut outcome);
        }

        session.discount_applied = !outcome.discounts.is_empty();
        session.applied_rule_ids = outcome.discounts.iter().map(|d| d.rule.id).collect();
        session.discounts = outcome.discounts.clone();
        session.messages = outcome.messages.clone();

        session.finish_pass();
        outcome
    }

    /// Which trigger group a rule evaluates in, `None` when it is skipped
    fn partition_key(rule: &Rule) -> Option<TriggerKind> {
        if rule.status != RuleStatus::Enabled {
            tracing::debug!(rule_id = rule.id, "skipping disabled rule");
            return None;
        }
        if rule.kind != RuleKind::CartBased {
            tracing::warn!(rule_id = rule.id, "skipping rule with unrecognized type");
            return None;
        }
        let Some(trigger) = &rule.trigger else {
            tracing::warn!(rule_id = rule.id, "skipping rule without trigger");
            return None;
        };
        if rule.discount.is_none() {
            tracing::warn!(rule_id = rule.id, "skipping rule without discount");
            return None;
        }
        match trigger.kind {
            TriggerKind::Unknown => {
                tracing::warn!(rule_id = rule.id, "skipping rule with unrecognized trigger");
                None
            }
            kind => Some(kind),
        }
    }

    fn evaluate_cart_total(
        &self,
        rule: &Rule,
        cart: &CartSnapshot,
        outcome: &mut EvaluationOutcome,
    ) {
        // partition_key guarantees both are present
        let (Some(trigger), Some(discount)) = (&rule.trigger, &rule.discount) else {
            return;
        };
        let label = discount_label(discount, &self.formatter);

        if cart.cart_total < trigger.value {
            let remaining = self.formatter.format(trigger.value - cart.cart_total);
            outcome
                .messages
                .push(CartMessage::threshold(cart_total_threshold(
                    &label, &remaining,
                )));
            return;
        }

        let amount = compute_discount(discount, cart.cart_total);
        if amount <= 0.0 {
            tracing::debug!(rule_id = rule.id, "cart total rule computed zero discount");
            return;
        }

        outcome.fees.push(FeeAdjustment::new(
            "cart_total_discount_",
            format!("{label} Discount"),
            amount,
        ));
        outcome.discounts.push(DiscountResult {
            rule: rule.clone(),
            amount,
            applied_to: None,
        });
        outcome
            .messages
            .push(CartMessage::success(self.success_text(rule, || {
                cart_total_success(&label)
            })));
    }

    fn evaluate_item_quantity(
        &self,
        rule: &Rule,
        cart: &CartSnapshot,
        catalog: &dyn ProductCatalog,
        outcome: &mut EvaluationOutcome,
    ) {
        let (Some(trigger), Some(discount)) = (&rule.trigger, &rule.discount) else {
            return;
        };
        let label = discount_label(discount, &self.formatter);
        let targeted = !trigger.is_catch_all();
        let set = applicable_items(trigger, cart, catalog);

        if (set.total_quantity as f64) < trigger.value {
            // A targeted rule with nothing qualifying in the cart stays silent
            if set.is_empty() && targeted {
                return;
            }
            let remaining = trigger.value - set.total_quantity as f64;
            outcome
                .messages
                .push(CartMessage::threshold(item_quantity_threshold(
                    &label, remaining, targeted,
                )));
            return;
        }

        let amount = compute_discount(discount, set.total_amount);
        if amount <= 0.0 {
            tracing::debug!(rule_id = rule.id, "item quantity rule computed zero discount");
            return;
        }

        let fee_name = if targeted {
            format!("{label} (Selected Items) Discount")
        } else {
            format!("{label} Discount")
        };
        outcome
            .fees
            .push(FeeAdjustment::new("quantity_discount_", fee_name, amount));
        outcome
            .messages
            .push(CartMessage::success(self.success_text(rule, || {
                item_quantity_success(&label, targeted, &set.names)
            })));
        outcome.discounts.push(DiscountResult {
            rule: rule.clone(),
            amount,
            applied_to: Some(set),
        });
    }

    /// A non-empty rule message overrides the default success template
    fn success_text(&self, rule: &Rule, default: impl FnOnce() -> String) -> String {
        if rule.message.is_empty() {
            default()
        } else {
            rule.message.clone()
        }
    }
}
