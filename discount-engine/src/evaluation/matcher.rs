//! Applicability Matcher
//!
//! Determines which cart lines a trigger applies to. Matching is
//! two-pass: trigger tokens (ids or display names, as stored by the
//! rule-authoring UI) are first resolved to canonical id sets through the
//! catalog, then lines are matched purely on ids.

use crate::catalog::ProductCatalog;
use crate::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::{CartSnapshot, Trigger, TriggerKind};
use std::collections::{BTreeMap, HashSet};

/// One matched cart line
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLine {
    pub product_id: i64,
    pub variation_id: Option<i64>,
    pub quantity: u32,
    pub line_total: f64,
}

/// The cart lines a trigger applies to, plus their aggregates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicableSet {
    /// Matched lines keyed by cart line key
    pub items: BTreeMap<String, MatchedLine>,
    pub total_quantity: u32,
    /// Sum of matched line totals, rounded once after accumulation
    pub total_amount: f64,
    /// Matched display names in cart scan order, deduplicated
    /// case-insensitively (for message composition)
    pub names: Vec<String>,
}

impl ApplicableSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Trigger tokens resolved to canonical id sets
#[derive(Debug, Clone)]
struct ResolvedTargets {
    catch_all: bool,
    /// Product and variation ids named by the trigger
    product_ids: HashSet<i64>,
    category_ids: HashSet<i64>,
}

impl ResolvedTargets {
    fn resolve(trigger: &Trigger, catalog: &dyn ProductCatalog) -> Self {
        if trigger.kind == TriggerKind::ItemQuantity && trigger.is_catch_all() {
            return Self {
                catch_all: true,
                product_ids: HashSet::new(),
                category_ids: HashSet::new(),
            };
        }

        let mut product_ids = HashSet::new();
        for token in &trigger.products {
            match token.parse::<i64>() {
                Ok(id) => {
                    product_ids.insert(id);
                }
                // Name token: take every product with that display name
                Err(_) => product_ids.extend(catalog.products_named(token)),
            }
        }

        let mut category_ids = HashSet::new();
        for token in &trigger.categories {
            match token.parse::<i64>() {
                Ok(id) => {
                    category_ids.insert(id);
                }
                Err(_) => category_ids.extend(catalog.categories_named(token)),
            }
        }

        Self {
            catch_all: false,
            product_ids,
            category_ids,
        }
    }

    fn matches(&self, product_id: i64, variation_id: Option<i64>, catalog: &dyn ProductCatalog) -> bool {
        if self.catch_all {
            return true;
        }
        if self.product_ids.contains(&product_id) {
            return true;
        }
        if let Some(vid) = variation_id
            && self.product_ids.contains(&vid)
        {
            return true;
        }
        // Categories only come into play when the product lists did not match
        if !self.category_ids.is_empty() {
            return catalog
                .product_categories(product_id)
                .iter()
                .any(|c| self.category_ids.contains(c));
        }
        false
    }
}

/// Collect the applicable set for a trigger against a cart snapshot
pub fn applicable_items(
    trigger: &Trigger,
    cart: &CartSnapshot,
    catalog: &dyn ProductCatalog,
) -> ApplicableSet {
    let targets = ResolvedTargets::resolve(trigger, catalog);

    let mut set = ApplicableSet::default();
    let mut amount = Decimal::ZERO;

    for line in &cart.lines {
        if !targets.matches(line.product_id, line.variation_id, catalog) {
            continue;
        }

        set.items.insert(
            line.key.clone(),
            MatchedLine {
                product_id: line.product_id,
                variation_id: line.variation_id,
                quantity: line.quantity,
                line_total: line.line_total,
            },
        );
        set.total_quantity += line.quantity;
        amount += to_decimal(line.line_total);

        if !set
            .names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(&line.name))
        {
            set.names.push(line.name.clone());
        }
    }

    set.total_amount = to_f64(amount);
    set
}
