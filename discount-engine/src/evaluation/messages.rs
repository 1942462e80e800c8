//! Message composition
//!
//! Discount labels and the progress/confirmation message templates. Price
//! formatting is an injectable strategy so hosts can plug in their own
//! currency rendering; [`BasicPriceFormatter`] is the `$#.##` default.

use serde::{Deserialize, Serialize};
use shared::models::{Discount, DiscountKind};

/// How a message should be presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Threshold met, discount applied
    Success,
    /// Progress toward an unmet threshold
    Threshold,
}

/// One message produced by an evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl CartMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn threshold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Threshold,
        }
    }
}

/// Injectable currency rendering strategy
pub trait PriceFormatter {
    fn format(&self, amount: f64) -> String;
}

/// Default `$#.##` formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPriceFormatter;

impl PriceFormatter for BasicPriceFormatter {
    fn format(&self, amount: f64) -> String {
        format!("${amount:.2}")
    }
}

/// Discount label: `{value}%` for percentage, formatted price otherwise
pub fn discount_label(discount: &Discount, formatter: &dyn PriceFormatter) -> String {
    match discount.kind {
        DiscountKind::Percentage => format!("{}%", format_number(discount.value)),
        _ => formatter.format(discount.value),
    }
}

/// Render a numeric value without a trailing `.0` (10 → "10", 12.5 → "12.5")
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Maximum product names spelled out in a success message
const MAX_NAMED_PRODUCTS: usize = 3;

pub fn cart_total_success(label: &str) -> String {
    format!("{label} discount has been applied")
}

pub fn cart_total_threshold(label: &str, remaining_price: &str) -> String {
    format!("Spend {remaining_price} more to get {label} discount!")
}

/// Success message for an item-quantity rule
///
/// Targeted rules name up to 3 matched products ("…" when more exist), or
/// fall back to "selected items" when no names are available.
pub fn item_quantity_success(label: &str, targeted: bool, names: &[String]) -> String {
    let scope = if !targeted {
        String::new()
    } else if names.is_empty() {
        " to selected items".to_string()
    } else {
        let mut listed = names
            .iter()
            .take(MAX_NAMED_PRODUCTS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if names.len() > MAX_NAMED_PRODUCTS {
            listed.push('…');
        }
        format!(" to {listed}")
    };
    format!("{label} discount has been applied{scope}")
}

/// Threshold message for an item-quantity rule; `remaining` is truncated to
/// a whole item count
pub fn item_quantity_threshold(label: &str, remaining: f64, targeted: bool) -> String {
    let qualifier = if targeted { "qualifying " } else { "" };
    format!(
        "Add {} more {qualifier}item(s) to get {label} discount!",
        remaining as i64
    )
}
