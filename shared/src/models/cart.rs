//! Cart Snapshot Model
//!
//! Read-only view of the live cart supplied by the host before evaluation.
//! The engine performs no I/O of its own.

use serde::{Deserialize, Serialize};

/// One cart line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Host-assigned cart line key, stable within one cart
    pub key: String,
    pub product_id: i64,
    /// Variation id when the line is a product variation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<i64>,
    /// Product display name as shown in the cart
    pub name: String,
    pub quantity: u32,
    /// Line total after per-line adjustments, before fees
    pub line_total: f64,
}

/// Snapshot of the cart at evaluation time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    /// Cart-contents total (sum of line totals, before fees)
    pub cart_total: f64,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>, cart_total: f64) -> Self {
        Self { lines, cart_total }
    }
}
