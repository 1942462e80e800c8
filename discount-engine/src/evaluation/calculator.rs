//! Discount Calculator
//!
//! Turns a discount spec into a concrete amount against a base. Uses
//! rust_decimal internally and rounds half-up to 2 decimal places at the
//! edge.

use crate::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::{Discount, DiscountKind};

/// Compute the discount amount for a base amount
///
/// Percentage discounts round half-up to 2 decimals; fixed discounts are
/// clamped to the base so the host never goes negative. Returns 0 for a
/// non-positive base, a non-positive result, or an unrecognized discount
/// type.
pub fn compute_discount(discount: &Discount, base_amount: f64) -> f64 {
    let base = to_decimal(base_amount);
    if base <= Decimal::ZERO {
        return 0.0;
    }

    let value = to_decimal(discount.value);
    let amount = match discount.kind {
        DiscountKind::Percentage => base * value / Decimal::ONE_HUNDRED,
        DiscountKind::Fixed => value.min(base),
        DiscountKind::Unknown => {
            tracing::debug!("unrecognized discount type, computing 0");
            Decimal::ZERO
        }
    };

    if amount <= Decimal::ZERO {
        return 0.0;
    }
    to_f64(amount)
}
