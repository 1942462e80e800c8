//! Rule-based cart discount engine
//!
//! Administrators define rules that fire when a cart satisfies a condition
//! (minimum spend, or minimum quantity of selected products/categories).
//! Given a cart snapshot and the rule list, the engine computes fee
//! adjustments (negative line items) and progress/confirmation messages.
//!
//! The engine performs no I/O: the host resolves the cart, catalog, and
//! rule list up front and receives fees/messages as plain return values.
//! Rule persistence is a seam ([`rules::RulePersistence`]); the HTTP
//! surface, auth, and rendering belong to the host.

pub mod catalog;
pub mod display;
pub mod evaluation;
pub mod money;
pub mod rules;
pub mod upsell;

// Re-exports for the common entry points
pub use catalog::{MemoryCatalog, ProductCatalog};
pub use evaluation::{CartSession, DiscountEngine, EvaluationOutcome};
pub use rules::{RuleStore, validate_rule};
