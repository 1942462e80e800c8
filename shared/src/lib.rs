//! Shared types for the cart discount engine
//!
//! Wire-compatible data models (rules, cart snapshots, catalog records,
//! display settings) and the error types used across crates.

pub mod error;
pub mod models;

// Re-exports
pub use error::{RuleError, RuleResult, StoreAction};
pub use serde::{Deserialize, Serialize};
