//! Rule evaluation
//!
//! The per-pass pipeline: resolve which cart lines a trigger applies to
//! (matcher), turn a discount spec into an amount (calculator), fill the
//! message templates (messages), and orchestrate a full pass over the
//! rule list (engine).

pub mod calculator;
pub mod engine;
pub mod matcher;
pub mod messages;

pub use calculator::compute_discount;
pub use engine::{
    CartSession, DiscountEngine, DiscountResult, EvaluationOutcome, FeeAdjustment,
};
pub use matcher::{ApplicableSet, MatchedLine, applicable_items};
pub use messages::{BasicPriceFormatter, CartMessage, MessageKind, PriceFormatter};
