//! Data models
//!
//! Shared between the engine and any host (HTTP API, admin UI bridge).
//! Rule records are the persisted wire shape; everything else is a
//! read-only view supplied by the host per evaluation.

pub mod cart;
pub mod catalog;
pub mod rule;
pub mod settings;

// Re-exports
pub use cart::*;
pub use catalog::*;
pub use rule::*;
pub use settings::*;
