//! Rule lifecycle
//!
//! Draft sanitization and validation, the in-memory rule store with its
//! write-through persistence seam, and legacy record migration. The
//! evaluation engine only ever reads the resulting `&[Rule]`.

pub mod migration;
pub mod store;
pub mod validator;

pub use migration::upgrade_records;
pub use store::{NoopPersistence, RulePersistence, RuleStore, StoreWriteError};
pub use validator::{sanitize_draft, validate_rule};
