//! Unified error types for the discount engine
//!
//! [`RuleError`] covers the whole taxonomy: structural format errors and
//! trigger conflicts (surfaced at create/update time), missing targets,
//! and persistence commit failures. Display strings are the exact
//! end-user sentences; hosts map errors to HTTP via [`RuleError::http_status`].
//!
//! Evaluation-time problems never become errors: a malformed rule is
//! logged and skipped so one bad record cannot abort the pass.

use http::StatusCode;
use thiserror::Error;

/// Which store mutation failed to commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for StoreAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Rule lifecycle error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    // ==================== Format errors (400) ====================
    /// Rule type is not `cart_based`, or trigger/discount missing entirely
    #[error("Invalid rule format. Missing required fields.")]
    MissingFields,
    /// Trigger or discount present but missing its type or value
    #[error("Invalid rule format. Missing trigger or discount details.")]
    MissingDetails,
    /// Trigger or discount value is not a finite number
    #[error("Invalid numeric values provided.")]
    InvalidNumbers,

    // ==================== Conflict errors (400) ====================
    #[error("A rule with the same cart total trigger already exists.")]
    DuplicateCartTotal,
    #[error("A rule with the same quantity trigger for all products already exists.")]
    DuplicateCatchAll,
    #[error("A rule with overlapping products or categories already exists for the same quantity.")]
    OverlappingTargets,

    // ==================== Lifecycle errors ====================
    #[error("Rule not found.")]
    NotFound,
    /// Persistence backend refused the commit; the store stays unchanged
    #[error("Failed to {0} rule.")]
    Store(StoreAction),
}

impl RuleError {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::MissingFields
            | Self::MissingDetails
            | Self::InvalidNumbers
            | Self::DuplicateCartTotal
            | Self::DuplicateCatchAll
            | Self::OverlappingTargets => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is a pre-commit validation error (format or conflict)
    pub fn is_validation(&self) -> bool {
        self.http_status() == StatusCode::BAD_REQUEST
    }
}

/// Result alias for rule lifecycle operations
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(RuleError::MissingFields.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(RuleError::DuplicateCartTotal.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(RuleError::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RuleError::Store(StoreAction::Update).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(
            RuleError::MissingFields.to_string(),
            "Invalid rule format. Missing required fields."
        );
        assert_eq!(
            RuleError::Store(StoreAction::Create).to_string(),
            "Failed to create rule."
        );
        assert_eq!(RuleError::NotFound.to_string(), "Rule not found.");
    }

    #[test]
    fn test_is_validation() {
        assert!(RuleError::OverlappingTargets.is_validation());
        assert!(!RuleError::NotFound.is_validation());
        assert!(!RuleError::Store(StoreAction::Delete).is_validation());
    }
}
