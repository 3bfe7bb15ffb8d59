//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type shared by every bounded context.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No live aggregate exists for the identifier.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict while appending to a stream.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer loaded.
        expected: i64,
        /// The version found in the store.
        actual: i64,
    },

    /// Input failed validation before any domain logic ran.
    #[error("validation error: {0}")]
    Validation(String),

    /// A well-formed command was refused by a domain rule.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_wraps_rule_message() {
        let err = DomainError::Rejected("illegal move: robot cannot move north".into());

        assert_eq!(
            err.to_string(),
            "command rejected: illegal move: robot cannot move north"
        );
    }

    #[test]
    fn test_concurrency_conflict_display_names_versions() {
        let id = Uuid::nil();
        let err = DomainError::ConcurrencyConflict {
            aggregate_id: id,
            expected: 1,
            actual: 3,
        };

        assert_eq!(
            err.to_string(),
            format!("concurrency conflict on aggregate {id}: expected version 1, found 3")
        );
    }
}
