//! Error types for validation and priority parsing.
//!
//! [`TodoError`] covers the two rejection paths of the input layer. Storage
//! failures have their own error type in `todo-store` — this crate never
//! touches the database.

use thiserror::Error;

/// Errors produced while turning raw user input into a [`crate::Task`].
#[derive(Debug, Error)]
pub enum TodoError {
    /// Title or description was empty after trimming.
    ///
    /// Recovered at the call site by rejecting the operation and prompting
    /// the user to complete the form; never propagated further.
    #[error("validation failed: title and description must be non-empty")]
    Validation,

    /// A display label did not match any priority.
    ///
    /// The label set must exactly match [`crate::Priority::label`] output,
    /// so this is a programmer/config error, not a user-recoverable
    /// condition. It aborts the insert/update being composed.
    #[error("unrecognized priority label: {0}")]
    UnrecognizedPriority(String),
}

/// Convenience type alias for validation/parsing results.
pub type Result<T> = std::result::Result<T, TodoError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        let err = TodoError::Validation;
        assert_eq!(
            err.to_string(),
            "validation failed: title and description must be non-empty"
        );
    }

    #[test]
    fn unrecognized_priority_display() {
        let err = TodoError::UnrecognizedPriority("Urgent".into());
        assert_eq!(err.to_string(), "unrecognized priority label: Urgent");
    }

    #[test]
    fn result_alias() {
        fn example() -> Result<&'static str> {
            Ok("ok")
        }
        assert_eq!(example().unwrap(), "ok");
    }
}
