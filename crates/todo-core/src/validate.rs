//! Pure validation and input composition.
//!
//! Stateless by design: each screen calls these functions directly instead
//! of sharing a view-model singleton. No side effects, no caching.

use crate::errors::{Result, TodoError};
use crate::priority::Priority;
use crate::task::Task;

/// True iff both title and description are non-empty after trimming.
#[must_use]
pub fn verify(title: &str, description: &str) -> bool {
    !title.trim().is_empty() && !description.trim().is_empty()
}

/// Compose raw screen input into an unpersisted [`Task`].
///
/// Rejects with [`TodoError::Validation`] when either field is empty and
/// with [`TodoError::UnrecognizedPriority`] when the selector label does
/// not match a priority. The caller aborts the insert/update on either
/// error; only the validation case is shown to the user as a prompt to
/// complete the form.
pub fn task_from_input(title: &str, description: &str, priority_label: &str) -> Result<Task> {
    if !verify(title, description) {
        return Err(TodoError::Validation);
    }
    let priority = Priority::parse_label(priority_label)?;
    Ok(Task::new(title, description, priority))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn verify_rejects_empty_fields() {
        assert!(!verify("", "x"));
        assert!(!verify("x", ""));
        assert!(!verify("", ""));
    }

    #[test]
    fn verify_accepts_non_empty_fields() {
        assert!(verify("a", "b"));
    }

    #[test]
    fn verify_trims_whitespace() {
        assert!(!verify("   ", "x"));
        assert!(!verify("x", " \t\n"));
        assert!(verify(" a ", " b "));
    }

    #[test]
    fn task_from_input_builds_unpersisted_task() {
        let task = task_from_input("Groceries", "Milk and eggs", "High Priority").unwrap();
        assert_eq!(task.id, 0);
        assert_eq!(task.title, "Groceries");
        assert_eq!(task.description, "Milk and eggs");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn task_from_input_keeps_raw_text() {
        // Trimming is for validation only — stored text is what was typed.
        let task = task_from_input(" Groceries ", "Milk", "Low Priority").unwrap();
        assert_eq!(task.title, " Groceries ");
    }

    #[test]
    fn task_from_input_rejects_incomplete_form() {
        assert_matches!(
            task_from_input("", "Milk", "High Priority"),
            Err(TodoError::Validation)
        );
        assert_matches!(
            task_from_input("Groceries", "", "High Priority"),
            Err(TodoError::Validation)
        );
    }

    #[test]
    fn task_from_input_rejects_bad_label() {
        assert_matches!(
            task_from_input("Groceries", "Milk", "Top Priority"),
            Err(TodoError::UnrecognizedPriority(_))
        );
    }

    #[test]
    fn validation_checked_before_label() {
        // Both fields empty and a bad label: the form error wins.
        assert_matches!(task_from_input("", "", "bogus"), Err(TodoError::Validation));
    }
}
