//! The ordered priority enumeration.
//!
//! Two string representations exist and must never be mixed:
//!
//! - **Storage name** (`LOW` / `MEDIUM` / `HIGH`) — what the database
//!   persists, via [`Priority::as_str`] and [`std::str::FromStr`].
//! - **Display label** (`Low Priority` / ...) — what a screen shows in its
//!   priority selector, via [`Priority::label`] and [`Priority::parse_label`].
//!
//! `parse_label` is the exact inverse of `label`; anything else breaks the
//! round-trip of user selections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TodoError;

/// Task priority, ordered by priority value: `Low < Medium < High`.
///
/// Derived `Ord` gives `High` the greatest rank, so "descending" listings
/// put high-priority tasks first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Lowest priority.
    Low,
    /// Middle priority.
    Medium,
    /// Highest priority.
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Storage name, as persisted by the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Numeric rank used for sort ordering (`Low` = 0, `High` = 2).
    #[must_use]
    pub fn rank(self) -> i64 {
        self as i64
    }

    /// Human-readable label shown by a priority selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }

    /// Parse a display label back into a priority.
    ///
    /// Exact inverse of [`Priority::label`]. Any other input is a
    /// [`TodoError::UnrecognizedPriority`] — there is no fallback default.
    pub fn parse_label(label: &str) -> Result<Priority, TodoError> {
        match label {
            "Low Priority" => Ok(Priority::Low),
            "Medium Priority" => Ok(Priority::Medium),
            "High Priority" => Ok(Priority::High),
            other => Err(TodoError::UnrecognizedPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    /// Parse a storage name (`LOW` / `MEDIUM` / `HIGH`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(TodoError::UnrecognizedPriority(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
