//! The `Task` entity.

use serde::{Deserialize, Serialize};

use crate::priority::Priority;

/// A to-do item.
///
/// `id` is assigned by the store on insert; `0` means the task has not been
/// persisted yet. A persisted task always has a non-zero id and non-empty
/// title/description — enforced upstream by [`crate::validate`], not by the
/// store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row identity. `0` = not yet persisted.
    #[serde(default)]
    pub id: i64,
    /// Short title shown in the list.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Task priority.
    pub priority: Priority,
}

impl Task {
    /// Build an unpersisted task (`id == 0`).
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Whether this task has been persisted (has a store-assigned id).
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Copy of this task with a different id.
    ///
    /// Used when an update screen rebuilds the record from user input but
    /// keeps the original identity.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
