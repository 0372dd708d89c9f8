//! Savings goal model.

use serde::{Deserialize, Serialize};

use super::GoalId;

/// A savings target with manually tracked progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier.
    pub id: GoalId,
    /// Display name.
    pub name: String,
    /// Amount to reach (>= 0).
    pub target_amount: f64,
    /// Amount saved so far; edited directly, never derived.
    pub current_amount: f64,
}

/// A goal that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    /// Display name.
    pub name: String,
    /// Amount to reach (>= 0).
    pub target_amount: f64,
    /// Amount saved so far.
    pub current_amount: f64,
}

impl NewGoal {
    /// Attaches an id, producing a storable [`Goal`].
    #[inline]
    #[must_use]
    pub fn with_id(self, id: GoalId) -> Goal {
        Goal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
        }
    }
}
