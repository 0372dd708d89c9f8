//! Category budget model.

use serde::{Deserialize, Serialize};

use super::BudgetId;

/// A per-category spending ceiling.
///
/// The amount spent is never stored; it is recomputed from expense
/// transactions of the same category (see [`crate::aggregate::budget_progress`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Unique identifier.
    pub id: BudgetId,
    /// Category name the budget applies to.
    pub category: String,
    /// Spending ceiling (>= 0).
    pub limit: f64,
}

/// A budget that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    /// Category name.
    pub category: String,
    /// Spending ceiling (>= 0).
    pub limit: f64,
}

impl NewBudget {
    /// Attaches an id, producing a storable [`Budget`].
    #[inline]
    #[must_use]
    pub fn with_id(self, id: BudgetId) -> Budget {
        Budget {
            id,
            category: self.category,
            limit: self.limit,
        }
    }
}
