//! Aggregate engine: totals, budget and goal progress, recent slices.
//!
//! Every function here is a pure derivation over the record sets. Nothing is
//! cached; callers recompute on each read.

use crate::models::{Budget, Goal, Transaction, TransactionType};

/// Number of transactions shown in the dashboard's recent list.
pub const RECENT_LIMIT: usize = 5;

/// Highest percentage reported by progress computations.
const FULL: f64 = 100.0;

/// Income, expense and balance sums over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
}

/// Sums income and expenses.
///
/// `balance` is always exactly `income - expenses`.
#[inline]
#[must_use]
pub fn totals<'tx, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'tx Transaction>,
{
    let (income, expenses) =
        transactions
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(income, expenses), tx| match tx.kind {
                TransactionType::Income => (income + tx.amount, expenses),
                TransactionType::Expense => (income, expenses + tx.amount),
            });
    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Sums expense amounts recorded against `category`.
#[inline]
#[must_use]
pub fn spent_in_category(transactions: &[Transaction], category: &str) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.kind == TransactionType::Expense && tx.category == category)
        .map(|tx| tx.amount)
        .sum()
}

/// Spend-vs-limit view of a single budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    /// The budget being tracked.
    pub budget: Budget,
    /// Expenses recorded in the budget's category.
    pub spent: f64,
    /// Share of the limit used, clamped to `[0, 100]`.
    pub percentage: f64,
    /// Whether the limit has been reached.
    pub is_over_budget: bool,
    /// `limit - spent`; negative once the limit is exceeded.
    pub remaining: f64,
}

/// Computes how much of a budget's limit has been spent.
///
/// A zero limit never divides: any spending reports 100% and over budget,
/// no spending reports 0%.
#[inline]
#[must_use]
pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let spent = spent_in_category(transactions, &budget.category);
    let percentage = clamped_percentage(spent, budget.limit);
    BudgetProgress {
        budget: budget.clone(),
        spent,
        percentage,
        is_over_budget: percentage >= FULL,
        remaining: budget.limit - spent,
    }
}

/// Computes [`budget_progress`] for every budget, in input order.
#[inline]
#[must_use]
pub fn budgets_progress(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .map(|budget| budget_progress(budget, transactions))
        .collect()
}

/// Progress of a savings goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// The goal being tracked.
    pub goal: Goal,
    /// Share of the target saved, clamped to `[0, 100]`.
    pub percentage: f64,
    /// Whether the target has been reached.
    pub is_complete: bool,
}

/// Computes how far a goal has progressed, with the same zero-target
/// handling as [`budget_progress`].
#[inline]
#[must_use]
pub fn goal_progress(goal: &Goal) -> GoalProgress {
    let percentage = clamped_percentage(goal.current_amount, goal.target_amount);
    GoalProgress {
        goal: goal.clone(),
        percentage,
        is_complete: percentage >= FULL,
    }
}

/// Returns the first `n` transactions in store order (newest first by
/// convention). No re-sorting by date happens.
#[inline]
#[must_use]
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    transactions.split_at(n.min(transactions.len())).0
}

/// Everything the dashboard shows, derived in one pass over the records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Totals over all transactions.
    pub totals: Totals,
    /// The [`RECENT_LIMIT`] most recent transactions.
    pub recent: Vec<Transaction>,
    /// Progress of every budget.
    pub budgets: Vec<BudgetProgress>,
    /// Progress of every goal.
    pub goals: Vec<GoalProgress>,
}

/// Derives the dashboard view model.
#[inline]
#[must_use]
pub fn dashboard(transactions: &[Transaction], budgets: &[Budget], goals: &[Goal]) -> Dashboard {
    Dashboard {
        totals: totals(transactions),
        recent: recent(transactions, RECENT_LIMIT).to_vec(),
        budgets: budgets_progress(budgets, transactions),
        goals: goals.iter().map(goal_progress).collect(),
    }
}

/// `part / whole` as a percentage in `[0, 100]`, never NaN or infinite.
fn clamped_percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0_f64 {
        return if part > 0.0_f64 { FULL } else { 0.0_f64 };
    }
    (part / whole * FULL).clamp(0.0_f64, FULL)
}
