//! Record store with an integrated persistence mirror.
//!
//! [`RecordStore`] owns the four record sets (transactions, budgets, goals,
//! bills) plus the session settings, and writes every mutation through to a
//! [`Storage`] backend. Persistence is best-effort: a failed write is logged
//! and the in-memory update still stands. A value that cannot be read back
//! at startup is replaced by the matching [`Seed`] default.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::aggregate::{self, BudgetProgress, Dashboard, GoalProgress, Totals};
use crate::error::{FinControlError, Result};
use crate::models::{
    Bill, BillId, Budget, BudgetId, Credentials, Goal, GoalId, NaiveDate, NewBill, NewBudget,
    NewGoal, NewTransaction, Theme, Transaction, TransactionDraft, TransactionId,
};
use crate::notifications::{self, PendingBill};
use crate::report::{DateRange, Report};
use crate::storage::{Storage, StorageKey};

/// Question asked before a transaction is deleted.
pub const DELETE_TRANSACTION_PROMPT: &str = "Tem certeza que deseja excluir esta transação?";

/// Question asked before logging out.
pub const LOGOUT_PROMPT: &str = "Tem certeza que deseja sair? Seus dados serão restaurados.";

/// Blocking yes/no confirmation gate.
///
/// Any `Fn(&str) -> bool` closure is a `Confirm`.
pub trait Confirm {
    /// Asks `prompt` and returns `true` if the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool + ?Sized> Confirm for F {
    #[inline]
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Initial values of the store, restored by
/// [`RecordStore::reset_to_defaults`] and used whenever a persisted value is
/// missing or unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    /// Initial transactions.
    pub transactions: Vec<Transaction>,
    /// Initial budgets.
    pub budgets: Vec<Budget>,
    /// Initial goals.
    pub goals: Vec<Goal>,
    /// Initial bills.
    pub bills: Vec<Bill>,
    /// Initial theme.
    pub theme: Theme,
    /// Whether bill notifications start enabled.
    pub notifications_enabled: bool,
}

impl Default for Seed {
    #[inline]
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            bills: Vec::new(),
            theme: Theme::Light,
            notifications_enabled: true,
        }
    }
}

/// Result of a transaction deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The transaction was removed.
    Deleted,
    /// No transaction has that id; nothing changed.
    NotFound,
    /// The user declined the confirmation; nothing changed.
    Cancelled,
}

/// Reads and parses the value stored under `key`, falling back to
/// `default` when the key is missing, unreadable, or malformed.
///
/// Failures are logged, never returned.
#[inline]
pub fn load_key<S, T>(storage: &S, key: StorageKey, default: T) -> T
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "discarding malformed stored value");
                default
            }
        },
        Ok(None) => default,
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "failed to read stored value");
            default
        }
    }
}

/// Generates the literal setter and the read-modify-write updater of each
/// persisted field.
macro_rules! define_slots {
    ($(
        $field:ident: $ty:ty => $key:expr,
        set: $setter:ident,
        update: $updater:ident;
    )*) => {
        $(
            #[doc = concat!("Replaces `", stringify!($field), "` and mirrors it to storage.")]
            #[inline]
            pub fn $setter(&mut self, value: $ty) {
                self.$field = value;
                self.persist($key, &self.$field);
            }

            #[doc = concat!(
                "Replaces `", stringify!($field),
                "` with a function of its previous value and mirrors it to storage."
            )]
            #[inline]
            pub fn $updater<F: FnOnce($ty) -> $ty>(&mut self, update: F) {
                let previous = core::mem::take(&mut self.$field);
                self.$field = update(previous);
                self.persist($key, &self.$field);
            }
        )*
    };
}

/// Builder for constructing a [`RecordStore`].
#[derive(Debug)]
pub struct RecordStoreBuilder<S: Storage> {
    /// Storage backend.
    storage: Option<S>,
    /// Defaults for missing values.
    seed: Seed,
}

impl<S: Storage> RecordStoreBuilder<S> {
    /// Sets the storage backend.
    #[inline]
    #[must_use]
    pub fn storage(mut self, storage: S) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the defaults used for missing values and on reset.
    #[inline]
    #[must_use]
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the store and restores its state from storage.
    ///
    /// # Errors
    ///
    /// Returns [`FinControlError::Storage`] if no storage was provided.
    #[inline]
    pub fn build(self) -> Result<RecordStore<S>> {
        let storage = self
            .storage
            .ok_or_else(|| FinControlError::Storage("storage backend is required".into()))?;
        let seed = self.seed;
        let mut store = RecordStore {
            storage,
            transactions: seed.transactions.clone(),
            budgets: seed.budgets.clone(),
            goals: seed.goals.clone(),
            bills: seed.bills.clone(),
            theme: seed.theme,
            notifications_enabled: seed.notifications_enabled,
            authenticated: false,
            last_id: 0,
            seed,
        };
        store.load();
        Ok(store)
    }
}

/// In-memory record store mirrored to a [`Storage`] backend.
///
/// Use [`RecordStore::builder()`] to construct an instance.
#[derive(Debug)]
pub struct RecordStore<S: Storage> {
    /// Persistence backend.
    storage: S,
    /// Defaults for missing values and resets.
    seed: Seed,
    /// Transactions, newest first.
    transactions: Vec<Transaction>,
    /// Category budgets.
    budgets: Vec<Budget>,
    /// Savings goals.
    goals: Vec<Goal>,
    /// Bill reminders.
    bills: Vec<Bill>,
    /// Active theme.
    theme: Theme,
    /// Whether bill notifications are shown.
    notifications_enabled: bool,
    /// Whether a user is logged in.
    authenticated: bool,
    /// Last numeric id handed out, to keep ids strictly increasing.
    last_id: i64,
}

impl<S: Storage> RecordStore<S> {
    /// Creates a new builder for configuring the store.
    #[inline]
    #[must_use]
    pub fn builder() -> RecordStoreBuilder<S> {
        RecordStoreBuilder {
            storage: None,
            seed: Seed::default(),
        }
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Restores every tracked key from storage, substituting the seed value
    /// for anything missing or malformed.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub fn load(&mut self) {
        self.authenticated = load_key(&self.storage, StorageKey::IsAuthenticated, false);
        self.transactions = load_key(
            &self.storage,
            StorageKey::Transactions,
            self.seed.transactions.clone(),
        );
        self.budgets = load_key(&self.storage, StorageKey::Budgets, self.seed.budgets.clone());
        self.goals = load_key(&self.storage, StorageKey::Goals, self.seed.goals.clone());
        self.bills = load_key(&self.storage, StorageKey::Bills, self.seed.bills.clone());
        self.theme = load_key(&self.storage, StorageKey::Theme, self.seed.theme);
        self.notifications_enabled = load_key(
            &self.storage,
            StorageKey::AreNotificationsEnabled,
            self.seed.notifications_enabled,
        );
        self.last_id = self.highest_numeric_id();
        tracing::debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            goals = self.goals.len(),
            bills = self.bills.len(),
            "store loaded"
        );
    }

    /// Serializes `value` and writes it under `key`; failures are logged.
    fn persist<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to serialize value");
                return;
            }
        };
        match self.storage.set(key, &json) {
            Ok(()) => tracing::debug!(key = %key, bytes = json.len(), "value persisted"),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to persist value, keeping in-memory state");
            }
        }
    }

    define_slots! {
        transactions: Vec<Transaction> => StorageKey::Transactions,
            set: set_transactions,
            update: update_transactions;
        budgets: Vec<Budget> => StorageKey::Budgets,
            set: set_budgets,
            update: update_budgets;
        goals: Vec<Goal> => StorageKey::Goals,
            set: set_goals,
            update: update_goals;
        bills: Vec<Bill> => StorageKey::Bills,
            set: set_bills,
            update: update_bills;
        theme: Theme => StorageKey::Theme,
            set: set_theme,
            update: update_theme;
        notifications_enabled: bool => StorageKey::AreNotificationsEnabled,
            set: set_notifications_enabled,
            update: update_notifications_enabled;
        authenticated: bool => StorageKey::IsAuthenticated,
            set: set_authenticated,
            update: update_authenticated;
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Returns the storage backend.
    #[inline]
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns all transactions, newest first.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns all budgets.
    #[inline]
    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Returns all goals.
    #[inline]
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Returns all bills.
    #[inline]
    #[must_use]
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Returns the active theme.
    #[inline]
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns whether bill notifications are shown.
    #[inline]
    #[must_use]
    pub const fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Returns whether a user is logged in.
    #[inline]
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Prepends a transaction with a fresh id and returns that id.
    #[inline]
    pub fn add_transaction(&mut self, transaction: NewTransaction) -> TransactionId {
        let id = TransactionId::new(self.next_id());
        let record = transaction.with_id(id.clone());
        self.update_transactions(|mut previous| {
            previous.insert(0, record);
            previous
        });
        tracing::debug!(id = %id, "transaction added");
        id
    }

    /// Validates a form entry and, if valid, adds it as a transaction.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`TransactionDraft::parse`]; nothing
    /// is stored in that case.
    #[inline]
    pub fn submit_transaction(&mut self, draft: &TransactionDraft) -> Result<TransactionId> {
        let transaction = draft.parse()?;
        Ok(self.add_transaction(transaction))
    }

    /// Deletes a transaction after the user confirms.
    ///
    /// An unknown id returns [`DeleteOutcome::NotFound`] without asking.
    /// Budgets, goals and bills are never touched.
    #[inline]
    pub fn delete_transaction<C: Confirm + ?Sized>(
        &mut self,
        id: &TransactionId,
        confirm: &C,
    ) -> DeleteOutcome {
        if !self.transactions.iter().any(|tx| tx.id == *id) {
            tracing::debug!(id = %id, "delete requested for unknown transaction");
            return DeleteOutcome::NotFound;
        }
        if !confirm.confirm(DELETE_TRANSACTION_PROMPT) {
            return DeleteOutcome::Cancelled;
        }
        self.update_transactions(|mut previous| {
            previous.retain(|tx| tx.id != *id);
            previous
        });
        tracing::debug!(id = %id, "transaction deleted");
        DeleteOutcome::Deleted
    }

    /// Appends a budget with a fresh id and returns that id.
    #[inline]
    pub fn add_budget(&mut self, budget: NewBudget) -> BudgetId {
        let id = BudgetId::new(self.next_id());
        let record = budget.with_id(id.clone());
        self.update_budgets(|mut previous| {
            previous.push(record);
            previous
        });
        id
    }

    /// Appends a goal with a fresh id and returns that id.
    #[inline]
    pub fn add_goal(&mut self, goal: NewGoal) -> GoalId {
        let id = GoalId::new(self.next_id());
        let record = goal.with_id(id.clone());
        self.update_goals(|mut previous| {
            previous.push(record);
            previous
        });
        id
    }

    /// Appends an unpaid bill with a fresh id and returns that id.
    #[inline]
    pub fn add_bill(&mut self, bill: NewBill) -> BillId {
        let id = BillId::new(self.next_id());
        let record = bill.with_id(id.clone());
        self.update_bills(|mut previous| {
            previous.push(record);
            previous
        });
        id
    }

    /// Marks a bill as paid.
    ///
    /// Returns `true` if an unpaid bill was flipped. Unknown ids and already
    /// paid bills are a no-op.
    #[inline]
    pub fn mark_bill_paid(&mut self, id: &BillId) -> bool {
        if !notifications::mark_paid(&mut self.bills, id) {
            tracing::debug!(id = %id, "mark paid had no effect");
            return false;
        }
        self.persist(StorageKey::Bills, &self.bills);
        tracing::debug!(id = %id, pending = self.pending_bill_count(), "bill paid");
        true
    }

    /// Logs in with any non-empty email and password.
    ///
    /// # Errors
    ///
    /// Returns [`FinControlError::MissingCredentials`] if either field is
    /// empty; the session stays logged out.
    #[inline]
    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        self.set_authenticated(true);
        tracing::debug!(email = %credentials.email, "logged in");
        Ok(())
    }

    /// Logs out after the user confirms, restoring the record sets to their
    /// defaults. Returns `false` if the user declined.
    #[inline]
    pub fn logout<C: Confirm + ?Sized>(&mut self, confirm: &C) -> bool {
        if !confirm.confirm(LOGOUT_PROMPT) {
            return false;
        }
        self.set_authenticated(false);
        self.reset_to_defaults();
        tracing::debug!("logged out");
        true
    }

    /// Restores transactions, budgets, goals, bills and the notifications
    /// flag to their seed values. The theme is left untouched.
    #[inline]
    pub fn reset_to_defaults(&mut self) {
        self.set_transactions(self.seed.transactions.clone());
        self.set_budgets(self.seed.budgets.clone());
        self.set_goals(self.seed.goals.clone());
        self.set_bills(self.seed.bills.clone());
        self.set_notifications_enabled(self.seed.notifications_enabled);
    }

    /// Switches between light and dark and returns the new theme.
    #[inline]
    pub fn toggle_theme(&mut self) -> Theme {
        self.update_theme(Theme::toggled);
        self.theme
    }

    /// Flips the notifications flag and returns its new value.
    #[inline]
    pub fn toggle_notifications(&mut self) -> bool {
        self.update_notifications_enabled(|enabled| !enabled);
        self.notifications_enabled
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Income, expense and balance over all transactions.
    #[inline]
    #[must_use]
    pub fn totals(&self) -> Totals {
        aggregate::totals(&self.transactions)
    }

    /// Spend-vs-limit of every budget.
    #[inline]
    #[must_use]
    pub fn budgets_progress(&self) -> Vec<BudgetProgress> {
        aggregate::budgets_progress(&self.budgets, &self.transactions)
    }

    /// Progress of every goal.
    #[inline]
    #[must_use]
    pub fn goals_progress(&self) -> Vec<GoalProgress> {
        self.goals.iter().map(aggregate::goal_progress).collect()
    }

    /// Dashboard view model.
    #[inline]
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        aggregate::dashboard(&self.transactions, &self.budgets, &self.goals)
    }

    /// Unpaid bills sorted by due date, flagged overdue relative to `today`.
    #[inline]
    #[must_use]
    pub fn pending_bills(&self, today: NaiveDate) -> Vec<PendingBill> {
        notifications::pending_bills(&self.bills, today)
    }

    /// Number of unpaid bills.
    #[inline]
    #[must_use]
    pub fn pending_bill_count(&self) -> usize {
        notifications::pending_count(&self.bills)
    }

    /// Badge value for the notification bell.
    #[inline]
    #[must_use]
    pub fn notification_badge(&self) -> Option<usize> {
        notifications::badge(&self.bills, self.notifications_enabled)
    }

    /// Transactions and totals of an inclusive date range.
    #[inline]
    #[must_use]
    pub fn report(&self, range: DateRange) -> Report {
        Report::build(&self.transactions, range)
    }

    // ── Ids ─────────────────────────────────────────────────────────

    /// Returns a millisecond-timestamp id strictly greater than every id
    /// handed out before.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id {
            now
        } else {
            self.last_id.saturating_add(1)
        };
        self.last_id = id;
        id.to_string()
    }

    /// Highest id among loaded records that parses as a number.
    fn highest_numeric_id(&self) -> i64 {
        let transactions = self.transactions.iter().map(|r| r.id.as_inner());
        let budgets = self.budgets.iter().map(|r| r.id.as_inner());
        let goals = self.goals.iter().map(|r| r.id.as_inner());
        let bills = self.bills.iter().map(|r| r.id.as_inner());
        transactions
            .chain(budgets)
            .chain(goals)
            .chain(bills)
            .filter_map(|raw| raw.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::storage::InMemoryStorage;
    use secrecy::SecretString;

    /// Storage whose writes always fail; reads return nothing.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: StorageKey) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: StorageKey, _value: &str) -> Result<()> {
            Err(FinControlError::Storage("quota exceeded".into()))
        }
    }

    /// Storage whose reads always fail.
    #[derive(Debug, Default)]
    struct UnavailableStorage;

    impl Storage for UnavailableStorage {
        fn get(&self, _key: StorageKey) -> Result<Option<String>> {
            Err(FinControlError::Storage("storage unavailable".into()))
        }
        fn set(&self, _key: StorageKey, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn memory_store() -> RecordStore<InMemoryStorage> {
        RecordStore::builder()
            .storage(InMemoryStorage::new())
            .build()
            .unwrap()
    }

    fn new_tx(kind: TransactionType, category: &str, amount: f64, day: u32) -> NewTransaction {
        NewTransaction {
            kind,
            category: category.to_owned(),
            amount,
            date: date(1, day),
            description: format!("{category} {day}"),
        }
    }

    fn stored<T: DeserializeOwned>(store: &RecordStore<InMemoryStorage>, key: StorageKey) -> T {
        let raw = store.storage().get(key).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn yes(_prompt: &str) -> bool {
        true
    }

    fn no(_prompt: &str) -> bool {
        false
    }

    #[test]
    fn build_requires_storage() {
        let result = RecordStore::<InMemoryStorage>::builder().build();
        assert!(matches!(result, Err(FinControlError::Storage(_))));
    }

    #[test]
    fn empty_storage_loads_seed() {
        let seed = Seed {
            goals: vec![NewGoal {
                name: "Viagem".to_owned(),
                target_amount: 100.0,
                current_amount: 10.0,
            }
            .with_id(GoalId::new("g-1".to_owned()))],
            notifications_enabled: false,
            ..Seed::default()
        };
        let store = RecordStore::builder()
            .storage(InMemoryStorage::new())
            .seed(seed.clone())
            .build()
            .unwrap();
        assert_eq!(store.goals(), seed.goals.as_slice());
        assert!(!store.notifications_enabled());
        assert!(!store.is_authenticated());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn corrupted_value_falls_back_to_default() {
        let storage = InMemoryStorage::new();
        storage.set(StorageKey::Transactions, "{not json").unwrap();
        storage.set(StorageKey::Theme, r#""dark""#).unwrap();
        let fallback: Vec<Transaction> = Vec::new();
        let loaded = load_key(&storage, StorageKey::Transactions, fallback.clone());
        assert_eq!(loaded, fallback);

        let store = RecordStore::builder().storage(storage).build().unwrap();
        assert!(store.transactions().is_empty());
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn wrong_shape_falls_back_to_default() {
        let storage = InMemoryStorage::new();
        storage
            .set(StorageKey::Bills, r#"[{"id": "b", "name": "x"}]"#)
            .unwrap();
        assert!(load_key::<_, Vec<Bill>>(&storage, StorageKey::Bills, Vec::new()).is_empty());
    }

    #[test]
    fn unreadable_storage_falls_back_to_seed() {
        let store = RecordStore::builder()
            .storage(UnavailableStorage)
            .build()
            .unwrap();
        assert!(store.transactions().is_empty());
        assert!(store.notifications_enabled());
    }

    #[test]
    fn add_transaction_prepends_and_persists() {
        let mut store = memory_store();
        let first = store.add_transaction(new_tx(TransactionType::Income, "Salário", 1000.0, 1));
        let second = store.add_transaction(new_tx(TransactionType::Expense, "Food", 300.0, 2));
        assert_ne!(first, second);
        let ids: Vec<&TransactionId> = store.transactions().iter().map(|t| &t.id).collect();
        assert_eq!(ids, vec![&second, &first]);

        let persisted: Vec<Transaction> = stored(&store, StorageKey::Transactions);
        assert_eq!(persisted, store.transactions());
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut store = memory_store();
        let ids: Vec<i64> = (0..50_u32)
            .map(|day| {
                store
                    .add_transaction(new_tx(TransactionType::Expense, "Lazer", 1.0, 1 + day % 28))
                    .as_inner()
                    .parse()
                    .unwrap()
            })
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ids_continue_after_reload() {
        let storage = InMemoryStorage::new();
        let future_id = i64::MAX - 10;
        let existing = vec![
            new_tx(TransactionType::Expense, "Lazer", 1.0, 1)
                .with_id(TransactionId::new(future_id.to_string())),
        ];
        storage
            .set(
                StorageKey::Transactions,
                &serde_json::to_string(&existing).unwrap(),
            )
            .unwrap();
        let mut store = RecordStore::builder().storage(storage).build().unwrap();
        let id = store.add_budget(NewBudget {
            category: "Lazer".to_owned(),
            limit: 10.0,
        });
        assert_eq!(id.as_inner(), (future_id + 1).to_string());
    }

    #[test]
    fn invalid_submission_changes_nothing() {
        let mut store = memory_store();
        let writes_before = store.storage().write_count().unwrap();
        let draft = TransactionDraft {
            kind: TransactionType::Expense,
            amount: String::new(),
            category: "Lazer".to_owned(),
            date: "2024-01-01".to_owned(),
            description: "Cinema".to_owned(),
        };
        let err = store.submit_transaction(&draft).unwrap_err();
        assert!(matches!(err, FinControlError::MissingField { field: "amount" }));
        assert!(store.transactions().is_empty());
        assert_eq!(store.storage().write_count().unwrap(), writes_before);
    }

    #[test]
    fn valid_submission_is_stored() {
        let mut store = memory_store();
        let draft = TransactionDraft {
            kind: TransactionType::Expense,
            amount: "35,90".to_owned(),
            category: "Lazer".to_owned(),
            date: "2024-01-20".to_owned(),
            description: "Cinema".to_owned(),
        };
        let id = store.submit_transaction(&draft).unwrap();
        assert_eq!(store.transactions()[0].id, id);
        assert!((store.transactions()[0].amount - 35.9).abs() < f64::EPSILON);
    }

    #[test]
    fn deleting_unknown_id_is_noop() {
        let mut store = memory_store();
        let _id = store.add_transaction(new_tx(TransactionType::Expense, "Food", 10.0, 1));
        let before = store.transactions().to_vec();
        let outcome =
            store.delete_transaction(&TransactionId::new("missing".to_owned()), &yes);
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn declined_delete_keeps_transaction() {
        let mut store = memory_store();
        let id = store.add_transaction(new_tx(TransactionType::Expense, "Food", 10.0, 1));
        assert_eq!(store.delete_transaction(&id, &no), DeleteOutcome::Cancelled);
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn confirmed_delete_removes_and_persists_without_cascade() {
        let mut store = memory_store();
        let id = store.add_transaction(new_tx(TransactionType::Expense, "Food", 10.0, 1));
        let _budget = store.add_budget(NewBudget {
            category: "Food".to_owned(),
            limit: 50.0,
        });
        let asked = core::cell::Cell::new(None);
        let recorder = |prompt: &str| {
            asked.set(Some(prompt.to_owned()));
            true
        };
        assert_eq!(store.delete_transaction(&id, &recorder), DeleteOutcome::Deleted);
        assert_eq!(asked.take().as_deref(), Some(DELETE_TRANSACTION_PROMPT));
        assert!(store.transactions().is_empty());
        assert_eq!(store.budgets().len(), 1);
        let persisted: Vec<Transaction> = stored(&store, StorageKey::Transactions);
        assert!(persisted.is_empty());
    }

    #[test]
    fn budget_scenario_over_limit() {
        let mut store = memory_store();
        let _income = store.add_transaction(new_tx(TransactionType::Income, "Salário", 1000.0, 1));
        let _food = store.add_transaction(new_tx(TransactionType::Expense, "Food", 300.0, 2));
        let _budget = store.add_budget(NewBudget {
            category: "Food".to_owned(),
            limit: 250.0,
        });
        let progress = store.budgets_progress();
        assert!((progress[0].spent - 300.0).abs() < f64::EPSILON);
        assert!((progress[0].percentage - 100.0).abs() < f64::EPSILON);
        assert!(progress[0].is_over_budget);
        assert!((progress[0].remaining + 50.0).abs() < f64::EPSILON);
        assert!((store.totals().balance - 700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mark_paid_updates_count_immediately() {
        let mut store = memory_store();
        let rent = store.add_bill(NewBill {
            name: "Aluguel".to_owned(),
            amount: 1500.0,
            due_date: date(2, 10),
        });
        let _power = store.add_bill(NewBill {
            name: "Luz".to_owned(),
            amount: 200.0,
            due_date: date(2, 5),
        });
        assert_eq!(store.pending_bill_count(), 2);
        assert_eq!(store.notification_badge(), Some(2));

        assert!(store.mark_bill_paid(&rent));
        assert_eq!(store.pending_bill_count(), 1);
        assert_eq!(store.notification_badge(), Some(1));

        let snapshot = store.bills().to_vec();
        assert!(!store.mark_bill_paid(&rent));
        assert!(!store.mark_bill_paid(&BillId::new("missing".to_owned())));
        assert_eq!(store.bills(), snapshot.as_slice());

        let persisted: Vec<Bill> = stored(&store, StorageKey::Bills);
        assert_eq!(persisted, snapshot);
    }

    #[test]
    fn pending_bills_are_sorted_with_overdue_flags() {
        let mut store = memory_store();
        let _later = store.add_bill(NewBill {
            name: "Internet".to_owned(),
            amount: 99.0,
            due_date: date(3, 15),
        });
        let _today = store.add_bill(NewBill {
            name: "Água".to_owned(),
            amount: 80.0,
            due_date: date(3, 10),
        });
        let _past = store.add_bill(NewBill {
            name: "Luz".to_owned(),
            amount: 120.0,
            due_date: date(3, 9),
        });
        let pending = store.pending_bills(date(3, 10));
        let names: Vec<&str> = pending.iter().map(|p| p.bill.name.as_str()).collect();
        assert_eq!(names, vec!["Luz", "Água", "Internet"]);
        let overdue: Vec<bool> = pending.iter().map(|p| p.overdue).collect();
        assert_eq!(overdue, vec![true, false, false]);
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let mut store = RecordStore::builder()
            .storage(ReadOnlyStorage)
            .build()
            .unwrap();
        let id = store.add_transaction(new_tx(TransactionType::Expense, "Food", 10.0, 1));
        assert_eq!(store.transactions()[0].id, id);
        assert_eq!(store.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn updater_receives_previous_value() {
        let mut store = memory_store();
        store.set_goals(vec![
            NewGoal {
                name: "Carro".to_owned(),
                target_amount: 30_000.0,
                current_amount: 1_000.0,
            }
            .with_id(GoalId::new("g-1".to_owned())),
        ]);
        store.update_goals(|mut goals| {
            for goal in &mut goals {
                goal.current_amount += 500.0;
            }
            goals
        });
        assert!((store.goals()[0].current_amount - 1_500.0).abs() < f64::EPSILON);
        let persisted: Vec<Goal> = stored(&store, StorageKey::Goals);
        assert_eq!(persisted, store.goals());
    }

    #[test]
    fn state_survives_reload() {
        let mut store = memory_store();
        let _tx = store.add_transaction(new_tx(TransactionType::Income, "Salário", 10.0, 1));
        let _theme = store.toggle_theme();
        let _flag = store.toggle_notifications();
        store.set_authenticated(true);

        store.load();
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.theme(), Theme::Dark);
        assert!(!store.notifications_enabled());
        assert!(store.is_authenticated());
    }

    #[test]
    fn login_requires_both_fields() {
        let mut store = memory_store();
        let bad = Credentials::new("", SecretString::from("pw".to_owned()));
        assert!(matches!(
            store.login(&bad),
            Err(FinControlError::MissingCredentials)
        ));
        assert!(!store.is_authenticated());

        let good = Credentials::new("nome@email.com", SecretString::from("pw".to_owned()));
        store.login(&good).unwrap();
        assert!(store.is_authenticated());
        let persisted: bool = stored(&store, StorageKey::IsAuthenticated);
        assert!(persisted);
        let raw = store.storage().get(StorageKey::IsAuthenticated).unwrap().unwrap();
        assert!(!raw.contains("pw"));
    }

    #[test]
    fn logout_resets_records_but_keeps_theme() {
        let mut store = memory_store();
        store
            .login(&Credentials::new("a@b.c", SecretString::from("pw".to_owned())))
            .unwrap();
        let _tx = store.add_transaction(new_tx(TransactionType::Expense, "Food", 10.0, 1));
        let _bill = store.add_bill(NewBill {
            name: "Luz".to_owned(),
            amount: 1.0,
            due_date: date(1, 1),
        });
        let _flag = store.toggle_notifications();
        let _theme = store.toggle_theme();

        assert!(!store.logout(&no));
        assert!(store.is_authenticated());
        assert_eq!(store.transactions().len(), 1);

        assert!(store.logout(&yes));
        assert!(!store.is_authenticated());
        assert!(store.transactions().is_empty());
        assert!(store.bills().is_empty());
        assert!(store.notifications_enabled());
        assert_eq!(store.theme(), Theme::Dark);

        let persisted: Vec<Transaction> = stored(&store, StorageKey::Transactions);
        assert!(persisted.is_empty());
    }

    #[test]
    fn report_covers_full_span() {
        let mut store = memory_store();
        let _a = store.add_transaction(new_tx(TransactionType::Income, "Salário", 1000.0, 1));
        let _b = store.add_transaction(new_tx(TransactionType::Expense, "Food", 300.0, 15));
        let range = DateRange::spanning(store.transactions()).unwrap();
        let report = store.report(range);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.totals, store.totals());
    }

    #[test]
    fn dashboard_uses_current_records() {
        let mut store = memory_store();
        for day in 1..=7_u32 {
            let _id = store.add_transaction(new_tx(TransactionType::Expense, "Lazer", 1.0, day));
        }
        let view = store.dashboard();
        assert_eq!(view.recent.len(), aggregate::RECENT_LIMIT);
        assert_eq!(view.recent[0].date, date(1, 7));
    }
}
