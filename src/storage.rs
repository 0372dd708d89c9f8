//! Pluggable key-value storage backends for persisting the record store.
//!
//! This module defines the [`Storage`] port: a durable map from a fixed set
//! of [`StorageKey`]s to JSON text. The record store mirrors every mutation
//! through it and restores from it at startup.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;

/// Logical keys under which the record store persists its state.
///
/// Keys are independent; there is no versioning or migration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Whether a user is logged in (`bool`).
    IsAuthenticated,
    /// Transaction list.
    Transactions,
    /// Budget list.
    Budgets,
    /// Goal list.
    Goals,
    /// Bill list.
    Bills,
    /// Active theme (`"light"` or `"dark"`).
    Theme,
    /// Whether bill notifications are shown (`bool`).
    AreNotificationsEnabled,
}

impl StorageKey {
    /// Every key, in the order they are loaded.
    pub const ALL: [Self; 7] = [
        Self::IsAuthenticated,
        Self::Transactions,
        Self::Budgets,
        Self::Goals,
        Self::Bills,
        Self::Theme,
        Self::AreNotificationsEnabled,
    ];

    /// Returns the persisted name of the key.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsAuthenticated => "isAuthenticated",
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
            Self::Goals => "goals",
            Self::Bills => "bills",
            Self::Theme => "theme",
            Self::AreNotificationsEnabled => "areNotificationsEnabled",
        }
    }
}

impl core::fmt::Display for StorageKey {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable storage backend for the record store.
///
/// Values are opaque JSON text; (de)serialization is the caller's concern.
/// All methods take `&self`; implementations use interior
/// mutability (e.g. `Mutex`) for thread-safe mutation.
pub trait Storage: core::fmt::Debug + Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write (unavailable,
    /// out of space).
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_match_persisted_layout() {
        let names: Vec<&str> = StorageKey::ALL.iter().map(|key| key.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "isAuthenticated",
                "transactions",
                "budgets",
                "goals",
                "bills",
                "theme",
                "areNotificationsEnabled",
            ]
        );
    }

    /// Backend that keeps a single value regardless of key.
    #[derive(Debug, Default)]
    struct SingleSlot {
        /// Last written value.
        value: std::sync::Mutex<Option<String>>,
    }

    impl Storage for SingleSlot {
        fn get(&self, _key: StorageKey) -> Result<Option<String>> {
            Ok(self.value.lock().unwrap().clone())
        }

        fn set(&self, _key: StorageKey, value: &str) -> Result<()> {
            *self.value.lock().unwrap() = Some(value.to_owned());
            Ok(())
        }
    }

    #[test]
    fn backend_needs_only_get_and_set() {
        let backend: Box<dyn Storage> = Box::new(SingleSlot::default());
        assert!(backend.get(StorageKey::Theme).unwrap().is_none());
        backend.set(StorageKey::Theme, r#""dark""#).unwrap();
        assert_eq!(
            backend.get(StorageKey::Theme).unwrap().as_deref(),
            Some(r#""dark""#)
        );
    }

    #[test]
    fn key_display_uses_persisted_name() {
        assert_eq!(StorageKey::AreNotificationsEnabled.to_string(), "areNotificationsEnabled");
    }
}
