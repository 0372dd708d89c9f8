//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! the [`super::Storage`] port. Ideal for unit tests and for sessions that
//! should not touch the disk.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{FinControlError, Result};

use super::StorageKey;

/// Thread-safe in-memory storage.
///
/// Besides the plain key-value map it counts successful writes, so tests
/// can observe that a mutation was mirrored.
///
/// # Example
///
/// ```rust
/// use fincontrol::storage::{InMemoryStorage, Storage, StorageKey};
///
/// let storage = InMemoryStorage::new();
/// storage.set(StorageKey::Theme, r#""dark""#).unwrap();
/// assert_eq!(storage.get(StorageKey::Theme).unwrap().as_deref(), Some(r#""dark""#));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Inner>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct Inner {
    /// Stored values by key.
    values: HashMap<StorageKey, String>,
    /// Number of successful `set` calls.
    writes: usize,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times [`super::Storage::set`] has succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner lock is poisoned.
    #[inline]
    pub fn write_count(&self) -> Result<usize> {
        self.with_lock(|inner| inner.writes)
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Inner) -> R>(&self, op: F) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> FinControlError {
    FinControlError::Storage(err.to_string().into())
}

impl super::Storage for InMemoryStorage {
    #[inline]
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        self.with_lock(|inner| inner.values.get(&key).cloned())
    }

    #[inline]
    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.with_lock(|inner| {
            let _old = inner.values.insert(key, value.to_owned());
            inner.writes += 1;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn empty_storage_returns_none() {
        let storage = InMemoryStorage::new();
        for key in StorageKey::ALL {
            assert!(storage.get(key).unwrap().is_none());
        }
    }

    #[test]
    fn set_and_get() {
        let storage = InMemoryStorage::new();
        storage.set(StorageKey::Bills, "[]").unwrap();
        assert_eq!(storage.get(StorageKey::Bills).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let storage = InMemoryStorage::new();
        storage.set(StorageKey::Theme, r#""light""#).unwrap();
        storage.set(StorageKey::Theme, r#""dark""#).unwrap();
        assert_eq!(
            storage.get(StorageKey::Theme).unwrap().as_deref(),
            Some(r#""dark""#)
        );
        assert_eq!(storage.write_count().unwrap(), 2);
    }

    #[test]
    fn keys_are_independent() {
        let storage = InMemoryStorage::new();
        storage.set(StorageKey::Goals, "[]").unwrap();
        assert!(storage.get(StorageKey::Budgets).unwrap().is_none());
    }

    #[test]
    fn concurrent_writes_are_counted() {
        use std::sync::Arc;
        use std::thread;

        let storage = Arc::new(InMemoryStorage::new());
        let handles: Vec<_> = (0..4_usize)
            .map(|_| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    for _ in 0..25_usize {
                        storage.set(StorageKey::Transactions, "[]").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(storage.write_count().unwrap(), 100);
    }
}
