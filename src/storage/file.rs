//! JSON-file-based storage backend.
//!
//! Stores each key in a separate JSON file under a configurable directory
//! (default: `$XDG_DATA_HOME/fincontrol/`).

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{FinControlError, Result};

use super::StorageKey;

/// Application name used for the XDG data directory.
const APP_NAME: &str = "fincontrol";

/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// Sentinel lock mode: shared for reads, exclusive for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockMode {
    /// Many readers.
    Shared,
    /// Single writer.
    Exclusive,
}

/// File-backed storage that persists each key as a JSON file.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]).
///
/// Reads acquire a shared lock, writes an exclusive one. Writes go to a
/// temporary file that is then renamed over the target, so a crash never
/// leaves a half-written value behind.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock                  (cross-process lock sentinel)
///   isAuthenticated.json
///   transactions.json
///   budgets.json
///   goals.json
///   bills.json
///   theme.json
///   areNotificationsEnabled.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Root directory containing all JSON files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `storage.lock` sentinel file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this application.
    ///
    /// On Linux: `$XDG_DATA_HOME/fincontrol/` (typically
    /// `~/.local/share/fincontrol/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                FinControlError::Storage("could not determine platform data directory".into())
            })
    }

    /// Returns the directory this storage writes to.
    #[inline]
    #[must_use]
    pub const fn dir(&self) -> &PathBuf {
        &self.dir
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path of the file backing `key`.
    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    /// Runs `op` while holding the in-process mutex and the sentinel file
    /// lock in the requested mode.
    ///
    /// An unlock failure is reported only when `op` itself succeeded.
    fn locked<R, F: FnOnce() -> Result<R>>(&self, mode: LockMode, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        let acquired = match mode {
            LockMode::Shared => self.lock_file.lock_shared(),
            LockMode::Exclusive => self.lock_file.lock(),
        };
        acquired.map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads the file backing `key`. Returns `None` if it does not exist.
    fn read_value(&self, key: StorageKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    /// Atomically writes the file backing `key` (write-to-tmp then rename).
    fn write_value(&self, key: StorageKey, value: &str) -> Result<()> {
        let path = self.path(key);
        let tmp_path = self.dir.join(format!("{}.json.tmp", key.as_str()));
        fs::write(&tmp_path, value).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        Ok(())
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`FinControlError::Storage`].
fn storage_io_error(err: io::Error) -> FinControlError {
    FinControlError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`FinControlError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> FinControlError {
    FinControlError::Storage(err.to_string().into())
}

// ── Storage implementation ──────────────────────────────────────────────

impl super::Storage for FileStorage {
    #[inline]
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        self.locked(LockMode::Shared, || self.read_value(key))
    }

    #[inline]
    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.locked(LockMode::Exclusive, || self.write_value(key, value))
    }
}
