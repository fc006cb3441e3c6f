//! Key-value persistence for the users, quizzes and attempts collections.
//!
//! A [`Store`] holds opaque JSON blobs by key. [`StoreExt`] layers typed
//! `get`/`set` on top: values are read with a caller-supplied default and
//! written in full on every mutation.
//!
//! [`FileStore`] keeps one file per key in a data directory:
//!
//! ```text
//! data/
//!   quiz_users.json
//!   quiz_quizzes.json
//!   quiz_attempts.json
//!   store.lock
//! ```

use crate::error::Result;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Key of the registered users collection.
pub const USERS_KEY: &str = "quiz_users";
/// Key of the quiz catalog collection.
pub const QUIZZES_KEY: &str = "quiz_quizzes";
/// Key of the attempt history collection.
pub const ATTEMPTS_KEY: &str = "quiz_attempts";

/// Raw key-value storage capability.
///
/// Implementations store and return strings verbatim; they know nothing about
/// the records inside.
pub trait Store {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    fn get_raw(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn set_raw(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Typed access to a [`Store`].
pub trait StoreExt: Store {
    /// Read and deserialize the value under `key`.
    ///
    /// Returns `default` if the key is absent or its contents fail to parse.
    /// A corrupt blob is logged and otherwise treated as missing; the next
    /// `set` overwrites it.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> io::Result<T> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(default);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("quizfold: store key '{key}' is unreadable ({e}), using default");
                Ok(default)
            }
        }
    }

    /// Serialize `value` and store it under `key`, replacing what was there.
    ///
    /// Fails with [`Error::Json`](crate::Error::Json) if `value` cannot be
    /// serialized; nothing is written in that case.
    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.set_raw(key, &json)?;
        Ok(())
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get_raw(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_raw(key, value)
    }
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A directory-backed store with one JSON file per key.
///
/// Opening takes an exclusive lock on `store.lock`, so only one `FileStore`
/// can write a given directory at a time. The lock is released on drop.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    _lock: File,
}

impl FileStore {
    /// Open or create a store in `dir`.
    ///
    /// Creates the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::AlreadyExists` if another `FileStore` holds the lock
    /// on this directory, or any I/O error from creating the directory or the
    /// lock file.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let lock_path = dir.join("store.lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock.try_lock_exclusive().map_err(|_| {
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "another writer holds the lock on {}",
                    lock_path.display()
                ),
            )
        })?;

        log::debug!("quizfold: opened file store at {}", dir.display());
        Ok(FileStore { dir, _lock: lock })
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get_raw(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes to a `.tmp` file first, syncs, then renames over the old file.
    /// A crash mid-write leaves the previous value intact.
    fn set_raw(&mut self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        let mut file = File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_data()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
