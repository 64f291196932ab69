//! Persistent key/value storage for the session.
//!
//! A browser keeps the session in `localStorage`; the client keeps it in
//! whatever implements [`Storage`]. The trait is the same small surface:
//! get, set and remove string values by key.
//!
//! Two implementations ship with the crate:
//! - [`FileStorage`]: a JSON object in a file, so a session survives
//!   between runs of the CLI the way it survives a page reload.
//! - [`MemoryStorage`]: a plain map, for tests and throwaway sessions.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::SessionError;

/// A string key/value store that outlives the process (or pretends to).
///
/// # Trait bounds
///
/// - `Send + Sync` → the store can sit inside state shared across tasks.
/// - `'static` → it owns its data; no borrowed buffers.
pub trait Storage: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if the value can't be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if the removal can't be persisted.
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory [`Storage`]. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// [`Storage`] backed by a JSON object in a file.
///
/// The whole file is read once on [`open`](Self::open) and rewritten on
/// every change. Sessions are three short strings, so there is nothing
/// to gain from anything cleverer.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens (or prepares to create) the storage file at `path`.
    ///
    /// A missing file is an empty store. The parent directory is created
    /// if needed.
    ///
    /// # Errors
    /// - [`SessionError::Io`]: the directory or file can't be accessed
    /// - [`SessionError::Corrupt`]: the file isn't a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                SessionError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "session storage opened");
        Ok(Self { path, entries })
    }

    /// Where the file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, bytes).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}
