//! File-backed session storage adapter.
//!
//! The host counterpart of browser local storage: two small files under the
//! configured state directory, accessed through a capability-scoped
//! `cap_std::fs::Dir` rather than ambient `std::fs` calls.

use std::io;
use std::path::PathBuf;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{SessionKey, SessionStorage, SessionStorageError};

/// Session storage persisting each entry as a file in one directory.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    state_dir: PathBuf,
}

impl FileSessionStorage {
    /// Create storage rooted at `state_dir`; the directory is created on the
    /// first write.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    fn open_dir(&self) -> io::Result<Dir> {
        Dir::open_ambient_dir(&self.state_dir, ambient_authority())
    }

    fn map_io(error: &io::Error) -> SessionStorageError {
        SessionStorageError::io(error.to_string())
    }
}

impl SessionStorage for FileSessionStorage {
    fn read(&self, key: SessionKey) -> Result<Option<String>, SessionStorageError> {
        let dir = match self.open_dir() {
            Ok(dir) => dir,
            // A state directory that was never created holds no entries.
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Self::map_io(&error)),
        };
        match dir.read_to_string(key.as_str()) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Self::map_io(&error)),
        }
    }

    fn write(&self, key: SessionKey, value: &str) -> Result<(), SessionStorageError> {
        Dir::create_ambient_dir_all(&self.state_dir, ambient_authority())
            .map_err(|error| Self::map_io(&error))?;
        let dir = self.open_dir().map_err(|error| Self::map_io(&error))?;
        dir.write(key.as_str(), value.as_bytes())
            .map_err(|error| Self::map_io(&error))
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionStorageError> {
        let dir = match self.open_dir() {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(Self::map_io(&error)),
        };
        match dir.remove_file(key.as_str()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Self::map_io(&error)),
        }
    }
}
