//! JSON file-based storage implementation.
//!
//! The whole collection lives in one pretty-printed JSON array (4-space
//! indent). Every save rewrites the file: write to a temp file, then rename.

use crate::domain::Book;
use crate::errors::{LibraryError, Result};
use crate::storage::BookStore;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default backing file name, relative to the working directory.
pub const DEFAULT_FILE: &str = "library_records.json";

const INDENT: &[u8] = b"    ";

/// JSON file storage for the book collection.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage instance backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first load or save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        data.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl BookStore for JsonFileStorage {
    fn load_books(&self) -> Result<Vec<Book>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "library file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(LibraryError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            debug!(path = %self.path.display(), "library file is empty");
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|source| LibraryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save_books(&self, books: &[Book]) -> Result<()> {
        let json = Self::to_pretty_json(books)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| LibraryError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| LibraryError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = books.len(), "saved library");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
