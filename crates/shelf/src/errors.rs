//! Error types for the library store and actionable formatting for the CLI.
//!
//! `LibraryError` is what the store and its backends return. The binary turns
//! it into an `ActionableError` (plain text with causes and fixes) or a
//! `JsonError` (when `--json` is set).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the library store and its storage backends.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No book has a title equal (ignoring case) to the one given
    #[error("Book not found: {title}")]
    NotFound { title: String },

    /// Reading or writing the backing file failed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON array of books
    #[error("Malformed library file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be serialized
    #[error("Failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LibraryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LibraryError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors the user can fix by correcting the title.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

/// A failed shelf command, rendered for the terminal with what probably
/// went wrong and what to run next.
///
/// Only the binary builds these, from a [`LibraryError`]; the store itself
/// never formats messages.
///
/// # Example
///
/// ```
/// use shelf::errors::ActionableError;
///
/// let error = ActionableError::new("Book not found: Dune")
///     .with_cause("The title may be misspelled")
///     .with_remedy("List all books: shelf list");
///
/// assert!(error.to_error_message().contains("shelf list"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    headline: String,
    causes: Vec<String>,
    fixes: Vec<String>,
}

impl ActionableError {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            causes: Vec::new(),
            fixes: Vec::new(),
        }
    }

    /// A likely reason, listed under "Possible causes".
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// A command or check to try next, listed under "To fix".
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.fixes.push(remedy.into());
        self
    }

    /// Multi-line text for stderr. Empty sections are left out.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.headline);
        push_section(&mut msg, "Possible causes", &self.causes);
        push_section(&mut msg, "To fix", &self.fixes);
        msg
    }
}

fn push_section(msg: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    msg.push_str(&format!("\n{}:\n", title));
    for item in items {
        msg.push_str(&format!("  • {}\n", item));
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// No book carries the title given to update or remove.
pub fn book_not_found(title: &str) -> ActionableError {
    ActionableError::new(format!("Book not found: {}", title))
        .with_cause("Titles must match exactly (letter case is ignored)")
        .with_cause("The book may already have been removed")
        .with_remedy("List all books: shelf list")
        .with_remedy(format!("Search for a partial title: shelf search \"{}\"", title))
}

/// The library file could not be read or saved. It is left untouched.
pub fn library_file_inaccessible(path: &str, reason: &str) -> ActionableError {
    ActionableError::new(format!("Could not access library file {}", path))
        .with_cause(format!("File system error: {}", reason.trim()))
        .with_cause("The file or its directory may be unreadable or read-only")
        .with_remedy("Check permissions on the file and its directory")
        .with_remedy("Point at another file: shelf --file <PATH> ...")
}
