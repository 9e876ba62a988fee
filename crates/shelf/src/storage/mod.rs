//! Storage abstraction layer for persisting the book collection.
//!
//! The `BookStore` trait reads and writes the *whole* collection at once.
//! There is no per-record or incremental persistence.

use crate::domain::Book;
use crate::errors::Result;

pub mod json;
pub mod memory;

pub use json::JsonFileStorage;
pub use memory::InMemoryStorage;

/// Trait for storage backends that hold the book collection.
///
/// Implementations must be `Clone`; clones refer to the same underlying
/// data (the same file, or the same shared buffer).
///
/// # Examples
///
/// ```
/// use shelf::domain::Book;
/// use shelf::storage::{BookStore, InMemoryStorage};
///
/// let storage = InMemoryStorage::new();
/// storage.save_books(&[Book::new("Dune", "Frank Herbert", "SF", 1965)]).unwrap();
///
/// let loaded = storage.load_books().unwrap();
/// assert_eq!(loaded[0].name, "Dune");
/// ```
pub trait BookStore: Clone {
    /// Load the full collection in stored order.
    ///
    /// A store with nothing in it yet (missing or empty file) yields an
    /// empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the data exists but cannot be read or parsed.
    fn load_books(&self) -> Result<Vec<Book>>;

    /// Replace the stored collection with `books`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized or written.
    fn save_books(&self, books: &[Book]) -> Result<()>;

    /// Human-readable location of the store, for messages and logs.
    fn location(&self) -> String;
}
