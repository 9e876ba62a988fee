//! In-memory storage implementation for testing.
//!
//! Keeps the collection in RAM. Each instance is isolated; clones share the
//! same buffer, so a test can keep a handle and inspect what was saved.

use crate::domain::Book;
use crate::errors::Result;
use crate::storage::BookStore;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// In-memory storage backend.
///
/// Uses `Rc<RefCell<>>` for shared interior mutability - clones share the same data.
///
/// # Examples
///
/// ```
/// use shelf::library::Library;
/// use shelf::storage::InMemoryStorage;
///
/// let storage = InMemoryStorage::new();
/// let mut library = Library::open(storage.clone()).unwrap();
/// library.add(shelf::domain::Book::new("Dune", "Frank Herbert", "SF", 1965)).unwrap();
///
/// assert_eq!(storage.save_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    books: Rc<RefCell<Vec<Book>>>,
    saves: Rc<Cell<usize>>,
}

impl InMemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `books`.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Rc::new(RefCell::new(books)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    /// Number of times `save_books` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl BookStore for InMemoryStorage {
    fn load_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.borrow().clone())
    }

    fn save_books(&self, books: &[Book]) -> Result<()> {
        *self.books.borrow_mut() = books.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
