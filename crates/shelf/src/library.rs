//! The library store: an ordered, in-memory book collection mirrored to a
//! `BookStore` after every change.
//!
//! `Library` never prints or prompts. Front ends (the interactive menu, the
//! command surface) call these operations and render the results.

use crate::domain::{Book, BookUpdate, Progress, SearchField};
use crate::errors::{LibraryError, Result};
use crate::storage::BookStore;
use tracing::{debug, info, warn};

/// The book collection and the store it is persisted to.
pub struct Library<S: BookStore> {
    storage: S,
    books: Vec<Book>,
}

impl<S: BookStore> Library<S> {
    /// Load the collection from `storage`.
    ///
    /// A missing or empty store starts an empty library, and so does one
    /// whose contents cannot be parsed. The next persist overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read. Nothing is
    /// written in that case, so the unreadable data is left as it was.
    pub fn open(storage: S) -> Result<Self> {
        let books = match storage.load_books() {
            Ok(books) => {
                debug!(location = %storage.location(), count = books.len(), "loaded library");
                books
            }
            Err(e @ LibraryError::Malformed { .. }) => {
                warn!(location = %storage.location(), error = %e, "starting with an empty library");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self { storage, books })
    }

    /// Write the full collection to the backing store.
    pub fn persist(&self) -> Result<()> {
        self.storage.save_books(&self.books)
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a book and persist.
    ///
    /// Duplicates are allowed. A finish date on an unread book is dropped.
    pub fn add(&mut self, mut book: Book) -> Result<&Book> {
        if !book.status {
            book.finished_on = None;
        }

        info!(title = %book.name, "adding book");
        self.books.push(book);
        self.persist()?;

        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    /// Books whose selected field contains `query`, ignoring case, in
    /// collection order.
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        self.books
            .iter()
            .filter(|book| book.matches(field, &needle))
            .collect()
    }

    /// First book whose title equals `title`, ignoring case.
    pub fn find(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.has_title(title))
    }

    fn position(&self, title: &str) -> Result<usize> {
        self.books
            .iter()
            .position(|book| book.has_title(title))
            .ok_or_else(|| LibraryError::NotFound {
                title: title.to_string(),
            })
    }

    /// Edit the first book titled `title` (ignoring case) and persist.
    ///
    /// Nothing is written when no book matches.
    pub fn update(&mut self, title: &str, update: BookUpdate) -> Result<&Book> {
        let index = self.position(title)?;

        info!(title = %title, "updating book");
        update.apply_to(&mut self.books[index]);
        self.persist()?;

        Ok(&self.books[index])
    }

    /// Remove the first book titled `title` (ignoring case) and persist.
    ///
    /// Nothing is written when no book matches.
    pub fn remove(&mut self, title: &str) -> Result<Book> {
        let index = self.position(title)?;

        info!(title = %title, "removing book");
        let removed = self.books.remove(index);
        self.persist()?;

        Ok(removed)
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Count and share of read books.
    pub fn progress(&self) -> Progress {
        Progress::of(&self.books)
    }
}
