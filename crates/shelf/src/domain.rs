//! Core domain types for the book tracker.
//!
//! A `Book` is the only persisted entity. `BookUpdate` carries the field
//! values for an in-place edit, `SearchField` selects which text a search
//! looks at, and `Progress` summarizes how much of the library has been read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single tracked book.
///
/// Field names match the backing file format, so a `Vec<Book>` serializes
/// directly to the on-disk JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title
    pub name: String,
    /// Author
    pub writer: String,
    /// Genre
    pub category: String,
    /// Publication year
    pub year: i32,
    /// Whether the book has been read
    pub status: bool,
    /// Date the book was finished (`YYYY-MM-DD`), only recorded at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_on: Option<String>,
}

impl Book {
    /// Create an unread book with no finish date.
    pub fn new(
        name: impl Into<String>,
        writer: impl Into<String>,
        category: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            writer: writer.into(),
            category: category.into(),
            year,
            status: false,
            finished_on: None,
        }
    }

    /// Mark the book as read, optionally recording when it was finished.
    pub fn read(mut self, finished_on: Option<String>) -> Self {
        self.status = true;
        self.finished_on = finished_on;
        self
    }

    /// Case-insensitive exact title comparison used by update and remove.
    pub fn has_title(&self, title: &str) -> bool {
        self.name.to_lowercase() == title.to_lowercase()
    }

    /// Case-insensitive substring match against the selected field(s).
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, field: SearchField, needle: &str) -> bool {
        let in_title = || self.name.to_lowercase().contains(needle);
        let in_author = || self.writer.to_lowercase().contains(needle);

        match field {
            SearchField::Title => in_title(),
            SearchField::Author => in_author(),
            SearchField::Any => in_title() || in_author(),
        }
    }

    /// Human label for the read status.
    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {}",
            self.name,
            self.writer,
            self.year,
            self.status_label()
        )
    }
}

/// New field values for an existing book.
///
/// `None` keeps the current value. `status` has no "keep" option: an update
/// always writes it. `finished_on` is never changed by an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub name: Option<String>,
    pub writer: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub status: bool,
}

impl BookUpdate {
    /// Apply the update to `book` in place.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(name) = self.name {
            book.name = name;
        }
        if let Some(writer) = self.writer {
            book.writer = writer;
        }
        if let Some(category) = self.category {
            book.category = category;
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        book.status = self.status;
    }
}

/// Which field a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Author,
    /// Title or author
    #[default]
    Any,
}

impl SearchField {
    /// Lenient parse used by the interactive menu: anything that isn't
    /// "title" or "author" searches both fields.
    pub fn from_mode(mode: &str) -> Self {
        mode.parse().unwrap_or(SearchField::Any)
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "any" => Ok(SearchField::Any),
            other => Err(format!(
                "Invalid search field '{}': expected title, author, or any",
                other
            )),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Any => "any",
        };
        f.write_str(s)
    }
}

/// Reading progress across the whole library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub read: usize,
    /// Share of read books, 0.0 to 100.0
    pub percent: f64,
}

impl Progress {
    /// Summarize a collection. An empty collection is 0.0%.
    pub fn of(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.status).count();
        let percent = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };

        Self {
            total,
            read,
            percent,
        }
    }
}
