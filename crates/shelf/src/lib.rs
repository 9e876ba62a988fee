//! Shelf: personal book tracker library
//!
//! The core is [`library::Library`], an ordered book collection mirrored to a
//! [`storage::BookStore`] after every change. The interactive menu and the
//! command-line surface are thin front ends over it.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod input;
pub mod library;
pub mod menu;
pub mod output;
pub mod storage;

// Re-export commonly used types
pub use domain::{Book, BookUpdate, Progress, SearchField};
pub use errors::LibraryError;
pub use library::Library;
pub use output::ExitCode;
pub use storage::{BookStore, InMemoryStorage, JsonFileStorage};
