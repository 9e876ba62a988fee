//! Command-line interface definitions using clap.

use crate::config::FILE_ENV;
use crate::domain::SearchField;
use crate::input::{parse_date, parse_year};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Personal book tracker", long_about = None)]
pub struct Cli {
    /// Library file (default: library_records.json, or [library] file in shelf.toml)
    #[arg(long, global = true, env = FILE_ENV)]
    pub file: Option<PathBuf>,

    /// Suppress success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    Add {
        /// Title
        name: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        genre: String,

        /// Publication year
        #[arg(short, long, value_parser = parse_year, allow_hyphen_values = true)]
        year: i32,

        /// Mark the book as read
        #[arg(short, long)]
        read: bool,

        /// When the book was finished (YYYY-MM-DD), only kept with --read
        #[arg(long, value_parser = parse_date, requires = "read")]
        finished_on: Option<String>,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Update the first book with this title (letter case is ignored)
    ///
    /// Omitted fields keep their value. Read status is always set: pass
    /// --read to keep a book marked as read.
    Update {
        /// Current title
        title: String,

        /// New title
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        genre: Option<String>,

        #[arg(short, long, value_parser = parse_year, allow_hyphen_values = true)]
        year: Option<i32>,

        /// Mark the book as read (unread when omitted)
        #[arg(short, long)]
        read: bool,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Search by title and/or author (case-insensitive substring)
    Search {
        query: String,

        /// Field to search: title, author, or any
        #[arg(short, long)]
        by: Option<SearchField>,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Remove the first book with this title (letter case is ignored)
    Remove {
        title: String,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// List all books
    List {
        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show reading progress
    Progress {
        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Run the interactive menu
    Menu,
}

impl Commands {
    /// Name used in JSON metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::Update { .. } => "update",
            Commands::Search { .. } => "search",
            Commands::Remove { .. } => "remove",
            Commands::List { .. } => "list",
            Commands::Progress { .. } => "progress",
            Commands::Menu => "menu",
        }
    }

    /// Whether `--json` was requested.
    pub fn json(&self) -> bool {
        match self {
            Commands::Add { json, .. }
            | Commands::Update { json, .. }
            | Commands::Search { json, .. }
            | Commands::Remove { json, .. }
            | Commands::List { json }
            | Commands::Progress { json } => *json,
            Commands::Menu => false,
        }
    }
}
