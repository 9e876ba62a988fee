//! Output formatting for the menu and the command surface.
//!
//! Human-readable rendering of books and progress, an output context for
//! `--quiet` / `--json`, the JSON envelope, and process exit codes.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::io::{self, Write};

use crate::domain::{Book, Progress};
use crate::errors::LibraryError;

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

// ============================================================================
// Human-readable rendering
// ============================================================================

/// Numbered book lines, starting at 1: `1. Dune by Frank Herbert (1965) - Read`.
pub fn numbered<'a, I>(books: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Book>,
{
    books
        .into_iter()
        .enumerate()
        .map(|(idx, book)| format!("{}. {}", idx + 1, book))
        .collect()
}

/// The two progress summary lines.
pub fn progress_lines(progress: &Progress) -> [String; 2] {
    [
        format!("Books in library: {}", progress.total),
        format!("Reading Progress: {:.1}%", progress.percent),
    ]
}

// ============================================================================
// Output Context for Quiet Mode
// ============================================================================

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    /// Create a new output context
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print success message (suppressed by --quiet or --json)
    pub fn print_success(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print a JSON envelope (only when --json)
    pub fn print_json<T: Serialize>(&self, data: T, command: &str) -> io::Result<()> {
        if self.json {
            let output = JsonOutput::success(data, command);
            let text = output.to_json_string().map_err(io::Error::other)?;
            writeln_safe(&text)
        } else {
            Ok(())
        }
    }

    /// Print a JSON error envelope. Always shown, regardless of --quiet.
    pub fn print_json_error(&self, error: &JsonError) -> io::Result<()> {
        let text = error.to_json_string().map_err(io::Error::other)?;
        writeln_safe(&text)
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Silently exit on broken pipe (expected when piping to head, etc.)
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// JSON Output Types
// ============================================================================

/// Wrapper for successful command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    /// Create a new successful output with the given data
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output with suggestions
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

impl JsonError {
    /// Create a new error output
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
                suggestions: Vec::new(),
            },
            metadata: Metadata::new(command),
        }
    }

    /// Add details to the error
    pub fn with_details(mut self, details: Value) -> Self {
        self.error.details = Some(details);
        self
    }

    /// Add a suggestion to the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.error.suggestions.push(suggestion.into());
        self
    }

    /// Build the JSON error for a library error
    pub fn from_library_error(err: &LibraryError, command: impl Into<String>) -> Self {
        match err {
            LibraryError::NotFound { title } => {
                Self::new(ErrorCode::BOOK_NOT_FOUND, err.to_string(), command)
                    .with_details(serde_json::json!({ "title": title }))
                    .with_suggestion("Run 'shelf list' to see available books")
                    .with_suggestion("Titles must match exactly, ignoring case")
            }
            LibraryError::Io { path, .. } => {
                Self::new(ErrorCode::IO_ERROR, err.to_string(), command)
                    .with_details(serde_json::json!({ "path": path.display().to_string() }))
            }
            LibraryError::Malformed { path, .. } => {
                Self::new(ErrorCode::PARSE_ERROR, err.to_string(), command)
                    .with_details(serde_json::json!({ "path": path.display().to_string() }))
            }
            LibraryError::Serialize(_) => {
                Self::new(ErrorCode::PARSE_ERROR, err.to_string(), command)
            }
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ErrorCode::to_exit_code(&self.error.code)
    }
}

/// Error details including code, message, and suggestions
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code (e.g., "BOOK_NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Suggested actions to resolve the error
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Metadata included with every JSON response
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub version: String,
    pub timestamp: String,
    pub command: String,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            version: OUTPUT_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            command: command.into(),
        }
    }
}

// ============================================================================
// Exit Codes
// ============================================================================

/// Standardized exit codes for the shelf CLI
///
/// Usage errors (unknown flags, a year that is not a number) never reach
/// this enum: clap reports them and exits with 2 itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded (0)
    Success = 0,

    /// Generic error (1)
    GenericError = 1,

    /// No book with that title (3)
    NotFound = 3,

    /// File system failure (10)
    ExternalError = 10,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }
}

// ============================================================================
// Error Codes (String constants for JSON responses)
// ============================================================================

/// Standard error codes (JSON format)
pub struct ErrorCode;

impl ErrorCode {
    pub const BOOK_NOT_FOUND: &'static str = "BOOK_NOT_FOUND";
    pub const IO_ERROR: &'static str = "IO_ERROR";
    pub const PARSE_ERROR: &'static str = "PARSE_ERROR";

    /// Map error code string to exit code
    pub fn to_exit_code(code: &str) -> ExitCode {
        match code {
            Self::BOOK_NOT_FOUND => ExitCode::NotFound,
            Self::IO_ERROR => ExitCode::ExternalError,
            _ => ExitCode::GenericError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines() {
        let books = vec![
            Book::new("Dune", "Frank Herbert", "Science Fiction", 1965).read(None),
            Book::new("Emma", "Jane Austen", "Novel", 1815),
        ];

        assert_eq!(
            numbered(&books),
            vec![
                "1. Dune by Frank Herbert (1965) - Read".to_string(),
                "2. Emma by Jane Austen (1815) - Unread".to_string(),
            ]
        );
        assert!(numbered(&Vec::<Book>::new()).is_empty());
    }

    #[test]
    fn test_progress_lines_one_decimal() {
        let progress = Progress {
            total: 3,
            read: 1,
            percent: 100.0 / 3.0,
        };
        let [total, percent] = progress_lines(&progress);
        assert_eq!(total, "Books in library: 3");
        assert_eq!(percent, "Reading Progress: 33.3%");

        let [_, percent] = progress_lines(&Progress::of(&[]));
        assert_eq!(percent, "Reading Progress: 0.0%");
    }

    #[test]
    fn test_json_output_envelope() {
        let output = JsonOutput::success(serde_json::json!({"count": 2}), "list");
        let value: Value = serde_json::from_str(&output.to_json_string().unwrap()).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["count"], 2);
        assert_eq!(value["metadata"]["command"], "list");
        assert_eq!(value["metadata"]["version"], OUTPUT_VERSION);
    }

    #[test]
    fn test_json_error_for_not_found() {
        let err = LibraryError::NotFound {
            title: "Dune".to_string(),
        };
        let json_err = JsonError::from_library_error(&err, "remove");

        assert_eq!(json_err.exit_code(), ExitCode::NotFound);
        let value: Value = serde_json::from_str(&json_err.to_json_string().unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "BOOK_NOT_FOUND");
        assert_eq!(value["error"]["details"]["title"], "Dune");
        assert!(!value["error"]["suggestions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(ErrorCode::to_exit_code("IO_ERROR"), ExitCode::ExternalError);
        assert_eq!(ErrorCode::to_exit_code("PARSE_ERROR"), ExitCode::GenericError);
        assert_eq!(ErrorCode::to_exit_code("SOMETHING_ELSE"), ExitCode::GenericError);
        assert_eq!(ExitCode::NotFound.code(), 3);
    }
}
