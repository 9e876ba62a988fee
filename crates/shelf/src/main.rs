//! Shelf: personal book tracker
//!
//! Keeps a list of books in a local JSON file. Run without a subcommand for
//! the interactive menu, or use the subcommands for scripting.

use anyhow::{Context, Result};
use clap::Parser;
use shelf::cli::{Cli, Commands};
use shelf::config::ShelfConfig;
use shelf::domain::{Book, BookUpdate};
use shelf::errors::{book_not_found, library_file_inaccessible, LibraryError};
use shelf::library::Library;
use shelf::menu;
use shelf::output::{numbered, progress_lines, ExitCode, JsonError, OutputContext};
use shelf::storage::JsonFileStorage;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

/// Helper to determine exit code from error
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if let Some(lib_error) = error.downcast_ref::<LibraryError>() {
        return match lib_error {
            LibraryError::NotFound { .. } => ExitCode::NotFound,
            LibraryError::Io { .. } => ExitCode::ExternalError,
            _ => ExitCode::GenericError,
        };
    }

    if error.downcast_ref::<io::Error>().is_some() {
        return ExitCode::ExternalError;
    }

    ExitCode::GenericError
}

/// Render a library error for humans, with causes and fixes where we have them.
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<LibraryError>() {
        Some(LibraryError::NotFound { title }) => book_not_found(title).to_error_message(),
        Some(LibraryError::Io { path, source }) => {
            library_file_inaccessible(&path.display().to_string(), &source.to_string())
                .to_error_message()
        }
        _ => format!("Error: {:#}\n", error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprint!("{}", describe(&e));
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let current_dir = env::current_dir().context("Failed to determine current directory")?;

    let config = ShelfConfig::load(&current_dir)?;
    let path = config.resolve_library_file(&current_dir, cli.file.as_deref());
    tracing::debug!(path = %path.display(), "using library file");

    let command = cli.command.unwrap_or(Commands::Menu);
    let command_name = command.name();
    let json = command.json();
    let output = OutputContext::new(cli.quiet, json);

    // An unreadable library file stops here, before anything can overwrite it
    let result = Library::open(JsonFileStorage::new(&path))
        .map_err(anyhow::Error::from)
        .and_then(|mut library| execute(&mut library, command, &output, &config));

    if let Err(e) = &result {
        if let Some(lib_error) = e.downcast_ref::<LibraryError>().filter(|_| json) {
            let json_error = JsonError::from_library_error(lib_error, command_name);
            output.print_json_error(&json_error)?;
            std::process::exit(json_error.exit_code().code());
        }
    }

    result
}

fn execute(
    library: &mut Library<JsonFileStorage>,
    command: Commands,
    output: &OutputContext,
    config: &ShelfConfig,
) -> Result<()> {
    match command {
        Commands::Add {
            name,
            author,
            genre,
            year,
            read,
            finished_on,
            ..
        } => {
            let mut book = Book::new(name, author, genre, year);
            if read {
                book = book.read(finished_on);
            }

            let added = library.add(book)?;
            output.print_json(added, "add")?;
            output.print_success(format!("New book has been recorded: {}", added))?;
        }
        Commands::Update {
            title,
            name,
            author,
            genre,
            year,
            read,
            ..
        } => {
            let update = BookUpdate {
                name,
                writer: author,
                category: genre,
                year,
                status: read,
            };

            let updated = library.update(&title, update)?;
            output.print_json(updated, "update")?;
            output.print_success(format!("Book updated: {}", updated))?;
        }
        Commands::Search { query, by, .. } => {
            let field = by.unwrap_or_else(|| config.default_search_field());
            let matched = library.search(field, &query);

            output.print_json(
                serde_json::json!({
                    "query": query,
                    "field": field,
                    "books": &matched,
                    "count": matched.len(),
                }),
                "search",
            )?;

            if matched.is_empty() {
                output.print_data("No books matched your search.")?;
            } else {
                output.print_success("Found Books:")?;
                for line in numbered(matched) {
                    output.print_data(line)?;
                }
            }
        }
        Commands::Remove { title, .. } => {
            let removed = library.remove(&title)?;
            output.print_json(&removed, "remove")?;
            output.print_success(format!("Book removed: {}", removed))?;
        }
        Commands::List { .. } => {
            output.print_json(
                serde_json::json!({
                    "books": library.books(),
                    "count": library.len(),
                }),
                "list",
            )?;

            if library.is_empty() {
                output.print_data("No books to display.")?;
            }
            for line in numbered(library.books()) {
                output.print_data(line)?;
            }
        }
        Commands::Progress { .. } => {
            let progress = library.progress();
            output.print_json(progress, "progress")?;
            for line in progress_lines(&progress) {
                output.print_data(line)?;
            }
        }
        Commands::Menu => {
            let stdin = io::stdin();
            menu::run(library, stdin.lock(), io::stdout())?;
        }
    }

    Ok(())
}
