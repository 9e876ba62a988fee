//! Interactive text menu.
//!
//! A thin front end over `Library`: it prompts for values, calls one store
//! operation per selection, and prints the outcome. Generic over the input
//! and output streams so it runs the same against a terminal or a test
//! buffer. End of input behaves like choosing Exit.

use crate::domain::{Book, BookUpdate, SearchField};
use crate::errors::LibraryError;
use crate::input::{parse_date, parse_year, parse_yes};
use crate::library::Library;
use crate::output::{numbered, progress_lines};
use crate::storage::BookStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// One of the seven menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Search,
    Remove,
    List,
    Progress,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Update),
            "3" => Ok(MenuChoice::Search),
            "4" => Ok(MenuChoice::Remove),
            "5" => Ok(MenuChoice::List),
            "6" => Ok(MenuChoice::Progress),
            "7" => Ok(MenuChoice::Exit),
            other => Err(format!("Invalid menu option: {}", other)),
        }
    }
}

const BANNER: &str = "\n=== My Personal Library ===\n\
1. Add Book\n\
2. Update Book Info\n\
3. Search Book\n\
4. Remove Book\n\
5. Show All Books\n\
6. Show Reading Progress\n\
7. Exit";

/// Whether the loop keeps going after an action.
enum Flow {
    Continue,
    Quit,
}

/// Prompt/answer plumbing over a reader and a writer.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn say(&mut self, msg: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", msg).context("Failed to write to output")
    }

    /// Print `prompt` and read one line without its line ending.
    /// `None` means the input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write to output")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Ask until the answer parses. A blank answer returns `Ok(Some(None))`
    /// when `allow_blank` is set.
    fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        allow_blank: bool,
        parse: fn(&str) -> Result<T, String>,
        retry_msg: &str,
    ) -> Result<Option<Option<T>>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if allow_blank && answer.trim().is_empty() {
                return Ok(Some(None));
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(Some(value))),
                Err(_) => self.say(retry_msg)?,
            }
        }
    }
}

/// Blank keeps the existing value.
fn non_blank(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Run the menu until Exit or end of input, then persist.
///
/// Store errors from individual actions are printed and the loop continues;
/// a failure to persist on exit is returned.
pub fn run<S, R, W>(library: &mut Library<S>, input: R, output: W) -> Result<()>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let mut console = Console { input, output };

    loop {
        console.say(BANNER)?;
        let Some(selection) = console.ask("Choose an option (1-7): ")? else {
            break;
        };

        let flow = match selection.parse::<MenuChoice>() {
            Ok(choice) => dispatch(library, &mut console, choice)?,
            Err(_) => {
                console.say("Invalid input. Try again.")?;
                Flow::Continue
            }
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    library
        .persist()
        .with_context(|| format!("Failed to save library to {}", library.storage().location()))?;
    console.say("Exiting Library. Have a great day!")?;
    Ok(())
}

fn dispatch<S, R, W>(
    library: &mut Library<S>,
    console: &mut Console<R, W>,
    choice: MenuChoice,
) -> Result<Flow>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    match choice {
        MenuChoice::Add => add_book(library, console),
        MenuChoice::Update => update_book(library, console),
        MenuChoice::Search => search_books(library, console),
        MenuChoice::Remove => remove_book(library, console),
        MenuChoice::List => {
            show_books(library, console)?;
            Ok(Flow::Continue)
        }
        MenuChoice::Progress => {
            for line in progress_lines(&library.progress()) {
                console.say(line)?;
            }
            Ok(Flow::Continue)
        }
        MenuChoice::Exit => Ok(Flow::Quit),
    }
}

/// Print a store error and keep the menu running.
fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, err: &LibraryError) -> Result<()> {
    if err.is_not_found() {
        console.say("Book not found.")
    } else {
        console.say(format!("Error: {}", err))
    }
}

fn add_book<S, R, W>(library: &mut Library<S>, console: &mut Console<R, W>) -> Result<Flow>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let Some(name) = console.ask("Book Name: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(writer) = console.ask("Author: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(category) = console.ask("Genre: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(Some(year)) = console.ask_parsed(
        "Year Published: ",
        false,
        parse_year,
        "Please enter a whole number for the year.",
    )?
    else {
        return Ok(Flow::Quit);
    };
    let Some(read) = console.ask("Have you read this? (yes/no): ")? else {
        return Ok(Flow::Quit);
    };

    let mut book = Book::new(name, writer, category, year);
    if parse_yes(&read) {
        let Some(finished_on) = console.ask_parsed(
            "When did you read it? (YYYY-MM-DD): ",
            true,
            parse_date,
            "Please enter a date as YYYY-MM-DD.",
        )?
        else {
            return Ok(Flow::Quit);
        };
        book = book.read(finished_on);
    }

    match library.add(book) {
        Ok(_) => console.say("New book has been recorded.")?,
        Err(e) => report(console, &e)?,
    }
    Ok(Flow::Continue)
}

fn update_book<S, R, W>(library: &mut Library<S>, console: &mut Console<R, W>) -> Result<Flow>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let Some(title) = console.ask("Enter the title of the book to update: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(current) = library.find(&title).cloned() else {
        console.say("Book not found.")?;
        return Ok(Flow::Continue);
    };

    console.say("Leave input blank to retain existing value.")?;
    let Some(name) = console.ask(&format!("New title ({}): ", current.name))? else {
        return Ok(Flow::Quit);
    };
    let Some(writer) = console.ask(&format!("New author ({}): ", current.writer))? else {
        return Ok(Flow::Quit);
    };
    let Some(year) = console.ask_parsed(
        &format!("New year ({}): ", current.year),
        true,
        parse_year,
        "Please enter a whole number for the year.",
    )?
    else {
        return Ok(Flow::Quit);
    };
    let Some(category) = console.ask(&format!("New genre ({}): ", current.category))? else {
        return Ok(Flow::Quit);
    };
    let Some(read) = console.ask("Read it? (yes/no): ")? else {
        return Ok(Flow::Quit);
    };

    let update = BookUpdate {
        name: non_blank(name),
        writer: non_blank(writer),
        category: non_blank(category),
        year,
        status: parse_yes(&read),
    };

    match library.update(&title, update) {
        Ok(_) => console.say("Book updated!")?,
        Err(e) => report(console, &e)?,
    }
    Ok(Flow::Continue)
}

fn search_books<S, R, W>(library: &mut Library<S>, console: &mut Console<R, W>) -> Result<Flow>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let Some(mode) = console.ask("Search by title or author? ")? else {
        return Ok(Flow::Quit);
    };
    let Some(query) = console.ask("Search term: ")? else {
        return Ok(Flow::Quit);
    };

    let matched = library.search(SearchField::from_mode(&mode), &query);
    if matched.is_empty() {
        console.say("No books matched your search.")?;
    } else {
        console.say("\nFound Books:")?;
        for line in numbered(matched) {
            console.say(line)?;
        }
    }
    Ok(Flow::Continue)
}

fn remove_book<S, R, W>(library: &mut Library<S>, console: &mut Console<R, W>) -> Result<Flow>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let Some(title) = console.ask("Title of the book to remove: ")? else {
        return Ok(Flow::Quit);
    };

    match library.remove(&title) {
        Ok(_) => console.say("Book removed.")?,
        Err(e) => report(console, &e)?,
    }
    Ok(Flow::Continue)
}

fn show_books<S, R, W>(library: &Library<S>, console: &mut Console<R, W>) -> Result<()>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    if library.is_empty() {
        return console.say("No books to display.");
    }
    for line in numbered(library.books()) {
        console.say(line)?;
    }
    Ok(())
}
