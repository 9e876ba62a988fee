//! End-to-end tests for the shelf binary: subcommands, the interactive menu,
//! configuration, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn shelf(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shelf"));
    cmd.current_dir(temp_dir.path()).env_remove("SHELF_FILE");
    cmd
}

fn add_book(temp_dir: &TempDir, name: &str, author: &str, year: &str, read: bool) {
    let mut cmd = shelf(temp_dir);
    cmd.args(["add", name, "--author", author, "--genre", "Fiction", "--year", year]);
    if read {
        cmd.arg("--read");
    }
    cmd.assert().success();
}

fn stored_books(temp_dir: &TempDir) -> Value {
    let contents = fs::read_to_string(temp_dir.path().join("library_records.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn test_add_writes_default_file() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .args([
            "add", "Dune", "-a", "Frank Herbert", "-g", "Science Fiction", "-y", "1965", "--read",
            "--finished-on", "2023-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("New book has been recorded"));

    let books = stored_books(&temp_dir);
    assert_eq!(books[0]["name"], "Dune");
    assert_eq!(books[0]["year"], 1965);
    assert_eq!(books[0]["status"], true);
    assert_eq!(books[0]["finished_on"], "2023-06-01");
}

#[test]
fn test_list_numbered_in_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Emma", "Jane Austen", "1815", false);
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", true);

    shelf(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. Emma by Jane Austen (1815) - Unread\n2. Dune by Frank Herbert (1965) - Read",
        ));
}

#[test]
fn test_list_empty_library() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books to display."));
}

#[test]
fn test_search_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", false);
    add_book(&temp_dir, "Emma", "Jane Austen", "1815", false);

    shelf(&temp_dir)
        .args(["search", "DUN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune by Frank Herbert"))
        .stdout(predicate::str::contains("Emma").not());

    shelf(&temp_dir)
        .args(["search", "herbert", "--by", "title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books matched your search."));
}

#[test]
fn test_update_requires_existing_title() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", false);

    shelf(&temp_dir)
        .args(["update", "Emma", "--year", "1816"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Book not found: Emma"))
        .stderr(predicate::str::contains("shelf list"));
}

#[test]
fn test_update_retains_omitted_fields() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", false);

    shelf(&temp_dir)
        .args(["update", "dune", "--year", "1966", "--read"])
        .assert()
        .success();

    let books = stored_books(&temp_dir);
    assert_eq!(books[0]["writer"], "Frank Herbert");
    assert_eq!(books[0]["year"], 1966);
    assert_eq!(books[0]["status"], true);
}

#[test]
fn test_remove_then_search() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", false);

    shelf(&temp_dir)
        .args(["remove", "DUNE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book removed"));

    shelf(&temp_dir)
        .args(["search", "dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books matched your search."));
}

#[test]
fn test_progress_output() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Books in library: 0"))
        .stdout(predicate::str::contains("Reading Progress: 0.0%"));

    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", true);
    add_book(&temp_dir, "Emma", "Jane Austen", "1815", false);
    add_book(&temp_dir, "Beloved", "Toni Morrison", "1987", false);

    shelf(&temp_dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading Progress: 33.3%"));
}

#[test]
fn test_invalid_year_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .args(["add", "Dune", "-a", "Frank Herbert", "-g", "SF", "-y", "soon"])
        .assert()
        .code(2);

    assert!(!temp_dir.path().join("library_records.json").exists());
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", true);

    let output = shelf(&temp_dir).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["books"][0]["name"], "Dune");
    assert_eq!(json["metadata"]["command"], "list");
}

#[test]
fn test_json_error_for_missing_book() {
    let temp_dir = TempDir::new().unwrap();

    let output = shelf(&temp_dir)
        .args(["remove", "Dune", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "BOOK_NOT_FOUND");
}

#[test]
fn test_quiet_suppresses_success_message() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .args(["add", "Dune", "-a", "Frank Herbert", "-g", "SF", "-y", "1965", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_file_flag_and_env_override() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .args(["--file", "flag.json", "add", "Dune", "-a", "F", "-g", "SF", "-y", "1965"])
        .assert()
        .success();
    assert!(temp_dir.path().join("flag.json").exists());

    shelf(&temp_dir)
        .env("SHELF_FILE", "env.json")
        .args(["add", "Emma", "-a", "J", "-g", "Novel", "-y", "1815"])
        .assert()
        .success();
    assert!(temp_dir.path().join("env.json").exists());
    assert!(!temp_dir.path().join("library_records.json").exists());
}

#[test]
fn test_config_file_sets_library_and_search_default() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("shelf.toml"),
        "[library]\nfile = \"mine.json\"\n\n[search]\ndefault_field = \"author\"\n",
    )
    .unwrap();

    add_book(&temp_dir, "Herbert West", "H.P. Lovecraft", "1922", false);
    add_book(&temp_dir, "Dune", "Frank Herbert", "1965", false);
    assert!(temp_dir.path().join("mine.json").exists());

    shelf(&temp_dir)
        .args(["search", "herbert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("Herbert West").not());
}

#[test]
fn test_malformed_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shelf.toml"), "[library\n").unwrap();

    shelf(&temp_dir)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("shelf.toml"));
}

#[test]
fn test_malformed_library_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("library_records.json"), "{{{").unwrap();

    shelf(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books to display."));
}

#[test]
fn test_unreadable_library_file_is_left_alone() {
    let temp_dir = TempDir::new().unwrap();
    let library_dir = temp_dir.path().join("library_records.json");
    fs::create_dir(&library_dir).unwrap();
    fs::write(library_dir.join("keep.txt"), "data").unwrap();

    shelf(&temp_dir)
        .arg("list")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("Could not access library file"));

    shelf(&temp_dir).write_stdin("7\n").assert().code(10);

    assert!(library_dir.is_dir());
    assert_eq!(fs::read_to_string(library_dir.join("keep.txt")).unwrap(), "data");
}

#[test]
fn test_unreadable_library_file_json_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("library_records.json")).unwrap();

    let output = shelf(&temp_dir).args(["list", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(10));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "IO_ERROR");
    assert_eq!(json["metadata"]["command"], "list");
}

#[test]
fn test_menu_session() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir)
        .write_stdin("1\nDune\nFrank Herbert\nScience Fiction\n1965\nno\n5\n6\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== My Personal Library ==="))
        .stdout(predicate::str::contains("1. Dune by Frank Herbert (1965) - Unread"))
        .stdout(predicate::str::contains("Reading Progress: 0.0%"))
        .stdout(predicate::str::contains("Exiting Library. Have a great day!"));

    let books = stored_books(&temp_dir);
    assert_eq!(books.as_array().unwrap().len(), 1);
}

#[test]
fn test_menu_subcommand_writes_file_on_exit() {
    let temp_dir = TempDir::new().unwrap();

    shelf(&temp_dir).arg("menu").write_stdin("7\n").assert().success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("library_records.json")).unwrap(),
        "[]"
    );
}
