//! Parsing of user-typed values shared by the menu and the command surface.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a publication year.
pub fn parse_year(s: &str) -> Result<i32, String> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid year '{}': expected a whole number", s.trim()))
}

/// Parse a finish date and normalize it to `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", s.trim()))
}

/// Yes/no answer: "yes" or "y" (any case) is yes, everything else is no.
pub fn parse_yes(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "yes" | "y")
}
