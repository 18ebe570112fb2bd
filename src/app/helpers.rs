//! Helper functions for CLI operations.
//!
//! Input reading, candidate splitting and exit-code calculation shared by
//! the command runners.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use super::convert::convert_format;
use crate::{
    cli::Format,
    error::{AppResult, file_read_error},
    output::OutputOptions,
    preprocessor::extract_sql,
    validator::ValidationResult
};

/// Calculates the process exit code from a set of verdicts.
///
/// - `0` - Every candidate was accepted
/// - `1` - At least one benign rejection, none dangerous
/// - `2` - At least one potentially dangerous rejection
///
/// # Example
///
/// ```
/// use sql_query_guard::{app::calculate_exit_code, validator::validate};
///
/// let results = vec![validate("SELECT 1"), validate("")];
/// assert_eq!(calculate_exit_code(&results), 1);
/// ```
pub fn calculate_exit_code(results: &[ValidationResult]) -> i32 {
    if results.iter().any(|r| r.potentially_dangerous()) {
        2
    } else if results.iter().any(|r| !r.is_valid()) {
        1
    } else {
        0
    }
}

/// Reads text from a file or stdin.
///
/// A path of "-" reads standard input.
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Resolves the command input: inline text first, then the given path,
/// then stdin.
pub fn resolve_input(inline: Option<String>, path: Option<&str>) -> AppResult<String> {
    match (inline, path) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => read_input(path),
        (None, None) => read_input("-")
    }
}

/// Splits input into candidates.
///
/// With `each_line`, every non-blank line is a candidate; otherwise the
/// whole text is one candidate, blank or not.
pub fn split_candidates(text: &str, each_line: bool) -> Vec<String> {
    if each_line {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        vec![text.to_string()]
    }
}

/// Strips markdown fences and labels when requested.
///
/// A response with nothing query-shaped in it is passed on unchanged so the
/// validator still records a verdict for it.
pub fn prepare_candidate(text: String, strip_fences: bool) -> String {
    if !strip_fences {
        return text;
    }
    extract_sql(&text).unwrap_or(text)
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}
