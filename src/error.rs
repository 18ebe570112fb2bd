pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error for a deny-list entry that does not compile to a regex
pub fn pattern_error(list: &str, entry: &str, source: regex::Error) -> AppError {
    AppError::bad_request(format_pattern_error(list, entry, &source.to_string()))
}

/// Create error for input that cannot be processed at all
pub fn input_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Format a pattern compile error, keeping only the first line of the
/// regex diagnostic when it spans several lines.
fn format_pattern_error(list: &str, entry: &str, message: &str) -> String {
    let detail = message
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with("error:"))
        .map(|line| line.trim().trim_start_matches("error:").trim())
        .unwrap_or(message);
    format!("Invalid {} entry '{}': {}", list, entry, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_keeps_error_line() {
        let message = "regex parse error:\n    (\n    ^\nerror: unclosed group";
        assert_eq!(
            format_pattern_error("pattern", "(", message),
            "Invalid pattern entry '(': unclosed group"
        );
    }

    #[test]
    fn test_pattern_error_single_line() {
        assert_eq!(
            format_pattern_error("keyword", "x", "too big"),
            "Invalid keyword entry 'x': too big"
        );
    }
}
