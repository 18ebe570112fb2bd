//! Text preparation around the validator.
//!
//! Two helpers for the layers on either side of validation:
//!
//! - [`extract_sql`] cleans a model response (markdown fences, `sql:`
//!   labels) into a candidate query before it reaches the validator.
//! - [`sanitize_input`] scrubs a user's natural-language question before it
//!   is interpolated into a prompt. It is a much weaker filter than the
//!   validator and never replaces it.
//!
//! # Example
//!
//! ```
//! use sql_query_guard::preprocessor::{extract_sql, sanitize};
//!
//! let response = "```sql\nSELECT * FROM employees\n```";
//! assert_eq!(extract_sql(response).as_deref(), Some("SELECT * FROM employees;"));
//!
//! assert_eq!(sanitize("Robert'); DROP TABLE Students;--"), "Robert) DROP TABLE Students--");
//! ```

/// Maximum sanitized length, in characters
pub const DEFAULT_SANITIZE_LIMIT: usize = 1000;

/// Characters removed by [`sanitize_input`]
const STRIPPED_CHARS: [char; 4] = [';', '\'', '"', '\\'];

/// Labels a model puts in front of the query, stripped while one matches
const RESPONSE_PREFIXES: [&str; 4] = ["```sql", "```", "sql:", "query:"];

/// Trailers removed from the end of a model response, in this order
const RESPONSE_SUFFIXES: [&str; 2] = ["```", ";"];

/// Sanitize with [`DEFAULT_SANITIZE_LIMIT`]
pub fn sanitize(text: &str) -> String {
    sanitize_input(text, DEFAULT_SANITIZE_LIMIT)
}

/// Strip quote, backslash and semicolon characters, cut to `max_len`
/// characters and trim surrounding whitespace.
pub fn sanitize_input(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .take(max_len)
        .collect();
    sanitized.trim().to_string()
}

/// Pull the candidate query out of a model response.
///
/// Returns `None` when nothing query-shaped is left, i.e. the text does not
/// open with `SELECT` or `WITH`. The result always ends with a single `;`.
pub fn extract_sql(response: &str) -> Option<String> {
    let mut sql = response.trim();
    while let Some(prefix) = RESPONSE_PREFIXES.iter().find(|prefix| {
        sql.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }) {
        sql = sql[prefix.len()..].trim();
    }
    for suffix in RESPONSE_SUFFIXES {
        if let Some(rest) = sql.strip_suffix(suffix) {
            sql = rest.trim();
        }
    }
    if !starts_with_word(sql, "SELECT") && !starts_with_word(sql, "WITH") {
        return None;
    }
    Some(format!("{};", sql))
}

fn starts_with_word(text: &str, word: &str) -> bool {
    let Some(head) = text.get(..word.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(word)
        && text[word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric() && c != '_')
}
