use std::sync::LazyLock;

use regex::Regex;
use sqlparser::keywords::Keyword;

use crate::validator::{tokens::TokenStream, types::TableSet};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

const RESERVED: [&str; 5] = ["FROM", "WHERE", "SELECT", "AND", "OR"];

/// Candidate identifiers from the token stream.
///
/// Column names and aliases are reported too; the lexer cannot tell them
/// apart from relations.
pub fn tables_from_tokens(tokens: &TokenStream) -> TableSet {
    tokens
        .bare_words()
        .filter(|w| w.keyword == Keyword::NoKeyword)
        .filter(|w| IDENTIFIER.is_match(&w.value))
        .filter(|w| !RESERVED.iter().any(|r| r.eq_ignore_ascii_case(&w.value)))
        .map(|w| w.value.as_str().into())
        .collect()
}
