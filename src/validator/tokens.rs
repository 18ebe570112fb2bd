//! Tokenizer adapter over the `sqlparser` lexer.
//!
//! The validator never scans raw bytes for keywords. It lexes the input once,
//! then works on the token list or on a *masked* rendering in which string
//! and numeric literals are blanked, so `WHERE name = 'DROP'` reads as
//! `WHERE name = ''` to the keyword and function guards.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Deserialize;
use sqlparser::{
    dialect::{
        ClickHouseDialect, Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect
    },
    keywords::Keyword,
    tokenizer::{Token, Tokenizer, Whitespace, Word}
};

/// SQL dialect for lexing and parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SqlDialect {
    Generic,
    MySQL,
    #[default]
    #[serde(alias = "postgres")]
    PostgreSQL,
    SQLite,
    ClickHouse
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {})
        }
    }

    /// Parse a dialect name as used in config files and env vars
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "generic" => Some(Self::Generic),
            "mysql" => Some(Self::MySQL),
            "postgresql" | "postgres" => Some(Self::PostgreSQL),
            "sqlite" => Some(Self::SQLite),
            "clickhouse" => Some(Self::ClickHouse),
            _ => None
        }
    }
}

/// Lexed SQL text.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens:   Vec<Token>,
    masked:   String,
    unquoted: String
}

/// Lex `sql` with the given dialect.
///
/// Returns the lexer's message on failure. A panic inside the lexer is
/// caught and reported the same way.
pub fn tokenize(sql: &str, dialect: SqlDialect) -> Result<TokenStream, String> {
    let parser_dialect = dialect.into_parser_dialect();
    let lexed = catch_unwind(AssertUnwindSafe(|| {
        Tokenizer::new(parser_dialect.as_ref(), sql).tokenize()
    }));
    match lexed {
        Ok(Ok(tokens)) => Ok(TokenStream::new(tokens)),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("tokenizer aborted on this input".to_string())
    }
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let masked = mask_literals(&tokens);
        let unquoted = strip_identifier_quoting(&tokens);
        Self {
            tokens,
            masked,
            unquoted
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text rebuilt from the tokens with literal contents blanked
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Text rebuilt with identifier quotes dropped and each comment turned
    /// into a single space, so `"chr"/**/(65)` reads as `chr (65)`
    pub fn unquoted(&self) -> &str {
        &self.unquoted
    }

    /// Tokens other than whitespace and comments
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| !matches!(t, Token::Whitespace(_) | Token::EOF))
    }

    /// Unquoted words, at any nesting depth
    pub fn bare_words(&self) -> impl Iterator<Item = &Word> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Word(w) if w.quote_style.is_none() => Some(w),
            _ => None
        })
    }

    /// Unquoted words outside any parentheses
    pub fn top_level_words(&self) -> Vec<&Word> {
        let mut depth = 0usize;
        let mut words = Vec::new();
        for token in &self.tokens {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                Token::Word(w) if depth == 0 && w.quote_style.is_none() => words.push(w),
                _ => {}
            }
        }
        words
    }

    /// Whether the first significant token is the `WITH` of a CTE prologue
    pub fn starts_with_cte(&self) -> bool {
        matches!(
            self.significant().next(),
            Some(Token::Word(w)) if w.keyword == Keyword::WITH
        )
    }

    /// Semicolons that separate statements, a single trailing one excluded
    pub fn separator_count(&self) -> usize {
        let significant: Vec<&Token> = self.significant().collect();
        let total = significant
            .iter()
            .filter(|t| matches!(t, Token::SemiColon))
            .count();
        match significant.last() {
            Some(Token::SemiColon) => total - 1,
            _ => total
        }
    }

    /// Names of every word directly followed by `(`, quoted or not.
    ///
    /// Comments between the name and the parenthesis do not count. A
    /// qualified call `s.f(...)` yields both `f` and `s.f`.
    pub fn call_names(&self) -> Vec<String> {
        let significant: Vec<&Token> = self.significant().collect();
        let mut names = Vec::new();
        for (i, pair) in significant.windows(2).enumerate() {
            let [Token::Word(word), Token::LParen] = pair else {
                continue;
            };
            let mut name = word.value.clone();
            names.push(name.clone());
            let mut start = i;
            while start >= 2 {
                match (significant[start - 1], significant[start - 2]) {
                    (Token::Period, Token::Word(qualifier)) => {
                        name = format!("{}.{}", qualifier.value, name);
                        names.push(name.clone());
                        start -= 2;
                    }
                    _ => break
                }
            }
        }
        names
    }

    /// Uppercased first significant word, used to name rejected statements
    pub fn leading_word(&self) -> Option<String> {
        self.significant().find_map(|t| match t {
            Token::Word(w) => Some(w.value.to_uppercase()),
            _ => None
        })
    }
}

fn mask_literals(tokens: &[Token]) -> String {
    let mut masked = String::new();
    for token in tokens {
        match token {
            Token::SingleQuotedString(_)
            | Token::DoubleQuotedString(_)
            | Token::NationalStringLiteral(_)
            | Token::EscapedStringLiteral(_)
            | Token::HexStringLiteral(_)
            | Token::DollarQuotedString(_)
            | Token::SingleQuotedByteStringLiteral(_)
            | Token::DoubleQuotedByteStringLiteral(_) => masked.push_str("''"),
            Token::Number(..) => masked.push('0'),
            other => masked.push_str(&other.to_string())
        }
    }
    masked
}

fn strip_identifier_quoting(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Word(w) => text.push_str(&w.value),
            Token::Whitespace(Whitespace::SingleLineComment {
                ..
            })
            | Token::Whitespace(Whitespace::MultiLineComment(_)) => text.push(' '),
            other => text.push_str(&other.to_string())
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(sql: &str) -> TokenStream {
        tokenize(sql, SqlDialect::PostgreSQL).unwrap()
    }

    #[test]
    fn test_mask_blanks_string_literals() {
        let stream = lex("SELECT * FROM t WHERE name = 'DROP TABLE t'");
        assert!(!stream.masked().contains("DROP"));
        assert!(stream.masked().contains("name = ''"));
    }

    #[test]
    fn test_mask_keeps_comments() {
        let stream = lex("SELECT 1 -- DROP");
        assert!(stream.masked().contains("-- DROP"));
    }

    #[test]
    fn test_trailing_semicolon_not_counted() {
        assert_eq!(lex("SELECT 1;").separator_count(), 0);
        assert_eq!(lex("SELECT 1;  \n").separator_count(), 0);
        assert_eq!(lex("SELECT 1; SELECT 2").separator_count(), 1);
        assert_eq!(lex("SELECT 1; SELECT 2;").separator_count(), 1);
    }

    #[test]
    fn test_semicolon_inside_literal_not_counted() {
        assert_eq!(lex("SELECT ';' AS s;").separator_count(), 0);
    }

    #[test]
    fn test_cte_detection() {
        assert!(lex("  with x AS (SELECT 1) SELECT * FROM x").starts_with_cte());
        assert!(!lex("SELECT 1 WITH").starts_with_cte());
    }

    #[test]
    fn test_top_level_words_skip_parenthesized() {
        let stream = lex("SELECT a FROM (SELECT b FROM c) d");
        let words: Vec<_> = stream
            .top_level_words()
            .into_iter()
            .map(|w| w.value.to_lowercase())
            .collect();
        assert_eq!(words, vec!["select", "a", "from", "d"]);
    }

    #[test]
    fn test_call_names_ignore_quoting_and_comments() {
        let stream = lex("SELECT \"pg_sleep\" /* x */ (5), pg_catalog.\"lo_export\"(1, '')");
        let names = stream.call_names();
        assert!(names.contains(&"pg_sleep".to_string()));
        assert!(names.contains(&"lo_export".to_string()));
        assert!(names.contains(&"pg_catalog.lo_export".to_string()));
        assert!(lex("SELECT dblink FROM t").call_names().is_empty());
    }

    #[test]
    fn test_unquoted_drops_identifier_quotes() {
        let stream = lex("SELECT \"chr\"/**/(65) FROM t -- note");
        assert!(stream.unquoted().contains("chr (65)"));
        assert!(!stream.unquoted().contains("note"));
    }

    #[test]
    fn test_unterminated_literal_fails() {
        assert!(tokenize("SELECT 'abc", SqlDialect::PostgreSQL).is_err());
    }

    #[test]
    fn test_dialect_from_name() {
        assert_eq!(SqlDialect::from_name("Postgres"), Some(SqlDialect::PostgreSQL));
        assert_eq!(SqlDialect::from_name("sqlite"), Some(SqlDialect::SQLite));
        assert_eq!(SqlDialect::from_name("oracle"), None);
    }
}
