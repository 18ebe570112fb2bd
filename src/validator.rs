//! Query validator: decides whether a candidate SQL string may run.
//!
//! The validator is the only gate between model-generated text and a live
//! database. It accepts exactly one read-only SELECT (or WITH ... SELECT) and
//! refuses everything else.
//!
//! # Pipeline
//!
//! ```text
//! RECEIVED        empty input                       EmptyInput
//! PARSED          lexer failure                     ParseFailure
//! KEYWORD_OK      mutating keyword                  DangerousKeyword
//! FUNCTION_OK     pg_sleep(, dblink(, ...           DangerousFunction
//! PATTERN_OK      ../, \x41, chr(, ascii(           DangerousPattern
//! SINGLE_STMT_OK  extra `;` or statement keyword    MultipleStatements
//! CLASSIFIED      anything but SELECT               DisallowedStatementType
//! GRAMMAR_OK      parse + read-only tree walk       UnsupportedSyntax, ...
//! TABLES          best-effort extraction            (never refuses)
//! SELECT_PATTERN  UNION SELECT, --, /* */, ...      InjectionPatternDetected
//! ACCEPTED
//! ```
//!
//! Stages run in order and the first failure is the verdict. The grammar
//! stage only runs when `strict_grammar` is enabled (the default).
//!
//! # Example
//!
//! ```
//! use sql_query_guard::validator::{QueryType, Validator};
//!
//! let validator = Validator::new();
//!
//! let ok = validator.validate("SELECT name FROM employees;");
//! assert!(ok.is_valid());
//! assert_eq!(ok.query_type(), Some(QueryType::Select));
//!
//! let refused = validator.validate("SELECT 1; DROP TABLE employees;");
//! assert!(!refused.is_valid());
//! assert!(refused.potentially_dangerous());
//! ```

mod classify;
mod extract;
mod grammar;
mod guards;
mod tokens;
mod types;
mod walk;

use std::sync::LazyLock;

pub use classify::classify;
pub use extract::{tables_from_query, tables_from_tokens};
pub use grammar::check_grammar;
pub use guards::{
    Candidate, DEFAULT_FUNCTIONS, DEFAULT_INJECTION_PATTERNS, DEFAULT_KEYWORDS,
    DEFAULT_PATTERNS, DenyList, FunctionGuard, Guard, KeywordGuard, PatternGuard,
    SelectPatternGuard, StatementCountGuard
};
use rayon::prelude::*;
use sqlparser::tokenizer::Token;
pub use tokens::{SqlDialect, TokenStream, tokenize};
use tracing::{debug, info, warn};
pub use types::{QueryType, Rejection, RejectionKind, TableSet, ValidationResult};

use crate::{config::ValidatorConfig, error::AppResult};

static DEFAULT_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Validate with the built-in deny-lists and PostgreSQL lexing.
pub fn validate(sql: &str) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(sql)
}

/// SQL safety gate.
///
/// Holds only read-only configuration; share one instance by reference
/// across threads.
pub struct Validator {
    dialect:        SqlDialect,
    strict_grammar: bool,
    keyword:        KeywordGuard,
    function:       FunctionGuard,
    pattern:        PatternGuard,
    statements:     StatementCountGuard,
    select_pattern: SelectPatternGuard
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Validator with the built-in deny-lists
    pub fn new() -> Self {
        Self {
            dialect:        SqlDialect::default(),
            strict_grammar: true,
            keyword:        KeywordGuard::default(),
            function:       FunctionGuard::default(),
            pattern:        PatternGuard::default(),
            statements:     StatementCountGuard,
            select_pattern: SelectPatternGuard::default()
        }
    }

    /// Build from configuration
    ///
    /// # Notes
    ///
    /// - Lists left unset in the config keep their defaults
    /// - A list set to `[]` disables that guard
    /// - Fails when a pattern entry is not a valid regex
    pub fn with_config(config: &ValidatorConfig) -> AppResult<Self> {
        let mut validator = Self::new();
        validator.dialect = config.dialect;
        validator.strict_grammar = config.strict_grammar;
        if let Some(keywords) = &config.keywords {
            validator.keyword = KeywordGuard::new(DenyList::keywords(keywords)?);
        }
        if let Some(functions) = &config.functions {
            validator.function = FunctionGuard::new(DenyList::functions(functions)?);
        }
        if let Some(patterns) = &config.patterns {
            validator.pattern = PatternGuard::new(DenyList::patterns(patterns)?);
        }
        if let Some(patterns) = &config.injection_patterns {
            validator.select_pattern =
                SelectPatternGuard::new(DenyList::injection_patterns(patterns)?);
        }
        Ok(validator)
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn strict_grammar(&self) -> bool {
        self.strict_grammar
    }

    /// Validate one candidate query. Never fails: every refusal is a
    /// [`ValidationResult`].
    pub fn validate(&self, sql: &str) -> ValidationResult {
        let result = self.run(sql);
        log_verdict(&result);
        result
    }

    /// Validate many candidates in parallel, keeping input order
    pub fn validate_batch<S>(&self, queries: &[S]) -> Vec<ValidationResult>
    where
        S: AsRef<str> + Sync
    {
        queries
            .par_iter()
            .map(|sql| self.validate(sql.as_ref()))
            .collect()
    }

    fn run(&self, sql: &str) -> ValidationResult {
        if sql.trim().is_empty() {
            return reject(RejectionKind::EmptyInput, "Empty SQL query", None);
        }

        let tokens = match tokenize(sql, self.dialect) {
            Ok(tokens) => tokens,
            Err(e) => {
                return reject(
                    RejectionKind::ParseFailure,
                    format!("SQL parsing error: {}", e),
                    None
                );
            }
        };
        if tokens.significant().all(|t| matches!(t, Token::SemiColon)) {
            return reject(RejectionKind::EmptyInput, "Empty SQL query", None);
        }

        let candidate = Candidate {
            raw:    sql,
            tokens: &tokens
        };
        let guards: [&dyn Guard; 4] =
            [&self.keyword, &self.function, &self.pattern, &self.statements];
        for guard in guards {
            if let Err(rejection) = guard.check(&candidate) {
                debug!(guard = guard.name(), "guard refused query");
                return ValidationResult::rejected(rejection, None);
            }
        }

        let query_type = classify(&tokens);
        if query_type != QueryType::Select {
            return reject(
                RejectionKind::DisallowedStatementType,
                format!("Only SELECT queries are allowed. Found: {}", query_type),
                Some(query_type)
            );
        }

        let tables = if self.strict_grammar {
            match check_grammar(sql, &tokens, self.dialect) {
                Ok(query) => tables_from_query(&query),
                Err(rejection) => return ValidationResult::rejected(rejection, Some(query_type))
            }
        } else {
            tables_from_tokens(&tokens)
        };

        if let Err(rejection) = self.select_pattern.check(&candidate) {
            debug!(guard = self.select_pattern.name(), "guard refused query");
            return ValidationResult::rejected(rejection, Some(query_type));
        }

        ValidationResult::accepted(tables)
    }
}

fn reject(
    kind: RejectionKind,
    message: impl Into<String>,
    query_type: Option<QueryType>
) -> ValidationResult {
    ValidationResult::rejected(Rejection::new(kind, message), query_type)
}

fn log_verdict(result: &ValidationResult) {
    match (result.is_valid(), result.rejection()) {
        (true, _) => {
            let tables: Vec<&str> = result
                .tables_accessed()
                .iter()
                .map(|t| t.as_str())
                .collect();
            debug!(tables = ?tables, "query accepted");
        }
        (false, Some(kind)) if kind.is_dangerous() => {
            warn!(
                reason = %kind,
                message = result.error_message().unwrap_or_default(),
                "potentially dangerous query refused"
            );
        }
        (false, kind) => {
            info!(
                reason = ?kind,
                message = result.error_message().unwrap_or_default(),
                "query refused"
            );
        }
    }
}
