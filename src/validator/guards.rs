//! Pass/fail guards run by the validator.
//!
//! Every guard implements [`Guard`] and looks at one [`Candidate`]: the raw
//! text plus its token stream. Guards are independent of each other; the
//! validator decides the order and stops at the first [`Rejection`].
//!
//! # Guards
//!
//! | Guard | Input | Rejection |
//! |-------|-------|-----------|
//! | [`KeywordGuard`] | masked text | `DangerousKeyword` |
//! | [`FunctionGuard`] | call names | `DangerousFunction` |
//! | [`PatternGuard`] | raw and unquoted text | `DangerousPattern` |
//! | [`StatementCountGuard`] | tokens | `MultipleStatements` |
//! | [`SelectPatternGuard`] | raw text | `InjectionPatternDetected` |

mod deny_list;
mod injection;
mod structure;

use std::sync::LazyLock;

use compact_str::CompactString;
pub use deny_list::{FunctionGuard, KeywordGuard, PatternGuard};
pub use injection::SelectPatternGuard;
use regex::{Regex, RegexBuilder};
pub use structure::StatementCountGuard;

use super::{tokens::TokenStream, types::Rejection};
use crate::error::{AppResult, pattern_error};

/// Mutating keywords refused anywhere outside a string literal
pub const DEFAULT_KEYWORDS: [&str; 7] =
    ["DROP", "DELETE", "TRUNCATE", "ALTER", "CREATE", "INSERT", "UPDATE"];

/// Server functions refused when called
pub const DEFAULT_FUNCTIONS: [&str; 9] = [
    "pg_sleep",
    "pg_read_file",
    "pg_ls_dir",
    "pg_stat_file",
    "copy",
    "lo_import",
    "lo_export",
    "dblink",
    "dblink_exec"
];

/// Traversal and obfuscation patterns refused anywhere in the text
pub const DEFAULT_PATTERNS: [&str; 4] = [
    r"\.\./",
    r"\\x[0-9a-fA-F]+",
    r"chr\s*\(",
    r"ascii\s*\("
];

/// Injection idioms refused even inside a well-formed SELECT
pub const DEFAULT_INJECTION_PATTERNS: [&str; 4] = [
    r"UNION\s+SELECT",
    r";\s*(DROP|DELETE|INSERT|UPDATE)",
    r"--",
    r"/\*.*\*/"
];

pub(crate) static DEFAULT_KEYWORD_LIST: LazyLock<DenyList> =
    LazyLock::new(|| DenyList::keywords(DEFAULT_KEYWORDS).expect("valid regex"));

pub(crate) static DEFAULT_FUNCTION_LIST: LazyLock<DenyList> =
    LazyLock::new(|| DenyList::functions(DEFAULT_FUNCTIONS).expect("valid regex"));

pub(crate) static DEFAULT_PATTERN_LIST: LazyLock<DenyList> =
    LazyLock::new(|| DenyList::patterns(DEFAULT_PATTERNS).expect("valid regex"));

pub(crate) static DEFAULT_INJECTION_LIST: LazyLock<DenyList> = LazyLock::new(|| {
    DenyList::injection_patterns(DEFAULT_INJECTION_PATTERNS).expect("valid regex")
});

/// Text under inspection.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Input exactly as received
    pub raw:    &'a str,
    /// Lexed input
    pub tokens: &'a TokenStream
}

/// A single pass/fail check.
///
/// Guards hold only read-only configuration, so one instance is shared by
/// every concurrent validation.
pub trait Guard: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the rejection when the candidate fails this guard.
    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection>;
}

/// Ordered deny-list of compiled, case-insensitive regexes.
///
/// Lookup follows insertion order, so the first reported entry is stable for
/// a given configuration.
#[derive(Debug, Clone)]
pub struct DenyList {
    entries: Vec<DenyEntry>
}

#[derive(Debug, Clone)]
struct DenyEntry {
    name:  CompactString,
    regex: Regex
}

impl DenyList {
    /// Whole-word keyword list: `\bKEYWORD\b`
    pub fn keywords<I, S>(words: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        Self::build("keyword", words, false, |w| format!(r"\b{}\b", regex::escape(w)))
    }

    /// Function-name list: `^NAME$`, matched against call names
    pub fn functions<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        Self::build("function", names, false, |n| format!("^{}$", regex::escape(n)))
    }

    /// Raw regex list
    pub fn patterns<I, S>(patterns: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        Self::build("pattern", patterns, false, str::to_string)
    }

    /// Raw regex list where `.` also matches newlines
    pub fn injection_patterns<I, S>(patterns: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        Self::build("injection pattern", patterns, true, str::to_string)
    }

    fn build<I, S>(
        list: &str,
        items: I,
        dot_matches_new_line: bool,
        to_pattern: impl Fn(&str) -> String
    ) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let mut entries = Vec::new();
        for item in items {
            let name = item.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let regex = RegexBuilder::new(&to_pattern(name))
                .case_insensitive(true)
                .dot_matches_new_line(dot_matches_new_line)
                .build()
                .map_err(|e| pattern_error(list, name, e))?;
            entries.push(DenyEntry {
                name: name.into(),
                regex
            });
        }
        Ok(Self {
            entries
        })
    }

    /// Name of the first entry matching `text`
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.regex.is_match(text))
            .map(|e| e.name.as_str())
    }

    /// Name of the first entry matching any of `texts`
    pub fn first_match_any<S: AsRef<str>>(&self, texts: &[S]) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| texts.iter().any(|t| e.regex.is_match(t.as_ref())))
            .map(|e| e.name.as_str())
    }

    /// Entry names in lookup order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
