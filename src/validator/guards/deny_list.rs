use super::{
    Candidate, DEFAULT_FUNCTION_LIST, DEFAULT_KEYWORD_LIST, DEFAULT_PATTERN_LIST, DenyList, Guard
};
use crate::validator::types::{Rejection, RejectionKind};

/// Refuses mutating DML/DDL keywords.
///
/// Runs on the masked text: comments and quoted identifiers are scanned,
/// string and numeric literals are not. Any occurrence counts, including one
/// nested in a subquery or CTE body, since a keyword there is either a
/// forbidden operation or an attempt to smuggle one in.
#[derive(Debug, Clone)]
pub struct KeywordGuard {
    keywords: DenyList
}

impl KeywordGuard {
    pub fn new(keywords: DenyList) -> Self {
        Self {
            keywords
        }
    }

    pub fn keywords(&self) -> &DenyList {
        &self.keywords
    }
}

impl Default for KeywordGuard {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_LIST.clone())
    }
}

impl Guard for KeywordGuard {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection> {
        match self.keywords.first_match(candidate.tokens.masked()) {
            Some(keyword) => Err(Rejection::new(
                RejectionKind::DangerousKeyword,
                format!("Dangerous keyword '{}' is not allowed", keyword)
            )),
            None => Ok(())
        }
    }
}

/// Refuses calls to file-system, timing and cross-database functions.
///
/// Works on tokens rather than text: a word followed by `(` is a call
/// whatever its quoting, so `"pg_sleep"(5)`, `pg_catalog."pg_sleep"(5)` and
/// `pg_sleep /* */ (5)` are all refused. A column called `copy_count` or a
/// bare identifier `dblink` passes.
#[derive(Debug, Clone)]
pub struct FunctionGuard {
    functions: DenyList
}

impl FunctionGuard {
    pub fn new(functions: DenyList) -> Self {
        Self {
            functions
        }
    }

    pub fn functions(&self) -> &DenyList {
        &self.functions
    }
}

impl Default for FunctionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTION_LIST.clone())
    }
}

impl Guard for FunctionGuard {
    fn name(&self) -> &'static str {
        "function"
    }

    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection> {
        let calls = candidate.tokens.call_names();
        match self.functions.first_match_any(calls.as_slice()) {
            Some(function) => Err(Rejection::new(
                RejectionKind::DangerousFunction,
                format!("Dangerous function '{}' is not allowed", function)
            )),
            None => Ok(())
        }
    }
}

/// Refuses traversal sequences, hex escapes and character-code builders.
///
/// Scans the raw text, literals included: these payloads usually travel
/// inside a string and exist to get past the keyword and function guards.
/// The unquoted rendering is scanned too, so `"chr"(65)` and `chr/**/(65)`
/// match `chr\s*\(`.
#[derive(Debug, Clone)]
pub struct PatternGuard {
    patterns: DenyList
}

impl PatternGuard {
    pub fn new(patterns: DenyList) -> Self {
        Self {
            patterns
        }
    }

    pub fn patterns(&self) -> &DenyList {
        &self.patterns
    }
}

impl Default for PatternGuard {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN_LIST.clone())
    }
}

impl Guard for PatternGuard {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection> {
        let texts = [candidate.raw, candidate.tokens.unquoted()];
        match self.patterns.first_match_any(texts.as_slice()) {
            Some(_) => Err(Rejection::new(
                RejectionKind::DangerousPattern,
                "Dangerous pattern detected in query"
            )),
            None => Ok(())
        }
    }
}
