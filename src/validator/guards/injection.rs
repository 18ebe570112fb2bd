use super::{Candidate, DEFAULT_INJECTION_LIST, DenyList, Guard};
use crate::validator::types::{Rejection, RejectionKind};

/// Refuses injection idioms that are legal inside a SELECT.
///
/// Runs after classification on the raw text: `UNION SELECT` pivots, a
/// semicolon followed by a mutating keyword, line comments and block
/// comments. Comment markers inside string literals are refused as well,
/// since some engines strip comments before the literal is closed.
#[derive(Debug, Clone)]
pub struct SelectPatternGuard {
    patterns: DenyList
}

impl SelectPatternGuard {
    pub fn new(patterns: DenyList) -> Self {
        Self {
            patterns
        }
    }

    pub fn patterns(&self) -> &DenyList {
        &self.patterns
    }
}

impl Default for SelectPatternGuard {
    fn default() -> Self {
        Self::new(DEFAULT_INJECTION_LIST.clone())
    }
}

impl Guard for SelectPatternGuard {
    fn name(&self) -> &'static str {
        "select-pattern"
    }

    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection> {
        match self.patterns.first_match(candidate.raw) {
            Some(_) => Err(Rejection::new(
                RejectionKind::InjectionPatternDetected,
                "Potential SQL injection pattern detected"
            )),
            None => Ok(())
        }
    }
}
