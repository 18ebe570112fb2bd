use sqlparser::keywords::Keyword;

use super::{Candidate, Guard};
use crate::validator::types::{Rejection, RejectionKind};

/// Keywords that open a statement
const STATEMENT_KEYWORDS: [Keyword; 8] = [
    Keyword::SELECT,
    Keyword::INSERT,
    Keyword::UPDATE,
    Keyword::DELETE,
    Keyword::CREATE,
    Keyword::DROP,
    Keyword::ALTER,
    Keyword::TRUNCATE
];

/// Refuses payloads carrying more than one statement.
///
/// Two independent signals:
/// - separating semicolons (a single trailing `;` is fine)
/// - more than one statement-opening keyword, which catches a second
///   statement appended without a semicolon
///
/// A CTE legitimately repeats `SELECT` once per arm, so text starting with
/// `WITH` is judged on semicolons alone. Outside a CTE this also refuses
/// subqueries and set operations, which carry a second `SELECT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementCountGuard;

impl StatementCountGuard {
    fn statement_keyword_count(candidate: &Candidate<'_>) -> usize {
        candidate
            .tokens
            .bare_words()
            .filter(|w| STATEMENT_KEYWORDS.contains(&w.keyword))
            .count()
    }
}

impl Guard for StatementCountGuard {
    fn name(&self) -> &'static str {
        "statement-count"
    }

    fn check(&self, candidate: &Candidate<'_>) -> Result<(), Rejection> {
        let separators = candidate.tokens.separator_count();
        let multiple = if candidate.tokens.starts_with_cte() {
            separators > 0
        } else {
            separators > 0 || Self::statement_keyword_count(candidate) > 1
        };
        if multiple {
            return Err(Rejection::new(
                RejectionKind::MultipleStatements,
                "Multiple SQL statements are not allowed"
            ));
        }
        Ok(())
    }
}
