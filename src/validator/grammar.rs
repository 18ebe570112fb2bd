//! Allow-list stage: the query must parse as exactly one read-only query.
//!
//! Deny-lists only refuse what they enumerate. This stage turns it around and
//! accepts a single `Statement::Query` whose syntax tree contains nothing
//! that writes or locks:
//!
//! - no INSERT/UPDATE/DELETE/MERGE body (Postgres data-modifying CTEs)
//! - no `SELECT ... INTO` target
//! - no row-locking clause (`FOR UPDATE`, `FOR SHARE`)
//!
//! CTE bodies, set operations, derived tables and subqueries inside
//! expressions are all walked, see [`QueryWalk`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use sqlparser::{
    ast::{Query, Statement},
    parser::Parser
};

use super::{
    tokens::{SqlDialect, TokenStream},
    types::{Rejection, RejectionKind},
    walk::QueryWalk
};

/// Parse `sql` and return its query tree when it passes the allow-list.
pub fn check_grammar(
    sql: &str,
    tokens: &TokenStream,
    dialect: SqlDialect
) -> Result<Query, Rejection> {
    let parser_dialect = dialect.into_parser_dialect();
    let parsed = catch_unwind(AssertUnwindSafe(|| {
        Parser::parse_sql(parser_dialect.as_ref(), sql)
    }));
    let mut statements = match parsed {
        Ok(Ok(statements)) => statements,
        Ok(Err(e)) => {
            return Err(Rejection::new(
                RejectionKind::UnsupportedSyntax,
                format!("Query is outside the accepted SELECT grammar: {}", e)
            ));
        }
        Err(_) => {
            return Err(Rejection::new(
                RejectionKind::ParseFailure,
                "SQL parsing error: parser aborted on this input"
            ));
        }
    };
    if statements.len() > 1 {
        return Err(Rejection::new(
            RejectionKind::MultipleStatements,
            "Multiple SQL statements are not allowed"
        ));
    }
    let Some(statement) = statements.pop() else {
        return Err(Rejection::new(
            RejectionKind::UnsupportedSyntax,
            "Query is outside the accepted SELECT grammar: no statement found"
        ));
    };
    let Statement::Query(query) = statement else {
        let found = tokens
            .leading_word()
            .unwrap_or_else(|| "unknown statement".to_string());
        return Err(Rejection::new(
            RejectionKind::DisallowedStatementType,
            format!("Only SELECT queries are allowed. Found: {}", found)
        ));
    };
    if let Some(clause) = QueryWalk::run(&query).disallowed() {
        return Err(Rejection::new(
            RejectionKind::DisallowedClause,
            format!("Read-only queries cannot contain {}", clause)
        ));
    }
    Ok(*query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::tokens::tokenize;

    fn check(sql: &str) -> Result<Query, Rejection> {
        let tokens = tokenize(sql, SqlDialect::PostgreSQL).unwrap();
        check_grammar(sql, &tokens, SqlDialect::PostgreSQL)
    }

    #[test]
    fn test_plain_select_passes() {
        assert!(check("SELECT id FROM users WHERE id = 1;").is_ok());
    }

    #[test]
    fn test_cte_passes() {
        assert!(check("WITH a AS (SELECT 1 AS x) SELECT x FROM a").is_ok());
    }

    #[test]
    fn test_copy_statement_refused() {
        let err = check("COPY users TO '/tmp/users.csv'").unwrap_err();
        assert_eq!(err.kind, RejectionKind::DisallowedStatementType);
        assert!(err.message.ends_with("COPY"));
    }

    #[test]
    fn test_select_into_refused() {
        let err = check("SELECT * INTO backup FROM users").unwrap_err();
        assert_eq!(err.kind, RejectionKind::DisallowedClause);
    }

    #[test]
    fn test_locking_clause_refused() {
        let err = check("SELECT * FROM users FOR SHARE").unwrap_err();
        assert_eq!(err.kind, RejectionKind::DisallowedClause);
    }

    #[test]
    fn test_lock_in_where_subquery_refused() {
        let err = check(
            "WITH a AS (SELECT 1) SELECT * FROM users WHERE id IN (SELECT id FROM users FOR SHARE)"
        )
        .unwrap_err();
        assert_eq!(err.kind, RejectionKind::DisallowedClause);
        assert_eq!(err.message, "Read-only queries cannot contain a row-locking clause");
    }

    #[test]
    fn test_lock_in_scalar_subquery_refused() {
        let err = check("SELECT (SELECT max(id) FROM users FOR UPDATE) AS m").unwrap_err();
        assert_eq!(err.kind, RejectionKind::DisallowedClause);
    }

    #[test]
    fn test_garbage_is_unsupported() {
        let err = check("SELECT * FROM").unwrap_err();
        assert_eq!(err.kind, RejectionKind::UnsupportedSyntax);
    }

    #[test]
    fn test_two_statements_refused() {
        let err = check("SELECT 1; SELECT 2").unwrap_err();
        assert_eq!(err.kind, RejectionKind::MultipleStatements);
    }
}
