// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_guard::validator::{
    Candidate, DEFAULT_FUNCTIONS, DEFAULT_KEYWORDS, DenyList, FunctionGuard, Guard, KeywordGuard,
    PatternGuard, RejectionKind, SelectPatternGuard, SqlDialect, StatementCountGuard, TokenStream,
    tokenize
};

fn lex(sql: &str) -> TokenStream {
    tokenize(sql, SqlDialect::PostgreSQL).unwrap()
}

fn check(guard: &dyn Guard, sql: &str) -> Option<RejectionKind> {
    let tokens = lex(sql);
    let candidate = Candidate {
        raw:    sql,
        tokens: &tokens
    };
    guard.check(&candidate).err().map(|r| r.kind)
}

#[test]
fn test_deny_list_keeps_order() {
    let list = DenyList::keywords(["DELETE", "DROP"]).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.first_match("drop table t; delete from t"), Some("DELETE"));
    assert_eq!(list.names().collect::<Vec<_>>(), vec!["DELETE", "DROP"]);
}

#[test]
fn test_deny_list_skips_blank_entries() {
    let list = DenyList::keywords(["", "  ", "DROP"]).unwrap();
    assert_eq!(list.len(), 1);
    assert!(!list.is_empty());
    assert!(DenyList::keywords(Vec::<String>::new()).unwrap().is_empty());
}

#[test]
fn test_deny_list_escapes_function_names() {
    let list = DenyList::functions(["a.b"]).unwrap();
    assert_eq!(list.first_match_any(&["b", "a.b"]), Some("a.b"));
    assert!(list.first_match_any(&["axb"]).is_none());
    assert!(list.first_match_any(&["a.bc"]).is_none());
}

#[test]
fn test_deny_list_first_match_any_keeps_order() {
    let list = DenyList::functions(["dblink", "pg_sleep"]).unwrap();
    assert_eq!(list.first_match_any(&["PG_SLEEP", "dblink"]), Some("dblink"));
    assert!(list.first_match_any::<&str>(&[]).is_none());
}

#[test]
fn test_deny_list_invalid_regex() {
    assert!(DenyList::patterns(["[unclosed"]).is_err());
    assert!(DenyList::injection_patterns(["(?P<x"]).is_err());
}

#[test]
fn test_default_lists() {
    assert!(DEFAULT_KEYWORDS.contains(&"TRUNCATE"));
    assert!(DEFAULT_FUNCTIONS.contains(&"dblink_exec"));
    assert_eq!(KeywordGuard::default().keywords().len(), DEFAULT_KEYWORDS.len());
    assert_eq!(FunctionGuard::default().functions().len(), DEFAULT_FUNCTIONS.len());
}

#[test]
fn test_keyword_guard() {
    let guard = KeywordGuard::default();
    assert_eq!(guard.name(), "keyword");
    assert_eq!(check(&guard, "select 1; drop table t"), Some(RejectionKind::DangerousKeyword));
    assert_eq!(check(&guard, "SELECT * FROM t WHERE a = 'drop'"), None);
    assert_eq!(check(&guard, "SELECT updated FROM t"), None);
}

#[test]
fn test_function_guard() {
    let guard = FunctionGuard::default();
    assert_eq!(check(&guard, "SELECT dblink ('x')"), Some(RejectionKind::DangerousFunction));
    assert_eq!(check(&guard, "SELECT LO_EXPORT(1, '/tmp/x')"), Some(RejectionKind::DangerousFunction));
    assert_eq!(check(&guard, "SELECT dblink FROM t"), None);
}

#[test]
fn test_function_guard_quoted_names() {
    let guard = FunctionGuard::default();
    for sql in [
        "SELECT \"pg_sleep\"(5)",
        "SELECT pg_catalog.\"pg_sleep\"(5)",
        "SELECT \"pg_read_file\"('/etc/passwd')",
        "SELECT * FROM \"dblink\"('host=evil', 'select 1') AS t(a int)",
        "SELECT pg_sleep /* pause */ (5)",
        "SELECT pg_sleep\n-- pause\n(5)"
    ] {
        assert_eq!(check(&guard, sql), Some(RejectionKind::DangerousFunction), "{}", sql);
    }
    assert_eq!(check(&guard, "SELECT \"pg_sleep\" FROM t"), None);
    assert_eq!(check(&guard, "SELECT * FROM t WHERE a = 'pg_sleep(5)'"), None);
}

#[test]
fn test_function_guard_qualified_entry() {
    let guard = FunctionGuard::new(DenyList::functions(["pg_catalog.pg_sleep"]).unwrap());
    assert_eq!(
        check(&guard, "SELECT pg_catalog.\"pg_sleep\"(5)"),
        Some(RejectionKind::DangerousFunction)
    );
    assert_eq!(check(&guard, "SELECT pg_sleep(5)"), None);
}

#[test]
fn test_pattern_guard_scans_literals() {
    let guard = PatternGuard::default();
    assert_eq!(
        check(&guard, "SELECT * FROM t WHERE p = '../../x'"),
        Some(RejectionKind::DangerousPattern)
    );
    assert_eq!(check(&guard, "SELECT * FROM t WHERE p = './x'"), None);
}

#[test]
fn test_pattern_guard_quoted_character_builders() {
    let guard = PatternGuard::default();
    for sql in ["SELECT \"chr\"(65)", "SELECT \"ASCII\"('a')", "SELECT chr/**/(65)"] {
        assert_eq!(check(&guard, sql), Some(RejectionKind::DangerousPattern), "{}", sql);
    }
    assert_eq!(check(&guard, "SELECT \"chr_code\" FROM t"), None);
}

#[test]
fn test_statement_count_guard() {
    let guard = StatementCountGuard;
    assert_eq!(check(&guard, "SELECT 1;"), None);
    assert_eq!(check(&guard, "SELECT 1;;"), Some(RejectionKind::MultipleStatements));
    assert_eq!(
        check(&guard, "SELECT 1 SELECT 2"),
        Some(RejectionKind::MultipleStatements)
    );
    assert_eq!(check(&guard, "SELECT \"select\" FROM t"), None);
    assert_eq!(
        check(&guard, "WITH a AS (SELECT 1), b AS (SELECT 2) SELECT * FROM a, b;"),
        None
    );
}

#[test]
fn test_select_pattern_guard_multiline_block_comment() {
    let guard = SelectPatternGuard::default();
    assert_eq!(
        check(&guard, "SELECT 1 /* a\nb */"),
        Some(RejectionKind::InjectionPatternDetected)
    );
    assert_eq!(
        check(&guard, "SELECT a FROM t union   select b FROM u"),
        Some(RejectionKind::InjectionPatternDetected)
    );
    assert_eq!(check(&guard, "SELECT a - 1 FROM t"), None);
}

#[test]
fn test_custom_guards() {
    let guard = SelectPatternGuard::new(DenyList::injection_patterns([r"OR\s+1\s*=\s*1"]).unwrap());
    assert_eq!(
        check(&guard, "SELECT * FROM t WHERE a = 'x' or 1=1"),
        Some(RejectionKind::InjectionPatternDetected)
    );
    assert_eq!(guard.patterns().len(), 1);

    let guard = PatternGuard::new(DenyList::patterns(Vec::<&str>::new()).unwrap());
    assert_eq!(check(&guard, "SELECT '../'"), None);
}
