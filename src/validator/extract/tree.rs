use sqlparser::ast::Query;

use crate::validator::{types::TableSet, walk::QueryWalk};

/// Relations referenced by `query`, CTE names excluded.
///
/// Names keep the spelling of the query, so `public.orders` stays qualified.
/// Subqueries in the select list, WHERE and HAVING count as well as FROM and
/// JOIN positions.
pub fn tables_from_query(query: &Query) -> TableSet {
    QueryWalk::run(query).into_tables()
}
