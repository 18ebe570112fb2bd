//! Single pass over a parsed query tree.
//!
//! [`QueryWalk`] rides on the sqlparser [`Visitor`], so every nested query is
//! reached: CTE bodies, set operations, derived tables and subqueries inside
//! expressions (`IN (...)`, `EXISTS (...)`, scalar subqueries). The grammar
//! stage reads the first disallowed clause from it and table extraction reads
//! the relations.

use std::ops::ControlFlow;

use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::ast::{ObjectName, Query, SetExpr, Visit, Visitor};

use super::types::TableSet;

/// Findings of one walk over a query tree.
#[derive(Debug, Default)]
pub struct QueryWalk {
    relations:  TableSet,
    cte_names:  IndexSet<CompactString>,
    disallowed: Option<&'static str>
}

impl QueryWalk {
    /// Walk `query` and every query nested in it
    pub fn run(query: &Query) -> Self {
        let mut walk = Self::default();
        let _ = query.visit(&mut walk);
        walk
    }

    /// First write or lock met, in visiting order
    pub fn disallowed(&self) -> Option<&'static str> {
        self.disallowed
    }

    /// Relations named anywhere in the tree, CTE names excluded
    /// case-insensitively
    pub fn into_tables(self) -> TableSet {
        let Self {
            mut relations,
            cte_names,
            ..
        } = self;
        relations.retain(|name| !cte_names.contains(&CompactString::from(name.to_lowercase())));
        relations
    }
}

impl Visitor for QueryWalk {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        if let Some(with) = &query.with {
            for cte in &with.cte_tables {
                self.cte_names
                    .insert(cte.alias.name.value.to_lowercase().into());
            }
        }
        if self.disallowed.is_none() {
            self.disallowed = disallowed_clause(query);
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        self.relations.insert(relation.to_string().into());
        ControlFlow::Continue(())
    }
}

fn disallowed_clause(query: &Query) -> Option<&'static str> {
    if !query.locks.is_empty() {
        return Some("a row-locking clause");
    }
    disallowed_in_body(&query.body)
}

// A parenthesized `SetExpr::Query` is visited as a query of its own.
fn disallowed_in_body(body: &SetExpr) -> Option<&'static str> {
    match body {
        SetExpr::Select(select) if select.into.is_some() => Some("SELECT ... INTO"),
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => disallowed_in_body(left).or_else(|| disallowed_in_body(right)),
        SetExpr::Insert(_) | SetExpr::Update(_) | SetExpr::Delete(_) | SetExpr::Merge(_) => {
            Some("a data-modifying statement")
        }
        _ => None
    }
}
