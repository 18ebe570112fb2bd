use super::{tokens::TokenStream, types::QueryType};

/// Determine the top-level statement type.
///
/// - Text opening with `WITH` is a CTE and always ends in a SELECT, whatever
///   the CTE bodies contain.
/// - Otherwise the first top-level word naming a [`QueryType`] wins.
/// - With no such word the query is taken as SELECT. Revisit this default
///   when new statement kinds are added to [`QueryType`].
pub fn classify(tokens: &TokenStream) -> QueryType {
    if tokens.starts_with_cte() {
        return QueryType::Select;
    }
    tokens
        .top_level_words()
        .into_iter()
        .find_map(|w| QueryType::from_keyword(&w.value))
        .unwrap_or(QueryType::Select)
}
