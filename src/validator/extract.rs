//! Best-effort table extraction for audit logs and sample-data previews.
//!
//! Nothing here influences the verdict. The result may over- or under-report
//! (aliases, functions returning sets, identifiers in expressions), so callers
//! must never use it for access control.
//!
//! - [`tables_from_query`] walks a parsed query tree when the grammar stage
//!   ran, and reports every relation it names, nested queries included.
//! - [`tables_from_tokens`] is the lexical fallback: every bare,
//!   non-keyword identifier counts as a candidate.

mod lexical;
mod tree;

pub use lexical::tables_from_tokens;
pub use tree::tables_from_query;
