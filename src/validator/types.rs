//! Verdict types produced by the validator.
//!
//! - [`QueryType`] - Top-level statement kind detected by the classifier
//! - [`RejectionKind`] - Machine-readable reason a query was refused
//! - [`Rejection`] - A reason paired with its human-readable message
//! - [`ValidationResult`] - The immutable verdict returned by `validate`

use compact_str::CompactString;
use indexmap::IndexSet;
use serde::Serialize;

/// Deduplicated set of table identifiers referenced by a query.
pub type TableSet = IndexSet<CompactString>;

/// Type of SQL statement recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Truncate
}

impl QueryType {
    /// All statement kinds, in classifier order.
    pub const ALL: [QueryType; 8] = [
        Self::Select,
        Self::Insert,
        Self::Update,
        Self::Delete,
        Self::Create,
        Self::Drop,
        Self::Alter,
        Self::Truncate
    ];

    /// Match a keyword (any case) against the statement kinds
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(word))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Truncate => "TRUNCATE"
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a query was refused.
///
/// Every kind carries a fixed danger classification, see
/// [`is_dangerous`](Self::is_dangerous).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectionKind {
    /// Input was empty or whitespace only
    EmptyInput,
    /// Tokenizer could not split the input (unterminated literal or comment)
    ParseFailure,
    /// A mutating keyword appeared outside a string literal
    DangerousKeyword,
    /// A deny-listed server function was called
    DangerousFunction,
    /// An obfuscation or traversal pattern matched
    DangerousPattern,
    /// More than one statement in the payload
    MultipleStatements,
    /// Statement is not a SELECT
    DisallowedStatementType,
    /// Query parses outside the accepted SELECT grammar
    UnsupportedSyntax,
    /// SELECT carries a clause that writes or locks (INTO, FOR UPDATE, DML body)
    DisallowedClause,
    /// An injection idiom was found inside an otherwise valid SELECT
    InjectionPatternDetected
}

impl RejectionKind {
    /// Whether a rejection of this kind signals a possible attack rather
    /// than a benign structural problem.
    pub fn is_dangerous(&self) -> bool {
        !matches!(self, Self::EmptyInput | Self::UnsupportedSyntax)
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EmptyInput => "EmptyInput",
            Self::ParseFailure => "ParseFailure",
            Self::DangerousKeyword => "DangerousKeyword",
            Self::DangerousFunction => "DangerousFunction",
            Self::DangerousPattern => "DangerousPattern",
            Self::MultipleStatements => "MultipleStatements",
            Self::DisallowedStatementType => "DisallowedStatementType",
            Self::UnsupportedSyntax => "UnsupportedSyntax",
            Self::DisallowedClause => "DisallowedClause",
            Self::InjectionPatternDetected => "InjectionPatternDetected"
        };
        f.write_str(name)
    }
}

/// A rejection reason with its operator-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind:    RejectionKind,
    pub message: String
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into()
        }
    }
}

/// Verdict for a single candidate query.
///
/// Built only through [`accepted`](Self::accepted) and
/// [`rejected`](Self::rejected), so an accepted result is always a SELECT
/// with no error and no danger flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid:              bool,
    error_message:         Option<String>,
    rejection:             Option<RejectionKind>,
    query_type:            Option<QueryType>,
    tables_accessed:       TableSet,
    potentially_dangerous: bool
}

impl ValidationResult {
    /// Verdict for a query that passed every stage
    pub fn accepted(tables_accessed: TableSet) -> Self {
        Self {
            is_valid: true,
            error_message: None,
            rejection: None,
            query_type: Some(QueryType::Select),
            tables_accessed,
            potentially_dangerous: false
        }
    }

    /// Verdict for a refused query; `query_type` is kept for audit when the
    /// classifier already ran.
    pub fn rejected(rejection: Rejection, query_type: Option<QueryType>) -> Self {
        Self {
            is_valid: false,
            potentially_dangerous: rejection.kind.is_dangerous(),
            error_message: Some(rejection.message),
            rejection: Some(rejection.kind),
            query_type,
            tables_accessed: TableSet::new()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn rejection(&self) -> Option<RejectionKind> {
        self.rejection
    }

    pub fn query_type(&self) -> Option<QueryType> {
        self.query_type
    }

    pub fn tables_accessed(&self) -> &TableSet {
        &self.tables_accessed
    }

    pub fn potentially_dangerous(&self) -> bool {
        self.potentially_dangerous
    }
}
