//! Application types for CLI commands.
//!
//! Parameters handed from the parsed command line to the command runners and
//! the outcome they hand back to `main`.

use crate::cli::{Dialect, Format};

/// Parameters for the validate command.
///
/// # Example
///
/// ```
/// use sql_query_guard::{
///     app::ValidateParams,
///     cli::{Dialect, Format}
/// };
///
/// let params = ValidateParams {
///     sql:               Some("SELECT * FROM employees".to_string()),
///     input_path:        None,
///     each_line:         false,
///     strip_fences:      false,
///     dialect:           Some(Dialect::Postgresql),
///     no_strict_grammar: false,
///     output_format:     Format::Text,
///     verbose:           false,
///     no_color:          true
/// };
/// assert!(params.input_path.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ValidateParams {
    /// Inline SQL text; takes priority over `input_path`.
    pub sql:               Option<String>,
    /// Path to a file holding the candidate, or "-" for stdin.
    pub input_path:        Option<String>,
    /// Validate every non-empty line separately.
    pub each_line:         bool,
    /// Run candidates through `extract_sql` first.
    pub strip_fences:      bool,
    /// Dialect override; the configured dialect is used when absent.
    pub dialect:           Option<Dialect>,
    /// Skip the grammar allow-list stage.
    pub no_strict_grammar: bool,
    /// Output format for verdicts.
    pub output_format:     Format,
    /// Echo each candidate next to its verdict.
    pub verbose:           bool,
    /// Disable colored terminal output.
    pub no_color:          bool
}

/// Result of a validate run.
#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    /// 0 all accepted, 1 benign rejections only, 2 any dangerous rejection.
    pub exit_code: i32,
    /// Formatted verdicts.
    pub output:    String
}

/// Parameters for the sanitize command.
#[derive(Debug, Clone)]
pub struct SanitizeParams {
    /// Inline text; takes priority over `input_path`.
    pub text:       Option<String>,
    /// Path to a file holding the text, or "-" for stdin.
    pub input_path: Option<String>,
    /// Length cap override; the configured cap is used when absent.
    pub max_length: Option<usize>
}
