//! Application logic for the SQL Query Guard CLI.
//!
//! This module contains the command logic separated from the main entry
//! point to enable testing.

mod convert;
mod helpers;
mod run;
mod types;

pub use convert::{convert_dialect, convert_format};
pub use helpers::{
    calculate_exit_code, create_output_options, prepare_candidate, read_input, resolve_input,
    split_candidates
};
pub use run::{run_sanitize, run_validate};
pub use types::{SanitizeParams, ValidateOutcome, ValidateParams};
