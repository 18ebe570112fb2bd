//! Command execution.
//!
//! [`run_validate`] drives candidates through a [`Validator`] built from the
//! merged configuration; [`run_sanitize`] applies the prompt-input scrubber.

use tracing::debug;

use super::{
    convert::convert_dialect,
    helpers::{
        calculate_exit_code, create_output_options, prepare_candidate, resolve_input,
        split_candidates
    },
    types::{SanitizeParams, ValidateOutcome, ValidateParams}
};
use crate::{
    config::Config,
    error::{AppResult, input_error},
    output::{format_result, format_results},
    preprocessor::sanitize_input,
    validator::Validator
};

/// Executes the validate command.
///
/// 1. **Configuration**: CLI overrides are applied on top of `config`
/// 2. **Input**: inline SQL, a file, or stdin, split per line on request
/// 3. **Validation**: one verdict per candidate, in input order
/// 4. **Output**: verdicts formatted and the exit code derived from them
///
/// # Errors
///
/// Returns an error when the input cannot be read, holds no candidate in
/// `--each-line` mode, or a configured deny-list entry is not a valid regex.
pub fn run_validate(params: ValidateParams, config: &Config) -> AppResult<ValidateOutcome> {
    let mut validator_config = config.validator.clone();
    if let Some(dialect) = params.dialect {
        validator_config.dialect = convert_dialect(dialect);
    }
    if params.no_strict_grammar {
        validator_config.strict_grammar = false;
    }
    let validator = Validator::with_config(&validator_config)?;

    let text = resolve_input(params.sql, params.input_path.as_deref())?;
    let candidates: Vec<String> = split_candidates(&text, params.each_line)
        .into_iter()
        .map(|c| prepare_candidate(c, params.strip_fences))
        .collect();
    if candidates.is_empty() {
        return Err(input_error("No candidate queries in input"));
    }
    debug!(
        candidates = candidates.len(),
        dialect = ?validator.dialect(),
        strict_grammar = validator.strict_grammar(),
        "validating input"
    );

    let opts = create_output_options(params.output_format, params.no_color, params.verbose);
    let results = validator.validate_batch(&candidates);
    let output = match (&candidates[..], &results[..]) {
        ([query], [result]) if !params.each_line => format_result(query, result, &opts),
        _ => format_results(&candidates, &results, &opts)
    };

    Ok(ValidateOutcome {
        exit_code: calculate_exit_code(&results),
        output
    })
}

/// Executes the sanitize command and returns the scrubbed text.
pub fn run_sanitize(params: SanitizeParams, config: &Config) -> AppResult<String> {
    let text = resolve_input(params.text, params.input_path.as_deref())?;
    let max_length = params.max_length.unwrap_or(config.sanitize.max_length);
    Ok(sanitize_input(&text, max_length))
}
