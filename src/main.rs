//! # SQL Query Guard
//!
//! Safety gate for model-generated SQL.
//!
//! `sql-query-guard` decides whether a candidate query may be executed
//! against a live database. It admits exactly one read-only `SELECT` (or
//! `WITH ... SELECT`) and refuses mutating statements, stacked statements,
//! dangerous server functions and common injection idioms.
//!
//! # Quick Start
//!
//! ```bash
//! # Validate a single query
//! sql-query-guard validate "SELECT name FROM employees"
//!
//! # Validate a raw model response, one verdict per line, as JSON
//! cat responses.txt | sql-query-guard validate --each-line --strip-fences -f json
//!
//! # Scrub a question before it is put into a prompt
//! sql-query-guard sanitize "Robert'); DROP TABLE Students;--"
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Every candidate accepted
//! - `1` - Benign rejections only (empty input, unsupported syntax), or an
//!   application error
//! - `2` - At least one potentially dangerous rejection

use std::process;

use clap::Parser;
use sql_query_guard::{
    app::{SanitizeParams, ValidateParams, run_sanitize, run_validate},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Validate {
            sql,
            input,
            each_line,
            strip_fences,
            dialect,
            no_strict_grammar,
            output_format,
            no_color
        } => {
            let params = ValidateParams {
                sql,
                input_path: input.map(|p| p.display().to_string()),
                each_line,
                strip_fences,
                dialect,
                no_strict_grammar,
                output_format,
                verbose: cli.verbose,
                no_color
            };
            let outcome = run_validate(params, &config)?;
            println!("{}", outcome.output);
            Ok(outcome.exit_code)
        }
        Commands::Sanitize {
            text,
            input,
            max_length
        } => {
            let params = SanitizeParams {
                text,
                input_path: input.map(|p| p.display().to_string()),
                max_length
            };
            println!("{}", run_sanitize(params, &config)?);
            Ok(0)
        }
    }
}
