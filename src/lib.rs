//! # SQL Query Guard Library
//!
//! Safety gate for SQL produced by a language model before it reaches a
//! live database.
//!
//! # Example
//!
//! ```
//! use sql_query_guard::{RejectionKind, sanitize, validate};
//!
//! let result = validate("SELECT * FROM employees WHERE name = 'DROP'");
//! assert!(result.is_valid());
//!
//! let result = validate("SELECT pg_sleep(5)");
//! assert_eq!(result.rejection(), Some(RejectionKind::DangerousFunction));
//! assert!(result.potentially_dangerous());
//!
//! assert_eq!(sanitize("  it's fine;  "), "its fine");
//! ```
//!
//! # Modules
//!
//! - [`validator`] - The validation pipeline, guards and verdict types
//! - [`preprocessor`] - Prompt-input sanitizing and model-response cleanup
//! - [`config`] - Configuration loading
//! - [`output`] - Verdict formatting for text, JSON and YAML
//! - [`app`] - Command logic behind the CLI
//! - [`cli`] - Command-line definitions
//! - [`error`] - Error types and constructors

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod preprocessor;
pub mod validator;

pub use preprocessor::{extract_sql, sanitize, sanitize_input};
pub use validator::{QueryType, RejectionKind, ValidationResult, Validator, validate};
