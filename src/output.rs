use colored::Colorize;
use serde::Serialize;

use crate::validator::ValidationResult;

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// One verdict paired with the text it was given, for serialization
#[derive(Debug, Serialize)]
pub struct Verdict<'a> {
    pub query:  &'a str,
    #[serde(flatten)]
    pub result: &'a ValidationResult
}

/// Format a single verdict
pub fn format_result(query: &str, result: &ValidationResult, opts: &OutputOptions) -> String {
    let verdict = Verdict {
        query,
        result
    };
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&verdict).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&verdict).unwrap_or_default(),
        OutputFormat::Text => format_text_verdict(None, query, result, opts)
    }
}

/// Format a batch of verdicts, in input order
pub fn format_results(
    queries: &[String],
    results: &[ValidationResult],
    opts: &OutputOptions
) -> String {
    let verdicts: Vec<Verdict<'_>> = queries
        .iter()
        .zip(results)
        .map(|(query, result)| Verdict {
            query,
            result
        })
        .collect();

    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&verdicts).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&verdicts).unwrap_or_default(),
        OutputFormat::Text => format_text_batch(&verdicts, opts)
    }
}

fn format_text_batch(verdicts: &[Verdict<'_>], opts: &OutputOptions) -> String {
    let mut output = String::new();
    for (i, verdict) in verdicts.iter().enumerate() {
        output.push_str(&format_text_verdict(
            Some(i + 1),
            verdict.query,
            verdict.result,
            opts
        ));
        output.push('\n');
    }

    let accepted = verdicts.iter().filter(|v| v.result.is_valid()).count();
    let dangerous = verdicts
        .iter()
        .filter(|v| v.result.potentially_dangerous())
        .count();
    let summary = format!(
        "Summary: {} accepted, {} rejected ({} potentially dangerous)",
        accepted,
        verdicts.len() - accepted,
        dangerous
    );
    if opts.colored {
        output.push_str(&summary.bold().to_string());
    } else {
        output.push_str(&summary);
    }
    output
}

fn format_text_verdict(
    index: Option<usize>,
    query: &str,
    result: &ValidationResult,
    opts: &OutputOptions
) -> String {
    let mut output = String::new();

    let status = match (result.is_valid(), result.potentially_dangerous()) {
        (true, _) => "ACCEPTED",
        (false, true) => "REJECTED (potentially dangerous)",
        (false, false) => "REJECTED"
    };
    let status = if opts.colored {
        match (result.is_valid(), result.potentially_dangerous()) {
            (true, _) => status.green().bold().to_string(),
            (false, true) => status.red().bold().to_string(),
            (false, false) => status.yellow().bold().to_string()
        }
    } else {
        status.to_string()
    };

    match index {
        Some(i) => output.push_str(&format!("#{} {}\n", i, status)),
        None => output.push_str(&format!("{}\n", status))
    }

    if opts.verbose {
        output.push_str(&format!("  Query: {}\n", query.trim()));
    }

    if let Some(query_type) = result.query_type() {
        output.push_str(&format!("  Type: {}\n", query_type));
    }

    if result.is_valid() {
        let tables: Vec<&str> = result
            .tables_accessed()
            .iter()
            .map(|t| t.as_str())
            .collect();
        if tables.is_empty() {
            output.push_str("  Tables: (none detected)\n");
        } else {
            output.push_str(&format!("  Tables: {}\n", tables.join(", ")));
        }
    }

    if let Some(message) = result.error_message() {
        let reason = match result.rejection() {
            Some(kind) => format!("  Reason: {} [{}]\n", message, kind),
            None => format!("  Reason: {}\n", message)
        };
        if opts.colored {
            output.push_str(&reason.dimmed().to_string());
        } else {
            output.push_str(&reason);
        }
    }

    output
}
