use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Query Guard - admit only read-only, single-statement SELECT queries
#[derive(Parser, Debug)]
#[command(name = "sql-query-guard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log guard decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate candidate SQL before it is executed
    Validate {
        /// SQL text (reads --input or stdin when omitted)
        sql: Option<String>,

        /// Path to a file holding the candidate (use - for stdin)
        #[arg(short, long, conflicts_with = "sql")]
        input: Option<PathBuf>,

        /// Treat every non-empty line as a separate candidate
        #[arg(long)]
        each_line: bool,

        /// Strip markdown fences and labels from a model response first
        #[arg(long)]
        strip_fences: bool,

        /// SQL dialect for lexing and parsing
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Skip the grammar allow-list stage
        #[arg(long)]
        no_strict_grammar: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Scrub a natural-language question before it goes into a prompt
    Sanitize {
        /// Text to sanitize (reads --input or stdin when omitted)
        text: Option<String>,

        /// Path to a file holding the text (use - for stdin)
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Maximum length in characters
        #[arg(long)]
        max_length: Option<usize>
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Postgresql,
    Sqlite,
    Clickhouse
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
