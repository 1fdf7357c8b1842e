//! CLI argument definitions for row-source.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Query virtual row sources such as `long_sequence(n)`.
#[derive(Parser, Debug)]
#[command(name = "row-source")]
#[command(about = "Query virtual row sources such as long_sequence(n)")]
#[command(version)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "ROW_SOURCE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a table function and print its rows
    Query(QueryArgs),

    /// Print the column layout a table function produces, as YAML
    Describe {
        /// Function call, e.g. "long_sequence(10)"
        call: String,
    },

    /// List registered function signatures
    Functions,
}

/// Arguments for the query command.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Function call, e.g. "long_sequence(10)"
    pub call: String,

    /// Output format (overrides the config file)
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Maximum number of rows to print
    #[arg(long, short = 'n')]
    pub limit: Option<u64>,

    /// Keep only rows matching `column <op> integer`, e.g. "x > 3"
    #[arg(long, value_name = "EXPR")]
    pub filter: Option<String>,

    /// Read these rows directly by row id instead of scanning
    #[arg(
        long = "row-id",
        value_name = "ID",
        allow_negative_numbers = true,
        conflicts_with_all = ["filter", "sample"]
    )]
    pub row_ids: Vec<i64>,

    /// Print a uniform random sample of K rows, in row id order
    #[arg(long, value_name = "K")]
    pub sample: Option<usize>,

    /// Seed for --sample (overrides the config file)
    #[arg(long, env = "ROW_SOURCE_SEED")]
    pub seed: Option<u64>,
}
