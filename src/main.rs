//! Command-line interface for row-source
//!
//! # Usage Examples
//!
//! ```bash
//! # Print the first ten integers
//! row-source query "long_sequence(10)"
//!
//! # JSON lines, filtered
//! row-source query "long_sequence(100)" --filter "x >= 95" --format json
//!
//! # Reproducible random sample of 5 rows
//! row-source query "long_sequence(1000000)" --sample 5 --seed 42
//!
//! # Direct lookups by row id
//! row-source query "long_sequence(10)" --row-id 0 --row-id 3
//!
//! # Column layout and registered functions
//! row-source describe "long_sequence(1)"
//! row-source functions
//! ```
//!
//! Set `RUST_LOG=debug` to see planning decisions.

use anyhow::Context;
use clap::Parser;
use cursor_core::{ColumnMetadata, Record, RecordCursor, RowId};
use row_source::cli::{Cli, Commands, QueryArgs};
use row_source::operators::{require_random_access, FilterCursor, Predicate, RandomSampler};
use row_source::{output, AppConfig, FunctionRegistry, Planner, RowIdCursor};
use serde::Serialize;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => AppConfig::default(),
    };

    let registry = FunctionRegistry::builtin().context("Failed to build function registry")?;

    match cli.command {
        Commands::Query(args) => run_query(&registry, config, args),
        Commands::Describe { call } => run_describe(&registry, &config, &call),
        Commands::Functions => run_functions(&registry),
    }
}

fn run_query(
    registry: &FunctionRegistry,
    config: AppConfig,
    args: QueryArgs,
) -> anyhow::Result<()> {
    let AppConfig { format, engine } = config.merge(&args);

    tracing::info!("Running {} (format={:?})", args.call, format);

    let function = Planner::new(registry, &engine)
        .plan_cursor(&args.call)
        .with_context(|| format!("Failed to plan '{}'", args.call))?;
    let metadata = function.metadata().clone();

    let mut cursor: Box<dyn RecordCursor> = function.cursor();

    if let Some(expression) = &args.filter {
        let predicate = Predicate::parse(expression, &metadata)
            .with_context(|| format!("Invalid filter '{expression}'"))?;
        tracing::info!("Filtering on {}", predicate);
        cursor = Box::new(FilterCursor::new(cursor, move |record: &dyn Record| {
            predicate.matches(record)
        }));
    }

    if !args.row_ids.is_empty() {
        require_random_access(function.factory()).context("Cannot look up rows by id")?;
        let row_ids = args.row_ids.iter().copied().map(RowId::new).collect();
        cursor = Box::new(RowIdCursor::new(cursor, row_ids));
    }

    if let Some(k) = args.sample {
        require_random_access(function.factory()).context("Cannot sample rows")?;
        tracing::info!("Sampling {} row(s) (seed={:?})", k, engine.random_seed);
        cursor = Box::new(RandomSampler::new(engine.random_seed).sample(cursor, k));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let rows = output::render(format, &metadata, cursor.as_mut(), engine.row_limit, &mut out)
        .context("Failed to write results")?;
    out.flush().context("Failed to flush output")?;
    cursor.close();

    tracing::info!("Returned {} row(s)", rows);
    Ok(())
}

/// YAML shape printed by `describe`.
#[derive(Serialize)]
struct Description<'a> {
    call: &'a str,
    random_access: bool,
    columns: Vec<&'a ColumnMetadata>,
}

fn run_describe(
    registry: &FunctionRegistry,
    config: &AppConfig,
    call: &str,
) -> anyhow::Result<()> {
    let function = Planner::new(registry, &config.engine)
        .plan_cursor(call)
        .with_context(|| format!("Failed to plan '{call}'"))?;

    let description = Description {
        call,
        random_access: function.factory().supports_random_access(),
        columns: function.metadata().columns().collect(),
    };

    let yaml = serde_yaml::to_string(&description).context("Failed to serialize metadata")?;
    print!("{yaml}");
    Ok(())
}

fn run_functions(registry: &FunctionRegistry) -> anyhow::Result<()> {
    tracing::info!("{} function signature(s) registered", registry.len());
    for signature in registry.signatures() {
        println!("{signature}");
    }
    Ok(())
}
