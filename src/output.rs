//! Result rendering for cursors.

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use cursor_core::{RecordCursor, RecordMetadata, Value};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::warn;

/// Row cap for table output when no limit is given. Tables are laid out in
/// memory before printing, unlike JSON and CSV which stream.
pub const DEFAULT_TABLE_ROWS: u64 = 1_000;

/// Error type for rendering.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// One JSON object per row
    Json,
    /// CSV with a header row
    Csv,
}

/// Render up to `limit` rows of `cursor` to `out`, returning the row count.
///
/// Table output without a limit stops at [`DEFAULT_TABLE_ROWS`].
pub fn render<W: Write>(
    format: OutputFormat,
    metadata: &RecordMetadata,
    cursor: &mut dyn RecordCursor,
    limit: Option<u64>,
    out: &mut W,
) -> Result<u64, OutputError> {
    let capped = format == OutputFormat::Table && limit.is_none();
    let mut rows = Rows {
        cursor,
        columns: metadata.column_count(),
        remaining: if capped {
            Some(DEFAULT_TABLE_ROWS)
        } else {
            limit
        },
        emitted: 0,
    };

    match format {
        OutputFormat::Table => render_table(metadata, &mut rows, out)?,
        OutputFormat::Json => render_json(metadata, &mut rows, out)?,
        OutputFormat::Csv => render_csv(metadata, &mut rows, out)?,
    }

    if capped && rows.remaining == Some(0) && rows.cursor.has_next() {
        warn!(
            "Table output truncated to {} rows; use --limit or --format json|csv for more",
            DEFAULT_TABLE_ROWS
        );
    }
    Ok(rows.emitted)
}

/// Pulls rows as value lists, stopping at the limit.
struct Rows<'a> {
    cursor: &'a mut dyn RecordCursor,
    columns: usize,
    remaining: Option<u64>,
    emitted: u64,
}

impl Iterator for Rows<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) || !self.cursor.has_next() {
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        self.emitted += 1;

        let record = self.cursor.record();
        Some((0..self.columns).map(|col| record.value(col)).collect())
    }
}

fn render_table<W: Write>(
    metadata: &RecordMetadata,
    rows: &mut Rows<'_>,
    out: &mut W,
) -> Result<(), OutputError> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(metadata.column_names());

    for row in rows {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }

    writeln!(out, "{table}")?;
    Ok(())
}

fn render_json<W: Write>(
    metadata: &RecordMetadata,
    rows: &mut Rows<'_>,
    out: &mut W,
) -> Result<(), OutputError> {
    let names = metadata.column_names();
    for row in rows {
        let object: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .zip(row)
            .map(|(name, value)| Ok((name.to_string(), serde_json::to_value(value)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        serde_json::to_writer(&mut *out, &object)?;
        writeln!(out)?;
    }
    Ok(())
}

fn render_csv<W: Write>(
    metadata: &RecordMetadata,
    rows: &mut Rows<'_>,
    out: &mut W,
) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    writer.write_record(metadata.column_names())?;

    for row in rows {
        writer.write_record(row.iter().map(|value| match value {
            Value::Null => String::new(),
            other => other.to_string(),
        }))?;
    }

    writer.flush()?;
    Ok(())
}
