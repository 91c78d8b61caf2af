//! CSV export of the session log.
//!
//! Format: an unquoted header row of column names, then one row per entry
//! with every value wrapped in double quotes and absent values written as
//! `""`. Rows are joined with `\n` and there is no trailing newline.
//!
//! The column set is taken from the *first* entry only: every field its kind
//! carries, in fixed column order, whether or not the entry filled it in.
//! Later entries are written against those same columns, so in a mixed log a
//! cardio row under a weight-shaped header shows `""` for sets/reps/weight/rest
//! and its duration does not appear at all.
//!
//! Values are escaped by the `csv` writer, so an embedded `"` becomes `""`
//! instead of corrupting the row.

use crate::{Error, ExerciseKind, Result, SessionLog, WorkoutEntry};
use chrono::{DateTime, Utc};

/// One exportable field of a [`WorkoutEntry`], in output order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Date,
    Day,
    Mood,
    Program,
    WorkoutName,
    Exercise,
    Sets,
    Reps,
    Weight,
    Duration,
    Rest,
    Type,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Date,
        Column::Day,
        Column::Mood,
        Column::Program,
        Column::WorkoutName,
        Column::Exercise,
        Column::Sets,
        Column::Reps,
        Column::Weight,
        Column::Duration,
        Column::Rest,
        Column::Type,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Day => "day",
            Column::Mood => "mood",
            Column::Program => "program",
            Column::WorkoutName => "workoutName",
            Column::Exercise => "exercise",
            Column::Sets => "sets",
            Column::Reps => "reps",
            Column::Weight => "weight",
            Column::Duration => "duration",
            Column::Rest => "rest",
            Column::Type => "type",
        }
    }

    /// Whether entries of `kind` carry this column
    pub fn applies_to(&self, kind: ExerciseKind) -> bool {
        match self {
            Column::Sets | Column::Reps | Column::Rest => !kind.is_timed(),
            Column::Weight => kind == ExerciseKind::Weight,
            Column::Duration => kind.is_timed(),
            _ => true,
        }
    }

    /// The entry's value for this column, `None` when it is unset or the kind has no such field
    pub fn value(&self, entry: &WorkoutEntry) -> Option<String> {
        let p = entry.prescription();
        match self {
            Column::Date => Some(entry.date().format("%Y-%m-%d").to_string()),
            Column::Day => Some(entry.day().to_string()),
            Column::Mood => Some(entry.mood().to_string()),
            Column::Program => Some(entry.program().to_string()),
            Column::WorkoutName => Some(entry.workout_name().to_string()),
            Column::Exercise => Some(entry.exercise().to_string()),
            Column::Sets => p.sets().map(|s| s.to_string()),
            Column::Reps => p.reps().map(|r| r.to_string()),
            Column::Weight => p.weight().map(|w| w.to_string()),
            Column::Duration => p.duration().map(str::to_string),
            Column::Rest => p.rest().map(str::to_string),
            Column::Type => Some(entry.kind().to_string()),
        }
    }
}

/// Columns carried by `entry`'s kind
pub fn columns_for(entry: &WorkoutEntry) -> Vec<Column> {
    let kind = entry.kind();
    Column::ALL
        .into_iter()
        .filter(|c| c.applies_to(kind))
        .collect()
}

/// Render the whole log as CSV text.
///
/// Returns [`Error::EmptyLog`] when there is nothing to export.
pub fn export_csv(log: &SessionLog) -> Result<String> {
    let first = log.entries().first().ok_or(Error::EmptyLog)?;
    let columns = columns_for(first);

    let mut out: Vec<u8> = Vec::new();

    {
        let mut header = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        header.write_record(columns.iter().map(|c| c.header()))?;
        header.flush()?;
    }

    {
        let mut rows = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        for entry in log.iter() {
            rows.write_record(
                columns
                    .iter()
                    .map(|c| c.value(entry).unwrap_or_default()),
            )?;
        }
        rows.flush()?;
    }

    let mut text = String::from_utf8(out)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    if text.ends_with('\n') {
        text.pop();
    }

    tracing::info!(
        "Exported {} entries across {} columns",
        log.len(),
        columns.len()
    );
    Ok(text)
}

/// A finished export, ready for an external writer or share sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub contents: String,
}

/// `workout_log_<unix-millis>.csv`
pub fn suggested_filename(now: DateTime<Utc>) -> String {
    format!("workout_log_{}.csv", now.timestamp_millis())
}

/// Render the log and pair it with a suggested filename
pub fn export(log: &SessionLog, now: DateTime<Utc>) -> Result<CsvExport> {
    let contents = export_csv(log)?;
    Ok(CsvExport {
        filename: suggested_filename(now),
        contents,
    })
}
