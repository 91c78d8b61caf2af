#![forbid(unsafe_code)]

//! Core engine for the workout planner.
//!
//! This crate provides:
//! - Domain types (exercise kinds, prescriptions, weekdays, moods)
//! - Exercise name classification
//! - Template table loading and resolution
//! - Per-exercise customization
//! - Rest timers
//! - The in-memory session log and its CSV export

pub mod types;
pub mod error;
pub mod classifier;
pub mod templates;
pub mod resolver;
pub mod customize;
pub mod timer;
pub mod session_log;
pub mod csv_export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use classifier::classify;
pub use templates::{default_table, TemplateTable};
pub use resolver::{resolve, resolve_keys};
pub use customize::TemplateField;
pub use timer::{
    parse_rest_seconds, run_countdown, RestTimer, RestTimers, TickSource, TimerEvent, TimerId,
    TimerState,
};
pub use session_log::{CustomExercise, EntryDraft, SessionContext, SessionLog, WorkoutEntry};
pub use csv_export::{export, export_csv, suggested_filename, CsvExport};
pub use config::Config;
