//! Exercise template table: program → weekday → mood → exercise list.
//!
//! The table is external, read-only input. It is kept untyped and only
//! queried: a path that is missing, or a level with the wrong shape, is an
//! absent suggestion, never an error. Individual records are parsed when a
//! list is resolved.

use crate::{ExerciseKind, MoodLevel, Reps, Result, Weekday};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const DEFAULT_TEMPLATES_JSON: &str = include_str!("../assets/default_templates.json");

/// Cached built-in table - parsed once and reused
static DEFAULT_TABLE: Lazy<TemplateTable> = Lazy::new(|| {
    match serde_json::from_str(DEFAULT_TEMPLATES_JSON) {
        Ok(root) => TemplateTable::from_value(root),
        Err(e) => {
            tracing::error!("Built-in template table is not valid JSON: {}", e);
            TemplateTable::empty()
        }
    }
});

/// Get a reference to the built-in template table
pub fn default_table() -> &'static TemplateTable {
    &DEFAULT_TABLE
}

/// A detailed template record as written in a template file
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct TemplateRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<Reps>,
    pub weight: Option<f64>,
    pub rest: Option<String>,
    pub duration: Option<String>,
    pub key: Option<String>,
}

/// One element of a mood list
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum TemplateSpec {
    Detailed(TemplateRecord),
    /// Legacy plain-name form, optionally prefixed with "SETSxREPS"
    Named(String),
}

impl TemplateSpec {
    /// Parse one list element; `None` for anything unusable
    pub(crate) fn parse(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Split a legacy "3x10 Bench press" name into (sets, reps, name)
pub(crate) fn split_scheme_prefix(raw: &str) -> Option<(u32, u32, String)> {
    let trimmed = raw.trim();
    let (first, rest) = trimmed.split_once(' ')?;
    let (sets, reps) = first.to_lowercase().split_once('x').and_then(|(s, r)| {
        Some((s.parse::<u32>().ok()?, r.parse::<u32>().ok()?))
    })?;
    let name = rest.trim();
    if name.is_empty() {
        return None;
    }
    Some((sets, reps, name.to_string()))
}

/// The nested template lookup table
#[derive(Clone, Debug)]
pub struct TemplateTable {
    root: Value,
}

impl TemplateTable {
    /// Wrap an already-parsed table
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// A table with no programs
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Default::default()),
        }
    }

    /// Load a table from a JSON or TOML file (chosen by extension, JSON otherwise)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let root: Value = if is_toml {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        let table = Self::from_value(root);
        tracing::info!(
            "Loaded template table from {:?} ({} programs)",
            path,
            table.programs().len()
        );
        Ok(table)
    }

    /// Program names in file order
    pub fn programs(&self) -> Vec<String> {
        self.root
            .as_object()
            .map(|programs| programs.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_program(&self, program: &str) -> bool {
        self.root.get(program).is_some()
    }

    /// Raw list at program → day_key → mood_key, if every level exists
    pub(crate) fn lookup(&self, program: &str, day_key: &str, mood_key: &str) -> Option<&[Value]> {
        self.root
            .get(program)?
            .get(day_key)?
            .get(mood_key)?
            .as_array()
            .map(|list| list.as_slice())
    }

    /// Check the table for shape problems.
    ///
    /// Returns a list of warnings, or empty Vec if everything resolves cleanly.
    /// Warnings never prevent the table from being used.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let Some(programs) = self.root.as_object() else {
            warnings.push("Template table is not a map of programs".to_string());
            return warnings;
        };

        if programs.is_empty() {
            warnings.push("Template table has no programs".to_string());
        }

        for (program, days) in programs {
            let Some(days) = days.as_object() else {
                warnings.push(format!("Program '{}' is not a map of weekdays", program));
                continue;
            };

            for (day, moods) in days {
                if !Weekday::ALL.iter().any(|d| &d.as_key() == day) {
                    warnings.push(format!(
                        "Program '{}': '{}' is not a lowercase weekday and can never be resolved",
                        program, day
                    ));
                }

                let Some(moods) = moods.as_object() else {
                    warnings.push(format!("Program '{}', {}: not a map of moods", program, day));
                    continue;
                };

                for (mood, list) in moods {
                    if !MoodLevel::ALL.iter().any(|m| &m.as_key() == mood) {
                        warnings.push(format!(
                            "Program '{}', {}: '{}' is not a known mood key",
                            program, day, mood
                        ));
                    }

                    let Some(list) = list.as_array() else {
                        warnings.push(format!(
                            "Program '{}', {}/{}: not a list of exercises",
                            program, day, mood
                        ));
                        continue;
                    };

                    for (idx, item) in list.iter().enumerate() {
                        match TemplateSpec::parse(item) {
                            None => warnings.push(format!(
                                "Program '{}', {}/{} #{}: unreadable exercise record",
                                program,
                                day,
                                mood,
                                idx + 1
                            )),
                            Some(TemplateSpec::Detailed(record)) => {
                                if let Some(kind) = &record.kind {
                                    if kind.parse::<ExerciseKind>().is_err() {
                                        warnings.push(format!(
                                            "Program '{}', {}/{} #{}: unknown type '{}'",
                                            program,
                                            day,
                                            mood,
                                            idx + 1,
                                            kind
                                        ));
                                    }
                                }
                                if record.name.trim().is_empty() {
                                    warnings.push(format!(
                                        "Program '{}', {}/{} #{}: empty exercise name",
                                        program,
                                        day,
                                        mood,
                                        idx + 1
                                    ));
                                }
                            }
                            Some(TemplateSpec::Named(_)) => {}
                        }
                    }
                }
            }
        }

        warnings
    }
}
