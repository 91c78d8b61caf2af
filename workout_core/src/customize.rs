//! Per-exercise customization of resolved templates.
//!
//! Edits arrive as raw text from an input field. Numbers are coerced rather
//! than rejected; only an edit to a field the template's kind does not carry
//! is refused, so a template always keeps the shape of its kind.

use crate::types::leading_int;
use crate::{Error, ExerciseTemplate, Prescription, Reps, Result};
use std::fmt;
use std::str::FromStr;

/// A customizable template field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateField {
    Sets,
    Reps,
    Weight,
    Rest,
    Duration,
}

impl TemplateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateField::Sets => "sets",
            TemplateField::Reps => "reps",
            TemplateField::Weight => "weight",
            TemplateField::Rest => "rest",
            TemplateField::Duration => "duration",
        }
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sets" => Ok(TemplateField::Sets),
            "reps" => Ok(TemplateField::Reps),
            "weight" => Ok(TemplateField::Weight),
            "rest" => Ok(TemplateField::Rest),
            "duration" => Ok(TemplateField::Duration),
            other => Err(Error::ValidationFailed(format!("unknown field '{}'", other))),
        }
    }
}

/// Sets/reps coercion: leading integer, with unparseable or zero becoming 1
pub(crate) fn coerce_count(text: &str) -> u32 {
    leading_int(text).filter(|&n| n > 0).unwrap_or(1)
}

/// Load coercion: a non-negative number, otherwise 0
pub(crate) fn coerce_weight(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
        .or_else(|| leading_int(text).map(f64::from))
        .unwrap_or(0.0)
}

/// Free-text fields: blank input clears the value
fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ExerciseTemplate {
    /// Apply one text edit to the named field
    pub fn set(&mut self, field: TemplateField, text: &str) -> Result<()> {
        match field {
            TemplateField::Sets => self.set_sets(text),
            TemplateField::Reps => self.set_reps(text),
            TemplateField::Weight => self.set_weight(text),
            TemplateField::Rest => self.set_rest(text),
            TemplateField::Duration => self.set_duration(text),
        }
    }

    pub fn set_sets(&mut self, text: &str) -> Result<()> {
        let value = coerce_count(text);
        match self.prescription {
            Prescription::Weight { ref mut sets, .. }
            | Prescription::Bodyweight { ref mut sets, .. } => {
                *sets = value;
                Ok(())
            }
            _ => Err(self.not_applicable(TemplateField::Sets)),
        }
    }

    pub fn set_reps(&mut self, text: &str) -> Result<()> {
        let value = Reps::Count(coerce_count(text));
        match self.prescription {
            Prescription::Weight { ref mut reps, .. }
            | Prescription::Bodyweight { ref mut reps, .. } => {
                *reps = value;
                Ok(())
            }
            _ => Err(self.not_applicable(TemplateField::Reps)),
        }
    }

    pub fn set_weight(&mut self, text: &str) -> Result<()> {
        let value = coerce_weight(text);
        match self.prescription {
            Prescription::Weight { ref mut weight, .. } => {
                *weight = value;
                Ok(())
            }
            _ => Err(self.not_applicable(TemplateField::Weight)),
        }
    }

    pub fn set_rest(&mut self, text: &str) -> Result<()> {
        let value = optional_text(text);
        match self.prescription {
            Prescription::Weight { ref mut rest, .. }
            | Prescription::Bodyweight { ref mut rest, .. } => {
                *rest = value;
                Ok(())
            }
            _ => Err(self.not_applicable(TemplateField::Rest)),
        }
    }

    pub fn set_duration(&mut self, text: &str) -> Result<()> {
        let value = optional_text(text);
        match self.prescription {
            Prescription::Cardio { ref mut duration }
            | Prescription::Yoga { ref mut duration } => {
                *duration = value;
                Ok(())
            }
            _ => Err(self.not_applicable(TemplateField::Duration)),
        }
    }

    /// Suggestion line: "Bench press: Suggested: 3 sets × 10 reps (Rest: 60s)"
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.prescription.summary())
    }

    fn not_applicable(&self, field: TemplateField) -> Error {
        Error::ValidationFailed(format!(
            "'{}' is a {} exercise and has no {} field",
            self.name,
            self.kind(),
            field
        ))
    }
}
