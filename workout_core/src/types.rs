//! Core domain types for the workout engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise kinds and their kind-specific prescriptions
//! - Weekdays and mood levels used as template lookup keys
//! - Resolved exercise templates with their identity keys

use crate::Error;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Exercise Kinds
// ============================================================================

/// Classification of an exercise; decides which fields are meaningful
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Weight,
    Bodyweight,
    Cardio,
    Yoga,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Weight,
        ExerciseKind::Bodyweight,
        ExerciseKind::Cardio,
        ExerciseKind::Yoga,
    ];

    /// Lowercase label, as used in template files and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Weight => "weight",
            ExerciseKind::Bodyweight => "bodyweight",
            ExerciseKind::Cardio => "cardio",
            ExerciseKind::Yoga => "yoga",
        }
    }

    /// Duration-based kinds carry `duration` instead of sets/reps/rest
    pub fn is_timed(&self) -> bool {
        matches!(self, ExerciseKind::Cardio | ExerciseKind::Yoga)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        ExerciseKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| Error::ValidationFailed(format!("unknown exercise type '{}'", s)))
    }
}

// ============================================================================
// Prescription Types
// ============================================================================

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;

/// Repetition target: a count or a free-text scheme such as "AMRAP"
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Scheme(String),
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{}", n),
            Reps::Scheme(s) => f.write_str(s),
        }
    }
}

/// Kind-specific exercise parameters.
///
/// Each variant holds exactly the fields its kind carries, so a cardio
/// prescription can never hold a load and a weight prescription can never
/// hold a duration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prescription {
    Weight {
        sets: u32,
        reps: Reps,
        weight: f64,
        rest: Option<String>,
    },
    Bodyweight {
        sets: u32,
        reps: Reps,
        rest: Option<String>,
    },
    Cardio {
        duration: Option<String>,
    },
    Yoga {
        duration: Option<String>,
    },
}

impl Prescription {
    /// Default parameters for a kind: 3 × 10, zero load, no rest or duration
    pub fn defaults_for(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Weight => Prescription::Weight {
                sets: DEFAULT_SETS,
                reps: Reps::Count(DEFAULT_REPS),
                weight: 0.0,
                rest: None,
            },
            ExerciseKind::Bodyweight => Prescription::Bodyweight {
                sets: DEFAULT_SETS,
                reps: Reps::Count(DEFAULT_REPS),
                rest: None,
            },
            ExerciseKind::Cardio => Prescription::Cardio { duration: None },
            ExerciseKind::Yoga => Prescription::Yoga { duration: None },
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            Prescription::Weight { .. } => ExerciseKind::Weight,
            Prescription::Bodyweight { .. } => ExerciseKind::Bodyweight,
            Prescription::Cardio { .. } => ExerciseKind::Cardio,
            Prescription::Yoga { .. } => ExerciseKind::Yoga,
        }
    }

    pub fn sets(&self) -> Option<u32> {
        match self {
            Prescription::Weight { sets, .. } | Prescription::Bodyweight { sets, .. } => {
                Some(*sets)
            }
            _ => None,
        }
    }

    pub fn reps(&self) -> Option<&Reps> {
        match self {
            Prescription::Weight { reps, .. } | Prescription::Bodyweight { reps, .. } => {
                Some(reps)
            }
            _ => None,
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match self {
            Prescription::Weight { weight, .. } => Some(*weight),
            _ => None,
        }
    }

    pub fn rest(&self) -> Option<&str> {
        match self {
            Prescription::Weight { rest, .. } | Prescription::Bodyweight { rest, .. } => {
                rest.as_deref()
            }
            _ => None,
        }
    }

    pub fn duration(&self) -> Option<&str> {
        match self {
            Prescription::Cardio { duration } | Prescription::Yoga { duration } => {
                duration.as_deref()
            }
            _ => None,
        }
    }

    /// One-line description shown next to a suggested exercise
    pub fn summary(&self) -> String {
        match self {
            Prescription::Cardio { duration } | Prescription::Yoga { duration } => format!(
                "Duration: {}",
                duration.as_deref().unwrap_or("Not specified")
            ),
            Prescription::Weight {
                sets, reps, rest, ..
            }
            | Prescription::Bodyweight { sets, reps, rest } => {
                let mut line = format!("Suggested: {} sets × {} reps", sets, reps);
                if let Some(rest) = rest {
                    line.push_str(&format!(" (Rest: {})", rest));
                }
                line
            }
        }
    }
}

// ============================================================================
// Lookup Keys
// ============================================================================

/// Day of the week; configuration keys are the lowercase names
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Capitalized user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Lowercase configuration key
    pub fn as_key(&self) -> String {
        self.label().to_lowercase()
    }

    /// Weekday of the local calendar date
    pub fn today() -> Self {
        chrono::Local::now().weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| {
                let key = d.as_key();
                key == lowered || (lowered.len() == 3 && key.starts_with(&lowered))
            })
            .ok_or_else(|| Error::ValidationFailed(format!("unknown weekday '{}'", s)))
    }
}

/// Self-reported energy level used to choose between alternative lists
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MoodLevel {
    Okay,
    Good,
    Great,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 3] = [MoodLevel::Okay, MoodLevel::Good, MoodLevel::Great];

    pub fn label(&self) -> &'static str {
        match self {
            MoodLevel::Okay => "Okay",
            MoodLevel::Good => "Good",
            MoodLevel::Great => "Great",
        }
    }

    pub fn as_key(&self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MoodLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "okay" | "ok" | "low" => Ok(MoodLevel::Okay),
            "good" | "medium" => Ok(MoodLevel::Good),
            "great" | "high" => Ok(MoodLevel::Great),
            _ => Err(Error::ValidationFailed(format!("unknown mood '{}'", s))),
        }
    }
}

// ============================================================================
// Exercise Templates
// ============================================================================

/// A suggested exercise, resolved from the template table
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseTemplate {
    /// Opaque identity key; stable for the lifetime of this template
    pub key: String,
    pub name: String,
    pub prescription: Prescription,
}

impl ExerciseTemplate {
    pub fn kind(&self) -> ExerciseKind {
        self.prescription.kind()
    }
}

/// Generate a fresh identity key with the given prefix
pub fn new_key(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Parse the leading integer of a string ("12kg" → 12), ignoring leading whitespace
pub(crate) fn leading_int(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
