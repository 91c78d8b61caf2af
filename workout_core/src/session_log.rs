//! In-memory session log.
//!
//! The log is owned by the caller for the duration of one session and is
//! append-only: entries are created here, never edited, and only removed all
//! at once by [`SessionLog::clear`].

use crate::classifier::classify;
use crate::config::CustomDefaults;
use crate::customize::{coerce_count, coerce_weight, TemplateField};
use crate::types::new_key;
use crate::{Error, ExerciseKind, ExerciseTemplate, MoodLevel, Prescription, Reps, Result, Weekday};
use chrono::NaiveDate;
use serde::Serialize;

/// Selection the trainee made for this session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub program: String,
    pub day: Weekday,
    pub mood: MoodLevel,
    /// Calendar date stamped on every entry logged under this context
    pub date: NaiveDate,
}

impl SessionContext {
    pub fn new(program: impl Into<String>, day: Weekday, mood: MoodLevel, date: NaiveDate) -> Self {
        Self {
            program: program.into(),
            day,
            mood,
            date,
        }
    }

    /// Context dated with the local calendar date
    pub fn today(program: impl Into<String>, day: Weekday, mood: MoodLevel) -> Self {
        Self::new(program, day, mood, chrono::Local::now().date_naive())
    }
}

/// An exercise about to be logged
#[derive(Clone, Debug, PartialEq)]
pub struct EntryDraft {
    pub workout_name: String,
    pub exercise: String,
    pub prescription: Prescription,
}

/// A logged exercise
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WorkoutEntry {
    key: String,
    date: NaiveDate,
    day: Weekday,
    mood: MoodLevel,
    program: String,
    workout_name: String,
    exercise: String,
    prescription: Prescription,
}

impl WorkoutEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn mood(&self) -> MoodLevel {
        self.mood
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn workout_name(&self) -> &str {
        &self.workout_name
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn kind(&self) -> ExerciseKind {
        self.prescription.kind()
    }

    pub fn prescription(&self) -> &Prescription {
        &self.prescription
    }

    /// "Leg Day - Monday (Basic)"
    pub fn heading(&self) -> String {
        format!("{} - {} ({})", self.workout_name, self.day, self.program)
    }

    /// "Bench press: 3×10 @ 135lbs (Rest: 60s)" or "Run: 30min"
    pub fn summary(&self) -> String {
        let rest_suffix = |rest: &Option<String>| {
            rest.as_ref()
                .map(|r| format!(" (Rest: {})", r))
                .unwrap_or_default()
        };

        match &self.prescription {
            Prescription::Weight {
                sets,
                reps,
                weight,
                rest,
            } => format!(
                "{}: {}×{} @ {}lbs{}",
                self.exercise,
                sets,
                reps,
                weight,
                rest_suffix(rest)
            ),
            Prescription::Bodyweight { sets, reps, rest } => format!(
                "{}: {}×{}{}",
                self.exercise,
                sets,
                reps,
                rest_suffix(rest)
            ),
            Prescription::Cardio { duration } | Prescription::Yoga { duration } => format!(
                "{}: {}",
                self.exercise,
                duration.as_deref().unwrap_or("")
            ),
        }
    }
}

/// A manually entered exercise, before classification
#[derive(Clone, Debug, PartialEq)]
pub struct CustomExercise {
    pub workout_name: String,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub rest: String,
    pub duration: String,
}

impl CustomExercise {
    /// A custom exercise pre-filled with the configured input defaults
    pub fn new(
        workout_name: impl Into<String>,
        exercise: impl Into<String>,
        defaults: &CustomDefaults,
    ) -> Self {
        Self {
            workout_name: workout_name.into(),
            exercise: exercise.into(),
            sets: defaults.sets,
            reps: defaults.reps,
            weight: defaults.weight,
            rest: defaults.rest.clone(),
            duration: defaults.duration.clone(),
        }
    }

    /// Apply one text edit, coercing numbers the same way template edits do
    pub fn set(&mut self, field: TemplateField, text: &str) {
        match field {
            TemplateField::Sets => self.sets = coerce_count(text),
            TemplateField::Reps => self.reps = coerce_count(text),
            TemplateField::Weight => self.weight = coerce_weight(text),
            TemplateField::Rest => self.rest = text.trim().to_string(),
            TemplateField::Duration => self.duration = text.trim().to_string(),
        }
    }

    /// Classify the exercise and keep only the fields its kind carries
    fn into_draft(self) -> Result<EntryDraft> {
        let workout_name = self.workout_name.trim();
        let exercise = self.exercise.trim();
        if workout_name.is_empty() || exercise.is_empty() {
            return Err(Error::ValidationFailed(
                "workout name and exercise name are required".into(),
            ));
        }

        let non_empty = |text: &str| (!text.trim().is_empty()).then(|| text.trim().to_string());

        let prescription = match classify(exercise) {
            ExerciseKind::Weight => Prescription::Weight {
                sets: self.sets.max(1),
                reps: Reps::Count(self.reps.max(1)),
                weight: self.weight,
                rest: non_empty(&self.rest),
            },
            ExerciseKind::Bodyweight => Prescription::Bodyweight {
                sets: self.sets.max(1),
                reps: Reps::Count(self.reps.max(1)),
                rest: non_empty(&self.rest),
            },
            ExerciseKind::Cardio => Prescription::Cardio {
                duration: non_empty(&self.duration),
            },
            ExerciseKind::Yoga => Prescription::Yoga {
                duration: non_empty(&self.duration),
            },
        };

        Ok(EntryDraft {
            workout_name: workout_name.to_string(),
            exercise: exercise.to_string(),
            prescription,
        })
    }
}

/// Ordered, append-only log of exercises performed this session
#[derive(Clone, Debug, Default)]
pub struct SessionLog {
    entries: Vec<WorkoutEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of drafts in order; returns the new entries.
    ///
    /// Every draft becomes an entry with a freshly generated key.
    pub fn append<I>(&mut self, ctx: &SessionContext, drafts: I) -> &[WorkoutEntry]
    where
        I: IntoIterator<Item = EntryDraft>,
    {
        let start = self.entries.len();
        let batch: Vec<WorkoutEntry> = drafts
            .into_iter()
            .map(|draft| WorkoutEntry {
                key: new_key("entry"),
                date: ctx.date,
                day: ctx.day,
                mood: ctx.mood,
                program: ctx.program.clone(),
                workout_name: draft.workout_name,
                exercise: draft.exercise,
                prescription: draft.prescription,
            })
            .collect();
        self.entries.extend(batch);

        tracing::info!(
            "Logged {} entries ({} total)",
            self.entries.len() - start,
            self.entries.len()
        );
        &self.entries[start..]
    }

    /// Log a resolved (and possibly customized) suggestion list as "<program> Workout"
    pub fn save_suggestions(
        &mut self,
        ctx: &SessionContext,
        templates: &[ExerciseTemplate],
    ) -> &[WorkoutEntry] {
        let workout_name = format!("{} Workout", ctx.program);
        let drafts: Vec<EntryDraft> = templates
            .iter()
            .map(|t| EntryDraft {
                workout_name: workout_name.clone(),
                exercise: t.name.clone(),
                prescription: t.prescription.clone(),
            })
            .collect();
        self.append(ctx, drafts)
    }

    /// Validate, classify and log one manually entered exercise.
    ///
    /// Fails with [`Error::ValidationFailed`] when the workout or exercise
    /// name is blank; the log is left untouched in that case.
    pub fn add_custom(
        &mut self,
        ctx: &SessionContext,
        custom: CustomExercise,
    ) -> Result<&WorkoutEntry> {
        let draft = custom.into_draft()?;
        let appended = self.append(ctx, [draft]);
        appended
            .first()
            .ok_or_else(|| Error::ValidationFailed("entry was not logged".into()))
    }

    /// Remove every entry; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        tracing::info!("Cleared {} entries from the log", removed);
        removed
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
