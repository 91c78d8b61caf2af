//! Template resolution: turn a (program, weekday, mood) selection into a
//! list of typed exercise templates.
//!
//! Resolution never fails. A missing program, day or mood is simply "no
//! suggestion available", and list elements that cannot be read are skipped.

use crate::classifier::classify;
use crate::templates::{split_scheme_prefix, TemplateRecord, TemplateSpec, TemplateTable};
use crate::types::{new_key, DEFAULT_REPS, DEFAULT_SETS};
use crate::{ExerciseKind, ExerciseTemplate, MoodLevel, Prescription, Reps, Weekday};

/// Resolve the suggested exercises for a program, weekday and mood.
pub fn resolve(
    table: &TemplateTable,
    program: &str,
    day: Weekday,
    mood: MoodLevel,
) -> Vec<ExerciseTemplate> {
    resolve_keys(table, program, &day.as_key(), &mood.as_key())
}

/// Resolve using free-text weekday and mood labels.
///
/// Both labels are lowercased before lookup; the program name is matched exactly.
pub fn resolve_keys(
    table: &TemplateTable,
    program: &str,
    day: &str,
    mood: &str,
) -> Vec<ExerciseTemplate> {
    let day_key = day.trim().to_lowercase();
    let mood_key = mood.trim().to_lowercase();

    let Some(list) = table.lookup(program, &day_key, &mood_key) else {
        tracing::info!(
            "No templates for program '{}' on {} ({})",
            program,
            day_key,
            mood_key
        );
        return Vec::new();
    };

    let templates: Vec<ExerciseTemplate> = list
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| match TemplateSpec::parse(value) {
            Some(spec) => Some(build_template(spec)),
            None => {
                tracing::warn!(
                    "Skipping unreadable template #{} in {}/{}/{}",
                    idx + 1,
                    program,
                    day_key,
                    mood_key
                );
                None
            }
        })
        .collect();

    tracing::info!(
        "Resolved {} templates for '{}' on {} ({})",
        templates.len(),
        program,
        day_key,
        mood_key
    );
    templates
}

/// Stamp a key on a parsed record and shape its fields to its kind
fn build_template(spec: TemplateSpec) -> ExerciseTemplate {
    let template = match spec {
        TemplateSpec::Detailed(record) => from_record(record),
        TemplateSpec::Named(raw) => {
            let (sets, reps, name) = split_scheme_prefix(&raw)
                .unwrap_or_else(|| (DEFAULT_SETS, DEFAULT_REPS, raw.trim().to_string()));
            let prescription = match classify(&name) {
                ExerciseKind::Weight => Prescription::Weight {
                    sets,
                    reps: Reps::Count(reps),
                    weight: 0.0,
                    rest: None,
                },
                ExerciseKind::Bodyweight => Prescription::Bodyweight {
                    sets,
                    reps: Reps::Count(reps),
                    rest: None,
                },
                kind => Prescription::defaults_for(kind),
            };
            ExerciseTemplate {
                key: new_key("ex"),
                name,
                prescription,
            }
        }
    };

    tracing::debug!("Template {} -> key {}", template.name, template.key);
    template
}

fn from_record(record: TemplateRecord) -> ExerciseTemplate {
    let name = record.name.trim().to_string();

    let kind = match record.kind.as_deref().map(str::parse::<ExerciseKind>) {
        Some(Ok(kind)) => kind,
        Some(Err(_)) => {
            tracing::warn!(
                "Unknown type {:?} for '{}', classifying by name",
                record.kind,
                name
            );
            classify(&name)
        }
        None => classify(&name),
    };

    let sets = record.sets.filter(|&s| s >= 1).unwrap_or(DEFAULT_SETS);
    let reps = record.reps.unwrap_or(Reps::Count(DEFAULT_REPS));

    let prescription = match kind {
        ExerciseKind::Weight => Prescription::Weight {
            sets,
            reps,
            weight: record.weight.unwrap_or(0.0),
            rest: record.rest,
        },
        ExerciseKind::Bodyweight => Prescription::Bodyweight {
            sets,
            reps,
            rest: record.rest,
        },
        ExerciseKind::Cardio => Prescription::Cardio {
            duration: record.duration,
        },
        ExerciseKind::Yoga => Prescription::Yoga {
            duration: record.duration,
        },
    };

    let key = record
        .key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| new_key("ex"));

    ExerciseTemplate {
        key,
        name,
        prescription,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::default_table;
    use serde_json::json;

    fn test_table() -> TemplateTable {
        TemplateTable::from_value(json!({
            "Strength": {
                "monday": {
                    "good": [
                        { "name": "Bench press", "type": "weight", "sets": 4, "reps": 8, "rest": "90s" },
                        { "name": "Dips", "type": "bodyweight", "reps": "AMRAP", "weight": 25 },
                        { "name": "Run", "duration": "20min", "key": "fixed-run" },
                        "5x5 Squat",
                        "Light Walk",
                        { "nonsense": true }
                    ]
                },
                "sunday": { "okay": [] }
            }
        }))
    }

    /// Everything except the generated key
    fn content(templates: &[ExerciseTemplate]) -> Vec<(String, Prescription)> {
        templates
            .iter()
            .map(|t| (t.name.clone(), t.prescription.clone()))
            .collect()
    }

    #[test]
    fn test_missing_paths_resolve_empty() {
        let table = test_table();
        assert!(resolve(&table, "Nope", Weekday::Monday, MoodLevel::Good).is_empty());
        assert!(resolve(&table, "Strength", Weekday::Tuesday, MoodLevel::Good).is_empty());
        assert!(resolve(&table, "Strength", Weekday::Monday, MoodLevel::Great).is_empty());
        assert!(resolve(&table, "Strength", Weekday::Sunday, MoodLevel::Okay).is_empty());
        assert!(resolve(&TemplateTable::empty(), "Strength", Weekday::Monday, MoodLevel::Good)
            .is_empty());
    }

    #[test]
    fn test_program_match_is_exact() {
        let table = test_table();
        assert!(resolve(&table, "strength", Weekday::Monday, MoodLevel::Good).is_empty());
    }

    #[test]
    fn test_day_and_mood_are_lowercased() {
        let table = test_table();
        let templates = resolve_keys(&table, "Strength", "Monday", "GOOD");
        assert_eq!(templates.len(), 5);
    }

    #[test]
    fn test_resolves_records_in_order() {
        crate::logging::init_test();
        let table = test_table();
        let templates = resolve(&table, "Strength", Weekday::Monday, MoodLevel::Good);

        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Bench press", "Dips", "Run", "Squat", "Light Walk"]);

        assert_eq!(
            templates[0].prescription,
            Prescription::Weight {
                sets: 4,
                reps: Reps::Count(8),
                weight: 0.0,
                rest: Some("90s".into()),
            }
        );
        // Load is not a bodyweight field and is dropped
        assert_eq!(
            templates[1].prescription,
            Prescription::Bodyweight {
                sets: 3,
                reps: Reps::Scheme("AMRAP".into()),
                rest: None,
            }
        );
        // No explicit type: classified by name
        assert_eq!(
            templates[2].prescription,
            Prescription::Cardio {
                duration: Some("20min".into())
            }
        );
        assert_eq!(
            templates[3].prescription,
            Prescription::Weight {
                sets: 5,
                reps: Reps::Count(5),
                weight: 0.0,
                rest: None,
            }
        );
        assert_eq!(templates[4].kind(), ExerciseKind::Weight);
    }

    #[test]
    fn test_configured_key_is_reused() {
        let table = test_table();
        let templates = resolve(&table, "Strength", Weekday::Monday, MoodLevel::Good);
        assert_eq!(templates[2].key, "fixed-run");
    }

    #[test]
    fn test_resolution_is_deterministic_except_keys() {
        let table = test_table();
        let first = resolve(&table, "Strength", Weekday::Monday, MoodLevel::Good);
        let second = resolve(&table, "Strength", Weekday::Monday, MoodLevel::Good);

        assert_eq!(content(&first), content(&second));
        assert_ne!(first[0].key, second[0].key);

        let mut keys: Vec<_> = first.iter().map(|t| t.key.clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), first.len());
    }

    #[test]
    fn test_unknown_type_falls_back_to_classifier() {
        let table = TemplateTable::from_value(json!({
            "P": { "friday": { "great": [{ "name": "Swim", "type": "aquatic", "duration": "1h" }] } }
        }));
        let templates = resolve(&table, "P", Weekday::Friday, MoodLevel::Great);
        assert_eq!(templates[0].kind(), ExerciseKind::Cardio);
        assert_eq!(templates[0].prescription.duration(), Some("1h"));
    }

    #[test]
    fn test_default_table_weight_templates_default_to_zero_load() {
        let templates = resolve(default_table(), "Basic", Weekday::Monday, MoodLevel::Good);
        assert!(!templates.is_empty());
        for t in templates.iter().filter(|t| t.kind() == ExerciseKind::Weight) {
            assert_eq!(t.prescription.weight(), Some(0.0));
        }
    }
}
