//! Name-based exercise classification.
//!
//! Freeform names typed by the trainee (or template records without an
//! explicit type) are mapped onto an [`ExerciseKind`]. Matching is exact
//! equality against the lowercased name; there is no substring or whitespace
//! tolerance, so "light walk" and " walk" are weight exercises while "walk"
//! is cardio. Callers that accept typed input trim it first.

use crate::ExerciseKind;

const CARDIO_NAMES: &[&str] = &["walk", "run", "jog", "bike", "swim", "cardio"];
const YOGA_NAMES: &[&str] = &["yoga", "stretch", "meditation"];
const BODYWEIGHT_NAMES: &[&str] = &["pushup", "pullup", "situp", "bodyweight"];

/// Classify a freeform exercise name.
///
/// Vocabularies are checked cardio first, then yoga, then bodyweight; a name
/// in none of them is a weight exercise.
pub fn classify(name: &str) -> ExerciseKind {
    let lowered = name.to_lowercase();
    let kind = if CARDIO_NAMES.contains(&lowered.as_str()) {
        ExerciseKind::Cardio
    } else if YOGA_NAMES.contains(&lowered.as_str()) {
        ExerciseKind::Yoga
    } else if BODYWEIGHT_NAMES.contains(&lowered.as_str()) {
        ExerciseKind::Bodyweight
    } else {
        ExerciseKind::Weight
    };

    tracing::debug!("Classified {:?} as {}", name, kind);
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_matches() {
        assert_eq!(classify("run"), ExerciseKind::Cardio);
        assert_eq!(classify("yoga"), ExerciseKind::Yoga);
        assert_eq!(classify("pushup"), ExerciseKind::Bodyweight);
        assert_eq!(classify("swim"), ExerciseKind::Cardio);
        assert_eq!(classify("meditation"), ExerciseKind::Yoga);
    }

    #[test]
    fn test_default_is_weight() {
        assert_eq!(classify("bench press"), ExerciseKind::Weight);
        assert_eq!(classify(""), ExerciseKind::Weight);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("Run"), ExerciseKind::Cardio);
        assert_eq!(classify("STRETCH"), ExerciseKind::Yoga);
        assert_eq!(classify("PullUp"), ExerciseKind::Bodyweight);
    }

    #[test]
    fn test_no_substring_matching() {
        assert_eq!(classify("Light Walk"), ExerciseKind::Weight);
        assert_eq!(classify("pushups"), ExerciseKind::Weight);
        assert_eq!(classify("hot yoga"), ExerciseKind::Weight);
    }

    #[test]
    fn test_surrounding_whitespace_is_significant() {
        assert_eq!(classify(" run"), ExerciseKind::Weight);
        assert_eq!(classify("Yoga "), ExerciseKind::Weight);
        assert_eq!(classify("yoga"), ExerciseKind::Yoga);
    }

    #[test]
    fn test_vocabularies_are_disjoint() {
        for name in CARDIO_NAMES {
            assert!(!YOGA_NAMES.contains(name));
            assert!(!BODYWEIGHT_NAMES.contains(name));
        }
        for name in YOGA_NAMES {
            assert!(!BODYWEIGHT_NAMES.contains(name));
        }
    }
}
