//! Integration tests for the workout binary.
//!
//! These tests verify end-to-end behavior including:
//! - Suggestions from the built-in and user template tables
//! - The session workflow: generate, customize, log, clear, export
//! - Rest timers driven by an immediate clock

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a scratch directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from any user config
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workout"));
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn exported_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rest timers"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("session"));
}

#[test]
fn test_programs_lists_builtin_table_in_order() {
    let home = setup_test_dir();
    cli(&home)
        .arg("programs")
        .assert()
        .success()
        .stdout("Basic\n6-Day PPL\n");
}

#[test]
fn test_classify() {
    let home = setup_test_dir();
    for (name, kind) in [
        ("Run", "cardio"),
        ("Yoga", "yoga"),
        (" yoga", "weight"),
        ("pullup", "bodyweight"),
        ("Bench press", "weight"),
        ("Running", "weight"),
    ] {
        cli(&home)
            .args(["classify", name])
            .assert()
            .success()
            .stdout(format!("{}\n", kind));
    }
}

#[test]
fn test_suggest_monday_good() {
    let home = setup_test_dir();
    cli(&home)
        .args(["suggest", "--program", "Basic", "--day", "monday", "--mood", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic - Monday (Good)"))
        .stdout(predicate::str::contains(
            "1. [weight] Bench press: Suggested: 4 sets × 8 reps (Rest: 120s)",
        ));
}

#[test]
fn test_suggest_accepts_mood_aliases() {
    let home = setup_test_dir();
    cli(&home)
        .args(["suggest", "--program", "Basic", "--day", "Mon", "--mood", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic - Monday (Great)"))
        .stdout(predicate::str::contains("[bodyweight] Dips"));
}

#[test]
fn test_suggest_unknown_program_is_empty() {
    let home = setup_test_dir();
    cli(&home)
        .args(["suggest", "--program", "basic", "--day", "monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggested workout"));
}

#[test]
fn test_suggest_rejects_bad_day() {
    let home = setup_test_dir();
    cli(&home)
        .args(["suggest", "--day", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("someday"));
}

#[test]
fn test_user_template_table() {
    let home = setup_test_dir();
    let path = home.path().join("mine.json");
    let table = serde_json::json!({
        "Mine": {
            "friday": {
                "okay": ["3x12 Goblet squat", {"name": "Walk", "duration": "20min"}]
            }
        }
    });
    fs::write(&path, serde_json::to_string_pretty(&table).unwrap()).unwrap();

    cli(&home)
        .arg("--templates")
        .arg(&path)
        .args(["suggest", "--day", "friday", "--mood", "okay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mine - Friday (Okay)"))
        .stdout(predicate::str::contains(
            "[weight] Goblet squat: Suggested: 3 sets × 12 reps",
        ))
        .stdout(predicate::str::contains("[cardio] Walk: Duration: 20min"));
}

#[test]
fn test_check_templates() {
    let home = setup_test_dir();
    cli(&home)
        .arg("check-templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Template table OK (2 programs)"));

    let path = home.path().join("broken.json");
    fs::write(&path, r#"{"Mine": {"Monday": {"good": "Squat"}}}"#).unwrap();
    cli(&home)
        .arg("--templates")
        .arg(&path)
        .arg("check-templates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Monday' is not a lowercase weekday"))
        .stderr(predicate::str::contains("not a list of exercises"));
}

#[test]
fn test_rest_timer_completes() {
    let home = setup_test_dir();
    cli(&home)
        .args(["rest", "3s", "--tick-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest Timer: 3s"))
        .stdout(predicate::str::contains("Resting: 1s left"))
        .stdout(predicate::str::contains("Rest Complete"));
}

#[test]
fn test_rest_timer_falls_back_for_unparseable_spec() {
    let home = setup_test_dir();
    cli(&home)
        .args(["rest", "soon", "--tick-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest Timer: 60s"));
}

#[test]
fn test_session_generate_customize_and_save() {
    let home = setup_test_dir();
    cli(&home)
        .args(["session", "--program", "Basic", "--day", "monday", "--mood", "okay"])
        .write_stdin("generate\nset 1 weight 95\nset 2 weight 10\nsave\nlog\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [weight] Incline DB press"))
        .stdout(predicate::str::contains(
            "'Dips' is a bodyweight exercise and has no weight field",
        ))
        .stdout(predicate::str::contains("Workout saved to your log! (2 exercises)"))
        .stdout(predicate::str::contains("Basic Workout - Monday (Basic)"))
        .stdout(predicate::str::contains("Incline DB press: 3×10 @ 95lbs (Rest: 90s)"));
}

#[test]
fn test_session_exercise_rest() {
    let home = setup_test_dir();
    cli(&home)
        .args(["session", "--program", "Basic", "--day", "monday", "--mood", "okay", "--tick-ms", "0"])
        .write_stdin("generate\nset 1 rest 2s\nrest 1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resting after Incline DB press: 2s"))
        .stdout(predicate::str::contains("Rest Complete"));
}

#[test]
fn test_session_timer_pause_wait_and_reset() {
    let home = setup_test_dir();
    cli(&home)
        .args(["session", "--tick-ms", "0"])
        .write_stdin(
            "timer start 10s\ntimer wait 3\ntimer pause\ntimer wait 2\ntimer start\ntimer wait 2\ntimer reset\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest Timer: 10s"))
        .stdout(predicate::str::contains("Rest Timer: 7s left"))
        .stdout(predicate::str::contains("Rest Timer paused: 7s left"))
        .stdout(predicate::str::contains("Rest timer is not running"))
        .stdout(predicate::str::contains("Rest Timer: 5s left"))
        .stdout(predicate::str::contains("Rest Timer reset: 60s"))
        .stdout(predicate::str::contains("Rest Complete").not());
}

#[test]
fn test_session_export_empty_log() {
    let home = setup_test_dir();
    let export_dir = home.path().join("exports");
    cli(&home)
        .arg("--export-dir")
        .arg(&export_dir)
        .arg("session")
        .write_stdin("export\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts to save"));

    assert!(exported_files(&export_dir).is_empty());
}

#[test]
fn test_session_custom_entry_requires_names() {
    let home = setup_test_dir();
    cli(&home)
        .arg("session")
        .write_stdin("add workout=Push, exercise=  \nlog\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Please fill in the workout name and exercise name",
        ))
        .stdout(predicate::str::contains("Your workout log is empty."));
}

#[test]
fn test_session_clear_needs_confirmation() {
    let home = setup_test_dir();
    cli(&home)
        .arg("session")
        .write_stdin("add workout=Cardio, exercise=Run\nclear\nn\nlog\nclear\ny\nlog\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log kept."))
        .stdout(predicate::str::contains("Run: 30min"))
        .stdout(predicate::str::contains("Cleared 1 entries."))
        .stdout(predicate::str::contains("Your workout log is empty."));
}

#[test]
fn test_session_export_writes_csv() {
    let home = setup_test_dir();
    let export_dir = home.path().join("exports");
    cli(&home)
        .arg("--export-dir")
        .arg(&export_dir)
        .args(["session", "--program", "Basic", "--day", "monday"])
        .write_stdin(
            "add workout=Push, exercise=Bench press, weight=135\nadd workout=Cardio, exercise=Run\nexport\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let files = exported_files(&export_dir);
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("workout_log_") && name.ends_with(".csv"));

    let contents = fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = contents.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "date,day,mood,program,workoutName,exercise,sets,reps,weight,rest,type"
    );
    assert!(lines[1].ends_with(
        r#""Monday","Good","Basic","Push","Bench press","3","10","135","60s","weight""#
    ));
    assert!(lines[2].ends_with(r#""Monday","Good","Basic","Cardio","Run","","","","","cardio""#));
}

#[test]
fn test_config_file_overrides_custom_defaults() {
    let home = setup_test_dir();
    let config_dir = home.path().join("config").join("workout");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[custom]\nsets = 5\nrest = \"90s\"\n\n[templates]\ndefault_program = \"6-Day PPL\"\n",
    )
    .unwrap();

    cli(&home)
        .args(["session", "--day", "monday"])
        .write_stdin("add workout=Legs, exercise=Squat\nlog\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout session: 6-Day PPL"))
        .stdout(predicate::str::contains("Squat: 5×10 @ 0lbs (Rest: 90s)"));
}
