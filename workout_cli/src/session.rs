//! Line-oriented interactive session.

use crate::{print_remaining, SleepClock};
use chrono::Utc;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;
use workout_core::*;

const HELP: &str = "\
Commands:
  generate                    Suggest exercises for the current program, day and mood
  show                        List the current suggestions
  set <n> <field> <value>     Edit suggestion n (sets, reps, weight, rest, duration)
  rest <n>                    Rest timer for suggestion n
  timer [spec]                Run the session rest timer (defaults to the configured length)
  timer start [spec]          Start or resume the session timer without waiting
  timer wait [n]              Let the session timer run for n seconds (or until done)
  timer pause                 Pause the session timer, keeping the time left
  timer reset                 Stop the session timer and restore its default length
  save                        Log the current suggestions
  add workout=..,exercise=..  Log a custom exercise (optional sets, reps, weight, rest, duration)
  log                         Show the workout log
  clear                       Clear the workout log
  export                      Write the log to a CSV file
  program|day|mood <value>    Change the session selection
  help                        Show this help
  quit                        Leave the session";

struct Session<'a> {
    config: &'a Config,
    table: &'a TemplateTable,
    ctx: SessionContext,
    suggestions: Vec<ExerciseTemplate>,
    log: SessionLog,
    timers: RestTimers,
}

/// Run the session on stdin/stdout until `quit` or end of input
pub fn run(config: &Config, table: &TemplateTable, ctx: SessionContext) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut session = Session {
        config,
        table,
        ctx,
        suggestions: Vec::new(),
        log: SessionLog::new(),
        timers: RestTimers::new(
            config.timer.session_default_seconds,
            config.timer.fallback_rest_seconds,
        ),
    };

    println!(
        "Workout session: {} - {} ({}). Type 'help' for commands.",
        session.ctx.program, session.ctx.day, session.ctx.mood
    );

    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "generate" => session.generate(),
            "show" => session.show(),
            "set" => session.set(rest.trim()),
            "rest" => session.exercise_rest(rest.trim()),
            "timer" => session.session_timer(rest.trim()),
            "save" => session.save(),
            "add" => session.add(rest.trim()),
            "log" => session.show_log(),
            "clear" => session.clear(&mut input)?,
            "export" => session.export()?,
            "program" => session.select_program(rest.trim()),
            "day" => match rest.trim().parse::<Weekday>() {
                Ok(day) => {
                    session.ctx.day = day;
                    println!("Day: {}", day);
                }
                Err(e) => println!("Error: {}", e),
            },
            "mood" => match rest.trim().parse::<MoodLevel>() {
                Ok(mood) => {
                    session.ctx.mood = mood;
                    println!("Mood: {}", mood);
                }
                Err(e) => println!("Error: {}", e),
            },
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }

    tracing::debug!("Session ended with {} logged entries", session.log.len());
    Ok(())
}

impl Session<'_> {
    fn generate(&mut self) {
        self.timers.stop(TimerId::Exercise);
        self.suggestions = resolve(self.table, &self.ctx.program, self.ctx.day, self.ctx.mood);
        if self.suggestions.is_empty() {
            println!("No suggested workout for this day and mood.");
        } else {
            self.show();
        }
    }

    fn show(&self) {
        if self.suggestions.is_empty() {
            println!("No suggestions. Use 'generate' first.");
            return;
        }
        println!(
            "Suggested Workout: {} - {} ({})",
            self.ctx.program, self.ctx.day, self.ctx.mood
        );
        for (idx, template) in self.suggestions.iter().enumerate() {
            let resting = if self.timers.is_resting(&template.key) {
                format!(" [resting {}s]", self.timers.get(TimerId::Exercise).remaining())
            } else {
                String::new()
            };
            println!(
                "  {}. [{}] {}{}",
                idx + 1,
                template.kind(),
                template.summary(),
                resting
            );
        }
    }

    fn suggestion_index(&self, arg: &str) -> Option<usize> {
        match arg.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.suggestions.len() => Some(n - 1),
            _ => {
                println!("Error: no suggestion '{}'", arg);
                None
            }
        }
    }

    fn set(&mut self, args: &str) {
        let mut parts = args.splitn(3, char::is_whitespace);
        let (Some(index), Some(field)) = (parts.next(), parts.next()) else {
            println!("Usage: set <n> <field> <value>");
            return;
        };
        let value = parts.next().unwrap_or("");

        let Some(idx) = self.suggestion_index(index) else {
            return;
        };
        let field = match field.parse::<TemplateField>() {
            Ok(field) => field,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        };

        let template = &mut self.suggestions[idx];
        match template.set(field, value) {
            Ok(()) => println!("{}", template.summary()),
            Err(e) => println!("Error: {}", e),
        }
    }

    fn exercise_rest(&mut self, arg: &str) {
        let Some(idx) = self.suggestion_index(arg) else {
            return;
        };
        let template = &self.suggestions[idx];
        let Some(spec) = template.prescription.rest().map(str::to_string) else {
            println!("{} has no rest period", template.name);
            return;
        };

        let key = template.key.clone();
        println!("Resting after {}: {}", template.name, spec);
        self.timers.start(TimerId::Exercise, &spec, Some(key));
        self.countdown(TimerId::Exercise, None);
    }

    fn session_timer(&mut self, args: &str) {
        let (action, arg) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        let arg = arg.trim();
        match action.to_lowercase().as_str() {
            "start" => self.start_session_timer(arg),
            "wait" => {
                if !self.timers.get(TimerId::Session).is_active() {
                    println!("Rest timer is not running. Use 'timer start' first.");
                    return;
                }
                let budget = if arg.is_empty() {
                    None
                } else {
                    match arg.parse::<u32>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            println!("Usage: timer wait [seconds]");
                            return;
                        }
                    }
                };
                self.countdown(TimerId::Session, budget);
            }
            "pause" => {
                let timer = self.timers.get_mut(TimerId::Session);
                timer.pause();
                println!("Rest Timer paused: {}s left", timer.remaining());
            }
            "reset" => {
                self.timers.stop(TimerId::Session);
                println!(
                    "Rest Timer reset: {}s",
                    self.timers.get(TimerId::Session).remaining()
                );
            }
            _ => {
                self.start_session_timer(args);
                self.countdown(TimerId::Session, None);
            }
        }
    }

    fn start_session_timer(&mut self, spec: &str) {
        let timer = self.timers.get_mut(TimerId::Session);
        if spec.is_empty() {
            timer.resume();
        } else {
            timer.start(spec, None);
        }
        println!("Rest Timer: {}s", timer.remaining());
    }

    fn countdown(&mut self, id: TimerId, budget: Option<u32>) {
        let mut clock = SleepClock::new(Duration::from_millis(self.config.timer.tick_millis));
        if let Some(ticks) = budget {
            clock = clock.with_budget(ticks);
        }
        let timer = self.timers.get_mut(id);
        if run_countdown(timer, &mut clock, print_remaining).is_some() {
            println!("\nRest Complete - Time to start your next set!");
        } else if timer.is_active() {
            println!("\nRest Timer: {}s left", timer.remaining());
        }
    }

    fn save(&mut self) {
        if self.suggestions.is_empty() {
            println!("Nothing to save. Use 'generate' first.");
            return;
        }
        let saved = self.log.save_suggestions(&self.ctx, &self.suggestions).len();
        println!("Workout saved to your log! ({} exercises)", saved);
    }

    fn add(&mut self, args: &str) {
        let custom = match parse_custom(args, &self.config.custom) {
            Ok(custom) => custom,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        };
        match self.log.add_custom(&self.ctx, custom) {
            Ok(entry) => println!("Added {}", entry.summary()),
            Err(Error::ValidationFailed(_)) => {
                println!("Error: Please fill in the workout name and exercise name")
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    fn show_log(&self) {
        if self.log.is_empty() {
            println!("Your workout log is empty.");
            return;
        }
        println!("Workout Log ({} entries):", self.log.len());
        for entry in self.log.iter() {
            println!("  {}", entry.heading());
            println!("    {} [{}]", entry.summary(), entry.kind());
        }
    }

    fn clear<R: BufRead>(&mut self, input: &mut R) -> Result<()> {
        if self.log.is_empty() {
            println!("Your workout log is already empty.");
            return Ok(());
        }
        print!("Are you sure you want to clear your workout log? [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            let removed = self.log.clear();
            println!("Cleared {} entries.", removed);
        } else {
            println!("Log kept.");
        }
        Ok(())
    }

    fn export(&self) -> Result<()> {
        match export(&self.log, Utc::now()) {
            Ok(csv) => {
                let path = write_export(&self.config.export.dir, &csv)?;
                println!("Exported {} entries to {}", self.log.len(), path.display());
                Ok(())
            }
            Err(Error::EmptyLog) => {
                println!("No workouts to save. Log something first.");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn select_program(&mut self, name: &str) {
        if self.table.has_program(name) {
            self.ctx.program = name.to_string();
            println!("Program: {}", name);
        } else {
            println!(
                "Unknown program '{}'. Available: {}",
                name,
                self.table.programs().join(", ")
            );
        }
    }
}

fn write_export(dir: &Path, csv: &CsvExport) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&csv.filename);
    std::fs::write(&path, &csv.contents)?;
    tracing::info!("Wrote export to {:?}", path);
    Ok(path)
}

/// Parse `workout=Push, exercise=Bench, weight=135` into a custom exercise
fn parse_custom(
    args: &str,
    defaults: &workout_core::config::CustomDefaults,
) -> Result<CustomExercise> {
    let mut custom = CustomExercise::new("", "", defaults);
    for pair in args.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::ValidationFailed(format!("expected key=value, got '{}'", pair)))?;
        match key.trim().to_lowercase().as_str() {
            "workout" | "workoutname" => custom.workout_name = value.trim().to_string(),
            "exercise" => custom.exercise = value.trim().to_string(),
            field => custom.set(field.parse::<TemplateField>()?, value),
        }
    }
    Ok(custom)
}
