use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use workout_core::*;

mod session;

#[derive(Parser)]
#[command(name = "workout")]
#[command(about = "Workout planner with suggested sessions, rest timers and CSV logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the template table file (JSON or TOML)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Override the directory exports are written to
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Override the timer clock period in milliseconds
    #[arg(long, global = true, hide = true)]
    tick_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: generate, customize, rest, log and export (default)
    Session {
        #[arg(long)]
        program: Option<String>,

        /// Weekday (defaults to today)
        #[arg(long)]
        day: Option<String>,

        /// Mood: okay, good or great
        #[arg(long, default_value = "good")]
        mood: String,
    },

    /// Show the suggested exercises for a program, day and mood
    Suggest {
        #[arg(long)]
        program: Option<String>,

        /// Weekday (defaults to today)
        #[arg(long)]
        day: Option<String>,

        /// Mood: okay, good or great
        #[arg(long, default_value = "good")]
        mood: String,
    },

    /// List the programs in the template table
    Programs,

    /// Show which exercise type a name is classified as
    Classify { name: String },

    /// Run the session rest timer
    Rest {
        /// Rest length, e.g. "90s" (defaults to the configured session length)
        spec: Option<String>,
    },

    /// Check the template table for problems
    CheckTemplates,
}

/// Blocking clock: one tick per period, optionally stopping after a tick budget
pub(crate) struct SleepClock {
    period: Duration,
    budget: Option<u32>,
}

impl SleepClock {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            period,
            budget: None,
        }
    }

    pub(crate) fn with_budget(mut self, ticks: u32) -> Self {
        self.budget = Some(ticks);
        self
    }
}

impl TickSource for SleepClock {
    fn wait_tick(&mut self) -> bool {
        if let Some(budget) = self.budget.as_mut() {
            if *budget == 0 {
                return false;
            }
            *budget -= 1;
        }
        if !self.period.is_zero() {
            std::thread::sleep(self.period);
        }
        true
    }
}

fn main() -> Result<()> {
    // Initialize logging
    workout_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.templates {
        config.templates.path = Some(path);
    }
    if let Some(dir) = cli.export_dir {
        config.export.dir = dir;
    }
    if let Some(ms) = cli.tick_ms {
        config.timer.tick_millis = ms;
    }

    match cli.command {
        Some(Commands::Session { program, day, mood }) => {
            let table = config.template_table()?;
            let ctx = build_context(&config, &table, program, day, &mood)?;
            session::run(&config, &table, ctx)
        }
        Some(Commands::Suggest { program, day, mood }) => {
            let table = config.template_table()?;
            let ctx = build_context(&config, &table, program, day, &mood)?;
            cmd_suggest(&table, &ctx);
            Ok(())
        }
        Some(Commands::Programs) => {
            let table = config.template_table()?;
            for program in table.programs() {
                println!("{}", program);
            }
            Ok(())
        }
        Some(Commands::Classify { name }) => {
            println!("{}", classify(&name));
            Ok(())
        }
        Some(Commands::Rest { spec }) => cmd_rest(&config, spec),
        Some(Commands::CheckTemplates) => cmd_check_templates(&config),
        None => {
            // Default to an interactive session for today
            let table = config.template_table()?;
            let ctx = build_context(&config, &table, None, None, "good")?;
            session::run(&config, &table, ctx)
        }
    }
}

fn build_context(
    config: &Config,
    table: &TemplateTable,
    program: Option<String>,
    day: Option<String>,
    mood: &str,
) -> Result<SessionContext> {
    let program = program
        .or_else(|| config.default_program(table))
        .ok_or_else(|| Error::Config("Template table has no programs".into()))?;
    let day = match day {
        Some(day) => day.parse::<Weekday>()?,
        None => Weekday::today(),
    };
    let mood = mood.parse::<MoodLevel>()?;
    Ok(SessionContext::today(program, day, mood))
}

fn cmd_suggest(table: &TemplateTable, ctx: &SessionContext) {
    let suggestions = resolve(table, &ctx.program, ctx.day, ctx.mood);

    println!("{} - {} ({})", ctx.program, ctx.day, ctx.mood);
    if suggestions.is_empty() {
        println!("  No suggested workout for this day and mood.");
        return;
    }
    for (idx, template) in suggestions.iter().enumerate() {
        println!("  {}. [{}] {}", idx + 1, template.kind(), template.summary());
    }
}

fn cmd_rest(config: &Config, spec: Option<String>) -> Result<()> {
    let mut timers = RestTimers::new(
        config.timer.session_default_seconds,
        config.timer.fallback_rest_seconds,
    );
    let timer = timers.get_mut(TimerId::Session);
    match spec {
        Some(spec) => timer.start(&spec, None),
        None => timer.resume(),
    }

    let mut clock = SleepClock::new(Duration::from_millis(config.timer.tick_millis));
    println!("Rest Timer: {}s", timer.remaining());
    if run_countdown(timer, &mut clock, print_remaining).is_some() {
        println!("\nRest Complete - Time to start your next set!");
    }
    Ok(())
}

pub(crate) fn print_remaining(timer: &RestTimer) {
    print!("\r⏱ Resting: {}s left ", timer.remaining());
    let _ = io::stdout().flush();
}

fn cmd_check_templates(config: &Config) -> Result<()> {
    let table = config.template_table()?;
    let warnings = table.validate();
    if warnings.is_empty() {
        println!("✓ Template table OK ({} programs)", table.programs().len());
        return Ok(());
    }

    eprintln!("Template table warnings:");
    for warning in &warnings {
        eprintln!("  - {}", warning);
    }
    Err(Error::Config(format!(
        "{} template table problems",
        warnings.len()
    )))
}
