//! Rest timers.
//!
//! A [`RestTimer`] is a tick-driven countdown: the caller owns the clock and
//! calls [`RestTimer::tick`] once per second (or once per whatever base unit
//! it chooses). The timer never schedules anything itself, so a thread sleep,
//! an event-loop interval or a test loop can all drive it identically.
//!
//! Two independent instances exist during a session, bundled in
//! [`RestTimers`]: the session-wide timer and the timer of the one exercise
//! currently resting.

use serde::Serialize;

/// Seconds used when a rest spec has no usable number in it
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// Parse a free-text rest spec into seconds.
///
/// Every non-digit character is discarded and the remaining digits are read
/// as one number, so "90s" is 90 and "1m30s" is 130. Empty, zero or
/// unparseable text yields `fallback`, or [`DEFAULT_REST_SECONDS`] when
/// `fallback` is itself zero. The result is never zero.
pub fn parse_rest_seconds(spec: &str, fallback: u32) -> u32 {
    let digits: String = spec.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u32>()
        .ok()
        .filter(|&secs| secs > 0)
        .unwrap_or(if fallback == 0 {
            DEFAULT_REST_SECONDS
        } else {
            fallback
        })
}

/// Which of the two timers
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimerId {
    Session,
    Exercise,
}

/// Observable state of a timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle { remaining: u32 },
    Running { remaining: u32 },
    Completed,
}

/// Emitted exactly once when a running countdown reaches zero
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TimerEvent {
    pub timer: TimerId,
    /// Key of the exercise that was resting (exercise timer only)
    pub owner_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Completed,
}

/// A zero default would start a countdown that is already finished
fn usable_default(seconds: u32) -> u32 {
    if seconds == 0 {
        tracing::warn!(
            "Timer default of 0s is unusable, using {}s",
            DEFAULT_REST_SECONDS
        );
        DEFAULT_REST_SECONDS
    } else {
        seconds
    }
}

/// A single countdown
#[derive(Clone, Debug)]
pub struct RestTimer {
    id: TimerId,
    phase: Phase,
    remaining: u32,
    owner_key: Option<String>,
    default_seconds: u32,
}

impl RestTimer {
    /// Session-wide timer; `stop` resets it to `default_seconds`
    pub fn session(default_seconds: u32) -> Self {
        let default_seconds = usable_default(default_seconds);
        Self {
            id: TimerId::Session,
            phase: Phase::Idle,
            remaining: default_seconds,
            owner_key: None,
            default_seconds,
        }
    }

    /// Per-exercise timer; `default_seconds` is used for unparseable rest specs
    pub fn exercise(default_seconds: u32) -> Self {
        let default_seconds = usable_default(default_seconds);
        Self {
            id: TimerId::Exercise,
            phase: Phase::Idle,
            remaining: 0,
            owner_key: None,
            default_seconds,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Key of the exercise whose rest is being counted, while running
    pub fn owner_key(&self) -> Option<&str> {
        self.owner_key.as_deref()
    }

    pub fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle {
                remaining: self.remaining,
            },
            Phase::Running => TimerState::Running {
                remaining: self.remaining,
            },
            Phase::Completed => TimerState::Completed,
        }
    }

    /// Start a countdown from a free-text rest spec.
    ///
    /// Starting while already running replaces the current countdown and
    /// owner; the replaced run never completes.
    pub fn start(&mut self, rest_spec: &str, owner_key: Option<String>) {
        let seconds = parse_rest_seconds(rest_spec, self.default_seconds);
        if self.phase == Phase::Running {
            tracing::debug!(
                "{:?} timer restarted, dropping owner {:?}",
                self.id,
                self.owner_key
            );
        }
        self.remaining = seconds;
        self.owner_key = owner_key;
        self.phase = Phase::Running;
        tracing::debug!("{:?} timer started for {}s", self.id, seconds);
    }

    /// Continue a paused countdown; a finished or empty one restarts from the default
    pub fn resume(&mut self) {
        if self.phase == Phase::Running {
            return;
        }
        if self.phase == Phase::Completed || self.remaining == 0 {
            self.remaining = self.default_seconds;
        }
        self.phase = Phase::Running;
        tracing::debug!("{:?} timer resumed at {}s", self.id, self.remaining);
    }

    /// Advance one base time unit.
    ///
    /// Returns the completion event on the tick that reaches zero and `None`
    /// otherwise; ticks while not running are ignored.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != Phase::Running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.phase = Phase::Completed;
        let event = TimerEvent {
            timer: self.id,
            owner_key: self.owner_key.take(),
        };
        tracing::info!("{:?} rest complete", self.id);
        Some(event)
    }

    /// Halt ticking but keep the remaining time
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
            tracing::debug!("{:?} timer paused at {}s", self.id, self.remaining);
        }
    }

    /// Cancel the countdown without a completion event.
    ///
    /// The session timer returns to its default duration; the exercise timer
    /// drops its owner and clears its remaining time.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.owner_key = None;
        self.remaining = match self.id {
            TimerId::Session => self.default_seconds,
            TimerId::Exercise => 0,
        };
        tracing::debug!("{:?} timer stopped", self.id);
    }
}

/// The session timer and the exercise timer, addressed by [`TimerId`]
#[derive(Clone, Debug)]
pub struct RestTimers {
    session: RestTimer,
    exercise: RestTimer,
}

impl RestTimers {
    pub fn new(session_default_seconds: u32, fallback_rest_seconds: u32) -> Self {
        Self {
            session: RestTimer::session(session_default_seconds),
            exercise: RestTimer::exercise(fallback_rest_seconds),
        }
    }

    pub fn get(&self, id: TimerId) -> &RestTimer {
        match id {
            TimerId::Session => &self.session,
            TimerId::Exercise => &self.exercise,
        }
    }

    pub fn get_mut(&mut self, id: TimerId) -> &mut RestTimer {
        match id {
            TimerId::Session => &mut self.session,
            TimerId::Exercise => &mut self.exercise,
        }
    }

    pub fn start(&mut self, id: TimerId, rest_spec: &str, owner_key: Option<String>) {
        self.get_mut(id).start(rest_spec, owner_key)
    }

    pub fn tick(&mut self, id: TimerId) -> Option<TimerEvent> {
        self.get_mut(id).tick()
    }

    /// Tick both timers once, returning any completions
    pub fn tick_all(&mut self) -> Vec<TimerEvent> {
        [self.session.tick(), self.exercise.tick()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn stop(&mut self, id: TimerId) {
        self.get_mut(id).stop()
    }

    /// Whether the exercise timer is currently counting for this key
    pub fn is_resting(&self, exercise_key: &str) -> bool {
        self.exercise.is_active() && self.exercise.owner_key() == Some(exercise_key)
    }
}

impl Default for RestTimers {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECONDS, DEFAULT_REST_SECONDS)
    }
}

/// External clock signal driving a countdown
pub trait TickSource {
    /// Block until the next tick; `false` means the clock has stopped
    fn wait_tick(&mut self) -> bool;
}

/// Drive `timer` with `source` until it completes or the source stops.
///
/// `on_tick` sees the timer after every tick. Returns the completion event,
/// or `None` if the clock stopped first or the timer was not running.
pub fn run_countdown<S, F>(timer: &mut RestTimer, source: &mut S, mut on_tick: F) -> Option<TimerEvent>
where
    S: TickSource + ?Sized,
    F: FnMut(&RestTimer),
{
    while timer.is_active() {
        if !source.wait_tick() {
            tracing::debug!("Clock stopped with {}s remaining", timer.remaining());
            return None;
        }
        let event = timer.tick();
        on_tick(&*timer);
        if event.is_some() {
            return event;
        }
    }
    None
}
