//! Focus/Break countdown engine
//!
//! The engine is clock-agnostic: it only counts `tick()` calls. Whoever owns
//! the engine owns the real-time clock and delivers one tick per elapsed
//! second while the engine reports it is running.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{
    configuration::{break_minutes_for, TimerConfiguration, MAX_FOCUS_MINUTES, MIN_FOCUS_MINUTES},
    Phase,
};

/// A Focus<->Break transition fired by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    /// Length of the phase just entered
    pub minutes: u32,
}

/// What a single tick did to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Engine was paused, nothing changed
    Idle,
    /// Countdown advanced by one second within the current phase
    Counted,
    /// Current phase elapsed; the engine moved to the next phase and paused itself
    PhaseChanged(PhaseChange),
}

/// Read-only view of the engine, safe to hand to any number of observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub minutes_remaining: u32,
    pub seconds_remaining: u32,
    pub is_running: bool,
    pub focus_minutes: u32,
    /// Remaining time as zero-padded `MM:SS`
    pub display: String,
}

/// Deterministic countdown that alternates Focus and Break phases
#[derive(Debug, Clone)]
pub struct FocusTimerEngine {
    phase: Phase,
    focus_minutes: u32,
    minutes_remaining: u32,
    seconds_remaining: u32,
    is_running: bool,
}

impl FocusTimerEngine {
    /// Create a paused engine at the start of a Focus phase
    pub fn new(config: TimerConfiguration) -> Self {
        Self {
            phase: Phase::Focus,
            focus_minutes: config.focus_minutes(),
            minutes_remaining: config.focus_minutes(),
            seconds_remaining: 0,
            is_running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn minutes_remaining(&self) -> u32 {
        self.minutes_remaining
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Baseline focus duration in minutes
    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    /// Remaining time formatted as `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes_remaining, self.seconds_remaining)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            minutes_remaining: self.minutes_remaining,
            seconds_remaining: self.seconds_remaining,
            is_running: self.is_running,
            focus_minutes: self.focus_minutes,
            display: self.display(),
        }
    }

    pub fn start(&mut self) {
        if !self.is_running {
            debug!("Timer started in {} phase at {}", self.phase, self.display());
        }
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        if self.is_running {
            debug!("Timer paused in {} phase at {}", self.phase, self.display());
        }
        self.is_running = false;
    }

    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Pause and return to a default Focus phase, discarding any adjustment
    pub fn reset(&mut self) {
        self.pause();
        self.phase = Phase::Focus;
        self.focus_minutes = MIN_FOCUS_MINUTES;
        self.minutes_remaining = MIN_FOCUS_MINUTES;
        self.seconds_remaining = 0;
    }

    /// Advance the countdown by one second.
    ///
    /// The tick that reaches `00:00` resolves the phase transition in the
    /// same call, so `00:00` is never visible between ticks.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        } else if self.minutes_remaining > 0 {
            self.minutes_remaining -= 1;
            self.seconds_remaining = 59;
        } else {
            // Defensive: every entry point leaves at least a minute on the clock
            return TickOutcome::PhaseChanged(self.advance_phase());
        }

        if self.minutes_remaining == 0 && self.seconds_remaining == 0 {
            return TickOutcome::PhaseChanged(self.advance_phase());
        }

        trace!("Tick: {} {}", self.phase, self.display());
        TickOutcome::Counted
    }

    /// Extend the baseline and the live Focus countdown by one minute.
    ///
    /// Returns false when the call was a no-op (ceiling reached or in Break).
    pub fn increase_focus_duration(&mut self) -> bool {
        if self.phase != Phase::Focus || self.focus_minutes >= MAX_FOCUS_MINUTES {
            return false;
        }

        self.focus_minutes += 1;
        self.minutes_remaining += 1;
        true
    }

    /// Shorten the baseline and the live Focus countdown by one minute.
    ///
    /// Returns false when the call was a no-op (floor reached or in Break).
    /// The live countdown is only shortened while more than a minute is
    /// left, so an adjustment can never land on `00:00`.
    pub fn decrease_focus_duration(&mut self) -> bool {
        if self.phase != Phase::Focus || self.focus_minutes <= MIN_FOCUS_MINUTES {
            return false;
        }

        self.focus_minutes -= 1;
        if self.total_seconds_remaining() > 60 {
            self.minutes_remaining -= 1;
        }
        true
    }

    fn total_seconds_remaining(&self) -> u32 {
        self.minutes_remaining * 60 + self.seconds_remaining
    }

    fn advance_phase(&mut self) -> PhaseChange {
        let from = self.phase;
        let to = from.next();
        let minutes = match to {
            Phase::Break => break_minutes_for(self.focus_minutes),
            Phase::Focus => self.focus_minutes,
        };

        self.phase = to;
        self.minutes_remaining = minutes;
        self.seconds_remaining = 0;
        self.is_running = false;

        info!("{} phase complete, entering {} for {} minutes", from, to, minutes);
        PhaseChange { from, to, minutes }
    }
}

impl Default for FocusTimerEngine {
    fn default() -> Self {
        Self::new(TimerConfiguration::default())
    }
}
