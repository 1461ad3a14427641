//! Countdown state for the work/break cycle.
//!
//! Pure state: every mutator returns a [`Transition`] and the owner applies
//! side effects (tick source, audio, observers) for it. `switch` is the only
//! place the mode changes.

use tracing::debug;

use super::pomodoro::{Durations, PomodoroMode};

/// What an operation did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed (e.g. start while already running)
    None,
    Started,
    Paused,
    /// One second elapsed without reaching zero
    Ticked,
    /// Mode toggled; the timer is stopped at the full duration of the new mode
    Switched(PomodoroMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    mode: PomodoroMode,
    remaining_seconds: u32,
    running: bool,
    durations: Durations,
}

impl TimerState {
    pub fn new(durations: Durations) -> Self {
        Self {
            mode: PomodoroMode::Work,
            remaining_seconds: durations.work_secs,
            running: false,
            durations,
        }
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn start(&mut self) -> Transition {
        if self.running {
            return Transition::None;
        }
        self.running = true;
        Transition::Started
    }

    pub fn pause(&mut self) -> Transition {
        if !self.running {
            return Transition::None;
        }
        self.running = false;
        Transition::Paused
    }

    pub fn toggle(&mut self) -> Transition {
        if self.running { self.pause() } else { self.start() }
    }

    /// One second of countdown. Ignored while idle.
    pub fn tick(&mut self) -> Transition {
        if !self.running {
            return Transition::None;
        }
        if self.remaining_seconds <= 1 {
            return self.switch();
        }
        self.remaining_seconds -= 1;
        Transition::Ticked
    }

    /// Toggle mode, reset the countdown and stop. Never auto-runs the next phase.
    pub fn switch(&mut self) -> Transition {
        self.mode = self.mode.other();
        self.remaining_seconds = self.durations.for_mode(self.mode);
        self.running = false;
        debug!(mode = %self.mode, remaining = self.remaining_seconds, "timer switched");
        Transition::Switched(self.mode)
    }

    pub fn format_remaining(&self) -> String {
        format_time(self.remaining_seconds)
    }
}

pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
