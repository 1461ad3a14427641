pub const POMODORO_WORK_MINUTES: u32 = 25; // Default Pomodoro work time
pub const POMODORO_BREAK_MINUTES: u32 = 5; // Default Pomodoro break time

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroMode {
    Work,
    Break,
}

impl PomodoroMode {
    pub fn as_str(&self) -> &str {
        match self {
            PomodoroMode::Work => "WORK",
            PomodoroMode::Break => "BREAK",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            PomodoroMode::Work => "🏎️",
            PomodoroMode::Break => "☕",
        }
    }

    /// The mode a switch leads to.
    pub fn other(&self) -> PomodoroMode {
        match self {
            PomodoroMode::Work => PomodoroMode::Break,
            PomodoroMode::Break => PomodoroMode::Work,
        }
    }

    /// Message shown when a phase of this mode has just finished.
    pub fn completion_message(&self, durations: &Durations) -> String {
        match self {
            PomodoroMode::Work => format!(
                "Work session complete! Time for a {} break.",
                phase_length(durations.break_secs)
            ),
            PomodoroMode::Break => format!(
                "Break is over! Starting {} work session.",
                phase_length(durations.work_secs)
            ),
        }
    }
}

/// `25-minute`, `30-second`, or `1m30s` when neither unit is whole.
pub fn phase_length(secs: u32) -> String {
    match (secs / 60, secs % 60) {
        (minutes, 0) => format!("{minutes}-minute"),
        (0, seconds) => format!("{seconds}-second"),
        (minutes, seconds) => format!("{minutes}m{seconds}s"),
    }
}

impl std::fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full length of each phase, in seconds. Both are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work_secs: u32,
    pub break_secs: u32,
}

impl Durations {
    pub fn for_mode(&self, mode: PomodoroMode) -> u32 {
        match mode {
            PomodoroMode::Work => self.work_secs,
            PomodoroMode::Break => self.break_secs,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: POMODORO_WORK_MINUTES * 60,
            break_secs: POMODORO_BREAK_MINUTES * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let d = Durations::default();
        assert_eq!(d.for_mode(PomodoroMode::Work), 1500);
        assert_eq!(d.for_mode(PomodoroMode::Break), 300);
    }

    #[test]
    fn test_other_toggles() {
        assert_eq!(PomodoroMode::Work.other(), PomodoroMode::Break);
        assert_eq!(PomodoroMode::Break.other(), PomodoroMode::Work);
    }

    #[test]
    fn test_completion_message_names_next_phase_length() {
        let d = Durations::default();
        assert_eq!(
            PomodoroMode::Work.completion_message(&d),
            "Work session complete! Time for a 5-minute break."
        );
        assert_eq!(
            PomodoroMode::Break.completion_message(&d),
            "Break is over! Starting 25-minute work session."
        );
    }

    #[test]
    fn test_completion_message_with_short_break() {
        let d = Durations {
            work_secs: 90,
            break_secs: 30,
        };
        assert_eq!(
            PomodoroMode::Work.completion_message(&d),
            "Work session complete! Time for a 30-second break."
        );
        assert_eq!(
            PomodoroMode::Break.completion_message(&d),
            "Break is over! Starting 1m30s work session."
        );
    }
}
