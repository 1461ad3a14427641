pub mod pomodoro;
pub mod timer;

pub use pomodoro::{Durations, PomodoroMode};
pub use timer::{TimerState, Transition};
