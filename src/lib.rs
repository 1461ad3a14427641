//! Terminal Pomodoro timer: work/break countdown with per-mode music,
//! a pulsing gauge and rotating Formula 1 trivia.

pub mod animation;
pub mod audio;
pub mod config;
pub mod console;
pub mod facts;
pub mod notify;
pub mod pomodoro;
pub mod session;
