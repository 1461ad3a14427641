use std::io::Write;

use crate::config::Config;
use crate::pomodoro::PomodoroMode;
use crate::session::PomodoroSession;

const GAUGE_WIDTH: usize = 8;
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

fn mode_style(mode: PomodoroMode) -> &'static str {
    match mode {
        PomodoroMode::Work => "\x1b[1;97;41m",  // white on red
        PomodoroMode::Break => "\x1b[1;97;42m", // white on green
    }
}

pub fn pulse_gauge(value: f32) -> String {
    let filled = ((value.clamp(0.0, 1.0) * GAUGE_WIDTH as f32).round() as usize).min(GAUGE_WIDTH);
    format!("[{}{}]", "█".repeat(filled), " ".repeat(GAUGE_WIDTH - filled))
}

fn styled_fact(text: &str, opacity: f32) -> String {
    if opacity <= 0.0 {
        String::new()
    } else if opacity < 1.0 {
        format!("\x1b[2;3m{}{}", text, RESET)
    } else {
        format!("\x1b[3m{}{}", text, RESET)
    }
}

pub fn status_line(session: &PomodoroSession) -> String {
    let timer = session.timer();
    let mode = timer.mode();
    let state = if timer.is_running() { "▶ RUNNING" } else { "⏸ PAUSED " };
    let sound = if session.audio().is_muted() { "🔇" } else { "🔊" };

    format!(
        "{} {} {:<5} {}  {}  {}  {} {}  {}",
        mode.emoji(),
        mode_style(mode),
        mode.as_str(),
        RESET,
        timer.format_remaining(),
        state,
        sound,
        pulse_gauge(session.pulse().value()),
        styled_fact(session.facts().current(), session.facts().opacity()),
    )
}

pub fn render(out: &mut impl Write, session: &PomodoroSession) -> std::io::Result<()> {
    write!(out, "{}{}", CLEAR_LINE, status_line(session))?;
    out.flush()
}

fn settings_line(config: &Config) -> String {
    format!(
        "Pomodoro settings: {} work / {} break",
        short_length(config.durations.work_secs),
        short_length(config.durations.break_secs)
    )
}

fn short_length(secs: u32) -> String {
    match (secs / 60, secs % 60) {
        (minutes, 0) => format!("{minutes}min"),
        (0, seconds) => format!("{seconds}s"),
        (minutes, seconds) => format!("{minutes}m{seconds}s"),
    }
}

pub fn print_banner(config: &Config) {
    println!("🍅 Pit Stop - Pomodoro Timer");
    println!("======================================================");
    println!("{}", settings_line(config));
    if config.tracks.is_empty() {
        println!("Music: none configured");
    }
    if let Some(ref path) = config.log_file {
        println!("Logging to: {}", path.display());
    }
    println!("Controls: [Enter]/s start-pause  n switch  m mute  f next fact  q quit\n");
}

/// Leave the status line and print a closing message.
pub fn print_goodbye(session: &PomodoroSession) {
    let timer = session.timer();
    println!(
        "\n{} Stopped in {} mode with {} left",
        timer.mode().emoji(),
        timer.mode().as_str(),
        timer.format_remaining()
    );
}
