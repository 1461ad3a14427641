use std::io::BufRead;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::session::{Command, CommandSender};

/// Map one line of keyboard input to a command. Enter alone toggles Start/Pause.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "" | "s" => Some(Command::ToggleRun),
        "start" => Some(Command::Start),
        "p" | "pause" => Some(Command::Pause),
        "n" | "switch" => Some(Command::Switch),
        "m" | "mute" => Some(Command::ToggleMute),
        "f" | "fact" => Some(Command::NextFact),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Read stdin on its own OS thread. A blocked read there never holds up
/// runtime shutdown; the thread dies with the process.
pub fn spawn_stdin_reader(tx: CommandSender) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || forward_commands(std::io::stdin().lock(), &tx))
}

/// Forward lines as commands until the input closes or the session goes away.
pub fn forward_commands(reader: impl BufRead, tx: &CommandSender) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "stdin closed");
                break;
            }
        };
        match parse_command(&line) {
            Some(command) => {
                if tx.send(command).is_err() {
                    return;
                }
            }
            None => debug!(input = %line.trim(), "ignoring unknown input"),
        }
    }
    let _ = tx.send(Command::Quit);
}
