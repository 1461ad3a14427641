pub mod command;
pub mod session;
pub mod ticker;

pub use command::{Command, CommandSender, create_command_channel};
pub use session::{FRAME_PERIOD, PomodoroSession, Schedule};
