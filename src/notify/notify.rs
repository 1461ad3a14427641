use notify_rust::Notification;
use tracing::{info, warn};

use crate::pomodoro::{Durations, PomodoroMode};

use super::activity_log::ActivityLog;

const SUMMARY: &str = "Pit Stop - Pomodoro";

/// Reacts to mode changes: desktop alert plus an activity log line.
pub struct ModeNotifier {
    durations: Durations,
    desktop: bool,
    log: Option<ActivityLog>,
}

impl ModeNotifier {
    pub fn new(durations: Durations, desktop: bool, log: Option<ActivityLog>) -> Self {
        Self {
            durations,
            desktop,
            log,
        }
    }

    pub fn message_for(&self, mode: PomodoroMode) -> String {
        mode.other().completion_message(&self.durations)
    }

    pub fn mode_changed(&mut self, mode: PomodoroMode) {
        let message = self.message_for(mode);
        info!(%mode, "{}", message);

        if let Some(log) = &self.log {
            log.log(&format!("🔔 {}", message));
            log.log(&format!("Switched to {} mode", mode.as_str()));
        }

        if self.desktop {
            if let Err(e) = send_notification(&message) {
                warn!(error = %e, "failed to send notification");
            }
        }
    }
}

fn send_notification(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    Notification::new()
        .summary(SUMMARY)
        .body(message)
        .timeout(0) // No auto-dismiss
        .show()?;
    Ok(())
}
