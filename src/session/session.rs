//! One running timer screen and everything it owns.
//!
//! Side effects happen only at the edges reported by [`TimerState`]:
//! start arms the tick source, pause and switch cancel it, switch also
//! releases audio and tells the mode observer. `teardown` (and `Drop`)
//! releases whatever is still held.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info};

use crate::animation::PulseAnimation;
use crate::audio::AudioController;
use crate::facts::FactRotator;
use crate::facts::rotator::MAX_FACT_INTERVAL;
use crate::pomodoro::{PomodoroMode, TimerState, Transition};

use super::command::{Command, CommandReceiver};
use super::ticker::Ticker;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const FRAME_PERIOD: Duration = Duration::from_millis(50);

pub type ModeObserver = Box<dyn FnMut(PomodoroMode)>;

/// Timing knobs for [`PomodoroSession::run`].
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub fact_interval: Duration,
    pub frame: Duration,
}

pub struct PomodoroSession {
    timer: TimerState,
    audio: AudioController,
    pulse: PulseAnimation,
    facts: FactRotator,
    ticker: Ticker,
    on_mode_change: Option<ModeObserver>,
    rotate_on_mode_change: bool,
}

impl PomodoroSession {
    pub fn new(timer: TimerState, audio: AudioController, facts: FactRotator) -> Self {
        Self {
            timer,
            audio,
            pulse: PulseAnimation::default(),
            facts,
            ticker: Ticker::new(TICK_PERIOD),
            on_mode_change: None,
            rotate_on_mode_change: false,
        }
    }

    /// Called with the new mode after every switch.
    pub fn on_mode_change(mut self, observer: impl FnMut(PomodoroMode) + 'static) -> Self {
        self.on_mode_change = Some(Box::new(observer));
        self
    }

    pub fn rotate_on_mode_change(mut self, enabled: bool) -> Self {
        self.rotate_on_mode_change = enabled;
        self
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    pub fn pulse(&self) -> &PulseAnimation {
        &self.pulse
    }

    pub fn facts(&self) -> &FactRotator {
        &self.facts
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn start(&mut self) -> Transition {
        let transition = self.timer.start();
        self.apply(transition);
        transition
    }

    pub fn pause(&mut self) -> Transition {
        let transition = self.timer.pause();
        self.apply(transition);
        transition
    }

    pub fn toggle(&mut self) -> Transition {
        let transition = self.timer.toggle();
        self.apply(transition);
        transition
    }

    pub fn switch(&mut self) -> Transition {
        let transition = self.timer.switch();
        self.apply(transition);
        transition
    }

    pub fn tick(&mut self) -> Transition {
        let transition = self.timer.tick();
        self.apply(transition);
        transition
    }

    /// Mute only changes the loaded track's status; nothing is reloaded.
    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
        debug!(muted, "mute changed");
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.audio.is_muted();
        self.set_muted(muted);
    }

    pub fn next_fact(&mut self) {
        self.facts.request_advance();
    }

    pub fn frame(&mut self, elapsed: Duration) {
        self.pulse.step(elapsed);
        self.facts.step(elapsed);
    }

    /// Stop ticking and release audio. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.ticker.cancel();
        self.pulse.set_running(false);
        self.audio.teardown();
    }

    /// Apply a user command. Returns false for `Quit`.
    pub fn handle(&mut self, command: Command) -> bool {
        debug!(?command, "command");
        match command {
            Command::ToggleRun => {
                self.toggle();
            }
            Command::Start => {
                self.start();
            }
            Command::Pause => {
                self.pause();
            }
            Command::Switch => {
                self.switch();
            }
            Command::ToggleMute => self.toggle_mute(),
            Command::NextFact => self.next_fact(),
            Command::Quit => return false,
        }
        true
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None | Transition::Ticked => {}
            Transition::Started => {
                self.ticker.arm();
                self.pulse.set_running(true);
                self.audio.resume(self.timer.mode());
            }
            Transition::Paused => {
                self.ticker.cancel();
                self.pulse.set_running(false);
                self.audio.pause();
            }
            Transition::Switched(mode) => {
                self.ticker.cancel();
                self.pulse.set_running(false);
                self.audio.teardown();
                info!(%mode, remaining = self.timer.remaining_seconds(), "switched mode");
                if self.rotate_on_mode_change {
                    self.facts.request_advance();
                }
                if let Some(observer) = self.on_mode_change.as_mut() {
                    observer(mode);
                }
            }
        }
    }

    /// Event loop: countdown ticks, fact rotation, animation frames and
    /// commands, until `Quit` or the command channel closes.
    pub async fn run<R>(&mut self, mut commands: CommandReceiver, schedule: Schedule, mut render: R)
    where
        R: FnMut(&PomodoroSession),
    {
        // tokio rejects a zero period and overflows on an unbounded start.
        let fact_period = schedule
            .fact_interval
            .clamp(Duration::from_millis(1), MAX_FACT_INTERVAL);
        let mut fact_rotation = interval_at(Instant::now() + fact_period, fact_period);
        fact_rotation.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = interval(schedule.frame.max(Duration::from_millis(1)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        info!("session started");
        render(&*self);

        loop {
            tokio::select! {
                _ = self.ticker.tick() => {
                    self.tick();
                }
                _ = fact_rotation.tick() => {
                    self.facts.request_advance();
                }
                _ = frames.tick() => {
                    let now = Instant::now();
                    self.frame(now - last_frame);
                    last_frame = now;
                }
                command = commands.recv() => {
                    let keep_running = command.is_some_and(|command| self.handle(command));
                    if !keep_running {
                        break;
                    }
                }
            }
            render(&*self);
        }

        self.teardown();
        info!(
            mode = %self.timer.mode(),
            remaining = self.timer.remaining_seconds(),
            "session ended"
        );
    }
}

impl Drop for PomodoroSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use crate::audio::{SilentBackend, Tracks};
    use crate::facts::RotationPolicy;
    use crate::pomodoro::Durations;
    use crate::session::command::create_command_channel;

    fn session_with(durations: Durations) -> PomodoroSession {
        let tracks = Tracks {
            work: Some(PathBuf::from("work.mp3")),
            break_: Some(PathBuf::from("break.mp3")),
        };
        let audio = AudioController::new(Box::new(SilentBackend::default()), tracks, false);
        let facts = FactRotator::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            RotationPolicy::Sequential,
        )
        .unwrap()
        .with_fade(false);
        PomodoroSession::new(TimerState::new(durations), audio, facts)
    }

    fn session() -> PomodoroSession {
        session_with(Durations::default())
    }

    fn schedule() -> Schedule {
        Schedule {
            fact_interval: Duration::from_secs(10),
            frame: Duration::from_millis(50),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_arms_ticker_and_audio() {
        let mut s = session();
        s.start();
        assert!(s.is_ticking());
        assert!(s.pulse().is_running());
        assert!(s.audio().is_playing());
        assert_eq!(s.audio().loaded_mode(), Some(PomodoroMode::Work));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_keeps_audio_loaded() {
        let mut s = session();
        s.start();
        s.pause();
        assert!(!s.is_ticking());
        assert!(!s.pulse().is_running());
        assert!(s.audio().is_loaded());
        assert!(!s.audio().is_playing());
        s.start();
        assert_eq!(s.audio().load_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_releases_everything_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut s = session().on_mode_change(move |mode| sink.borrow_mut().push(mode));

        s.start();
        assert_eq!(s.switch(), Transition::Switched(PomodoroMode::Break));
        assert!(!s.is_ticking());
        assert!(!s.audio().is_loaded());
        assert_eq!(s.timer().remaining_seconds(), 300);

        s.start();
        assert_eq!(s.audio().loaded_mode(), Some(PomodoroMode::Break));
        assert_eq!(*seen.borrow(), vec![PomodoroMode::Break]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_to_zero_switches_and_stops() {
        let mut s = session_with(Durations {
            work_secs: 2,
            break_secs: 300,
        });
        s.start();
        assert_eq!(s.tick(), Transition::Ticked);
        assert_eq!(s.tick(), Transition::Switched(PomodoroMode::Break));
        assert_eq!(s.timer().remaining_seconds(), 300);
        assert!(!s.timer().is_running());
        assert!(!s.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mute_toggle_does_not_touch_timer_or_reload() {
        let mut s = session();
        s.start();
        s.tick();
        s.set_muted(true);
        s.set_muted(false);
        assert_eq!(s.timer().remaining_seconds(), 1499);
        assert_eq!(s.timer().mode(), PomodoroMode::Work);
        assert_eq!(s.audio().load_count(), 1);
        assert!(s.audio().is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_on_mode_change() {
        let mut s = session().rotate_on_mode_change(true);
        s.switch();
        s.switch();
        assert_eq!(s.facts().cursor(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_is_idempotent() {
        let mut s = session();
        s.start();
        s.teardown();
        s.teardown();
        assert!(!s.is_ticking());
        assert!(!s.audio().is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_counts_down_once_per_second() {
        let mut s = session();
        let (tx, rx) = create_command_channel();

        let driver = async {
            tx.send(Command::Start).unwrap();
            tokio::time::sleep(Duration::from_millis(3500)).await;
            tx.send(Command::Quit).unwrap();
        };
        tokio::join!(s.run(rx, schedule(), |_| {}), driver);

        assert_eq!(s.timer().remaining_seconds(), 1497);
        assert!(!s.is_ticking());
        assert!(!s.audio().is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_double_start_has_single_tick_source() {
        let mut s = session();
        let (tx, rx) = create_command_channel();

        let driver = async {
            tx.send(Command::Start).unwrap();
            tx.send(Command::Start).unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
            tx.send(Command::ToggleRun).unwrap();
            tx.send(Command::ToggleRun).unwrap();
            tokio::time::sleep(Duration::from_millis(3200)).await;
            tx.send(Command::Quit).unwrap();
        };
        tokio::join!(s.run(rx, schedule(), |_| {}), driver);

        // Re-armed at 0.1s, so ticks land at 1.1, 2.1 and 3.1 only.
        assert_eq!(s.timer().remaining_seconds(), 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_rotates_facts_while_paused() {
        let mut s = session();
        let (tx, rx) = create_command_channel();

        let driver = async {
            tokio::time::sleep(Duration::from_millis(25_500)).await;
            tx.send(Command::Quit).unwrap();
        };
        tokio::join!(s.run(rx, schedule(), |_| {}), driver);

        assert_eq!(s.facts().cursor(), 2);
        assert_eq!(s.timer().remaining_seconds(), 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_counts_down_to_zero_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut s = session_with(Durations {
            work_secs: 2,
            break_secs: 300,
        })
        .on_mode_change(move |mode| sink.borrow_mut().push(mode));
        let (tx, rx) = create_command_channel();

        let driver = async {
            tx.send(Command::Start).unwrap();
            tokio::time::sleep(Duration::from_millis(2500)).await;
            tx.send(Command::Quit).unwrap();
        };
        tokio::join!(s.run(rx, schedule(), |_| {}), driver);

        assert_eq!(*seen.borrow(), vec![PomodoroMode::Break]);
        assert_eq!(s.timer().mode(), PomodoroMode::Break);
        assert_eq!(s.timer().remaining_seconds(), 300);
        assert!(!s.timer().is_running());
        assert!(!s.audio().is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_survives_unbounded_fact_interval() {
        let mut s = session();
        let (tx, rx) = create_command_channel();
        let schedule = Schedule {
            fact_interval: Duration::MAX,
            frame: Duration::from_millis(50),
        };

        let driver = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            tx.send(Command::Quit).unwrap();
        };
        tokio::join!(s.run(rx, schedule, |_| {}), driver);

        assert_eq!(s.facts().cursor(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ends_when_channel_closes() {
        let mut s = session();
        let (tx, rx) = create_command_channel();
        tx.send(Command::Start).unwrap();
        drop(tx);
        s.run(rx, schedule(), |_| {}).await;
        assert!(!s.is_ticking());
    }
}
