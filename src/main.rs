use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pit_stop::audio::{AudioBackend, AudioController, SilentBackend};
use pit_stop::config::{CliArgs, Config};
use pit_stop::console;
use pit_stop::facts::FactRotator;
use pit_stop::notify::{ActivityLog, ModeNotifier};
use pit_stop::pomodoro::TimerState;
use pit_stop::session::{
    Command, FRAME_PERIOD, PomodoroSession, Schedule, create_command_channel,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "pit_stop starting");

    let config = Config::load(&cli)?;
    console::console::print_banner(&config);

    let log = match config.log_file.as_ref().map(ActivityLog::open).transpose() {
        Ok(log) => log,
        Err(e) => {
            warn!(error = %e, "activity log unavailable");
            None
        }
    };
    let mut notifier = ModeNotifier::new(config.durations, config.notifications, log);

    let audio = AudioController::new(
        build_backend(&config),
        config.tracks.clone(),
        config.muted,
    );
    let facts =
        FactRotator::new(config.facts.clone(), config.rotation)?.with_fade(config.fade);

    let mut session = PomodoroSession::new(TimerState::new(config.durations), audio, facts)
        .rotate_on_mode_change(config.rotate_on_mode_change)
        .on_mode_change(move |mode| notifier.mode_changed(mode));

    let (command_tx, command_rx) = create_command_channel();

    // Detached: a read still blocked on stdin must not keep the process alive after quit.
    let _ = console::input::spawn_stdin_reader(command_tx.clone())?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = command_tx.send(Command::Quit);
        }
    });

    let schedule = Schedule {
        fact_interval: config.fact_interval,
        frame: FRAME_PERIOD,
    };
    let mut stdout = std::io::stdout();
    session
        .run(command_rx, schedule, |s| {
            if let Err(e) = console::console::render(&mut stdout, s) {
                warn!(error = %e, "failed to draw status line");
            }
        })
        .await;

    console::console::print_goodbye(&session);
    Ok(())
}

/// Real output when built with audio support and tracks exist, silence otherwise.
fn build_backend(config: &Config) -> Box<dyn AudioBackend> {
    if config.tracks.is_empty() {
        return Box::new(SilentBackend::default());
    }

    #[cfg(feature = "rodio")]
    {
        match pit_stop::audio::rodio_backend::RodioBackend::open() {
            Ok(backend) => return Box::new(backend),
            Err(e) => warn!(error = %e, "audio output unavailable, continuing silently"),
        }
    }

    #[cfg(not(feature = "rodio"))]
    warn!("built without the `rodio` feature, music tracks will not play");

    Box::new(SilentBackend::default())
}
