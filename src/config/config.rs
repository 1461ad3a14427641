//! Configuration: built-in defaults, then an optional JSON file, then CLI flags.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use clap::Parser;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::audio::Tracks;
use crate::facts::f1::default_facts;
use crate::facts::rotator::{FACT_INTERVAL_SECS, MAX_FACT_INTERVAL};
use crate::facts::RotationPolicy;
use crate::pomodoro::Durations;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(h|m|s)?\s*$").expect("duration pattern is valid")
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid duration {0:?} (expected e.g. 25, 25m, 90s or 1h)")]
    InvalidDuration(String),
    #[error("{0} duration must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("fact interval must be greater than zero")]
    ZeroFactInterval,
    #[error("fact interval must be at most {} seconds", MAX_FACT_INTERVAL.as_secs())]
    FactIntervalTooLong,
    #[error("fact list is empty")]
    NoFacts,
}

/// Command line flags. Anything left `None` falls back to the file or defaults.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(author, version, about = "🍅 Pit Stop - terminal Pomodoro timer with F1 trivia")]
pub struct CliArgs {
    /// Config file (default: ~/.config/pit_stop/config.json)
    #[arg(short, long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Work length: 25 (minutes), 25m, 90s or 1h
    #[arg(short, long = "work", value_name = "DUR", value_parser = parse_duration)]
    pub work_secs: Option<u32>,

    /// Break length, same format as --work
    #[arg(short, long = "break", value_name = "DUR", value_parser = parse_duration)]
    pub break_secs: Option<u32>,

    /// Start with audio muted
    #[arg(short, long)]
    pub muted: bool,

    /// Skip desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Activity log file
    #[arg(short, long = "log", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse `25` (minutes), `25m`, `90s` or `1h` into seconds.
pub fn parse_duration(input: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());
    let caps = DURATION_RE.captures(input).ok_or_else(invalid)?;
    let amount: u32 = caps[1].parse().map_err(|_| invalid())?;
    let unit = match caps.get(2).map(|m| m.as_str()) {
        Some("h") => 3600,
        Some("s") => 1,
        _ => 60,
    };
    amount.checked_mul(unit).ok_or_else(invalid)
}

/// On-disk shape. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    work_seconds: Option<u32>,
    break_seconds: Option<u32>,
    work_track: Option<PathBuf>,
    break_track: Option<PathBuf>,
    facts: Option<Vec<String>>,
    fact_interval_seconds: Option<u64>,
    rotation: Option<RotationPolicy>,
    rotate_on_mode_change: Option<bool>,
    fade: Option<bool>,
    muted: Option<bool>,
    notifications: Option<bool>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub durations: Durations,
    pub tracks: Tracks,
    pub facts: Vec<String>,
    pub fact_interval: Duration,
    pub rotation: RotationPolicy,
    pub rotate_on_mode_change: bool,
    pub fade: bool,
    pub muted: bool,
    pub notifications: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            tracks: Tracks::default(),
            facts: default_facts(),
            fact_interval: Duration::from_secs(FACT_INTERVAL_SECS),
            rotation: RotationPolicy::Sequential,
            rotate_on_mode_change: false,
            fade: true,
            muted: false,
            notifications: true,
            log_file: Some(data_dir().join("activity.log")),
        }
    }
}

impl Config {
    /// Defaults, then the config file (explicit path or the default location), then flags.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let path = cli
            .config_path
            .clone()
            .unwrap_or_else(|| config_dir().join("config.json"));
        // The default location is optional, an explicit --config is not.
        if cli.config_path.is_some() || path.exists() {
            config.apply_file(read_file(&path)?);
            debug!(path = %path.display(), "config file applied");
        }

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(secs) = file.work_seconds {
            self.durations.work_secs = secs;
        }
        if let Some(secs) = file.break_seconds {
            self.durations.break_secs = secs;
        }
        if file.work_track.is_some() {
            self.tracks.work = file.work_track;
        }
        if file.break_track.is_some() {
            self.tracks.break_ = file.break_track;
        }
        if let Some(facts) = file.facts {
            self.facts = facts;
        }
        if let Some(secs) = file.fact_interval_seconds {
            self.fact_interval = Duration::from_secs(secs);
        }
        if let Some(rotation) = file.rotation {
            self.rotation = rotation;
        }
        if let Some(on_switch) = file.rotate_on_mode_change {
            self.rotate_on_mode_change = on_switch;
        }
        if let Some(fade) = file.fade {
            self.fade = fade;
        }
        if let Some(muted) = file.muted {
            self.muted = muted;
        }
        if let Some(notifications) = file.notifications {
            self.notifications = notifications;
        }
        if file.log_file.is_some() {
            self.log_file = file.log_file;
        }
    }

    fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(secs) = cli.work_secs {
            self.durations.work_secs = secs;
        }
        if let Some(secs) = cli.break_secs {
            self.durations.break_secs = secs;
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file.clone();
        }
        self.muted |= cli.muted;
        self.notifications &= !cli.no_notify;
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.durations.work_secs == 0 {
            return Err(ConfigError::ZeroDuration("work"));
        }
        if self.durations.break_secs == 0 {
            return Err(ConfigError::ZeroDuration("break"));
        }
        if self.fact_interval.is_zero() {
            return Err(ConfigError::ZeroFactInterval);
        }
        if self.fact_interval > MAX_FACT_INTERVAL {
            return Err(ConfigError::FactIntervalTooLong);
        }
        if self.facts.is_empty() {
            return Err(ConfigError::NoFacts);
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn home() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

pub fn config_dir() -> PathBuf {
    home().join(".config").join("pit_stop")
}

pub fn data_dir() -> PathBuf {
    home().join(".local").join("share").join("pit_stop")
}
