use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::trace;

/// The single repeating countdown source.
///
/// Holding the `Interval` by value means there is never more than one:
/// arming drops any previous interval before creating the next.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Cancel any prior source and start a fresh one; first tick one period from now.
    pub fn arm(&mut self) {
        self.cancel();
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // Late ticks are not made up; the countdown is allowed to drift.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        trace!("tick source armed");
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            trace!("tick source cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Resolves on the next tick; never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
