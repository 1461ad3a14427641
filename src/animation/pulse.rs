use std::time::Duration;

pub const PULSE_LEG: Duration = Duration::from_millis(1000); // 0 -> 1 takes one second
const MAX_GROWTH: f32 = 0.1;

/// Back-and-forth interpolation between 0 and 1 while running.
///
/// Pausing freezes the value where it is; resuming carries on from there.
#[derive(Debug, Clone)]
pub struct PulseAnimation {
    value: f32,
    rising: bool,
    running: bool,
    leg: Duration,
}

impl PulseAnimation {
    pub fn new(leg: Duration) -> Self {
        Self {
            value: 0.0,
            rising: true,
            running: false,
            leg,
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step(&mut self, elapsed: Duration) {
        if !self.running || self.leg.is_zero() {
            return;
        }
        let mut delta = elapsed.as_secs_f32() / self.leg.as_secs_f32();
        // Long frames can cross several turning points.
        delta %= 2.0;
        while delta > 0.0 {
            let room = if self.rising { 1.0 - self.value } else { self.value };
            if delta < room {
                self.value += if self.rising { delta } else { -delta };
                break;
            }
            delta -= room;
            self.value = if self.rising { 1.0 } else { 0.0 };
            self.rising = !self.rising;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Scale factor for the pulsing element, 1.0 to 1.1.
    pub fn scale(&self) -> f32 {
        1.0 + MAX_GROWTH * self.value
    }
}

impl Default for PulseAnimation {
    fn default() -> Self {
        Self::new(PULSE_LEG)
    }
}
