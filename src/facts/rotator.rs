use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const FACT_INTERVAL_SECS: u64 = 10; // Rotate trivia every 10 seconds
pub const MAX_FACT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactsError {
    #[error("fact list is empty")]
    Empty,
}

/// How the next fact is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Sequential,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fade {
    Visible,
    Out { elapsed: Duration },
    In { elapsed: Duration },
}

/// Cursor over a fixed list of strings with an optional fade between entries.
#[derive(Debug, Clone)]
pub struct FactRotator {
    facts: Vec<String>,
    cursor: usize,
    policy: RotationPolicy,
    fade_enabled: bool,
    fade: Fade,
}

impl FactRotator {
    pub fn new(facts: Vec<String>, policy: RotationPolicy) -> Result<Self, FactsError> {
        if facts.is_empty() {
            return Err(FactsError::Empty);
        }
        Ok(Self {
            facts,
            cursor: 0,
            policy,
            fade_enabled: true,
            fade: Fade::Visible,
        })
    }

    pub fn with_fade(mut self, enabled: bool) -> Self {
        self.fade_enabled = enabled;
        self
    }

    pub fn current(&self) -> &str {
        &self.facts[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor now, skipping any fade.
    pub fn advance(&mut self) {
        self.cursor = match self.policy {
            RotationPolicy::Sequential => (self.cursor + 1) % self.facts.len(),
            RotationPolicy::Random => rand::rng().random_range(0..self.facts.len()),
        };
        debug!(cursor = self.cursor, "fact advanced");
    }

    /// Start a fade-out; the cursor moves once the text is invisible.
    /// Advances immediately when fading is off.
    pub fn request_advance(&mut self) {
        if !self.fade_enabled {
            self.advance();
            return;
        }
        match self.fade {
            // Already on its way to the next fact.
            Fade::Out { .. } => {}
            Fade::Visible | Fade::In { .. } => {
                self.fade = Fade::Out {
                    elapsed: Duration::ZERO,
                };
            }
        }
    }

    pub fn step(&mut self, elapsed: Duration) {
        self.fade = match self.fade {
            Fade::Visible => Fade::Visible,
            Fade::Out { elapsed: e } => {
                let e = e + elapsed;
                if e >= FADE_DURATION {
                    self.advance();
                    Fade::In {
                        elapsed: e - FADE_DURATION,
                    }
                } else {
                    Fade::Out { elapsed: e }
                }
            }
            Fade::In { elapsed: e } => {
                let e = e + elapsed;
                if e >= FADE_DURATION {
                    Fade::Visible
                } else {
                    Fade::In { elapsed: e }
                }
            }
        };
    }

    /// 1.0 fully shown, 0.0 hidden.
    pub fn opacity(&self) -> f32 {
        let progress = |e: Duration| (e.as_secs_f32() / FADE_DURATION.as_secs_f32()).min(1.0);
        match self.fade {
            Fade::Visible => 1.0,
            Fade::Out { elapsed } => 1.0 - progress(elapsed),
            Fade::In { elapsed } => progress(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("fact {i}")).collect()
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = FactRotator::new(Vec::new(), RotationPolicy::Sequential).unwrap_err();
        assert_eq!(err, FactsError::Empty);
    }

    #[test]
    fn test_sequential_cursor_is_n_mod_len() {
        for n in [0usize, 1, 4, 5, 6, 23] {
            let mut rotator = FactRotator::new(facts(5), RotationPolicy::Sequential).unwrap();
            for _ in 0..n {
                rotator.advance();
            }
            assert_eq!(rotator.cursor(), n % 5);
            assert_eq!(rotator.current(), format!("fact {}", n % 5));
        }
    }

    #[test]
    fn test_random_stays_in_bounds() {
        let mut rotator = FactRotator::new(facts(3), RotationPolicy::Random).unwrap();
        for _ in 0..50 {
            rotator.advance();
            assert!(rotator.cursor() < 3);
        }
    }

    #[test]
    fn test_random_reaches_every_fact() {
        let mut rotator = FactRotator::new(facts(3), RotationPolicy::Random).unwrap();
        let mut seen = [false; 3];
        for _ in 0..500 {
            rotator.advance();
            seen[rotator.cursor()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_single_fact_never_moves() {
        let mut rotator = FactRotator::new(facts(1), RotationPolicy::Sequential).unwrap();
        rotator.advance();
        assert_eq!(rotator.cursor(), 0);
    }

    #[test]
    fn test_fade_advances_at_midpoint() {
        let mut rotator = FactRotator::new(facts(3), RotationPolicy::Sequential).unwrap();
        rotator.request_advance();
        assert_eq!(rotator.opacity(), 1.0);

        rotator.step(Duration::from_millis(150));
        assert_eq!(rotator.cursor(), 0);
        assert!(rotator.opacity() < 1.0);

        rotator.step(Duration::from_millis(150));
        assert_eq!(rotator.cursor(), 1);
        assert_eq!(rotator.opacity(), 0.0);

        rotator.step(Duration::from_millis(300));
        assert_eq!(rotator.opacity(), 1.0);
        assert_eq!(rotator.cursor(), 1);
    }

    #[test]
    fn test_request_during_fade_out_advances_once() {
        let mut rotator = FactRotator::new(facts(3), RotationPolicy::Sequential).unwrap();
        rotator.request_advance();
        rotator.step(Duration::from_millis(100));
        rotator.request_advance();
        rotator.step(Duration::from_millis(1000));
        rotator.step(Duration::from_millis(1000));
        assert_eq!(rotator.cursor(), 1);
    }

    #[test]
    fn test_without_fade_advances_immediately() {
        let mut rotator = FactRotator::new(facts(3), RotationPolicy::Sequential)
            .unwrap()
            .with_fade(false);
        rotator.request_advance();
        assert_eq!(rotator.cursor(), 1);
        assert_eq!(rotator.opacity(), 1.0);
    }

    #[test]
    fn test_policy_deserialize() {
        let policy: RotationPolicy = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(policy, RotationPolicy::Random);
    }
}
