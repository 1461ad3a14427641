pub mod pulse;

pub use pulse::PulseAnimation;
