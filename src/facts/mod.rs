pub mod f1;
pub mod rotator;

pub use rotator::{FactRotator, FactsError, RotationPolicy};
