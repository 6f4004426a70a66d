use rand::Rng;
use std::ops::Range;

/// Bounds of the placeholder call duration, in seconds.
pub const CALL_DURATION_SECS: Range<u32> = 60..360;

/// Supplies the call duration reported alongside a classification.
pub trait DurationSource: Send + Sync {
    fn call_duration_secs(&self) -> u32;
}

/// Uniform draw from [`CALL_DURATION_SECS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDuration;

impl DurationSource for RandomDuration {
    fn call_duration_secs(&self) -> u32 {
        rand::thread_rng().gen_range(CALL_DURATION_SECS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDuration(pub u32);

impl DurationSource for FixedDuration {
    fn call_duration_secs(&self) -> u32 {
        self.0
    }
}
