//! Time and duration conversion utilities.
//!
//! Server state reports playback progress as a percentage and song lengths
//! as float seconds; this module holds the conversions into [`Duration`]
//! with explicit clamping and saturation behavior.

use std::time::Duration;

/// Convert a server-reported progress percentage (0-100) into an absolute
/// position within a song.
///
/// Progress is clamped to the 0-100 range before conversion, so the result
/// always lies within `[0, duration]`. Non-finite progress values are
/// treated as zero.
#[must_use]
pub fn progress_to_position(progress: f64, duration: Duration) -> Duration {
    if !progress.is_finite() {
        return Duration::ZERO;
    }
    let fraction = (progress / 100.0).clamp(0.0, 1.0);
    duration.mul_f64(fraction)
}

/// Absolute difference between two positions.
///
/// `Duration` subtraction panics on underflow, so the drift between a
/// target and an actual position goes through this helper.
#[must_use]
pub fn drift(a: Duration, b: Duration) -> Duration {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    ///
    /// In practice, this is always safe because durations exceeding `u64::MAX`
    /// milliseconds would represent ~584 million years.
    fn as_millis_u64(&self) -> u64;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }
}
