use std::time::Duration;

use rand::Rng;

/// Exponential backoff with full jitter.
///
/// Retry `attempt` (0-indexed) waits at most `min(wait_min * 2^attempt, wait_max)`.
/// The first backoff always waits the full lower bound; later ones draw a
/// uniform duration in `[0, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub wait_min: Duration,
    pub wait_max: Duration,
}

impl Backoff {
    pub fn new(wait_min: Duration, wait_max: Duration) -> Self {
        Self { wait_min, wait_max }
    }

    /// Upper bound for the delay before the retry following `attempt`.
    pub fn ceiling(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.wait_min
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.wait_max)
    }

    pub fn delay<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let ceiling = self.ceiling(attempt);
        if attempt == 0 {
            return ceiling;
        }

        let nanos = u64::try_from(ceiling.as_nanos()).unwrap_or(u64::MAX);
        if nanos == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rng.random_range(0..=nanos))
    }
}
