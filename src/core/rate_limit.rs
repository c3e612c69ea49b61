use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};

use super::error::LlmError;
use super::traits::RateLimiter;

/// Lets every request through immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneRateLimiter;

#[async_trait]
impl RateLimiter for NoneRateLimiter {
    async fn wait(&self) {}
}

/// Token bucket shared by every call made through one client.
pub struct TokenBucketRateLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl TokenBucketRateLimiter {
    /// Allow `max_requests` per `window`, with bursts up to `max_requests`.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, LlmError> {
        if window.is_zero() {
            return Err(LlmError::ProviderConfiguration(
                "rate limit window must be > 0".to_string(),
            ));
        }
        let burst = NonZeroU32::new(max_requests).ok_or_else(|| {
            LlmError::ProviderConfiguration("max_requests must be > 0".to_string())
        })?;

        let replenish_interval = window / burst.get();
        let quota = Quota::with_period(replenish_interval)
            .ok_or_else(|| {
                LlmError::ProviderConfiguration("invalid rate limit period".to_string())
            })?
            .allow_burst(burst);

        Ok(Self {
            limiter: governor::RateLimiter::direct(quota),
        })
    }

    pub fn per_second(requests: u32) -> Result<Self, LlmError> {
        Self::new(requests, Duration::from_secs(1))
    }
}

#[async_trait]
impl RateLimiter for TokenBucketRateLimiter {
    async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}
