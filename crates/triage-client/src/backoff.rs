//! Bounded exponential backoff for page retries.
//!
//! The schedule is fixed: wait `2^attempt` seconds after failed attempt
//! `attempt` (1-indexed), no jitter, no cap. Sleeping goes through the
//! [`Sleeper`] trait so tests can observe the schedule without real delays.

use std::time::Duration;

use async_trait::async_trait;

/// Injectable sleep, so retry schedules are testable without real time.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for `duration`. Not cancellable mid-wait.
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded retry policy with the exponential backoff schedule.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first.
    pub max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        RetryPolicy { max_retries }
    }

    /// Delay to wait after failed attempt `attempt` (1-indexed) before the
    /// next one: `2^attempt` seconds, saturating for attempts past the
    /// width of `u64`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(2u64.saturating_pow(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(3);
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
        assert_eq!(policy.delay_after(3), Duration::from_secs(8));
    }

    #[test]
    fn test_delay_saturates_for_huge_attempt_counts() {
        let policy = RetryPolicy::new(u32::MAX);
        assert_eq!(policy.delay_after(63), Duration::from_secs(1u64 << 63));
        assert_eq!(policy.delay_after(64), Duration::from_secs(u64::MAX));
        assert_eq!(policy.delay_after(u32::MAX), Duration::from_secs(u64::MAX));
    }
}
