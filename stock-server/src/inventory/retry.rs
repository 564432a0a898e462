//! Bounded retry for SQLite write-lock contention

use std::time::Duration;

/// How often a conflicting stock operation is re-run before giving up
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 25,
        }
    }
}

impl RetryPolicy {
    /// Linear backoff: attempt 1 waits `base`, attempt 2 waits `2 * base`, ...
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(attempt as u64))
    }

    /// Whether another attempt is allowed after `attempt` failed
    pub fn should_retry(&self, attempt: usize) -> bool {
        attempt < self.max_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(25));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(75));
    }

    #[test]
    fn attempts_are_bounded() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));

        let single = RetryPolicy {
            max_attempts: 0,
            base_backoff_ms: 0,
        };
        assert!(!single.should_retry(1));
    }
}
