//! Retry policy for RisPort70 exchanges.
//!
//! RisPort70 sheds load with `503 Service Unavailable` when its per-minute
//! request budget is spent, so a polling client has to be ready to back off
//! and try again. Only transport failures and the configured status codes
//! are retried. SOAP faults are answers, not failures, and go straight back
//! to the caller.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::Error;

/// Retries after the first attempt.
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Environment variable setting the retry count after the first attempt.
pub const ENV_RETRIES: &str = "RISPORT_RETRIES";
/// Environment variable overriding [`RetryPolicy::delay`], in milliseconds.
pub const ENV_RETRIES_DELAY: &str = "RISPORT_RETRIES_DELAY";

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Same delay before every retry.
    #[default]
    Fixed,
    /// `delay * 2^(attempt - 1)`, capped at `max_delay`.
    Exponential { max_delay: Duration },
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Base delay between attempts.
    pub delay: Duration,
    pub backoff: Backoff,
    /// Status codes treated as transient server conditions.
    pub retry_on: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRIES + 1,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            backoff: Backoff::Fixed,
            retry_on: vec![StatusCode::SERVICE_UNAVAILABLE.as_u16()],
        }
    }
}

impl RetryPolicy {
    /// Defaults with `RISPORT_RETRIES` / `RISPORT_RETRIES_DELAY` applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `RISPORT_RETRIES` / `RISPORT_RETRIES_DELAY` on top of this policy.
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_RETRIES).ok().as_deref(),
            std::env::var(ENV_RETRIES_DELAY).ok().as_deref(),
        )
    }

    /// Allow `retries` further attempts after the first one.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_attempts = retries.saturating_add(1);
        self
    }

    fn with_overrides(mut self, retries: Option<&str>, delay_ms: Option<&str>) -> Self {
        if let Some(raw) = retries {
            match raw.trim().parse::<u32>() {
                Ok(n) => self = self.with_retries(n),
                Err(e) => tracing::warn!(var = ENV_RETRIES, value = raw, error = %e, "ignoring invalid retry count"),
            }
        }
        if let Some(raw) = delay_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.delay = Duration::from_millis(ms),
                Err(e) => tracing::warn!(var = ENV_RETRIES_DELAY, value = raw, error = %e, "ignoring invalid retry delay"),
            }
        }
        self
    }

    /// Switch to exponential backoff with the default 30s ceiling.
    pub fn exponential(mut self) -> Self {
        self.backoff = Backoff::Exponential {
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        };
        self
    }

    /// Attempt budget, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether this status code is a transient server condition.
    pub fn retries_status(&self, status: StatusCode) -> bool {
        self.retry_on.contains(&status.as_u16())
    }

    /// Whether the outcome of an attempt is a transient failure.
    pub fn is_retryable(&self, outcome: Result<StatusCode, &Error>) -> bool {
        match outcome {
            Ok(status) => self.retries_status(status),
            Err(err) => err.is_transient(),
        }
    }

    /// Retry predicate: should another attempt follow attempt number `attempt`
    /// (1-based) given its outcome?
    pub fn should_retry(&self, attempt: u32, outcome: Result<StatusCode, &Error>) -> bool {
        attempt < self.attempts() && self.is_retryable(outcome)
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { max_delay } => {
                let factor = 1u32 << attempt.saturating_sub(1).min(16);
                self.delay.saturating_mul(factor).min(max_delay)
            }
        }
    }
}
