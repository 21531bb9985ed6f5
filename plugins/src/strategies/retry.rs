use meiliscout_core::api::{RetryConfig, RetryStrategy};
use std::time::Duration;

pub struct ExponentialBackoffStrategy {
    config: RetryConfig,
}

pub struct LinearRetryStrategy {
    config: RetryConfig,
}

impl ExponentialBackoffStrategy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

impl LinearRetryStrategy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

/// Client errors other than 408/429 will not go away by polling again.
///
/// Works on the rendered error text, so only the `key=value` header of a
/// `MeiliHttpError` (everything before the first `": "`) is inspected. The
/// body preview that follows is ignored; any other error text is treated
/// as retryable.
fn is_client_error(error: &str) -> bool {
    let header = error.split_once(": ").map_or(error, |(head, _)| head);
    let mut fields = header.split_whitespace();
    let is_status = fields.clone().any(|f| f == "kind=status");
    is_status
        && fields.any(|f| matches!(f, "status=400" | "status=401" | "status=403" | "status=404"))
}

impl RetryStrategy for ExponentialBackoffStrategy {
    fn name(&self) -> &str {
        "exponential-backoff"
    }

    fn next_delay(&self, attempt: u32, _error: &str) -> Option<Duration> {
        if attempt >= self.config.max_attempts {
            return None;
        }
        let exp = 1u64 << attempt.min(30);
        let delay = self.config.base_delay_ms.saturating_mul(exp);
        let delay = delay.min(self.config.max_delay_ms);
        Some(Duration::from_millis(delay))
    }

    fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    fn is_fatal_error(&self, error: &str) -> bool {
        is_client_error(error)
    }
}

impl RetryStrategy for LinearRetryStrategy {
    fn name(&self) -> &str {
        "linear"
    }

    fn next_delay(&self, attempt: u32, _error: &str) -> Option<Duration> {
        if attempt >= self.config.max_attempts {
            return None;
        }
        let multiplier = attempt.saturating_add(1) as u64;
        let delay = self.config.base_delay_ms.saturating_mul(multiplier);
        let delay = delay.min(self.config.max_delay_ms);
        Some(Duration::from_millis(delay))
    }

    fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    fn is_fatal_error(&self, error: &str) -> bool {
        is_client_error(error)
    }
}
