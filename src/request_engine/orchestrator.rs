use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm::GenerationError;
use crate::model::{CopyVariant, GenerationInput};

use super::gateway::GenerationGateway;

const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Wait inserted after the failed attempt `attempt_index` (zero-based).
    pub fn backoff(&self, attempt_index: usize) -> Duration {
        let factor = 1u32.checked_shl(attempt_index as u32).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Calls the gateway until it succeeds or attempts run out, sleeping
/// `base_delay * 2^i` after failed attempt `i`. A rejected credential stops
/// the sequence at once. The last error is returned unchanged.
pub async fn generate_with_retry(
    gateway: &dyn GenerationGateway,
    input: &GenerationInput,
    policy: RetryPolicy,
) -> Result<Vec<CopyVariant>, GenerationError> {
    let max_attempts = policy.max_attempts.max(1);
    let request_id = Uuid::new_v4();
    let mut attempt = 0;
    loop {
        info!(
            %request_id,
            attempt = attempt + 1,
            max_attempts,
            model = gateway.model_name(),
            "requesting copy generation"
        );
        let err = match gateway.call(input).await {
            Ok(copies) => return Ok(copies),
            Err(err) => err,
        };
        attempt += 1;
        if !err.is_transient() {
            warn!(%request_id, kind = err.kind(), "non-retryable failure: {err}");
            return Err(err);
        }
        if attempt >= max_attempts {
            warn!(%request_id, attempts = attempt, kind = err.kind(), "giving up: {err}");
            return Err(err);
        }
        let delay = policy.backoff(attempt - 1);
        warn!(
            %request_id,
            attempt,
            kind = err.kind(),
            delay_ms = delay.as_millis() as u64,
            "attempt failed, backing off: {err}"
        );
        tokio::time::sleep(delay).await;
    }
}
