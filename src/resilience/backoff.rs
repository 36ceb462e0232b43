//! Exponential backoff for throttled RPC calls.

use std::time::Duration;

/// Calculate an exponential backoff delay.
///
/// `attempt` counts retries starting at 1; attempt 1 waits `base_ms`,
/// attempt 2 waits twice that, and so on up to `max_ms`. No jitter is added,
/// so a throttled call waits 500 ms, 1 s, 2 s ... with the default base.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let factor = 2u64.saturating_pow(attempt - 1);
    Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
}
