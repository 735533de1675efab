use rand::{thread_rng, Rng};
use std::time::Duration;
use tracing::debug;

/// Retry policy for transport failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, base_delay_ms: 200 }
    }
}

impl RetryPolicy {
    /// Delay before attempt `i + 1`: exponential with jitter
    pub fn delay(&self, i: u32) -> Duration {
        let exp = 2u64.saturating_pow(i);
        let jitter: u64 = thread_rng().gen_range(0..(self.base_delay_ms / 2).max(1));
        Duration::from_millis(self.base_delay_ms.saturating_mul(exp) + jitter)
    }

    /// Runs `op` until it succeeds, the error is not retryable, or attempts run out
    pub async fn retry<F, Fut, T, E>(&self, mut op: F, retryable: impl Fn(&E) -> bool) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut i = 0;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if i + 1 < attempts && retryable(&e) => {
                    let delay = self.delay(i);
                    debug!("attempt {}/{} failed: {}; retrying in {:?}", i + 1, attempts, e, delay);
                    tokio::time::sleep(delay).await;
                    i += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
