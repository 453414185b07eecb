/// Token bucket rate limiter for outbound service calls
///
/// Implements the token bucket algorithm to keep requests against the
/// adaptive question service within the configured rate. Tokens are refilled
/// continuously based on elapsed time.
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket rate limiter for API request throttling.
#[derive(Clone)]
pub struct TokenBucketRateLimiter {
    /// Current number of available tokens
    tokens: Arc<Mutex<f64>>,
    /// Maximum token capacity (equals refill rate for burst tolerance)
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Last time tokens were refilled
    last_refill: Arc<Mutex<Instant>>,
}

impl TokenBucketRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `rate_limit_rps` - Requests per second allowed (e.g. 20.0)
    pub fn new(rate_limit_rps: f64) -> Self {
        assert!(rate_limit_rps > 0.0, "Rate limit must be positive");

        Self {
            tokens: Arc::new(Mutex::new(rate_limit_rps)),
            capacity: rate_limit_rps,
            refill_rate: rate_limit_rps,
            last_refill: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Acquire a token, waiting until one is available.
    pub async fn acquire(&self) {
        loop {
            self.refill().await;

            let mut tokens = self.tokens.lock().await;
            if *tokens >= 1.0 {
                *tokens -= 1.0;
                return;
            }
            drop(tokens);

            // Wait roughly one token's worth of refill time
            let wait_ms = (1000.0 / self.refill_rate).ceil() as u64;
            sleep(Duration::from_millis(wait_ms.max(1))).await;
        }
    }

    async fn refill(&self) {
        let mut last_refill = self.last_refill.lock().await;
        let elapsed = last_refill.elapsed().as_secs_f64();
        *last_refill = Instant::now();
        drop(last_refill);

        let mut tokens = self.tokens.lock().await;
        *tokens = (*tokens + elapsed * self.refill_rate).min(self.capacity);
    }
}
