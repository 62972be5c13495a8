//! Request pacing between downloads.
//!
//! The pipeline calls `pause()` after each fetch completes. `FixedDelay` keeps a
//! minimum gap between requests; `NoDelay` is used in tests and when the
//! configured delay is zero.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}

pub struct FixedDelay(pub Duration);

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self) {}
}

/// Picks the throttle for a configured delay in milliseconds.
pub fn from_millis(delay_ms: u64) -> Box<dyn Throttle> {
    if delay_ms == 0 {
        Box::new(NoDelay)
    } else {
        Box::new(FixedDelay(Duration::from_millis(delay_ms)))
    }
}
