use std::time::Duration;

use tokio::time::Instant;

/// Clock and sleep used between requests.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    /// Time since the pacer was created.
    fn elapsed(&self) -> Duration;

    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone)]
pub struct TokioPacer {
    started: Instant,
}

impl TokioPacer {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for TokioPacer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
