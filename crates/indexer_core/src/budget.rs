use std::collections::VecDeque;
use std::time::Duration;

/// Rolling-window request budget.
///
/// Times are offsets from the start of the run, so callers can drive it
/// with a real or a virtual clock.
#[derive(Debug, Clone)]
pub struct RequestBudget {
    max_requests: usize,
    window: Duration,
    issued: VecDeque<Duration>,
}

impl RequestBudget {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1) as usize,
            window,
            issued: VecDeque::new(),
        }
    }

    /// How long to wait at `now` before another request fits the window.
    pub fn wait_before_next(&mut self, now: Duration) -> Duration {
        while let Some(&oldest) = self.issued.front() {
            if oldest + self.window <= now {
                self.issued.pop_front();
            } else {
                break;
            }
        }
        if self.issued.len() < self.max_requests {
            return Duration::ZERO;
        }
        match self.issued.front() {
            Some(&oldest) => (oldest + self.window).saturating_sub(now),
            None => Duration::ZERO,
        }
    }

    pub fn record(&mut self, at: Duration) {
        self.issued.push_back(at);
    }

    pub fn in_window(&self) -> usize {
        self.issued.len()
    }
}
