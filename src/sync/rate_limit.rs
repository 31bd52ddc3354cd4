use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Sliding-window request budget, tracked per endpoint. `check` prunes
/// timestamps that fell out of the trailing window and answers whether
/// another request may be sent; `record` logs a completed attempt.
/// Rejected calls are never recorded, so they do not extend the window.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    pub async fn check(&self, endpoint: &str) -> bool {
        let mut windows = self.windows.lock().await;
        let timestamps = windows.entry(endpoint.to_string()).or_default();

        while let Some(oldest) = timestamps.front() {
            if oldest.elapsed() >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        timestamps.len() < self.max_requests
    }

    pub async fn record(&self, endpoint: &str) {
        self.windows
            .lock()
            .await
            .entry(endpoint.to_string())
            .or_default()
            .push_back(Instant::now());
    }
}
