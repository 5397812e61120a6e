/// Per-client API call statistics
///
/// Every LLM client owns an ApiStatsTracker and records each request's
/// outcome and latency. The aggregated snapshot is surfaced by the
/// GET /api/status endpoint.
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Snapshot of a client's call statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Rolling average latency over successful requests, in milliseconds
    pub average_latency_ms: f64,
    /// Display form of the most recent error, if any
    pub last_error: Option<String>,
}

impl ApiStats {
    /// Success rate as a percentage (100 when no requests yet)
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 100.0;
        }
        (self.successful_requests as f64 / self.total_requests as f64) * 100.0
    }
}

/// Thread-safe statistics tracker shared by a single API client
pub struct ApiStatsTracker {
    inner: RwLock<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ApiStats::default()),
        }
    }

    /// Record the outcome of one request
    ///
    /// Latency only contributes to the rolling average for successful calls.
    pub async fn record_request(&self, success: bool, latency_ms: f64) {
        let mut stats = self.inner.write().await;
        stats.total_requests += 1;

        if success {
            // Incremental mean over successful requests only
            let n = stats.successful_requests as f64;
            stats.average_latency_ms = (stats.average_latency_ms * n + latency_ms) / (n + 1.0);
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
    }

    /// Record the display form of the most recent error
    pub async fn record_error(&self, error: impl Into<String>) {
        let mut stats = self.inner.write().await;
        stats.last_error = Some(error.into());
    }

    /// Get a snapshot of the current statistics
    pub async fn get_stats(&self) -> ApiStats {
        self.inner.read().await.clone()
    }
}

impl Default for ApiStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_request_counts() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(true, 300.0).await;
        tracker.record_request(false, 0.0).await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.successful_requests, 2);
        assert_eq!(stats.failed_requests, 1);
        assert!((stats.average_latency_ms - 200.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_last_error_retained() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(false, 0.0).await;
        tracker.record_error("timeout").await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.last_error.as_deref(), Some("timeout"));
        assert!(stats.success_rate() < 100.0);
    }
}
