/// Shared application state for the webserver
///
/// The portal keeps no per-request or cross-request mutable state; the only
/// shared value is the startup timestamp used for uptime reporting.

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_is_non_negative() {
        let state = AppState::new();
        assert!(state.uptime_seconds() < 5);
    }
}
