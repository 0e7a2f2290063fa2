//! Trade context configuration options.

use std::time::Duration;

/// Configuration for a trade context.
///
/// # Example
///
/// ```
/// use futu_trade_rs::{ContextConfig, ReplayConfig};
/// use std::time::Duration;
///
/// let config = ContextConfig::default()
///     .with_history_window_days(30)
///     .with_unlock_replay(ReplayConfig::default().with_interval(Duration::from_millis(500)));
/// assert_eq!(config.unlock_replay.max_attempts, 3);
/// ```
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// How a cached unlock is replayed after the transport reconnects
    pub unlock_replay: ReplayConfig,
    /// Width of the default window for history queries, in days
    pub history_window_days: i64,
    /// Refuse real-money order placement/modification until unlocked
    pub require_unlock_for_real: bool,
    /// Buffer size of the push notification channel
    pub notification_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            unlock_replay: ReplayConfig::default(),
            history_window_days: 90,
            require_unlock_for_real: true,
            notification_capacity: 1024,
        }
    }
}

impl ContextConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unlock replay behaviour.
    pub fn with_unlock_replay(mut self, replay: ReplayConfig) -> Self {
        self.unlock_replay = replay;
        self
    }

    /// Set the default history window.
    ///
    /// A negative width, or one that reaches outside the calendar, makes
    /// history queries fail with a parameter error.
    pub fn with_history_window_days(mut self, days: i64) -> Self {
        self.history_window_days = days;
        self
    }

    /// Enable or disable the local unlock check for real-money orders.
    pub fn with_require_unlock(mut self, enabled: bool) -> Self {
        self.require_unlock_for_real = enabled;
        self
    }

    /// Set the push notification buffer size.
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity.max(1);
        self
    }
}

/// How a cached unlock credential is replayed after reconnection.
///
/// Attempts stop at the first success. The delay sits between attempts,
/// never after the last one.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Maximum number of unlock attempts
    pub max_attempts: u32,
    /// Pause between failed attempts
    pub interval: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            interval: Duration::from_secs(1),
        }
    }
}

impl ReplayConfig {
    /// Never replay the unlock.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }

    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the pause between attempts.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns `true` if at least one attempt is made.
    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContextConfig::default();
        assert_eq!(config.history_window_days, 90);
        assert!(config.require_unlock_for_real);
        assert_eq!(config.unlock_replay.max_attempts, 3);
        assert_eq!(config.unlock_replay.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_replay_disabled() {
        assert!(!ReplayConfig::disabled().is_enabled());
        assert!(ReplayConfig::default().is_enabled());
    }

    #[test]
    fn test_notification_capacity_floor() {
        let config = ContextConfig::default().with_notification_capacity(0);
        assert_eq!(config.notification_capacity, 1);
    }
}
