//! Planner configuration.

use chrono::Duration;

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Length of the query window ending at the desired arrival (minutes).
    /// Only segments arriving inside the window become graph nodes.
    pub window_mins: i64,

    /// Slack allowed when connecting two events (minutes).
    /// Used both as the overlap tolerance between same-stop trips and as
    /// the extra margin on top of a walk.
    pub connection_slack_mins: i64,

    /// Same-stop transfers must weigh strictly more than this (minutes).
    pub min_transfer_weight_mins: u32,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        window_mins: i64,
        connection_slack_mins: i64,
        min_transfer_weight_mins: u32,
    ) -> Self {
        Self {
            window_mins,
            connection_slack_mins,
            min_transfer_weight_mins,
        }
    }

    /// Returns the query window as a Duration.
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_mins)
    }

    /// Returns the connection slack as a Duration.
    pub fn connection_slack(&self) -> Duration {
        Duration::minutes(self.connection_slack_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            window_mins: 120, // 2 hours
            connection_slack_mins: 2,
            min_transfer_weight_mins: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.window_mins, 120);
        assert_eq!(config.connection_slack_mins, 2);
        assert_eq!(config.min_transfer_weight_mins, 2);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.window(), Duration::hours(2));
        assert_eq!(config.connection_slack(), Duration::minutes(2));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(90, 3, 4);

        assert_eq!(config.window(), Duration::minutes(90));
        assert_eq!(config.connection_slack(), Duration::minutes(3));
        assert_eq!(config.min_transfer_weight_mins, 4);
    }
}
