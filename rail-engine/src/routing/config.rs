//! Search configuration for the route graph.

use chrono::Duration;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum time required between arriving at a station and departing
    /// from it again (minutes). Zero means a leg departing at the very
    /// minute of arrival can be caught. Never applies at the origin.
    pub min_connection_mins: u16,

    /// Maximum number of scheduled segments a single graph may hold.
    /// Inserts beyond this are rejected.
    pub max_edges: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_connection_mins: u16, max_edges: usize) -> Self {
        Self {
            min_connection_mins,
            max_edges,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(i64::from(self.min_connection_mins))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 0,
            max_edges: 50_000,
        }
    }
}
