//! Search configuration for the departure planner.

use super::oracle::TrafficModel;

/// Configuration parameters for the latest-departure search.
///
/// The probe budget and step width are a deliberate cost/precision
/// tradeoff against a rate-limited upstream: the search makes at most
/// `max_probes` oracle calls and resolves departures to the minute,
/// rather than looping until exact convergence.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of oracle probes per search.
    pub max_probes: u32,

    /// Step the search bounds move past a probe, in seconds.
    pub step_secs: i64,

    /// Traffic assumption for time-varying duration queries.
    pub traffic_model: TrafficModel,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_probes: 8,
            step_secs: 60,
            traffic_model: TrafficModel::Pessimistic,
        }
    }
}
