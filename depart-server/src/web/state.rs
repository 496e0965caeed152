//! Application state for the web layer.

use std::sync::Arc;

use crate::buffer::BufferConfig;
use crate::cache::CachedMapsClient;
use crate::domain::{Coordinates, Instant, Mode, WeatherSignal};
use crate::maps::{MapsError, MockOracle};
use crate::planner::{DurationOracle, DurationSample, OracleError, SearchConfig, TrafficModel};
use crate::weather::WeatherClient;

/// Duration oracle backed by the live maps and weather clients.
pub struct LiveOracle {
    maps: Arc<CachedMapsClient>,
    weather: Option<Arc<WeatherClient>>,
}

impl LiveOracle {
    /// Create a live oracle. The weather client is optional: without one,
    /// the weather signal is simply unavailable.
    pub fn new(maps: Arc<CachedMapsClient>, weather: Option<Arc<WeatherClient>>) -> Self {
        Self { maps, weather }
    }
}

fn oracle_error(e: MapsError) -> OracleError {
    match e {
        MapsError::NoRoute | MapsError::NoMatch => OracleError::NoRoute,
        MapsError::MissingTimetable => OracleError::NoData,
        other => OracleError::Upstream(other.to_string()),
    }
}

impl DurationOracle for LiveOracle {
    async fn duration_at_departure(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
        traffic: TrafficModel,
    ) -> Result<DurationSample, OracleError> {
        let secs = self
            .maps
            .route_duration(mode, origin, destination, departure, traffic)
            .await
            .map_err(oracle_error)?;
        Ok(DurationSample::point(secs))
    }

    async fn plan_arrival_by(
        &self,
        _mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        deadline: Instant,
    ) -> Result<DurationSample, OracleError> {
        let leg = self
            .maps
            .transit_route_arriving_by(origin, destination, deadline)
            .await
            .map_err(oracle_error)?;
        Ok(DurationSample::aligned(
            leg.duration_secs,
            leg.departure,
            leg.arrival,
        ))
    }

    async fn weather_signal(
        &self,
        location: Coordinates,
        hour: Instant,
    ) -> Result<Option<WeatherSignal>, OracleError> {
        let Some(weather) = &self.weather else {
            return Ok(None);
        };
        weather
            .forecast_signal(location, hour)
            .await
            .map_err(|e| OracleError::Upstream(e.to_string()))
    }
}

/// The oracle the server runs against: live clients, or the mock when no
/// credentials are configured.
pub enum AppOracle {
    Live(LiveOracle),
    Mock(MockOracle),
}

impl DurationOracle for AppOracle {
    async fn duration_at_departure(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
        traffic: TrafficModel,
    ) -> Result<DurationSample, OracleError> {
        match self {
            AppOracle::Live(o) => {
                o.duration_at_departure(mode, origin, destination, departure, traffic)
                    .await
            }
            AppOracle::Mock(o) => {
                o.duration_at_departure(mode, origin, destination, departure, traffic)
                    .await
            }
        }
    }

    async fn plan_arrival_by(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        deadline: Instant,
    ) -> Result<DurationSample, OracleError> {
        match self {
            AppOracle::Live(o) => o.plan_arrival_by(mode, origin, destination, deadline).await,
            AppOracle::Mock(o) => o.plan_arrival_by(mode, origin, destination, deadline).await,
        }
    }

    async fn weather_signal(
        &self,
        location: Coordinates,
        hour: Instant,
    ) -> Result<Option<WeatherSignal>, OracleError> {
        match self {
            AppOracle::Live(o) => o.weather_signal(location, hour).await,
            AppOracle::Mock(o) => o.weather_signal(location, hour).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Duration oracle (live or mock)
    pub oracle: Arc<AppOracle>,

    /// Maps client for geocoding free-text places; `None` in mock mode
    pub maps: Option<Arc<CachedMapsClient>>,

    /// Departure search configuration
    pub search: Arc<SearchConfig>,

    /// Buffer defaults
    pub buffers: Arc<BufferConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        oracle: AppOracle,
        maps: Option<Arc<CachedMapsClient>>,
        search: SearchConfig,
        buffers: BufferConfig,
    ) -> Self {
        Self {
            oracle: Arc::new(oracle),
            maps,
            search: Arc::new(search),
            buffers: Arc::new(buffers),
        }
    }
}
