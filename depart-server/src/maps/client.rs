//! Maps HTTP client.
//!
//! Provides async methods for querying directions and geocoding.
//! Handles authentication, status mapping, and conversion to domain types.

use crate::domain::{Coordinates, Instant, Mode};
use crate::planner::TrafficModel;

use super::error::MapsError;
use super::types::{DirectionsResponse, GeocodeResponse};

/// Default base URL for the maps API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A timetable-aligned transit leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitLeg {
    pub duration_secs: u32,
    pub departure: Instant,
    pub arrival: Instant,
}

/// Maps API client.
///
/// Each request carries the API key as a query parameter; the upstream
/// enforces its own rate limits, surfaced as [`MapsError::RateLimited`].
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Predicted point duration in seconds, departing at `departure`.
    ///
    /// For driving-like modes the upstream returns a traffic-adjusted
    /// duration alongside the typical one; the adjusted value wins.
    pub async fn route_duration(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
        traffic: TrafficModel,
    ) -> Result<u32, MapsError> {
        // Rideshare rides on the driving profile.
        let api_mode = match mode {
            Mode::Rideshare => "driving",
            other => other.as_str(),
        };

        let response = self
            .directions(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("mode", api_mode.to_string()),
                ("departure_time", departure.unix_seconds().to_string()),
                ("traffic_model", traffic.as_str().to_string()),
            ])
            .await?;

        let leg = first_leg(&response)?;
        let duration = leg
            .duration_in_traffic
            .as_ref()
            .or(leg.duration.as_ref())
            .ok_or(MapsError::NoRoute)?;

        u32::try_from(duration.value).map_err(|_| MapsError::Json {
            message: format!("negative duration: {}", duration.value),
            body: None,
        })
    }

    /// Best transit plan arriving no later than `arrival`.
    pub async fn transit_route_arriving_by(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        arrival: Instant,
    ) -> Result<TransitLeg, MapsError> {
        let response = self
            .directions(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("mode", "transit".to_string()),
                ("arrival_time", arrival.unix_seconds().to_string()),
            ])
            .await?;

        let leg = first_leg(&response)?;

        let (Some(departure_time), Some(arrival_time), Some(duration)) = (
            leg.departure_time.as_ref(),
            leg.arrival_time.as_ref(),
            leg.duration.as_ref(),
        ) else {
            return Err(MapsError::MissingTimetable);
        };

        let duration_secs = u32::try_from(duration.value).map_err(|_| MapsError::Json {
            message: format!("negative duration: {}", duration.value),
            body: None,
        })?;

        Ok(TransitLeg {
            duration_secs,
            departure: Instant::from_unix_seconds(departure_time.value),
            arrival: Instant::from_unix_seconds(arrival_time.value),
        })
    }

    /// Resolve a free-text place query to coordinates.
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, MapsError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let body = self
            .get_checked(&url, &[("address", query.to_string())])
            .await?;

        let response: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(MapsError::NoMatch),
            other => {
                return Err(MapsError::Upstream {
                    status: other.to_string(),
                    message: None,
                });
            }
        }

        let location = response
            .results
            .first()
            .map(|r| &r.geometry.location)
            .ok_or(MapsError::NoMatch)?;

        Coordinates::new(location.lat, location.lng).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: None,
        })
    }

    /// Run a directions request and map the application status.
    async fn directions(&self, params: &[(&str, String)]) -> Result<DirectionsResponse, MapsError> {
        let url = format!("{}/maps/api/directions/json", self.base_url);
        let body = self.get_checked(&url, params).await?;

        let response: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        match response.status.as_str() {
            "OK" => Ok(response),
            "ZERO_RESULTS" | "NOT_FOUND" => Err(MapsError::NoRoute),
            "OVER_QUERY_LIMIT" => Err(MapsError::RateLimited),
            "REQUEST_DENIED" => Err(MapsError::Unauthorized),
            other => Err(MapsError::Upstream {
                status: other.to_string(),
                message: response.error_message,
            }),
        }
    }

    /// GET with the API key, mapping HTTP-level failures.
    async fn get_checked(&self, url: &str, params: &[(&str, String)]) -> Result<String, MapsError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::ApiStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

/// First leg of the first route, the single-waypoint case.
fn first_leg(response: &DirectionsResponse) -> Result<&super::types::RouteLeg, MapsError> {
    response
        .routes
        .first()
        .and_then(|route| route.legs.first())
        .ok_or(MapsError::NoRoute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MapsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(30);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_defaults() {
        let config = MapsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        let client = MapsClient::new(MapsConfig::new("test-key"));
        assert!(client.is_ok());
    }

    // Integration tests against the real API require credentials and are
    // run separately.
}
