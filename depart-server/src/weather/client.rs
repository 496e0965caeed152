//! Forecast HTTP client.

use crate::domain::{Coordinates, Instant, WeatherSignal};

use super::error::WeatherError;
use super::types::{ForecastEntry, ForecastResponse};

/// Default base URL for the forecast API.
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Precipitation probability at or above this counts as likely.
const PRECIPITATION_THRESHOLD: f64 = 0.5;

/// Wind speed (m/s) at or above this counts as high wind.
const HIGH_WIND_THRESHOLD: f64 = 10.0;

/// Forecast slots are 3-hourly; an hour matches a slot covering it.
const SLOT_SECS: i64 = 3 * 3600;

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
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
}

/// Forecast API client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new weather client with the given configuration.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Weather risk flags for the hour containing `hour` at a location.
    ///
    /// Returns `Ok(None)` when the forecast has no slot covering the hour
    /// (past instants, or beyond the forecast horizon).
    pub async fn forecast_signal(
        &self,
        location: Coordinates,
        hour: Instant,
    ) -> Result<Option<WeatherSignal>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.lat().to_string()),
                ("lon", location.lon().to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WeatherError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let forecast: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(signal_for_hour(&forecast.list, hour))
    }
}

/// Reduce the slot covering `hour` to categorical flags.
fn signal_for_hour(entries: &[ForecastEntry], hour: Instant) -> Option<WeatherSignal> {
    let target = hour.unix_seconds();

    let slot = entries
        .iter()
        .find(|e| e.dt <= target && target < e.dt + SLOT_SECS)?;

    Some(WeatherSignal {
        precipitation_likely: slot.pop >= PRECIPITATION_THRESHOLD,
        high_wind: slot
            .wind
            .as_ref()
            .is_some_and(|w| w.speed >= HIGH_WIND_THRESHOLD),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::types::Wind;

    fn entry(dt: i64, pop: f64, wind_speed: Option<f64>) -> ForecastEntry {
        ForecastEntry {
            dt,
            pop,
            wind: wind_speed.map(|speed| Wind { speed }),
        }
    }

    #[test]
    fn matches_covering_slot() {
        let entries = vec![
            entry(0, 0.8, Some(2.0)),
            entry(10_800, 0.1, Some(15.0)),
        ];

        // Hour 1 falls in the first slot.
        let signal = signal_for_hour(&entries, Instant::from_unix_seconds(3600)).unwrap();
        assert!(signal.precipitation_likely);
        assert!(!signal.high_wind);

        // Hour 4 falls in the second slot.
        let signal = signal_for_hour(&entries, Instant::from_unix_seconds(4 * 3600)).unwrap();
        assert!(!signal.precipitation_likely);
        assert!(signal.high_wind);
    }

    #[test]
    fn no_covering_slot_is_unavailable() {
        let entries = vec![entry(10_800, 0.9, Some(20.0))];

        assert!(signal_for_hour(&entries, Instant::from_unix_seconds(0)).is_none());
        assert!(signal_for_hour(&entries, Instant::from_unix_seconds(30_000)).is_none());
        assert!(signal_for_hour(&[], Instant::from_unix_seconds(0)).is_none());
    }

    #[test]
    fn thresholds_are_inclusive() {
        let entries = vec![entry(0, 0.5, Some(10.0))];

        let signal = signal_for_hour(&entries, Instant::from_unix_seconds(0)).unwrap();
        assert!(signal.precipitation_likely);
        assert!(signal.high_wind);
    }

    #[test]
    fn config_builder() {
        let config = WeatherConfig::new("key").with_base_url("http://localhost:9999");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 10);
    }
}
