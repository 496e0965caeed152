//! Forecast API client.
//!
//! Provides the weather-risk signal behind the weather buffer: hourly
//! (3-hourly upstream) precipitation probability and wind speed, reduced
//! to the two categorical flags the buffer policy consumes.

mod client;
mod error;
mod types;

pub use client::{WeatherClient, WeatherConfig};
pub use error::WeatherError;
pub use types::ForecastResponse;
