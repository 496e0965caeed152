//! Routing and geocoding client.
//!
//! This module provides an HTTP client for a Google-style directions API,
//! which supplies the travel-time predictions behind the duration oracle.
//!
//! Key characteristics of the upstream:
//! - Durations for driving requests come back twice: `duration` (typical)
//!   and `duration_in_traffic` (model-adjusted); prefer the latter.
//! - Transit requests planned with `arrival_time` return timetable-aligned
//!   departure and arrival epochs on the leg.
//! - The API is rate limited, which is why the planner bounds its probe
//!   count and the server caches point durations.

mod client;
mod error;
mod mock;
mod types;

pub use client::{MapsClient, MapsConfig, TransitLeg};
pub use error::MapsError;
pub use mock::{MockOracle, ModeModel};
pub use types::{DirectionsResponse, GeocodeResponse};
