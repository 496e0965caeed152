//! Wire types for the directions and geocoding endpoints.

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Upstream status string ("OK", "ZERO_RESULTS", ...).
    pub status: String,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Optional human-readable error detail.
    pub error_message: Option<String>,
}

/// One route in a directions response.
#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// One leg of a route. Single-waypoint requests have exactly one leg.
#[derive(Debug, Deserialize)]
pub struct RouteLeg {
    /// Typical travel duration.
    pub duration: Option<ValueField>,

    /// Traffic-model-adjusted duration (driving with departure_time only).
    pub duration_in_traffic: Option<ValueField>,

    /// Timetable-aligned departure (transit only).
    pub departure_time: Option<EpochField>,

    /// Timetable-aligned arrival (transit only).
    pub arrival_time: Option<EpochField>,
}

/// A duration field: `{"text": "31 mins", "value": 1842}` (seconds).
#[derive(Debug, Deserialize)]
pub struct ValueField {
    pub value: i64,
}

/// A time field: `{"text": "09:15", "value": 1700000100}` (Unix seconds).
#[derive(Debug, Deserialize)]
pub struct EpochField {
    pub value: i64,
}

/// Top-level geocoding response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding result.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
