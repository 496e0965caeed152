//! Maps client error types.

/// Errors from the maps HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Truncated response body, for debugging.
        body: Option<String>,
    },

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiStatus { status: u16, message: String },

    /// The API answered with a non-OK application status
    #[error("upstream status {status}: {}", message.as_deref().unwrap_or("no detail"))]
    Upstream {
        status: String,
        message: Option<String>,
    },

    /// No route exists between the requested points
    #[error("no route between the requested points")]
    NoRoute,

    /// A transit plan came back without timetable alignment
    #[error("transit plan missing timetable times")]
    MissingTimetable,

    /// Geocoding found no match for the query
    #[error("no geocoding match for query")]
    NoMatch,

    /// Rate limited by the API
    #[error("rate limited by maps API")]
    RateLimited,

    /// Invalid or missing API key
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}
