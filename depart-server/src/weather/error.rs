//! Weather client error types.

/// Errors from the forecast HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiStatus { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by weather API")]
    RateLimited,

    /// Invalid or missing API key
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}
