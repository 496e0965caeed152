//! Wire types for the forecast endpoint.

use serde::Deserialize;

/// Top-level forecast response: a list of 3-hourly entries.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

/// One forecast slot.
#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    /// Slot start, Unix seconds.
    pub dt: i64,

    /// Probability of precipitation, 0.0..=1.0.
    #[serde(default)]
    pub pop: f64,

    pub wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s (metric units requested).
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forecast() {
        let json = r#"{
            "list": [
                {"dt": 1700000000, "pop": 0.62, "wind": {"speed": 4.1}},
                {"dt": 1700010800, "wind": {"speed": 12.3}}
            ]
        }"#;

        let response: ForecastResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.list.len(), 2);
        assert_eq!(response.list[0].pop, 0.62);
        assert_eq!(response.list[1].pop, 0.0);
        assert_eq!(response.list[1].wind.as_ref().unwrap().speed, 12.3);
    }

    #[test]
    fn parse_empty_forecast() {
        let response: ForecastResponse = serde_json::from_str("{}").unwrap();
        assert!(response.list.is_empty());
    }
}
