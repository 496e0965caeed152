//! Resolved geographic coordinates.

use std::fmt;

/// Error returned when constructing invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A resolved latitude/longitude pair.
///
/// The planner never resolves place names itself; it receives coordinates
/// that have already been geocoded (or typed directly as "lat,lon").
///
/// # Examples
///
/// ```
/// use depart_server::domain::Coordinates;
///
/// let sfo = Coordinates::new(37.6213, -122.3790).unwrap();
/// assert_eq!(sfo.lat(), 37.6213);
///
/// // Out-of-range values are rejected
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 181.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create coordinates, validating the ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a "lat,lon" string.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinates> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidCoordinates {
            reason: "expected \"lat,lon\"",
        })?;
        let lat: f64 = lat.trim().parse().map_err(|_| InvalidCoordinates {
            reason: "latitude is not a number",
        })?;
        let lon: f64 = lon.trim().parse().map_err(|_| InvalidCoordinates {
            reason: "longitude is not a number",
        })?;
        Self::new(lat, lon)
    }

    /// The latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// The longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Microdegree representation, for use as a cache key.
    pub fn microdegrees(&self) -> (i64, i64) {
        (
            (self.lat * 1_000_000.0).round() as i64,
            (self.lon * 1_000_000.0).round() as i64,
        )
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}
