//! Absolute instants for departure planning.
//!
//! All planning arithmetic happens on Unix timestamps. Instants are
//! ordered as plain integers; there is no timezone arithmetic anywhere
//! in the planner. Rendering an instant in the traveler's time zone is
//! a web-layer concern.

use std::fmt;
use std::ops::Add;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// An absolute point in time, as seconds since the Unix epoch.
///
/// # Examples
///
/// ```
/// use depart_server::domain::Instant;
///
/// let t = Instant::from_unix_seconds(1_700_000_000);
/// assert!(t < t.add_seconds(60));
/// assert_eq!(t.add_seconds(90).floor_to_minute().unix_seconds() % 60, 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// Create an instant from a Unix timestamp in seconds.
    pub const fn from_unix_seconds(secs: i64) -> Self {
        Self(secs)
    }

    /// The Unix timestamp in seconds.
    pub const fn unix_seconds(self) -> i64 {
        self.0
    }

    /// Create an instant from a chrono datetime in any time zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.timestamp())
    }

    /// Convert to a UTC datetime, for display formatting.
    ///
    /// Returns `None` for timestamps outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }

    /// Add a number of seconds (saturating, may be negative).
    pub fn add_seconds(self, secs: i64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Subtract a number of seconds (saturating).
    pub fn sub_seconds(self, secs: i64) -> Self {
        Self(self.0.saturating_sub(secs))
    }

    /// Subtract a number of minutes (saturating).
    pub fn sub_minutes(self, mins: i64) -> Self {
        self.sub_seconds(mins.saturating_mul(60))
    }

    /// Round down to the whole minute.
    pub fn floor_to_minute(self) -> Self {
        Self(self.0.div_euclid(60) * 60)
    }

    /// Round up to the whole minute.
    pub fn ceil_to_minute(self) -> Self {
        Self(self.0.div_euclid(60) * 60 + if self.0.rem_euclid(60) == 0 { 0 } else { 60 })
    }

    /// Round down to the whole hour.
    pub fn floor_to_hour(self) -> Self {
        Self(self.0.div_euclid(3600) * 3600)
    }

    /// Seconds elapsed since `earlier` (negative if `self` is earlier).
    pub fn signed_seconds_since(self, earlier: Instant) -> i64 {
        self.0 - earlier.0
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        self.add_seconds(rhs.num_seconds())
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({})", self.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "@{}", self.0),
        }
    }
}
