//! The duration oracle capability.
//!
//! The planner never talks to an upstream routing service directly; it
//! depends on this trait. Production wires it to the maps and weather
//! clients, tests and credential-less development use deterministic
//! implementations.

use std::future::Future;

use crate::domain::{Coordinates, Instant, Mode, WeatherSignal};

/// Traffic assumption for time-varying duration queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficModel {
    /// The upstream's most likely estimate.
    BestGuess,

    /// Assume worse-than-typical traffic. Default: missing a deadline is
    /// worse than waiting at the gate.
    #[default]
    Pessimistic,

    /// Assume better-than-typical traffic.
    Optimistic,
}

impl TrafficModel {
    /// The lowercase wire name of this model.
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
            TrafficModel::Pessimistic => "pessimistic",
            TrafficModel::Optimistic => "optimistic",
        }
    }
}

/// One answer from the duration oracle.
///
/// Point queries carry only the duration. Timetable plans additionally
/// carry the aligned departure and arrival instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSample {
    /// Travel duration in seconds.
    pub duration_secs: u32,

    /// Aligned departure instant (fixed-schedule plans only).
    pub departure: Option<Instant>,

    /// Aligned arrival instant (fixed-schedule plans only).
    pub arrival: Option<Instant>,
}

impl DurationSample {
    /// A point-duration sample with no timetable alignment.
    pub fn point(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            departure: None,
            arrival: None,
        }
    }

    /// A timetable-aligned sample.
    pub fn aligned(duration_secs: u32, departure: Instant, arrival: Instant) -> Self {
        Self {
            duration_secs,
            departure: Some(departure),
            arrival: Some(arrival),
        }
    }
}

/// Errors from a duration oracle.
///
/// Any of these is terminal for the mode being evaluated: the planner
/// drops the mode rather than retrying. Retry policy, if wanted, belongs
/// in the oracle implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// No route exists between the points for this mode.
    #[error("no route between the given points")]
    NoRoute,

    /// The upstream answered but without usable data.
    #[error("no usable data for the requested instant")]
    NoData,

    /// The upstream call itself failed.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Travel-time and weather predictions, as an abstract capability.
///
/// Implementations are expected to enforce their own timeouts; the
/// planner imposes none.
pub trait DurationOracle {
    /// Predicted travel duration departing at `departure`.
    fn duration_at_departure(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
        traffic: TrafficModel,
    ) -> impl Future<Output = Result<DurationSample, OracleError>> + Send;

    /// Best timetable plan arriving no later than `deadline`.
    ///
    /// The returned sample must have its aligned departure and arrival set.
    fn plan_arrival_by(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        deadline: Instant,
    ) -> impl Future<Output = Result<DurationSample, OracleError>> + Send;

    /// Weather risk flags for the hour containing `hour` at a location.
    ///
    /// `Ok(None)` means no forecast data is available, which is not an
    /// error: the weather buffer simply contributes nothing.
    fn weather_signal(
        &self,
        location: Coordinates,
        hour: Instant,
    ) -> impl Future<Output = Result<Option<WeatherSignal>, OracleError>> + Send;
}
