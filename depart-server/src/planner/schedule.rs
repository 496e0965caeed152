//! Timetable planning for fixed-schedule modes.
//!
//! Transit durations are not a continuous function of the departure
//! instant; they depend on timetable alignment. Rather than probing, the
//! planner asks the oracle once for the best plan arriving by the
//! deadline and trusts its timetable knowledge.

use tracing::trace;

use crate::domain::{Coordinates, Instant, Mode};

use super::oracle::{DurationOracle, OracleError};

/// A timetable-aligned plan meeting an arrival deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Aligned departure instant.
    pub departure: Instant,

    /// Aligned arrival instant.
    pub arrival: Instant,

    /// Travel duration in seconds.
    pub duration_secs: u32,
}

/// Ask the oracle for the best fixed-schedule plan arriving by `deadline`.
///
/// Returns `Ok(None)` when the oracle has a plan but it is unusable:
/// missing aligned instants, or an arrival past the deadline. Oracle
/// failures are returned as-is; the caller treats the mode as infeasible.
pub async fn plan_for_arrival<O: DurationOracle>(
    mode: Mode,
    origin: Coordinates,
    destination: Coordinates,
    deadline: Instant,
    oracle: &O,
) -> Result<Option<SchedulePlan>, OracleError> {
    let sample = oracle
        .plan_arrival_by(mode, origin, destination, deadline)
        .await?;

    let (Some(departure), Some(arrival)) = (sample.departure, sample.arrival) else {
        trace!(mode = %mode, "timetable plan missing aligned instants");
        return Ok(None);
    };

    if arrival > deadline {
        trace!(
            mode = %mode,
            arrival = arrival.unix_seconds(),
            deadline = deadline.unix_seconds(),
            "timetable plan arrives past the deadline"
        );
        return Ok(None);
    }

    Ok(Some(SchedulePlan {
        departure,
        arrival,
        duration_secs: sample.duration_secs,
    }))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::domain::WeatherSignal;
    use crate::planner::oracle::{DurationSample, TrafficModel};

    struct PlanOracle {
        response: Result<DurationSample, OracleError>,
    }

    impl DurationOracle for PlanOracle {
        async fn duration_at_departure(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _departure: Instant,
            _traffic: TrafficModel,
        ) -> Result<DurationSample, OracleError> {
            Err(OracleError::NoData)
        }

        async fn plan_arrival_by(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _deadline: Instant,
        ) -> Result<DurationSample, OracleError> {
            self.response.clone()
        }

        async fn weather_signal(
            &self,
            _location: Coordinates,
            _hour: Instant,
        ) -> Result<Option<WeatherSignal>, OracleError> {
            Ok(None)
        }
    }

    fn plan(
        response: Result<DurationSample, OracleError>,
        deadline: i64,
    ) -> Result<Option<SchedulePlan>, OracleError> {
        let origin = Coordinates::new(47.61, -122.33).unwrap();
        let destination = Coordinates::new(47.44, -122.30).unwrap();
        block_on(plan_for_arrival(
            Mode::Transit,
            origin,
            destination,
            Instant::from_unix_seconds(deadline),
            &PlanOracle { response },
        ))
    }

    #[test]
    fn aligned_plan_is_returned() {
        let departure = Instant::from_unix_seconds(10_000);
        let arrival = Instant::from_unix_seconds(12_400);

        let result = plan(Ok(DurationSample::aligned(2_400, departure, arrival)), 13_000)
            .unwrap()
            .unwrap();

        assert_eq!(result.departure, departure);
        assert_eq!(result.arrival, arrival);
        assert_eq!(result.duration_secs, 2_400);
    }

    #[test]
    fn missing_alignment_is_infeasible() {
        let result = plan(Ok(DurationSample::point(2_400)), 13_000).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn late_arrival_is_infeasible() {
        let departure = Instant::from_unix_seconds(10_000);
        let arrival = Instant::from_unix_seconds(13_600);

        let result = plan(Ok(DurationSample::aligned(3_600, departure, arrival)), 13_000).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn oracle_failure_propagates() {
        let result = plan(Err(OracleError::NoRoute), 13_000);
        assert!(matches!(result, Err(OracleError::NoRoute)));
    }
}
