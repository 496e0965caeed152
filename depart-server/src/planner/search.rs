//! Latest-departure search for time-varying modes.
//!
//! Driving-like durations depend on when you leave, so the latest safe
//! departure cannot be computed by subtraction. This module binary-searches
//! candidate departure instants, asking the oracle for the predicted
//! duration at each probe, and keeps the latest probe whose predicted
//! arrival still meets the deadline.

use tracing::trace;

use crate::domain::{Coordinates, Instant, Mode};

use super::config::SearchConfig;
use super::oracle::{DurationOracle, OracleError};

/// A feasible departure found by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureFix {
    /// The departure instant (minute-aligned).
    pub departure: Instant,

    /// Predicted travel duration departing then, in seconds.
    pub duration_secs: u32,
}

/// Find the latest departure in `[earliest, deadline]` that still arrives
/// by `deadline`.
///
/// Probes are minute-aligned midpoints of the shrinking interval; a
/// feasible probe moves the lower bound up (the search maximizes the
/// departure, it does not minimize the duration), an infeasible one moves
/// the upper bound down. The search makes at most `config.max_probes`
/// oracle calls and narrows by `config.step_secs` past each probe rather
/// than converging exactly.
///
/// Returns `Ok(None)` when no feasible departure exists in the interval.
/// Any oracle failure aborts the search and is returned as-is; the caller
/// treats the mode as infeasible.
pub async fn latest_departure<O: DurationOracle>(
    mode: Mode,
    origin: Coordinates,
    destination: Coordinates,
    earliest: Instant,
    deadline: Instant,
    oracle: &O,
    config: &SearchConfig,
) -> Result<Option<DepartureFix>, OracleError> {
    if deadline <= earliest {
        return Ok(None);
    }

    // Aligning the lower bound keeps every floored midpoint inside the
    // interval.
    let mut lo = earliest.ceil_to_minute();
    let mut hi = deadline;
    let mut best: Option<DepartureFix> = None;

    for probe_idx in 0..config.max_probes {
        if lo > hi {
            break;
        }

        let span = hi.signed_seconds_since(lo);
        let probe = lo.add_seconds(span / 2).floor_to_minute();

        let sample = oracle
            .duration_at_departure(mode, origin, destination, probe, config.traffic_model)
            .await?;

        let arrival = probe.add_seconds(i64::from(sample.duration_secs));
        let feasible = arrival <= deadline;

        trace!(
            mode = %mode,
            probe = probe_idx,
            departure = probe.unix_seconds(),
            duration_secs = sample.duration_secs,
            feasible,
            "departure search probe"
        );

        if feasible {
            if best.is_none_or(|b| probe > b.departure) {
                best = Some(DepartureFix {
                    departure: probe,
                    duration_secs: sample.duration_secs,
                });
            }
            lo = probe.add_seconds(config.step_secs);
        } else {
            hi = probe.sub_seconds(config.step_secs);
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::executor::block_on;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::WeatherSignal;
    use crate::planner::oracle::{DurationSample, TrafficModel};

    fn coords() -> (Coordinates, Coordinates) {
        (
            Coordinates::new(47.61, -122.33).unwrap(),
            Coordinates::new(47.44, -122.30).unwrap(),
        )
    }

    /// Oracle with a fixed duration for every probe, counting calls.
    struct ConstantOracle {
        duration_secs: u32,
        calls: AtomicUsize,
    }

    impl ConstantOracle {
        fn new(duration_secs: u32) -> Self {
            Self {
                duration_secs,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DurationOracle for ConstantOracle {
        async fn duration_at_departure(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _departure: Instant,
            _traffic: TrafficModel,
        ) -> Result<DurationSample, OracleError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(DurationSample::point(self.duration_secs))
        }

        async fn plan_arrival_by(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _deadline: Instant,
        ) -> Result<DurationSample, OracleError> {
            Err(OracleError::NoData)
        }

        async fn weather_signal(
            &self,
            _location: Coordinates,
            _hour: Instant,
        ) -> Result<Option<WeatherSignal>, OracleError> {
            Ok(None)
        }
    }

    /// Oracle that fails every probe.
    struct FailingOracle;

    impl DurationOracle for FailingOracle {
        async fn duration_at_departure(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _departure: Instant,
            _traffic: TrafficModel,
        ) -> Result<DurationSample, OracleError> {
            Err(OracleError::NoRoute)
        }

        async fn plan_arrival_by(
            &self,
            _mode: Mode,
            _origin: Coordinates,
            _destination: Coordinates,
            _deadline: Instant,
        ) -> Result<DurationSample, OracleError> {
            Err(OracleError::NoRoute)
        }

        async fn weather_signal(
            &self,
            _location: Coordinates,
            _hour: Instant,
        ) -> Result<Option<WeatherSignal>, OracleError> {
            Ok(None)
        }
    }

    fn search(
        oracle: &impl DurationOracle,
        earliest: i64,
        deadline: i64,
    ) -> Result<Option<DepartureFix>, OracleError> {
        let (origin, destination) = coords();
        block_on(latest_departure(
            Mode::Driving,
            origin,
            destination,
            Instant::from_unix_seconds(earliest),
            Instant::from_unix_seconds(deadline),
            oracle,
            &SearchConfig::default(),
        ))
    }

    #[test]
    fn converges_near_deadline_minus_duration() {
        // Constant one-hour drives, four-hour window: eight probes fully
        // resolve the minute lattice.
        let deadline = 1_700_000_000 - (1_700_000_000 % 60);
        let earliest = deadline - 4 * 3600;
        let oracle = ConstantOracle::new(3600);

        let fix = search(&oracle, earliest, deadline).unwrap().unwrap();

        let target = deadline - 3600;
        assert!(fix.departure.unix_seconds() <= target);
        assert!(target - fix.departure.unix_seconds() <= 60);
        assert_eq!(fix.duration_secs, 3600);
    }

    #[test]
    fn result_meets_deadline() {
        let deadline = 1_700_000_040;
        let oracle = ConstantOracle::new(2_345);

        let fix = search(&oracle, deadline - 10_000, deadline).unwrap().unwrap();

        assert!(fix.departure.unix_seconds() + i64::from(fix.duration_secs) <= deadline);
    }

    #[test]
    fn infeasible_when_deadline_before_earliest() {
        let oracle = ConstantOracle::new(600);

        assert_eq!(search(&oracle, 1_000_000, 1_000_000).unwrap(), None);
        assert_eq!(search(&oracle, 1_000_000, 999_999).unwrap(), None);
        // No probes spent on an empty interval.
        assert_eq!(oracle.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn infeasible_when_duration_always_too_long() {
        // Two-hour drives never fit a one-hour window.
        let deadline = 1_700_000_000;
        let oracle = ConstantOracle::new(7200);

        assert_eq!(search(&oracle, deadline - 3600, deadline).unwrap(), None);
    }

    #[test]
    fn oracle_failure_aborts_search() {
        let result = search(&FailingOracle, 1_700_000_000 - 7200, 1_700_000_000);

        assert!(matches!(result, Err(OracleError::NoRoute)));
    }

    #[test]
    fn probe_budget_bounds_oracle_calls() {
        // A ten-year interval still costs at most eight calls.
        let oracle = ConstantOracle::new(3600);
        let deadline = 1_700_000_000;

        search(&oracle, deadline - 10 * 365 * 86_400, deadline).unwrap();

        assert!(oracle.calls.load(Ordering::Relaxed) <= 8);
    }

    #[test]
    fn unaligned_earliest_never_probed_before_earliest() {
        let deadline = 1_700_000_000 - (1_700_000_000 % 60);
        let earliest = deadline - 3 * 3600 + 17;
        let oracle = ConstantOracle::new(600);

        let fix = search(&oracle, earliest, deadline).unwrap().unwrap();

        assert!(fix.departure.unix_seconds() >= earliest);
    }

    proptest! {
        /// Widening the interval never worsens the result. Intervals are
        /// kept within the budget's full resolution (2^8 minutes) so the
        /// bisection converges exactly and the comparison is strict.
        #[test]
        fn widening_is_monotone(
            width_mins in 10i64..200,
            widen_earlier_mins in 0i64..25,
            widen_later_mins in 0i64..25,
            duration_mins in 1u32..120,
        ) {
            let deadline = 1_700_000_000 - (1_700_000_000 % 60);
            let earliest = deadline - width_mins * 60;
            let oracle = ConstantOracle::new(duration_mins * 60);

            let narrow = search(&oracle, earliest, deadline).unwrap();
            let wide = search(
                &oracle,
                earliest - widen_earlier_mins * 60,
                deadline + widen_later_mins * 60,
            )
            .unwrap();

            if let Some(narrow) = narrow {
                let wide = wide.expect("widening must not turn feasible into infeasible");
                prop_assert!(wide.departure >= narrow.departure);
            }
        }

        /// Every feasible result arrives by the deadline.
        #[test]
        fn feasible_results_meet_deadline(
            width_mins in 1i64..2000,
            duration_secs in 0u32..20_000,
        ) {
            let deadline = 1_699_999_980;
            let oracle = ConstantOracle::new(duration_secs);

            if let Some(fix) = search(&oracle, deadline - width_mins * 60, deadline).unwrap() {
                prop_assert!(
                    fix.departure.unix_seconds() + i64::from(fix.duration_secs) <= deadline
                );
            }
        }
    }
}
