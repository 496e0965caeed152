//! Recommendation assembly.
//!
//! Combines the buffer policy with the per-strategy departure computations
//! into one comparable record per requested mode, ordered latest-departure
//! first.

use futures::future::join_all;
use tracing::debug;

use crate::buffer::{BufferConfig, BufferSpec, access_buffer, procedural_buffer, weather_buffer};
use crate::domain::{Coordinates, Instant, Mode, Strategy};

use super::config::SearchConfig;
use super::oracle::DurationOracle;
use super::schedule::plan_for_arrival;
use super::search::latest_departure;

/// Error from plan assembly.
///
/// Invalid input is the only failure outcome: oracle failures and
/// infeasible modes degrade to omissions, never to an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Malformed or missing plan inputs.
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),
}

/// One departure-planning request.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Resolved trip origin.
    pub origin: Coordinates,

    /// Resolved trip destination.
    pub destination: Coordinates,

    /// Latest instant the traveler must have arrived, buffers included.
    pub deadline: Instant,

    /// Earliest instant the traveler could possibly depart (usually now).
    pub earliest: Instant,

    /// Modes to evaluate.
    pub modes: Vec<Mode>,

    /// Traveler inputs to the procedural buffer.
    pub buffers: BufferSpec,
}

impl PlanRequest {
    /// Validate the request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.modes.is_empty() {
            return Err(PlanError::InvalidRequest(
                "no travel modes requested".to_string(),
            ));
        }
        if self.deadline <= self.earliest {
            return Err(PlanError::InvalidRequest(
                "deadline must be after the earliest possible departure".to_string(),
            ));
        }
        Ok(())
    }
}

/// One recommendation row: the latest safe departure for a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// The travel mode.
    pub mode: Mode,

    /// Latest safe departure instant.
    pub departure: Instant,

    /// Timetable-aligned arrival (fixed-schedule modes only).
    pub arrival: Option<Instant>,

    /// Travel duration in seconds.
    pub duration_secs: u32,

    /// Total buffer applied to this mode, in minutes.
    pub buffer_mins: i64,

    /// Advisory notes (access buffer, weather reasons).
    pub notes: Vec<String>,
}

impl Recommendation {
    /// Travel duration in whole minutes, rounded up.
    pub fn duration_mins(&self) -> i64 {
        i64::from(self.duration_secs.div_ceil(60))
    }
}

/// The assembled plan: feasible recommendations plus the shared figures.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Feasible recommendations, ordered by descending departure instant.
    pub recommendations: Vec<Recommendation>,

    /// Procedural + weather buffer shared by every mode, in minutes.
    pub shared_buffer_mins: i64,

    /// Deadline pulled back by the shared buffer.
    pub effective_deadline: Instant,
}

/// Compute one recommendation per feasible requested mode.
///
/// The shared buffer (procedural + weather) is computed once; each mode
/// adds its own access buffer, pulls the deadline back by the total, and
/// dispatches on its strategy. Modes are independent, so they are
/// evaluated concurrently. Infeasible modes and oracle failures are
/// silently omitted; an empty recommendation set is still a success.
pub async fn assemble<O: DurationOracle>(
    request: &PlanRequest,
    oracle: &O,
    search: &SearchConfig,
    buffers: &BufferConfig,
) -> Result<PlanOutcome, PlanError> {
    request.validate()?;

    // One weather fetch for the whole request, at the destination for the
    // deadline hour. Unavailable data contributes no buffer.
    let signal = match oracle
        .weather_signal(request.destination, request.deadline.floor_to_hour())
        .await
    {
        Ok(signal) => signal,
        Err(e) => {
            debug!(error = %e, "weather signal unavailable");
            None
        }
    };

    let (weather_mins, weather_reasons) = weather_buffer(signal.as_ref());
    let shared_mins = procedural_buffer(&request.buffers, buffers) + weather_mins;

    // Collapse duplicates so no mode yields more than one recommendation.
    let mut modes: Vec<Mode> = Vec::new();
    for &mode in &request.modes {
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }

    let evaluations = modes.into_iter().map(|mode| {
        evaluate_mode(
            mode,
            request,
            oracle,
            search,
            buffers,
            shared_mins,
            &weather_reasons,
        )
    });

    let mut recommendations: Vec<Recommendation> =
        join_all(evaluations).await.into_iter().flatten().collect();

    recommendations.sort_by(|a, b| b.departure.cmp(&a.departure));

    Ok(PlanOutcome {
        recommendations,
        shared_buffer_mins: shared_mins,
        effective_deadline: request.deadline.sub_minutes(shared_mins),
    })
}

/// Evaluate one mode, returning `None` when it must be omitted.
async fn evaluate_mode<O: DurationOracle>(
    mode: Mode,
    request: &PlanRequest,
    oracle: &O,
    search: &SearchConfig,
    buffers: &BufferConfig,
    shared_mins: i64,
    weather_reasons: &[String],
) -> Option<Recommendation> {
    let (access_mins, access_note) = access_buffer(mode, buffers);
    let total_mins = shared_mins + access_mins;
    let effective = request.deadline.sub_minutes(total_mins);

    let computed = match mode.strategy() {
        Strategy::TimeVarying => latest_departure(
            mode,
            request.origin,
            request.destination,
            request.earliest,
            effective,
            oracle,
            search,
        )
        .await
        .map(|fix| fix.map(|f| (f.departure, None, f.duration_secs))),

        Strategy::FixedSchedule => {
            plan_for_arrival(mode, request.origin, request.destination, effective, oracle)
                .await
                .map(|plan| plan.map(|p| (p.departure, Some(p.arrival), p.duration_secs)))
        }

        // Duration is time-invariant: one query, exact subtraction.
        Strategy::ConstantSpeed => oracle
            .duration_at_departure(
                mode,
                request.origin,
                request.destination,
                effective,
                search.traffic_model,
            )
            .await
            .map(|sample| {
                let departure = effective.sub_seconds(i64::from(sample.duration_secs));
                Some((departure, None, sample.duration_secs))
            }),
    };

    let (departure, arrival, duration_secs) = match computed {
        Ok(Some(result)) => result,
        Ok(None) => {
            debug!(mode = %mode, "mode infeasible, omitting");
            return None;
        }
        Err(e) => {
            debug!(mode = %mode, error = %e, "oracle failed, omitting mode");
            return None;
        }
    };

    if departure < request.earliest {
        debug!(mode = %mode, "departure already in the past, omitting mode");
        return None;
    }

    // Not-later-than guarantee: emit the mode only if the full trip plus
    // its buffer fits before the deadline.
    let committed = departure
        .add_seconds(i64::from(duration_secs))
        .add_seconds(total_mins * 60);
    if committed > request.deadline {
        debug!(mode = %mode, "result misses the deadline after buffers, omitting mode");
        return None;
    }

    let mut notes = weather_reasons.to_vec();
    notes.extend(access_note);

    Some(Recommendation {
        mode,
        departure,
        arrival,
        duration_secs,
        buffer_mins: total_mins,
        notes,
    })
}
