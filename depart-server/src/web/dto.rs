//! Data transfer objects for web requests and responses.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::domain::Instant;
use crate::planner::{PlanOutcome, Recommendation};

/// Request to plan departures.
#[derive(Debug, Deserialize)]
pub struct PlanRequestDto {
    /// Origin: free text or "lat,lon"
    pub origin: String,

    /// Destination: free text or "lat,lon"
    pub destination: String,

    /// Arrival deadline, RFC 3339. Its UTC offset doubles as the display
    /// time zone for the response.
    pub deadline: String,

    /// Modes to evaluate (lowercase wire names)
    pub modes: Vec<String>,

    /// Trip category: "domestic" or "international"
    pub category: String,

    /// Expedited screening
    #[serde(default)]
    pub precheck: bool,

    /// Checked bags
    #[serde(default)]
    pub bags: bool,

    /// Extra buffer minutes on top of the policy
    #[serde(default)]
    pub extra_minutes: i64,

    /// Override the rideshare pickup buffer (minutes)
    pub pickup_minutes: Option<i64>,

    /// Override the parking buffer (minutes)
    pub parking_minutes: Option<i64>,

    /// Earliest possible departure, RFC 3339 (defaults to now)
    pub earliest: Option<String>,
}

/// One recommendation row.
#[derive(Debug, Serialize)]
pub struct RecommendationDto {
    /// Mode wire name
    pub mode: String,

    /// Latest safe departure, formatted in the request's offset
    pub departure: String,

    /// Latest safe departure, Unix seconds
    pub departure_unix: i64,

    /// Timetable-aligned arrival (transit only), formatted
    pub arrival: Option<String>,

    /// Travel duration in whole minutes
    pub duration_mins: i64,

    /// Total buffer applied, in minutes
    pub buffer_mins: i64,

    /// Advisory notes
    pub notes: Vec<String>,
}

impl RecommendationDto {
    /// Build from a planner recommendation, formatting in `offset`.
    pub fn from_recommendation(rec: &Recommendation, offset: &FixedOffset) -> Self {
        Self {
            mode: rec.mode.as_str().to_string(),
            departure: format_instant(rec.departure, offset),
            departure_unix: rec.departure.unix_seconds(),
            arrival: rec.arrival.map(|a| format_instant(a, offset)),
            duration_mins: rec.duration_mins(),
            buffer_mins: rec.buffer_mins,
            notes: rec.notes.clone(),
        }
    }
}

/// Response for a departure plan.
#[derive(Debug, Serialize)]
pub struct PlanResponseDto {
    /// The requested deadline, formatted
    pub deadline: String,

    /// Deadline minus the shared (procedural + weather) buffer, formatted
    pub effective_deadline: String,

    /// Shared buffer in minutes
    pub shared_buffer_mins: i64,

    /// Feasible recommendations, latest departure first
    pub recommendations: Vec<RecommendationDto>,
}

impl PlanResponseDto {
    /// Build from a planner outcome, formatting in `offset`.
    pub fn from_outcome(outcome: &PlanOutcome, deadline: Instant, offset: &FixedOffset) -> Self {
        Self {
            deadline: format_instant(deadline, offset),
            effective_deadline: format_instant(outcome.effective_deadline, offset),
            shared_buffer_mins: outcome.shared_buffer_mins,
            recommendations: outcome
                .recommendations
                .iter()
                .map(|r| RecommendationDto::from_recommendation(r, offset))
                .collect(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Format an instant in the given offset as "YYYY-MM-DD HH:MM".
pub fn format_instant(instant: Instant, offset: &FixedOffset) -> String {
    match instant.to_datetime() {
        Some(dt) => dt
            .with_timezone(offset)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => instant.to_string(),
    }
}
