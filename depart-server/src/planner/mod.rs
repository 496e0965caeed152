//! Latest-safe-departure planner.
//!
//! This module implements the core question the service answers: "what is
//! the latest moment I can leave and still arrive by my deadline?"
//!
//! Each travel mode dispatches on its strategy: time-varying modes get a
//! bounded binary search over candidate departures, fixed-schedule modes
//! get a single timetable query, constant-speed modes get exact
//! subtraction. All travel-time knowledge comes from the [`DurationOracle`]
//! capability, so the planner is testable with deterministic fakes.

mod assemble;
mod config;
mod oracle;
mod schedule;
mod search;

pub use assemble::{PlanError, PlanOutcome, PlanRequest, Recommendation, assemble};
pub use config::SearchConfig;
pub use oracle::{DurationOracle, DurationSample, OracleError, TrafficModel};
pub use schedule::{SchedulePlan, plan_for_arrival};
pub use search::{DepartureFix, latest_departure};
