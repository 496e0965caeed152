//! Askama templates for the web frontend.

use askama::Template;
use chrono::FixedOffset;

use crate::domain::Instant;
use crate::planner::PlanOutcome;

use super::dto::format_instant;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the planning form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Plan results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub plan: PlanView,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Plan view model for templates.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub deadline: String,
    pub effective_deadline: String,
    pub shared_buffer_mins: i64,
    pub recommendations: Vec<RecommendationView>,
}

/// Recommendation view model for templates.
#[derive(Debug, Clone)]
pub struct RecommendationView {
    pub mode_label: String,
    pub departure: String,
    pub arrival: Option<String>,
    pub duration_mins: i64,
    pub buffer_mins: i64,
    pub notes: Vec<String>,
}

impl PlanView {
    /// Create from a planner outcome, formatting in `offset`.
    pub fn from_outcome(outcome: &PlanOutcome, deadline: Instant, offset: &FixedOffset) -> Self {
        let recommendations = outcome
            .recommendations
            .iter()
            .map(|rec| RecommendationView {
                mode_label: mode_label(rec.mode.as_str()).to_string(),
                departure: format_instant(rec.departure, offset),
                arrival: rec.arrival.map(|a| format_instant(a, offset)),
                duration_mins: rec.duration_mins(),
                buffer_mins: rec.buffer_mins,
                notes: rec.notes.clone(),
            })
            .collect();

        Self {
            deadline: format_instant(deadline, offset),
            effective_deadline: format_instant(outcome.effective_deadline, offset),
            shared_buffer_mins: outcome.shared_buffer_mins,
            recommendations,
        }
    }
}

/// Human-friendly label for a mode wire name.
fn mode_label(mode: &str) -> &str {
    match mode {
        "driving" => "Drive yourself",
        "rideshare" => "Rideshare",
        "transit" => "Public transit",
        "bicycling" => "Bicycle",
        "walking" => "Walk",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_labels() {
        assert_eq!(mode_label("driving"), "Drive yourself");
        assert_eq!(mode_label("walking"), "Walk");
        assert_eq!(mode_label("jetpack"), "jetpack");
    }
}
