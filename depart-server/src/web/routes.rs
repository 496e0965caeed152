//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum::extract::State;
use chrono::{DateTime, FixedOffset, Utc};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::buffer::{BufferConfig, BufferSpec, Category};
use crate::domain::{Coordinates, Instant, Mode};
use crate::maps::MapsError;
use crate::planner::{PlanError, PlanRequest, assemble};

use super::dto::{ErrorResponse, PlanRequestDto, PlanResponseDto};
use super::state::AppState;
use super::templates::{AboutTemplate, ErrorTemplate, IndexTemplate, PlanResultsTemplate, PlanView};

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/plan", post(plan_departures))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the planning form.
async fn index_page() -> IndexTemplate {
    IndexTemplate
}

/// About page.
async fn about_page() -> AboutTemplate {
    AboutTemplate
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan the latest safe departures for a deadline.
async fn plan_departures(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRequestDto = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "bad plan request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // The deadline's offset doubles as the display time zone
    let deadline_dt: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339(&req.deadline).map_err(|e| AppError::BadRequest {
            message: format!("Invalid deadline {:?}: {e}", req.deadline),
        })?;
    let offset = *deadline_dt.offset();
    let deadline = Instant::from_datetime(&deadline_dt);

    let earliest = match &req.earliest {
        Some(raw) => {
            let dt = DateTime::parse_from_rfc3339(raw).map_err(|e| AppError::BadRequest {
                message: format!("Invalid earliest {raw:?}: {e}"),
            })?;
            Instant::from_datetime(&dt)
        }
        None => Instant::from_datetime(&Utc::now()),
    };

    let modes = req
        .modes
        .iter()
        .map(|m| Mode::parse(m))
        .collect::<Result<Vec<Mode>, _>>()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let category = Category::parse(&req.category).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    // Resolve both endpoints concurrently
    let (origin, destination) = tokio::join!(
        resolve_place(&state, &req.origin),
        resolve_place(&state, &req.destination)
    );
    let (origin, destination) = (origin?, destination?);

    // Per-request overrides on top of the configured buffer defaults
    let mut buffers: BufferConfig = (*state.buffers).clone();
    if let Some(pickup) = req.pickup_minutes {
        buffers.pickup_mins = pickup;
    }
    if let Some(parking) = req.parking_minutes {
        buffers.parking_mins = parking;
    }

    let plan_request = PlanRequest {
        origin,
        destination,
        deadline,
        earliest,
        modes,
        buffers: BufferSpec {
            category,
            precheck: req.precheck,
            bags: req.bags,
            extra_mins: req.extra_minutes,
        },
    };

    let outcome = match assemble(&plan_request, state.oracle.as_ref(), &state.search, &buffers).await
    {
        Ok(outcome) => outcome,
        // Browser callers get an inline error fragment rather than raw JSON
        Err(e) if accepts_html(&headers) => {
            let template = ErrorTemplate {
                message: e.to_string(),
            };
            let html = template.render().map_err(|e| AppError::Internal {
                message: format!("Template error: {e}"),
            })?;
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
        Err(e) => return Err(AppError::from(e)),
    };

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = PlanResultsTemplate {
            plan: PlanView::from_outcome(&outcome, deadline, &offset),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanResponseDto::from_outcome(&outcome, deadline, &offset)).into_response())
    }
}

/// Resolve a place string: "lat,lon" directly, otherwise geocode.
async fn resolve_place(state: &AppState, raw: &str) -> Result<Coordinates, AppError> {
    if let Ok(coords) = Coordinates::parse(raw) {
        return Ok(coords);
    }

    let Some(maps) = &state.maps else {
        return Err(AppError::BadRequest {
            message: format!(
                "cannot geocode {raw:?} without MAPS_API_KEY; pass coordinates as \"lat,lon\""
            ),
        });
    };

    maps.geocode(raw).await.map_err(|e| match e {
        MapsError::NoMatch => AppError::BadRequest {
            message: format!("no geocoding match for {raw:?}"),
        },
        other => AppError::Upstream {
            message: other.to_string(),
        },
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(status = %status, message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
