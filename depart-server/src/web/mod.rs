//! Web layer for the departure planner.
//!
//! Provides HTTP endpoints for planning latest safe departures.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppOracle, AppState, LiveOracle};
pub use templates::*;
