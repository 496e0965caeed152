//! Domain types for the departure planner.
//!
//! This module contains the core domain model types that represent
//! validated planning inputs. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod instant;
mod mode;
mod place;
mod weather;

pub use instant::Instant;
pub use mode::{InvalidMode, Mode, Strategy};
pub use place::{Coordinates, InvalidCoordinates};
pub use weather::WeatherSignal;
