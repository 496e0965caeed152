//! Mock duration oracle for running without API credentials.
//!
//! Serves deterministic travel-time models, either built in or loaded
//! from a JSON file. Useful for development and tests: the whole planner
//! works end to end against it.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Coordinates, Instant, Mode, WeatherSignal};
use crate::planner::{DurationOracle, DurationSample, OracleError, TrafficModel};

/// A per-mode travel-time model.
///
/// `base_secs` applies at all times. For time-varying modes,
/// `peak_extra_secs` is added during commute hours (07-10 and 16-19 UTC).
/// For fixed-schedule modes, departures run every `headway_secs` from the
/// epoch and take `base_secs`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ModeModel {
    pub base_secs: u32,

    #[serde(default)]
    pub peak_extra_secs: u32,

    pub headway_secs: Option<u32>,
}

/// Mock oracle serving model-derived durations.
#[derive(Debug, Clone)]
pub struct MockOracle {
    models: HashMap<Mode, ModeModel>,
}

impl MockOracle {
    /// A plausible built-in model set, for credential-less startup.
    pub fn builtin() -> Self {
        let mut models = HashMap::new();
        models.insert(
            Mode::Driving,
            ModeModel {
                base_secs: 1800,
                peak_extra_secs: 900,
                headway_secs: None,
            },
        );
        models.insert(
            Mode::Rideshare,
            ModeModel {
                base_secs: 1800,
                peak_extra_secs: 900,
                headway_secs: None,
            },
        );
        models.insert(
            Mode::Transit,
            ModeModel {
                base_secs: 2700,
                peak_extra_secs: 0,
                headway_secs: Some(900),
            },
        );
        models.insert(
            Mode::Bicycling,
            ModeModel {
                base_secs: 4200,
                peak_extra_secs: 0,
                headway_secs: None,
            },
        );
        models.insert(
            Mode::Walking,
            ModeModel {
                base_secs: 10_800,
                peak_extra_secs: 0,
                headway_secs: None,
            },
        );
        Self { models }
    }

    /// Load models from a JSON file mapping mode names to [`ModeModel`]s.
    ///
    /// Modes absent from the file report no route.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let raw: HashMap<String, ModeModel> = serde_json::from_str(&json)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;

        let mut models = HashMap::new();
        for (name, model) in raw {
            let mode = Mode::parse(&name)
                .map_err(|e| format!("bad mode in {}: {e}", path.display()))?;
            models.insert(mode, model);
        }

        if models.is_empty() {
            return Err(format!("no mode models in {}", path.display()));
        }

        Ok(Self { models })
    }

    fn model(&self, mode: Mode) -> Result<ModeModel, OracleError> {
        self.models.get(&mode).copied().ok_or(OracleError::NoRoute)
    }

    fn duration_at(&self, mode: Mode, departure: Instant) -> Result<u32, OracleError> {
        let model = self.model(mode)?;
        let hour = departure.unix_seconds().div_euclid(3600).rem_euclid(24);
        let peak = matches!(hour, 7..=9 | 16..=18);
        Ok(model.base_secs + if peak { model.peak_extra_secs } else { 0 })
    }
}

impl DurationOracle for MockOracle {
    async fn duration_at_departure(
        &self,
        mode: Mode,
        _origin: Coordinates,
        _destination: Coordinates,
        departure: Instant,
        _traffic: TrafficModel,
    ) -> Result<DurationSample, OracleError> {
        Ok(DurationSample::point(self.duration_at(mode, departure)?))
    }

    async fn plan_arrival_by(
        &self,
        mode: Mode,
        _origin: Coordinates,
        _destination: Coordinates,
        deadline: Instant,
    ) -> Result<DurationSample, OracleError> {
        let model = self.model(mode)?;
        let headway = i64::from(model.headway_secs.ok_or(OracleError::NoData)?);

        // Latest service whose arrival is still within the deadline.
        let latest_departure =
            (deadline.unix_seconds() - i64::from(model.base_secs)).div_euclid(headway) * headway;
        let departure = Instant::from_unix_seconds(latest_departure);
        let arrival = departure.add_seconds(i64::from(model.base_secs));

        Ok(DurationSample::aligned(model.base_secs, departure, arrival))
    }

    async fn weather_signal(
        &self,
        _location: Coordinates,
        _hour: Instant,
    ) -> Result<Option<WeatherSignal>, OracleError> {
        Ok(None)
    }
}
