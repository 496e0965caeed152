//! Travel modes and their computation strategies.

use std::fmt;

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {input}")]
pub struct InvalidMode {
    input: String,
}

/// A travel mode the planner can recommend.
///
/// The set is closed: every mode maps to exactly one [`Strategy`], which
/// determines how its latest safe departure is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Walking,
    Bicycling,
    Driving,
    Rideshare,
    Transit,
}

/// How a mode's travel time behaves over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Duration does not depend on the departure instant (walking, cycling).
    ConstantSpeed,

    /// Duration varies with traffic at the departure instant (driving, rideshare).
    TimeVarying,

    /// Duration is governed by a timetable (transit).
    FixedSchedule,
}

impl Mode {
    /// All modes, in presentation order.
    pub const ALL: [Mode; 5] = [
        Mode::Driving,
        Mode::Rideshare,
        Mode::Transit,
        Mode::Bicycling,
        Mode::Walking,
    ];

    /// The computation strategy for this mode.
    pub fn strategy(self) -> Strategy {
        match self {
            Mode::Walking | Mode::Bicycling => Strategy::ConstantSpeed,
            Mode::Driving | Mode::Rideshare => Strategy::TimeVarying,
            Mode::Transit => Strategy::FixedSchedule,
        }
    }

    /// Parse a mode from its lowercase wire name.
    pub fn parse(s: &str) -> Result<Self, InvalidMode> {
        match s {
            "walking" => Ok(Mode::Walking),
            "bicycling" => Ok(Mode::Bicycling),
            "driving" => Ok(Mode::Driving),
            "rideshare" => Ok(Mode::Rideshare),
            "transit" => Ok(Mode::Transit),
            other => Err(InvalidMode {
                input: other.to_string(),
            }),
        }
    }

    /// The lowercase wire name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walking => "walking",
            Mode::Bicycling => "bicycling",
            Mode::Driving => "driving",
            Mode::Rideshare => "rideshare",
            Mode::Transit => "transit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::parse(mode.as_str()), Ok(mode));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(Mode::parse("teleport").is_err());
        assert!(Mode::parse("Driving").is_err());
        assert!(Mode::parse("").is_err());
    }

    #[test]
    fn strategy_mapping_is_total() {
        assert_eq!(Mode::Walking.strategy(), Strategy::ConstantSpeed);
        assert_eq!(Mode::Bicycling.strategy(), Strategy::ConstantSpeed);
        assert_eq!(Mode::Driving.strategy(), Strategy::TimeVarying);
        assert_eq!(Mode::Rideshare.strategy(), Strategy::TimeVarying);
        assert_eq!(Mode::Transit.strategy(), Strategy::FixedSchedule);
    }
}
