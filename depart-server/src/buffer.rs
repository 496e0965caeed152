//! Buffer policy: minute-valued, non-travel overheads.
//!
//! Buffers are subtracted from the arrival deadline before any travel-time
//! computation. Three independent pieces compose the total: a procedural
//! buffer (check-in and security screening), a mode access buffer (parking
//! or rideshare pickup), and a weather-risk buffer. All three functions
//! are pure; the weather function is fed an already-fetched signal and
//! performs no I/O.

use crate::domain::{Mode, WeatherSignal};

/// Base minutes before the deadline for a domestic trip.
const DOMESTIC_BASE_MINS: i64 = 120;

/// Base minutes before the deadline for an international trip.
const INTERNATIONAL_BASE_MINS: i64 = 180;

/// Security screening minutes for a domestic trip.
const DOMESTIC_SCREENING_MINS: i64 = 45;

/// Security screening minutes for an international trip.
const INTERNATIONAL_SCREENING_MINS: i64 = 60;

/// Minutes saved by expedited screening.
const PRECHECK_DISCOUNT_MINS: i64 = 20;

/// Minutes added for checked bags.
const BAGS_MINS: i64 = 20;

/// Minutes added when precipitation is likely.
const PRECIPITATION_MINS: i64 = 10;

/// Minutes added when strong winds are expected.
const HIGH_WIND_MINS: i64 = 10;

/// Error returned when parsing an unknown trip category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trip category: {input}")]
pub struct InvalidCategory {
    input: String,
}

/// Trip category, which scales the procedural buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Domestic,
    International,
}

impl Category {
    /// Parse a category from its lowercase wire name.
    pub fn parse(s: &str) -> Result<Self, InvalidCategory> {
        match s {
            "domestic" => Ok(Category::Domestic),
            "international" => Ok(Category::International),
            other => Err(InvalidCategory {
                input: other.to_string(),
            }),
        }
    }

    fn base_mins(self) -> i64 {
        match self {
            Category::Domestic => DOMESTIC_BASE_MINS,
            Category::International => INTERNATIONAL_BASE_MINS,
        }
    }

    fn screening_mins(self) -> i64 {
        match self {
            Category::Domestic => DOMESTIC_SCREENING_MINS,
            Category::International => INTERNATIONAL_SCREENING_MINS,
        }
    }
}

/// Traveler inputs to the procedural buffer.
#[derive(Debug, Clone, Copy)]
pub struct BufferSpec {
    /// Trip category.
    pub category: Category,

    /// Whether the traveler has expedited screening.
    pub precheck: bool,

    /// Whether the traveler checks bags.
    pub bags: bool,

    /// Operator-supplied extra minutes (may be negative; the floor still applies).
    pub extra_mins: i64,
}

/// Configured buffer defaults, passed explicitly into the planner.
#[derive(Debug, Clone)]
pub struct BufferConfig {
    /// Rideshare pickup wait, in minutes.
    pub pickup_mins: i64,

    /// Parking and terminal walk for a self-driven car, in minutes.
    pub parking_mins: i64,

    /// Floor for the procedural buffer, in minutes.
    pub min_procedural_mins: i64,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            pickup_mins: 8,
            parking_mins: 12,
            min_procedural_mins: 30,
        }
    }
}

/// Minutes of check-in and screening overhead for a traveler.
///
/// Floored at `config.min_procedural_mins`, so pathological inputs (large
/// negative extras) can never push the buffer below the minimum.
pub fn procedural_buffer(spec: &BufferSpec, config: &BufferConfig) -> i64 {
    let mut mins = spec.category.base_mins() + spec.category.screening_mins();
    if spec.precheck {
        mins -= PRECHECK_DISCOUNT_MINS;
    }
    if spec.bags {
        mins += BAGS_MINS;
    }
    mins += spec.extra_mins;
    mins.max(config.min_procedural_mins)
}

/// Minutes of access overhead for a mode, with an advisory note.
///
/// Rideshare waits for a pickup; a self-driven car needs to park. Other
/// modes walk straight in. Configured minutes are clamped to zero.
pub fn access_buffer(mode: Mode, config: &BufferConfig) -> (i64, Option<String>) {
    match mode {
        Mode::Rideshare => {
            let mins = config.pickup_mins.max(0);
            (mins, Some(format!("includes pickup buffer of {mins} min")))
        }
        Mode::Driving => {
            let mins = config.parking_mins.max(0);
            (mins, Some(format!("includes parking buffer of {mins} min")))
        }
        Mode::Walking | Mode::Bicycling | Mode::Transit => (0, None),
    }
}

/// Minutes of weather-risk overhead, with human-readable reasons.
///
/// Each flag contributes independently. No signal means no buffer and
/// no reasons.
pub fn weather_buffer(signal: Option<&WeatherSignal>) -> (i64, Vec<String>) {
    let Some(signal) = signal else {
        return (0, Vec::new());
    };

    let mut mins = 0;
    let mut reasons = Vec::new();

    if signal.precipitation_likely {
        mins += PRECIPITATION_MINS;
        reasons.push(format!(
            "precipitation likely near arrival, +{PRECIPITATION_MINS} min"
        ));
    }
    if signal.high_wind {
        mins += HIGH_WIND_MINS;
        reasons.push(format!("high winds expected, +{HIGH_WIND_MINS} min"));
    }

    (mins, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn domestic_precheck_no_bags() {
        let spec = BufferSpec {
            category: Category::Domestic,
            precheck: true,
            bags: false,
            extra_mins: 0,
        };

        // 120 + 45 - 20
        assert_eq!(procedural_buffer(&spec, &BufferConfig::default()), 145);
    }

    #[test]
    fn international_bags_with_extra() {
        let spec = BufferSpec {
            category: Category::International,
            precheck: false,
            bags: true,
            extra_mins: 10,
        };

        // 180 + 60 + 20 + 10
        assert_eq!(procedural_buffer(&spec, &BufferConfig::default()), 270);
    }

    #[test]
    fn procedural_floor_applies() {
        let spec = BufferSpec {
            category: Category::Domestic,
            precheck: true,
            bags: false,
            extra_mins: -1000,
        };

        assert_eq!(procedural_buffer(&spec, &BufferConfig::default()), 30);
    }

    #[test]
    fn access_buffers_by_mode() {
        let config = BufferConfig::default();

        let (mins, note) = access_buffer(Mode::Rideshare, &config);
        assert_eq!(mins, 8);
        assert_eq!(note.as_deref(), Some("includes pickup buffer of 8 min"));

        let (mins, note) = access_buffer(Mode::Driving, &config);
        assert_eq!(mins, 12);
        assert_eq!(note.as_deref(), Some("includes parking buffer of 12 min"));

        for mode in [Mode::Walking, Mode::Bicycling, Mode::Transit] {
            assert_eq!(access_buffer(mode, &config), (0, None));
        }
    }

    #[test]
    fn access_buffer_clamps_negative_config() {
        let config = BufferConfig {
            pickup_mins: -5,
            parking_mins: -20,
            ..BufferConfig::default()
        };

        assert_eq!(access_buffer(Mode::Rideshare, &config).0, 0);
        assert_eq!(access_buffer(Mode::Driving, &config).0, 0);
    }

    #[test]
    fn weather_buffer_both_flags() {
        let signal = WeatherSignal {
            precipitation_likely: true,
            high_wind: true,
        };

        let (mins, reasons) = weather_buffer(Some(&signal));
        assert_eq!(mins, 20);
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn weather_buffer_single_flags() {
        let rain = WeatherSignal {
            precipitation_likely: true,
            high_wind: false,
        };
        assert_eq!(weather_buffer(Some(&rain)).0, 10);

        let wind = WeatherSignal {
            precipitation_likely: false,
            high_wind: true,
        };
        assert_eq!(weather_buffer(Some(&wind)).0, 10);
    }

    #[test]
    fn weather_buffer_no_signal() {
        assert_eq!(weather_buffer(None), (0, Vec::new()));
        assert_eq!(weather_buffer(Some(&WeatherSignal::clear())), (0, Vec::new()));
    }

    proptest! {
        #[test]
        fn procedural_buffer_never_below_floor(
            precheck: bool,
            bags: bool,
            extra in -10_000i64..10_000,
            international: bool,
        ) {
            let spec = BufferSpec {
                category: if international { Category::International } else { Category::Domestic },
                precheck,
                bags,
                extra_mins: extra,
            };
            let config = BufferConfig::default();

            prop_assert!(procedural_buffer(&spec, &config) >= config.min_procedural_mins);
        }

        #[test]
        fn access_buffer_never_negative(
            pickup in -1_000i64..1_000,
            parking in -1_000i64..1_000,
        ) {
            let config = BufferConfig {
                pickup_mins: pickup,
                parking_mins: parking,
                ..BufferConfig::default()
            };

            for mode in Mode::ALL {
                prop_assert!(access_buffer(mode, &config).0 >= 0);
            }
        }
    }
}
