//! Categorical weather risk flags.

/// Weather risk flags for an hour at a location.
///
/// The flags are categorical on purpose: the buffer policy maps each flag
/// to a fixed minute addend rather than scaling with forecast values.
/// Absence of a signal (no forecast data) is represented as `None` at the
/// call sites, not as a zeroed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherSignal {
    /// Precipitation is likely during the hour.
    pub precipitation_likely: bool,

    /// Strong winds are expected during the hour.
    pub high_wind: bool,
}

impl WeatherSignal {
    /// A signal with neither flag set.
    pub fn clear() -> Self {
        Self::default()
    }
}
