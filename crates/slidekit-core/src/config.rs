//! Domain configuration for a slider track: bounds and quantization step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lower bound of the value domain.
pub const DEFAULT_MIN_VALUE: f64 = 0.0;
/// Default upper bound of the value domain.
pub const DEFAULT_MAX_VALUE: f64 = 100.0;
/// Default quantization step.
pub const DEFAULT_INCREMENT: f64 = 1.0;
/// Value assigned when a configuration is reset to defaults.
pub const DEFAULT_VALUE: f64 = 50.0;

/// Span used to derive a missing bound from the one that is present.
const DERIVED_SPAN: f64 = 100.0;
/// Fraction of the domain used to derive a missing increment.
const DERIVED_INCREMENT_FRACTION: f64 = 0.01;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Bounds must be finite with min < max (got min={min}, max={max})")]
    InvalidBounds { min: f64, max: f64 },
    #[error("Increment must be finite and positive (got {0})")]
    InvalidIncrement(f64),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validated track configuration.
///
/// Always satisfies `min_value < max_value` and `increment > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackConfig", into = "RawTrackConfig")]
pub struct TrackConfig {
    min_value: f64,
    max_value: f64,
    increment: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            increment: DEFAULT_INCREMENT,
        }
    }
}

impl TrackConfig {
    /// Create a validated configuration.
    pub fn new(min_value: f64, max_value: f64, increment: f64) -> ConfigResult<Self> {
        if !min_value.is_finite() || !max_value.is_finite() || min_value >= max_value {
            return Err(ConfigError::InvalidBounds {
                min: min_value,
                max: max_value,
            });
        }
        if !increment.is_finite() || increment <= 0.0 {
            return Err(ConfigError::InvalidIncrement(increment));
        }
        Ok(Self {
            min_value,
            max_value,
            increment,
        })
    }

    /// Lower bound of the domain.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound of the domain.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Quantization step.
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Width of the value domain.
    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Return a copy with a new lower bound.
    pub fn with_min_value(self, min_value: f64) -> ConfigResult<Self> {
        Self::new(min_value, self.max_value, self.increment)
    }

    /// Return a copy with a new upper bound.
    pub fn with_max_value(self, max_value: f64) -> ConfigResult<Self> {
        Self::new(self.min_value, max_value, self.increment)
    }

    /// Return a copy with a new increment.
    pub fn with_increment(self, increment: f64) -> ConfigResult<Self> {
        Self::new(self.min_value, self.max_value, increment)
    }
}

/// Possibly incomplete configuration, as loaded from a persisted record.
///
/// Missing or non-finite fields are filled in by [`RawTrackConfig::repair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrackConfig {
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub increment: Option<f64>,
}

/// Outcome of repairing a raw configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repaired {
    /// The usable configuration.
    pub config: TrackConfig,
    /// True when everything was reset to defaults (the value should be reset too).
    pub reset: bool,
    /// True when any field had to be filled in.
    pub changed: bool,
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl RawTrackConfig {
    /// Repair missing fields, preserving whatever is present.
    ///
    /// Both bounds missing resets everything to defaults. One bound missing is
    /// derived from the other at a distance of 100 with an increment of 1. A
    /// missing increment becomes 1% of the domain.
    pub fn repair(self) -> Repaired {
        let increment = usable(self.increment).filter(|inc| *inc > 0.0);
        let (min, max, increment, reset) = match (usable(self.min_value), usable(self.max_value)) {
            (None, None) => (DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE, DEFAULT_INCREMENT, true),
            (Some(min), None) => (min, min + DERIVED_SPAN, DEFAULT_INCREMENT, false),
            (None, Some(max)) => (max - DERIVED_SPAN, max, DEFAULT_INCREMENT, false),
            // Inverted or empty domains are treated like a missing upper bound.
            (Some(min), Some(max)) if min >= max => {
                (min, min + DERIVED_SPAN, DEFAULT_INCREMENT, false)
            }
            (Some(min), Some(max)) => match increment {
                Some(inc) => (min, max, inc, false),
                None => (min, max, (max - min) * DERIVED_INCREMENT_FRACTION, false),
            },
        };

        let config = TrackConfig {
            min_value: min,
            max_value: max,
            increment,
        };
        let changed = reset || RawTrackConfig::from(config) != self;
        if changed {
            log::warn!(
                "Repaired track configuration {:?} -> min={} max={} increment={}",
                self,
                config.min_value,
                config.max_value,
                config.increment
            );
        }

        Repaired {
            config,
            reset,
            changed,
        }
    }
}

impl From<TrackConfig> for RawTrackConfig {
    fn from(config: TrackConfig) -> Self {
        Self {
            min_value: Some(config.min_value),
            max_value: Some(config.max_value),
            increment: Some(config.increment),
        }
    }
}

impl TryFrom<RawTrackConfig> for TrackConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTrackConfig) -> ConfigResult<Self> {
        let min = raw.min_value.unwrap_or(f64::NAN);
        let max = raw.max_value.unwrap_or(f64::NAN);
        let increment = raw.increment.unwrap_or(f64::NAN);
        TrackConfig::new(min, max, increment)
    }
}
