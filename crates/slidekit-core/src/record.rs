//! Flat persisted records for slider state.
//!
//! Records carry only the numeric fields. Loading a record runs the
//! configuration repair, so a record with missing fields still yields a
//! usable widget.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RawTrackConfig;
use crate::range_slider::{Range, RangeSlider};
use crate::slider::Slider;

/// Record errors.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Persisted state of a [`Slider`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderRecord {
    #[serde(flatten)]
    pub config: RawTrackConfig,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Persisted state of a [`RangeSlider`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeSliderRecord {
    #[serde(flatten)]
    pub config: RawTrackConfig,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl SliderRecord {
    /// Capture a slider's configuration and current value.
    pub fn capture(slider: &Slider) -> Self {
        Self {
            config: (*slider.config()).into(),
            value: Some(slider.value()),
        }
    }

    /// Build a slider; the value is applied once the slider is laid out.
    pub fn restore(&self) -> Slider {
        let mut slider = Slider::from_raw_config(self.config);
        if let Some(value) = self.value.filter(|v| v.is_finite()) {
            slider.set_value(value);
        }
        slider
    }

    pub fn to_json(&self) -> RecordResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> RecordResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RangeSliderRecord {
    /// Capture a range slider's configuration and current range, if it has one.
    pub fn capture(slider: &RangeSlider) -> Self {
        let range = slider.range();
        Self {
            config: (*slider.config()).into(),
            min: range.map(|r| r.min),
            max: range.map(|r| r.max),
        }
    }

    /// Build a range slider; the range is applied once the slider is laid out.
    ///
    /// A missing endpoint defaults to the corresponding domain bound.
    pub fn restore(&self) -> RangeSlider {
        let mut slider = RangeSlider::from_raw_config(self.config);
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        if self.min.is_some() || self.max.is_some() {
            let config = *slider.config();
            let range = Range::new(
                finite(self.min).unwrap_or(config.min_value()),
                finite(self.max).unwrap_or(config.max_value()),
            );
            slider.set_range(range);
        }
        slider
    }

    pub fn to_json(&self) -> RecordResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> RecordResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
