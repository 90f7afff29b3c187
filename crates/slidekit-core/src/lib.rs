//! SlideKit Core Library
//!
//! Platform-agnostic models for draggable range-selection widgets: a
//! single-knob [`Slider`], a two-knob [`RangeSlider`], and labeled wrappers
//! that bind text fields to them. Rendering hosts supply geometry through
//! [`PositionableNode`] and feed pointer input as [`DragEvent`]s.

pub mod config;
pub mod handle;
pub mod input;
pub mod labeled;
pub mod layout;
pub mod mapping;
pub mod node;
pub mod range_slider;
pub mod record;
pub mod signal;
pub mod slider;
pub mod track;

pub use config::{ConfigError, RawTrackConfig, TrackConfig};
pub use handle::{Handle, HandleKind, PositionInterval};
pub use input::{DragEvent, DragPhase, GestureTracker, MouseButton, PointerEvent};
pub use labeled::{
    InputError, InputLabel, InputResult, LabelFit, LabelFitting, RangeSliderWithValues,
    SliderWithValue,
};
pub use layout::LayoutGate;
pub use mapping::{normalize_value, snap_to_increment, TrackGeometry, ValueMapping};
pub use node::{NodeFrame, PositionableNode};
pub use range_slider::{Range, RangeSlider};
pub use record::{RangeSliderRecord, RecordError, SliderRecord};
pub use signal::{ListenerId, NotifyPolicy, Signal};
pub use slider::Slider;
pub use track::Track;
