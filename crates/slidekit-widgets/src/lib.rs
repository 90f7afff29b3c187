//! egui components hosting the SlideKit slider models.
//!
//! The core crate owns all value semantics; these components only supply
//! geometry, layout confirmation, and pointer input, then paint the result.
//!
//! - **Slider**: single-knob slider view
//! - **Range slider**: two-knob range view with connector bar
//! - **Labeled**: slider views with editable value fields
//! - **Paint**: shared track, knob, and coordinate helpers

pub mod labeled;
pub mod paint;
pub mod range_slider;
pub mod slider;

pub use labeled::{input_label, LabeledRangeSliderView, LabeledSliderView};
pub use range_slider::RangeSliderView;
pub use slider::{SliderStyle, SliderView};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Default slider width
    pub const TRACK_WIDTH: f32 = 160.0;
    /// Default slider height
    pub const TRACK_HEIGHT: f32 = 20.0;
    /// Height of the painted track bar
    pub const BAR_HEIGHT: f32 = 4.0;
    /// Default knob size
    pub const KNOB: f32 = 14.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Default input label width
    pub const LABEL_WIDTH: f32 = 36.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Track bar color
    pub const TRACK: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Knob fill
    pub const KNOB: Color32 = Color32::WHITE;
    /// Knob border
    pub const KNOB_BORDER: Color32 = Color32::from_rgb(180, 180, 180);
    /// Knob border while hovered or dragged
    pub const KNOB_BORDER_ACTIVE: Color32 = Color32::from_rgb(59, 130, 246);
}
