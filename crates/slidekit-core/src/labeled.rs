//! Labeled wrappers: text fields bound to a slider's value or range.
//!
//! A wrapper owns its slider. Every operation that can move a knob goes
//! through the wrapper so it can refresh the text fields when the slider's
//! change signal fires, and re-fire its own signal for outside listeners.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Size;
use thiserror::Error;

use crate::input::DragEvent;
use crate::range_slider::{Range, RangeSlider};
use crate::signal::Signal;
use crate::slider::Slider;

/// Nominal width of an input label.
pub const LABEL_DEFAULT_WIDTH: f64 = 36.0;
/// Font size labels are laid out at before fitting.
pub const LABEL_FONT_SIZE: f64 = 13.0;
/// Horizontal padding reserved inside a scaled label.
pub const LABEL_PADDING: f64 = 8.0;
/// Extra width added around content-fitted text.
pub const LABEL_CONTENT_MARGIN: f64 = 10.0;

// Increments finer than this many decimal places display at this precision.
const MAX_DECIMALS: usize = 12;

/// Errors from reading a text field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),
}

/// Result type for text-field operations.
pub type InputResult<T> = Result<T, InputError>;

/// How a label adapts to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFitting {
    /// Keep the label width and shrink the font until the text fits.
    #[default]
    ScaleToFit,
    /// Grow or shrink the label to the text.
    FitToContent,
    /// Fixed width; overflowing text is clipped.
    ClipContent,
}

/// Width and font size chosen by a [`LabelFitting`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFit {
    pub width: f64,
    pub font_size: f64,
}

impl LabelFitting {
    /// Fit text measuring `text_width` (at [`LABEL_FONT_SIZE`]) into a label
    /// that is `label_width` wide.
    pub fn fit(self, label_width: f64, text_width: f64) -> LabelFit {
        match self {
            LabelFitting::ScaleToFit => {
                let nominal = text_width + LABEL_DEFAULT_WIDTH / 2.0;
                let scale = ((label_width - LABEL_PADDING) / nominal).min(1.0);
                LabelFit {
                    width: label_width,
                    font_size: LABEL_FONT_SIZE * scale.max(0.0),
                }
            }
            LabelFitting::FitToContent => LabelFit {
                width: text_width + LABEL_CONTENT_MARGIN,
                font_size: LABEL_FONT_SIZE,
            },
            LabelFitting::ClipContent => LabelFit {
                width: LABEL_DEFAULT_WIDTH,
                font_size: LABEL_FONT_SIZE,
            },
        }
    }
}

/// Editable text showing a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputLabel {
    text: String,
    fitting: LabelFitting,
}

impl InputLabel {
    pub fn new(fitting: LabelFitting) -> Self {
        Self {
            text: String::new(),
            fitting,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for the host's text editor.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn fitting(&self) -> LabelFitting {
        self.fitting
    }

    pub fn set_fitting(&mut self, fitting: LabelFitting) {
        self.fitting = fitting;
    }

    /// Display a number at the precision of `increment`.
    pub fn show_value(&mut self, value: f64, increment: f64) {
        self.text = format_value(value, increment);
    }

    /// Read the text as a number.
    pub fn value(&self) -> InputResult<f64> {
        let trimmed = self.text.trim();
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputError::NotANumber(trimmed.to_string()))
    }
}

fn decimal_places(increment: f64) -> usize {
    increment
        .abs()
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
        .min(MAX_DECIMALS)
}

/// Format `value` with no more decimals than `increment` has, dropping
/// trailing zeros.
pub fn format_value(value: f64, increment: f64) -> String {
    let text = format!("{:.*}", decimal_places(increment), value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    match text {
        "-0" => "0".to_string(),
        text => text.to_string(),
    }
}

fn dirty_flag(signal: &mut Signal) -> Rc<Cell<bool>> {
    let dirty = Rc::new(Cell::new(false));
    let flag = dirty.clone();
    signal.connect(move || flag.set(true));
    dirty
}

/// A [`Slider`] with a text field showing its value.
#[derive(Debug)]
pub struct SliderWithValue {
    slider: Slider,
    label: InputLabel,
    value_changed: Signal,
    dirty: Rc<Cell<bool>>,
}

impl SliderWithValue {
    pub fn new(mut slider: Slider) -> Self {
        let dirty = dirty_flag(slider.value_changed());
        let mut wrapper = Self {
            slider,
            label: InputLabel::default(),
            value_changed: Signal::new(),
            dirty,
        };
        wrapper.update_value();
        wrapper
    }

    /// Builder: choose how the text field fits its content.
    pub fn with_fitting(mut self, fitting: LabelFitting) -> Self {
        self.label.set_fitting(fitting);
        self
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn label(&self) -> &InputLabel {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut InputLabel {
        &mut self.label
    }

    /// The underlying slider's value.
    pub fn value(&self) -> f64 {
        self.slider.value()
    }

    /// Forwarded from the underlying slider.
    pub fn value_changed(&mut self) -> &mut Signal {
        &mut self.value_changed
    }

    /// Run `f` against the slider, then refresh the label if the value changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Slider) -> R) -> R {
        let result = f(&mut self.slider);
        self.sync();
        result
    }

    fn sync(&mut self) {
        if self.dirty.replace(false) {
            self.update_value();
            self.value_changed.fire();
        }
    }

    /// Show the slider's value in the text field.
    pub fn update_value(&mut self) {
        let value = self.slider.value();
        let increment = self.slider.config().increment();
        self.label.show_value(value, increment);
    }

    /// Push the text field's number into the slider.
    pub fn set_slider_value(&mut self) -> InputResult<()> {
        let value = self.label.value()?;
        self.update(|slider| slider.set_value(value));
        Ok(())
    }

    /// Replace the text and accept it.
    pub fn accept_input(&mut self, text: &str) -> InputResult<()> {
        self.label.set_text(text);
        self.set_slider_value()
    }

    pub fn increment(&mut self) {
        self.update(Slider::increment_value);
    }

    pub fn decrement(&mut self) {
        self.update(Slider::decrement_value);
    }

    pub fn handle_drag(&mut self, event: DragEvent) {
        self.update(|slider| slider.handle_drag(event));
    }

    pub fn set_extent(&mut self, extent: Size) {
        self.update(|slider| slider.set_extent(extent));
    }

    pub fn confirm_layout(&mut self) {
        self.update(Slider::confirm_layout);
    }
}

/// A [`RangeSlider`] with text fields for both endpoints.
#[derive(Debug)]
pub struct RangeSliderWithValues {
    slider: RangeSlider,
    min_label: InputLabel,
    max_label: InputLabel,
    range_changed: Signal,
    dirty: Rc<Cell<bool>>,
}

impl RangeSliderWithValues {
    pub fn new(mut slider: RangeSlider) -> Self {
        let dirty = dirty_flag(slider.range_changed());
        let mut wrapper = Self {
            slider,
            min_label: InputLabel::default(),
            max_label: InputLabel::default(),
            range_changed: Signal::new(),
            dirty,
        };
        wrapper.display_range();
        wrapper
    }

    /// Builder: choose how both text fields fit their content.
    pub fn with_fitting(mut self, fitting: LabelFitting) -> Self {
        self.min_label.set_fitting(fitting);
        self.max_label.set_fitting(fitting);
        self
    }

    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn min_label(&self) -> &InputLabel {
        &self.min_label
    }

    pub fn max_label(&self) -> &InputLabel {
        &self.max_label
    }

    pub fn min_label_mut(&mut self) -> &mut InputLabel {
        &mut self.min_label
    }

    pub fn max_label_mut(&mut self) -> &mut InputLabel {
        &mut self.max_label
    }

    /// The underlying slider's range.
    pub fn range(&self) -> Option<Range> {
        self.slider.range()
    }

    /// Forwarded from the underlying slider.
    pub fn range_changed(&mut self) -> &mut Signal {
        &mut self.range_changed
    }

    /// Run `f` against the slider, then refresh the labels if the range changed
    /// or first became available.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut RangeSlider) -> R) -> R {
        let had_range = self.slider.range().is_some();
        let result = f(&mut self.slider);
        if !had_range && self.slider.range().is_some() {
            self.display_range();
        }
        self.sync();
        result
    }

    fn sync(&mut self) {
        if self.dirty.replace(false) {
            self.display_range();
            self.range_changed.fire();
        }
    }

    /// Show both endpoints in the text fields. Leaves them untouched before
    /// the slider has knobs.
    pub fn display_range(&mut self) {
        if let Some(range) = self.slider.range() {
            let increment = self.slider.config().increment();
            self.min_label.show_value(range.min, increment);
            self.max_label.show_value(range.max, increment);
        }
    }

    /// Push both text fields into the slider.
    pub fn set_range(&mut self) -> InputResult<()> {
        let range = Range::new(self.min_label.value()?, self.max_label.value()?);
        self.update(|slider| slider.set_range(range));
        Ok(())
    }

    /// Replace the min text and accept both fields.
    pub fn accept_min(&mut self, text: &str) -> InputResult<()> {
        self.min_label.set_text(text);
        self.set_range()
    }

    /// Replace the max text and accept both fields.
    pub fn accept_max(&mut self, text: &str) -> InputResult<()> {
        self.max_label.set_text(text);
        self.set_range()
    }

    pub fn increment_min(&mut self) {
        self.update(RangeSlider::increment_min_value);
    }

    pub fn decrement_min(&mut self) {
        self.update(RangeSlider::decrement_min_value);
    }

    pub fn increment_max(&mut self) {
        self.update(RangeSlider::increment_max_value);
    }

    pub fn decrement_max(&mut self) {
        self.update(RangeSlider::decrement_max_value);
    }

    pub fn handle_drag(&mut self, event: DragEvent) {
        self.update(|slider| slider.handle_drag(event));
    }

    pub fn set_extent(&mut self, extent: Size) {
        self.update(|slider| slider.set_extent(extent));
    }

    pub fn confirm_layout(&mut self) {
        self.update(RangeSlider::confirm_layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackConfig;
    use crate::node::NodeFrame;
    use kurbo::Point;

    const KNOB: Size = Size::new(10.0, 20.0);

    fn labeled_slider(config: TrackConfig) -> SliderWithValue {
        let mut slider = Slider::with_config(config);
        slider.set_extent(Size::new(110.0, 20.0));
        slider.attach(NodeFrame::new(KNOB));
        let mut wrapper = SliderWithValue::new(slider);
        wrapper.confirm_layout();
        wrapper
    }

    fn labeled_range() -> RangeSliderWithValues {
        let mut slider = RangeSlider::new();
        slider.set_extent(Size::new(110.0, 20.0));
        slider.attach(
            NodeFrame::new(KNOB),
            NodeFrame::new(KNOB).at(Point::new(100.0, 0.0)),
        );
        let mut wrapper = RangeSliderWithValues::new(slider);
        wrapper.confirm_layout();
        wrapper
    }

    fn counter(signal: &mut Signal) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        signal.connect(move || c.set(c.get() + 1));
        count
    }

    #[test]
    fn test_fitting_scale() {
        let fit = LabelFitting::ScaleToFit.fit(36.0, 38.0);
        assert!((fit.font_size - 13.0 * 28.0 / 56.0).abs() < 1e-9);
        assert_eq!(fit.width, 36.0);

        let fit = LabelFitting::ScaleToFit.fit(80.0, 10.0);
        assert_eq!(fit.font_size, LABEL_FONT_SIZE);
    }

    #[test]
    fn test_fitting_content_and_clip() {
        assert_eq!(LabelFitting::FitToContent.fit(36.0, 50.0).width, 60.0);
        assert_eq!(LabelFitting::ClipContent.fit(80.0, 50.0).width, 36.0);
    }

    #[test]
    fn test_label_parses_numbers() {
        let mut label = InputLabel::default();
        label.set_text(" 42.5 ");
        assert_eq!(label.value(), Ok(42.5));
        label.set_text("abc");
        assert_eq!(label.value(), Err(InputError::NotANumber("abc".into())));
        label.set_text("NaN");
        assert!(label.value().is_err());
    }

    #[test]
    fn test_label_shows_integers_plainly() {
        let mut label = InputLabel::default();
        label.show_value(20.0, 1.0);
        assert_eq!(label.text(), "20");
    }

    #[test]
    fn test_label_hides_float_residue() {
        assert_eq!(format_value(0.1 + 0.2, 0.1), "0.3");
        assert_eq!(format_value(0.5, 0.25), "0.5");
        assert_eq!(format_value(2.0, 0.5), "2");
        assert_eq!(format_value(-0.0001, 0.1), "0");
        assert_eq!(format_value(125.0, 5.0), "125");
    }

    #[test]
    fn test_fractional_increment_label() {
        let mut wrapper = labeled_slider(TrackConfig::new(0.0, 1.0, 0.1).unwrap());
        wrapper.accept_input("0.3").unwrap();
        assert_eq!(wrapper.label().text(), "0.3");
        wrapper.increment();
        assert_eq!(wrapper.label().text(), "0.4");
    }

    #[test]
    fn test_accept_input_normalizes_and_refreshes() {
        let mut wrapper = labeled_slider(TrackConfig::new(0.0, 100.0, 10.0).unwrap());
        let count = counter(wrapper.value_changed());
        wrapper.accept_input("23").unwrap();
        assert_eq!(wrapper.value(), 20.0);
        assert_eq!(wrapper.label().text(), "20");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_bad_input_leaves_slider_alone() {
        let mut wrapper = labeled_slider(TrackConfig::default());
        wrapper.accept_input("40").unwrap();
        assert!(wrapper.accept_input("forty").is_err());
        assert_eq!(wrapper.value(), 40.0);
    }

    #[test]
    fn test_drag_updates_label() {
        let mut wrapper = labeled_slider(TrackConfig::default());
        wrapper.handle_drag(DragEvent::start(35.0, 0.0));
        assert_eq!(wrapper.label().text(), "30");
        wrapper.increment();
        assert_eq!(wrapper.label().text(), "31");
        wrapper.decrement();
        wrapper.decrement();
        assert_eq!(wrapper.label().text(), "29");
    }

    #[test]
    fn test_unrendered_label_shows_midpoint() {
        let wrapper = SliderWithValue::new(Slider::new());
        assert_eq!(wrapper.label().text(), "50");
    }

    #[test]
    fn test_range_labels_follow_slider() {
        let mut wrapper = labeled_range();
        assert_eq!(wrapper.min_label().text(), "0");
        assert_eq!(wrapper.max_label().text(), "100");

        let count = counter(wrapper.range_changed());
        wrapper.accept_min("30").unwrap();
        assert_eq!(wrapper.range(), Some(Range::new(30.0, 100.0)));
        wrapper.accept_max("30").unwrap();
        assert_eq!(wrapper.range(), Some(Range::new(30.0, 31.0)));
        assert_eq!(wrapper.max_label().text(), "31");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_range_label_buttons() {
        let mut wrapper = labeled_range();
        wrapper.increment_min();
        wrapper.decrement_max();
        assert_eq!(wrapper.min_label().text(), "1");
        assert_eq!(wrapper.max_label().text(), "99");
    }

    #[test]
    fn test_range_bad_input() {
        let mut wrapper = labeled_range();
        assert!(wrapper.accept_max("").is_err());
        assert_eq!(wrapper.range(), Some(Range::new(0.0, 100.0)));
    }

    #[test]
    fn test_range_labels_fill_once_when_attached() {
        let mut wrapper = RangeSliderWithValues::new(RangeSlider::new());
        wrapper.update(|slider| {
            slider.set_extent(Size::new(110.0, 20.0));
            slider.attach(
                NodeFrame::new(KNOB),
                NodeFrame::new(KNOB).at(Point::new(100.0, 0.0)),
            );
            slider.confirm_layout();
        });
        assert_eq!(wrapper.min_label().text(), "0");
        assert_eq!(wrapper.max_label().text(), "100");

        // A cleared field is left alone while the user retypes it
        wrapper.min_label_mut().set_text("");
        wrapper.update(|slider| slider.set_extent(Size::new(110.0, 20.0)));
        assert_eq!(wrapper.min_label().text(), "");
        assert_eq!(wrapper.max_label().text(), "100");
    }

    #[test]
    fn test_unattached_range_labels_stay_empty() {
        let wrapper = RangeSliderWithValues::new(RangeSlider::new());
        assert_eq!(wrapper.min_label().text(), "");
        assert!(wrapper.range().is_none());
    }
}
