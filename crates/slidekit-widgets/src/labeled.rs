//! Slider views with editable value fields.

use egui::{Color32, FontId, Key, Response, TextEdit, Ui};
use slidekit_core::labeled::LABEL_FONT_SIZE;
use slidekit_core::{InputLabel, InputResult, RangeSliderWithValues, SliderWithValue};

use crate::range_slider::RangeSliderView;
use crate::sizing;
use crate::slider::{SliderStyle, SliderView};

// Keeps scaled text legible when the field is very narrow.
const MIN_FONT_SIZE: f32 = 6.0;

/// Show an input label sized by its fitting. Returns true when the user
/// commits the text with Enter.
pub fn input_label(ui: &mut Ui, label: &mut InputLabel, width: f32) -> bool {
    let text_width = ui
        .painter()
        .layout_no_wrap(
            label.text().to_string(),
            FontId::proportional(LABEL_FONT_SIZE as f32),
            Color32::PLACEHOLDER,
        )
        .size()
        .x;
    let fit = label.fitting().fit(width as f64, text_width as f64);
    let font_size = (fit.font_size as f32).max(MIN_FONT_SIZE);

    let response = ui.add(
        TextEdit::singleline(label.text_mut())
            .desired_width(fit.width as f32)
            .font(FontId::proportional(font_size)),
    );
    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
}

fn report(result: InputResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Rejected slider input: {}", e);
            false
        }
    }
}

/// Hosts a [`SliderWithValue`]: slider, value field, and step buttons.
pub struct LabeledSliderView<'a> {
    wrapper: &'a mut SliderWithValue,
    style: SliderStyle,
    label_width: f32,
}

impl<'a> LabeledSliderView<'a> {
    pub fn new(wrapper: &'a mut SliderWithValue) -> Self {
        Self {
            wrapper,
            style: SliderStyle::default(),
            label_width: sizing::LABEL_WIDTH,
        }
    }

    /// Set the slider style.
    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the nominal width of the value field.
    pub fn label_width(mut self, width: f32) -> Self {
        self.label_width = width;
        self
    }

    /// Show the slider row and return the slider's response.
    pub fn show(self, ui: &mut Ui) -> Response {
        let Self {
            wrapper,
            style,
            label_width,
        } = self;

        ui.horizontal(|ui| {
            let response = wrapper.update(|slider| SliderView::new(slider).style(style).show(ui));

            if input_label(ui, wrapper.label_mut(), label_width)
                && !report(wrapper.set_slider_value())
            {
                // Restore the field to the value the slider actually holds
                wrapper.update_value();
            }
            if ui.small_button("-").clicked() {
                wrapper.decrement();
            }
            if ui.small_button("+").clicked() {
                wrapper.increment();
            }
            response
        })
        .inner
    }
}

/// Hosts a [`RangeSliderWithValues`]: min field, range slider, max field.
pub struct LabeledRangeSliderView<'a> {
    wrapper: &'a mut RangeSliderWithValues,
    style: SliderStyle,
    label_width: f32,
}

impl<'a> LabeledRangeSliderView<'a> {
    pub fn new(wrapper: &'a mut RangeSliderWithValues) -> Self {
        Self {
            wrapper,
            style: SliderStyle::default(),
            label_width: sizing::LABEL_WIDTH,
        }
    }

    /// Set the slider style.
    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the nominal width of both endpoint fields.
    pub fn label_width(mut self, width: f32) -> Self {
        self.label_width = width;
        self
    }

    /// Show the range row and return the slider's response.
    pub fn show(self, ui: &mut Ui) -> Response {
        let Self {
            wrapper,
            style,
            label_width,
        } = self;

        ui.horizontal(|ui| {
            if ui.small_button("-").clicked() {
                wrapper.decrement_min();
            }
            if ui.small_button("+").clicked() {
                wrapper.increment_min();
            }
            let min_committed = input_label(ui, wrapper.min_label_mut(), label_width);

            // Knobs are attached on first show; the wrapper fills both fields then
            let response =
                wrapper.update(|slider| RangeSliderView::new(slider).style(style).show(ui));

            let max_committed = input_label(ui, wrapper.max_label_mut(), label_width);
            if ui.small_button("-").clicked() {
                wrapper.decrement_max();
            }
            if ui.small_button("+").clicked() {
                wrapper.increment_max();
            }

            if (min_committed || max_committed) && !report(wrapper.set_range()) {
                wrapper.display_range();
            }
            response
        })
        .inner
    }
}
