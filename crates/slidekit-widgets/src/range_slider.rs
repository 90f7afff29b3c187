//! Two-knob range slider view.

use egui::{CornerRadius, CursorIcon, Response, Sense, Ui};
use slidekit_core::{HandleKind, NodeFrame, RangeSlider};

use crate::paint::{drag_event, model_origin, paint_knob, paint_track, to_model_size, to_screen};
use crate::slider::SliderStyle;

/// Hosts a [`RangeSlider`] in an egui layout.
pub struct RangeSliderView<'a> {
    slider: &'a mut RangeSlider,
    style: SliderStyle,
}

impl<'a> RangeSliderView<'a> {
    pub fn new(slider: &'a mut RangeSlider) -> Self {
        Self {
            slider,
            style: SliderStyle::default(),
        }
    }

    /// Set the slider style.
    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    /// Lay out, route input, and paint the range slider.
    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click_and_drag());
        let knob_size = to_model_size(self.style.knob_size);

        self.slider.set_extent(to_model_size(rect.size()));
        if !self.slider.is_attached() {
            // Max knob starts at the right end so the initial range spans the domain
            let right = (rect.width() - self.style.knob_size.x).max(0.0) as f64;
            self.slider.attach(
                NodeFrame::new(knob_size),
                NodeFrame::new(knob_size).at(kurbo::Point::new(right, 0.0)),
            );
        }
        self.slider.set_handle_size(knob_size);
        self.slider.confirm_layout();

        let origin = model_origin(rect, self.style.knob_size.y);
        if let Some(event) = drag_event(&response, origin) {
            self.slider.handle_drag(event);
        }

        if ui.is_rect_visible(rect) {
            let center_y = origin.y + self.style.knob_size.y / 2.0;
            paint_track(ui, rect, self.style.knob_size.x, center_y, self.style.track_color);

            let connector = to_screen(origin, self.slider.connector());
            ui.painter()
                .rect_filled(connector, CornerRadius::same(2), self.style.fill_color);

            let dragged = self.slider.dragged_handle();
            for (kind, knob) in [
                (HandleKind::Min, self.slider.min_knob()),
                (HandleKind::Max, self.slider.max_knob()),
            ] {
                let Some(knob) = knob else { continue };
                let border = if dragged == Some(kind) {
                    self.style.knob_border_active
                } else {
                    self.style.knob_border
                };
                paint_knob(ui, origin, knob, self.style.knob_color, border);
            }
        }

        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}
