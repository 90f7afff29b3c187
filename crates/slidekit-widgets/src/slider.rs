//! Single-knob slider view.

use egui::{pos2, vec2, Color32, CornerRadius, CursorIcon, Rect, Response, Sense, Ui, Vec2};
use slidekit_core::{NodeFrame, Slider};

use crate::paint::{drag_event, model_origin, paint_knob, paint_track, to_model_size};
use crate::{sizing, theme};

/// Style configuration for slider views.
#[derive(Clone)]
pub struct SliderStyle {
    /// Overall widget size
    pub size: Vec2,
    /// Knob size
    pub knob_size: Vec2,
    /// Track bar color
    pub track_color: Color32,
    /// Filled portion and connector color
    pub fill_color: Color32,
    /// Knob fill
    pub knob_color: Color32,
    /// Knob border when idle
    pub knob_border: Color32,
    /// Knob border when hovered or dragged
    pub knob_border_active: Color32,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::TRACK_WIDTH, sizing::TRACK_HEIGHT),
            knob_size: vec2(sizing::KNOB, sizing::KNOB),
            track_color: theme::TRACK,
            fill_color: theme::ACCENT,
            knob_color: theme::KNOB,
            knob_border: theme::KNOB_BORDER,
            knob_border_active: theme::KNOB_BORDER_ACTIVE,
        }
    }
}

impl SliderStyle {
    /// Compact style for property panels.
    pub fn compact() -> Self {
        Self {
            size: vec2(120.0, 16.0),
            knob_size: vec2(10.0, 12.0),
            ..Default::default()
        }
    }
}

/// Hosts a [`Slider`] in an egui layout.
pub struct SliderView<'a> {
    slider: &'a mut Slider,
    style: SliderStyle,
}

impl<'a> SliderView<'a> {
    pub fn new(slider: &'a mut Slider) -> Self {
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

    /// Lay out, route input, and paint the slider.
    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click_and_drag());
        let knob_size = to_model_size(self.style.knob_size);

        self.slider.set_extent(to_model_size(rect.size()));
        if !self.slider.is_attached() {
            // Start the knob where the unattached slider reports its value
            let x = self
                .slider
                .track()
                .mapping(knob_size.width)
                .position_for_value(self.slider.value());
            self.slider
                .attach(NodeFrame::new(knob_size).at(kurbo::Point::new(x, 0.0)));
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

            if let Some(knob) = self.slider.knob() {
                // Filled portion up to the knob center
                let fill_end = origin.x + knob.center().x as f32;
                let fill_start = rect.min.x + self.style.knob_size.x / 2.0;
                let half_bar = sizing::BAR_HEIGHT / 2.0;
                let fill = Rect::from_min_max(
                    pos2(fill_start, center_y - half_bar),
                    pos2(fill_end, center_y + half_bar),
                );
                ui.painter()
                    .rect_filled(fill, CornerRadius::same(2), self.style.fill_color);

                let border = if response.hovered() || response.dragged() {
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
