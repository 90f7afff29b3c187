//! Shared painting and coordinate helpers.

use egui::{pos2, vec2, Color32, CornerRadius, Pos2, Rect, Response, Stroke, StrokeKind, Ui};
use slidekit_core::{DragEvent, DragPhase, Handle};

use crate::sizing;

/// Origin of the slider's model coordinates inside the allocated rect.
///
/// Knobs are pinned to y = 0 in the model, so the model is shifted down to
/// center knobs of `knob_height` vertically.
pub fn model_origin(rect: Rect, knob_height: f32) -> Pos2 {
    pos2(rect.min.x, rect.min.y + (rect.height() - knob_height).max(0.0) / 2.0)
}

/// Convert a model rectangle into screen space.
pub fn to_screen(origin: Pos2, rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        origin + vec2(rect.x0 as f32, rect.y0 as f32),
        origin + vec2(rect.x1 as f32, rect.y1 as f32),
    )
}

pub fn to_model_size(size: egui::Vec2) -> kurbo::Size {
    kurbo::Size::new(size.x as f64, size.y as f64)
}

/// Translate this frame's pointer interaction into a drag event relative to `origin`.
pub fn drag_event(response: &Response, origin: Pos2) -> Option<DragEvent> {
    let phase = if response.drag_started() {
        DragPhase::Start
    } else if response.drag_stopped() {
        DragPhase::End
    } else if response.dragged() {
        DragPhase::Drag
    } else if response.clicked() {
        DragPhase::Press
    } else {
        return None;
    };

    let pointer = response
        .interact_pointer_pos()
        .or_else(|| response.ctx.input(|i| i.pointer.latest_pos()))?;
    let local = pointer - origin;
    log::trace!("Slider pointer {:?} at ({}, {})", phase, local.x, local.y);
    Some(DragEvent::new(
        phase,
        kurbo::Point::new(local.x as f64, local.y as f64),
    ))
}

/// Paint the track bar spanning the knob travel, centered on `center_y`.
pub fn paint_track(ui: &Ui, rect: Rect, knob_width: f32, center_y: f32, color: Color32) {
    let inset = knob_width / 2.0;
    let bar = Rect::from_min_max(
        pos2(rect.min.x + inset, center_y - sizing::BAR_HEIGHT / 2.0),
        pos2(rect.max.x - inset, center_y + sizing::BAR_HEIGHT / 2.0),
    );
    ui.painter().rect_filled(bar, CornerRadius::same(2), color);
}

/// Paint a knob at its model bounds.
pub fn paint_knob(ui: &Ui, origin: Pos2, knob: &Handle, fill: Color32, border: Color32) {
    let rect = to_screen(origin, knob.bounds());
    let painter = ui.painter();
    painter.rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), fill);
    painter.rect_stroke(
        rect,
        CornerRadius::same(sizing::CORNER_RADIUS),
        Stroke::new(1.0, border),
        StrokeKind::Inside,
    );
}
