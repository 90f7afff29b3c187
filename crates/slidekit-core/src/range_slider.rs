//! Dual-handle range slider: min and max knobs on one track.
//!
//! The knobs can never cross while being dragged: each knob's legal interval
//! is recomputed from its sibling's live position on every drag event, so
//! `min_knob.x + min_knob.width <= max_knob.x` holds after every tick.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigResult, RawTrackConfig, TrackConfig};
use crate::handle::{Handle, HandleKind, PositionInterval};
use crate::input::{DragEvent, DragPhase};
use crate::layout::LayoutGate;
use crate::mapping::{normalize_value, ValueMapping};
use crate::node::PositionableNode;
use crate::signal::{ChangeNotifier, NotifyPolicy, Signal, UpdateKind};
use crate::track::Track;

/// Default thickness of the bar drawn between the knobs.
pub const DEFAULT_CONNECTOR_THICKNESS: f64 = 4.0;

/// An ordered pair of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Normalize both endpoints and keep them apart.
///
/// Inverted endpoints are swapped. If both land on the same value, `max` is
/// raised by one increment, unless it already sits at the ceiling, in which
/// case `min` is lowered instead.
pub fn separate_range(config: &TrackConfig, range: Range) -> Range {
    let mut min = normalize_value(config, range.min);
    let mut max = normalize_value(config, range.max);
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    if min == max {
        if max == config.max_value() {
            min = max - config.increment();
        } else {
            max = (min + config.increment()).min(config.max_value());
        }
        log::debug!(
            "Collapsed range {:?} separated to {}..{}",
            range,
            min,
            max
        );
    }
    Range { min, max }
}

#[derive(Debug)]
struct Knobs {
    min: Handle,
    max: Handle,
}

impl Knobs {
    fn get(&self, kind: HandleKind) -> &Handle {
        match kind {
            HandleKind::Min => &self.min,
            _ => &self.max,
        }
    }

    fn get_mut(&mut self, kind: HandleKind) -> &mut Handle {
        match kind {
            HandleKind::Min => &mut self.min,
            _ => &mut self.max,
        }
    }

    /// Legal intervals for both knobs given their current positions.
    fn position_ranges(&self, max_position: f64) -> (PositionInterval, PositionInterval) {
        let min_width = self.min.width();
        (
            PositionInterval::new(0.0, self.max.x() - min_width),
            PositionInterval::new(self.min.x() + min_width, max_position),
        )
    }
}

/// A slider with two knobs selecting a sub-range of the domain.
#[derive(Debug)]
pub struct RangeSlider {
    track: Track,
    knobs: Option<Knobs>,
    connector: Rect,
    connector_thickness: f64,
    dragged: Option<HandleKind>,
    gate: LayoutGate<Range>,
    notifier: ChangeNotifier<Range>,
    range_changed: Signal,
}

impl Default for RangeSlider {
    fn default() -> Self {
        Self::with_track(Track::new(TrackConfig::default()))
    }
}

impl RangeSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackConfig) -> Self {
        Self::with_track(Track::new(config))
    }

    pub fn with_track(track: Track) -> Self {
        Self {
            track,
            knobs: None,
            connector: Rect::ZERO,
            connector_thickness: DEFAULT_CONNECTOR_THICKNESS,
            dragged: None,
            gate: LayoutGate::new(),
            notifier: ChangeNotifier::default(),
            range_changed: Signal::new(),
        }
    }

    /// Create a range slider from a possibly incomplete configuration.
    pub fn from_raw_config(raw: RawTrackConfig) -> Self {
        Self::with_config(raw.repair().config)
    }

    /// Builder: choose when `range_changed` fires.
    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notifier.set_policy(policy);
        self
    }

    /// Builder: thickness of the connector bar.
    pub fn with_connector_thickness(mut self, thickness: f64) -> Self {
        self.connector_thickness = thickness;
        self
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn config(&self) -> &TrackConfig {
        self.track.config()
    }

    pub fn is_attached(&self) -> bool {
        self.knobs.is_some()
    }

    pub fn is_rendered(&self) -> bool {
        self.gate.is_rendered()
    }

    pub fn min_knob(&self) -> Option<&Handle> {
        self.knobs.as_ref().map(|knobs| &knobs.min)
    }

    pub fn max_knob(&self) -> Option<&Handle> {
        self.knobs.as_ref().map(|knobs| &knobs.max)
    }

    /// The knob receiving the current drag gesture, if any.
    pub fn dragged_handle(&self) -> Option<HandleKind> {
        self.dragged
    }

    /// Span between the two knob centers (visual only).
    pub fn connector(&self) -> Rect {
        self.connector
    }

    /// Signal fired when the range changes. Listeners re-read [`RangeSlider::range`].
    pub fn range_changed(&mut self) -> &mut Signal {
        &mut self.range_changed
    }

    /// Attach the host's knob nodes.
    pub fn attach(
        &mut self,
        min_knob: impl PositionableNode + 'static,
        max_knob: impl PositionableNode + 'static,
    ) {
        self.knobs = Some(Knobs {
            min: Handle::new(HandleKind::Min, min_knob),
            max: Handle::new(HandleKind::Max, max_knob),
        });
        self.update_connector();
        let range = self.range();
        self.notifier.reset(range);
    }

    /// Host notification that the widget has been laid out.
    pub fn confirm_layout(&mut self) {
        if self.knobs.is_none() {
            log::debug!("Layout confirmed before knobs were attached; deferring");
            return;
        }
        if let Some(range) = self.gate.confirm() {
            log::debug!("Applying deferred range {:?}", range);
            self.place_knobs(range);
            self.publish(UpdateKind::Settled);
        }
    }

    fn mapping(&self) -> Option<ValueMapping> {
        self.knobs
            .as_ref()
            .map(|knobs| self.track.mapping(knobs.max.width()))
    }

    /// Rightmost position of the max knob.
    pub fn max_position(&self) -> Option<f64> {
        self.mapping().map(|mapping| mapping.geometry.max_pos)
    }

    /// Current legal interval of one knob, derived from its sibling.
    ///
    /// Knobs placed closer than one knob width invert the interval; it is
    /// still bounded by the track, so a drag never leaves the track.
    pub fn legal_interval(&self, kind: HandleKind) -> Option<PositionInterval> {
        let max_position = self.max_position()?;
        let knobs = self.knobs.as_ref()?;
        let (min_range, max_range) = knobs.position_ranges(max_position);
        let interval = match kind {
            HandleKind::Min => min_range,
            _ => max_range,
        };
        Some(interval.within(PositionInterval::new(0.0, max_position)))
    }

    /// Current range, or `None` before the knobs are attached.
    pub fn range(&self) -> Option<Range> {
        let mapping = self.mapping()?;
        let knobs = self.knobs.as_ref()?;
        Some(Range {
            min: mapping.value_for_position(knobs.min.x()),
            max: mapping.value_for_position(knobs.max.x()),
        })
    }

    fn effective_range(&self) -> Option<Range> {
        self.gate.pending().copied().or_else(|| self.range())
    }

    /// Set the range. Endpoints are normalized and kept at least one increment apart.
    pub fn set_range(&mut self, range: Range) {
        let range = separate_range(self.config(), range);
        if let Some(range) = self.gate.when_rendered(range) {
            self.place_knobs(range);
            self.publish(UpdateKind::Settled);
        }
    }

    fn adjust(&mut self, f: impl FnOnce(Range) -> Range) {
        match self.effective_range() {
            Some(range) => self.set_range(f(range)),
            None => log::debug!("No range to adjust before knobs are attached"),
        }
    }

    pub fn increment_min_value(&mut self) {
        self.adjust(|r| Range::new(r.min + 1.0, r.max));
    }

    pub fn decrement_min_value(&mut self) {
        self.adjust(|r| Range::new(r.min - 1.0, r.max));
    }

    pub fn increment_max_value(&mut self) {
        self.adjust(|r| Range::new(r.min, r.max + 1.0));
    }

    pub fn decrement_max_value(&mut self) {
        self.adjust(|r| Range::new(r.min, r.max - 1.0));
    }

    /// Route pointer input to the knob closest to where the gesture began.
    pub fn handle_drag(&mut self, event: DragEvent) {
        match event.phase {
            DragPhase::Press => {}
            DragPhase::Start => self.start_dragging_closest(event.position),
            DragPhase::Drag => self.drag_selected(event.position, UpdateKind::Tick),
            DragPhase::End => {
                self.drag_selected(event.position, UpdateKind::Settled);
                self.dragged = None;
            }
        }
    }

    fn start_dragging_closest(&mut self, pointer: Point) {
        let Some(knobs) = self.knobs.as_ref() else {
            return;
        };
        let kind = if knobs.min.distance_to(pointer) < knobs.max.distance_to(pointer) {
            HandleKind::Min
        } else {
            HandleKind::Max
        };
        log::trace!("Dragging {:?} knob from {:?}", kind, pointer);
        self.dragged = Some(kind);
    }

    fn drag_selected(&mut self, pointer: Point, kind: UpdateKind) {
        let Some(dragged) = self.dragged else {
            return;
        };
        let Some(interval) = self.legal_interval(dragged) else {
            return;
        };
        if let Some(knobs) = self.knobs.as_mut() {
            knobs.get_mut(dragged).drag_to(pointer.x, interval);
        }
        self.update_connector();
        self.publish(kind);
    }

    /// Resize the widget, keeping the knobs at the same range.
    pub fn set_extent(&mut self, extent: Size) {
        if self.track.extent() == extent {
            return;
        }
        self.relayout(|slider| slider.track.set_extent(extent));
    }

    /// Resize both knobs, keeping them at the same range.
    pub fn set_handle_size(&mut self, size: Size) {
        let unchanged = self
            .knobs
            .as_ref()
            .is_some_and(|knobs| knobs.min.extent() == size && knobs.max.extent() == size);
        if unchanged {
            return;
        }
        self.relayout(|slider| {
            if let Some(knobs) = slider.knobs.as_mut() {
                knobs.min.set_extent(size);
                knobs.max.set_extent(size);
            }
        });
    }

    pub fn set_config(&mut self, config: TrackConfig) {
        self.relayout(|slider| slider.track.set_config(config));
    }

    pub fn set_min_value(&mut self, min_value: f64) -> ConfigResult<()> {
        let config = self.config().with_min_value(min_value)?;
        self.set_config(config);
        Ok(())
    }

    pub fn set_max_value(&mut self, max_value: f64) -> ConfigResult<()> {
        let config = self.config().with_max_value(max_value)?;
        self.set_config(config);
        Ok(())
    }

    pub fn set_increment(&mut self, increment: f64) -> ConfigResult<()> {
        let config = self.config().with_increment(increment)?;
        self.set_config(config);
        Ok(())
    }

    fn relayout(&mut self, change: impl FnOnce(&mut Self)) {
        let keep = if self.is_rendered() { self.range() } else { None };
        change(self);
        match keep {
            Some(range) => {
                let range = separate_range(self.config(), range);
                self.place_knobs(range);
                self.publish(UpdateKind::Settled);
            }
            None => self.update_connector(),
        }
    }

    fn place_knobs(&mut self, range: Range) {
        let Some(mapping) = self.mapping() else {
            return;
        };
        if let Some(knobs) = self.knobs.as_mut() {
            knobs.min.set_x(mapping.position_for_value(range.min));
            knobs.max.set_x(mapping.position_for_value(range.max));
        }
        self.update_connector();
    }

    /// Recompute the bar spanning the two knob centers.
    fn update_connector(&mut self) {
        let Some(knobs) = self.knobs.as_ref() else {
            return;
        };
        let start = knobs.get(HandleKind::Min).center();
        let end = knobs.get(HandleKind::Max).center();
        let half = self.connector_thickness / 2.0;
        self.connector = Rect::new(start.x, start.y - half, end.x, start.y + half);
    }

    fn publish(&mut self, kind: UpdateKind) {
        let Some(range) = self.range() else {
            return;
        };
        if self.notifier.observe(range, kind) {
            self.range_changed.fire();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeFrame;
    use std::cell::Cell;
    use std::rc::Rc;

    const KNOB: Size = Size::new(10.0, 20.0);

    /// Track of 110 with 10-wide knobs at the given positions.
    fn rendered_at(config: TrackConfig, min_x: f64, max_x: f64) -> RangeSlider {
        let mut slider = RangeSlider::with_config(config);
        slider.set_extent(Size::new(110.0, 20.0));
        slider.attach(
            NodeFrame::new(KNOB).at(Point::new(min_x, 0.0)),
            NodeFrame::new(KNOB).at(Point::new(max_x, 0.0)),
        );
        slider.confirm_layout();
        slider
    }

    fn rendered(config: TrackConfig) -> RangeSlider {
        rendered_at(config, 0.0, 100.0)
    }

    fn counter(slider: &mut RangeSlider) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        slider.range_changed().connect(move || c.set(c.get() + 1));
        count
    }

    fn assert_not_crossed(slider: &RangeSlider) {
        let min = slider.min_knob().unwrap();
        let max = slider.max_knob().unwrap();
        assert!(
            min.x() + min.width() <= max.x() + 1e-9,
            "knobs crossed: min={} max={}",
            min.x(),
            max.x()
        );
        let range = slider.range().unwrap();
        assert!(range.min <= range.max);
    }

    #[test]
    fn test_unattached_range_is_none() {
        let slider = RangeSlider::new();
        assert!(slider.range().is_none());
    }

    #[test]
    fn test_set_range_deferred_until_layout() {
        let mut slider = RangeSlider::new();
        slider.set_extent(Size::new(110.0, 20.0));
        slider.set_range(Range::new(20.0, 60.0));
        assert!(slider.range().is_none());

        slider.attach(NodeFrame::new(KNOB), NodeFrame::new(KNOB));
        assert_eq!(slider.range(), Some(Range::new(0.0, 0.0)));
        slider.confirm_layout();
        assert_eq!(slider.range(), Some(Range::new(20.0, 60.0)));
    }

    #[test]
    fn test_set_range_normalizes() {
        let mut slider = rendered(TrackConfig::new(0.0, 100.0, 10.0).unwrap());
        slider.set_range(Range::new(-40.0, 87.0));
        assert_eq!(slider.range(), Some(Range::new(0.0, 90.0)));
    }

    #[test]
    fn test_collapse_at_ceiling_lowers_min() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(100.0, 100.0));
        assert_eq!(slider.range(), Some(Range::new(99.0, 100.0)));
    }

    #[test]
    fn test_collapse_below_ceiling_raises_max() {
        let mut slider = rendered(TrackConfig::new(0.0, 100.0, 5.0).unwrap());
        slider.set_range(Range::new(41.0, 39.0));
        assert_eq!(slider.range(), Some(Range::new(40.0, 45.0)));
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let config = TrackConfig::default();
        assert_eq!(
            separate_range(&config, Range::new(70.0, 30.0)),
            Range::new(30.0, 70.0)
        );
    }

    #[test]
    fn test_connector_spans_knob_centers() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(20.0, 60.0));
        let connector = slider.connector();
        assert!((connector.x0 - 25.0).abs() < 1e-9);
        assert!((connector.x1 - 65.0).abs() < 1e-9);
        assert!((connector.center().y - 10.0).abs() < 1e-9);
        assert!((connector.height() - DEFAULT_CONNECTOR_THICKNESS).abs() < 1e-9);
    }

    #[test]
    fn test_closest_handle_routing() {
        // Track length 100, knobs 10 wide at 0 and 80.
        let mut slider = RangeSlider::new();
        slider.set_extent(Size::new(100.0, 20.0));
        slider.attach(
            NodeFrame::new(KNOB),
            NodeFrame::new(KNOB).at(Point::new(80.0, 0.0)),
        );
        slider.confirm_layout();

        slider.handle_drag(DragEvent::start(5.0, 0.0));
        assert_eq!(slider.dragged_handle(), Some(HandleKind::Min));
        slider.handle_drag(DragEvent::end(5.0, 0.0));
        assert_eq!(slider.dragged_handle(), None);

        slider.handle_drag(DragEvent::start(75.0, 0.0));
        assert_eq!(slider.dragged_handle(), Some(HandleKind::Max));
        // Dragging past the min knob keeps routing to the max knob.
        slider.handle_drag(DragEvent::drag(2.0, 0.0));
        assert_eq!(slider.dragged_handle(), Some(HandleKind::Max));
        assert_eq!(slider.max_knob().unwrap().x(), 10.0);
        assert_eq!(slider.min_knob().unwrap().x(), 0.0);
        slider.handle_drag(DragEvent::end(2.0, 0.0));
        assert_eq!(slider.dragged_handle(), None);
    }

    #[test]
    fn test_drag_start_does_not_move() {
        let mut slider = rendered_at(TrackConfig::default(), 20.0, 60.0);
        slider.handle_drag(DragEvent::start(40.0, 0.0));
        assert_eq!(slider.min_knob().unwrap().x(), 20.0);
        assert_eq!(slider.max_knob().unwrap().x(), 60.0);
    }

    #[test]
    fn test_drag_without_selection_is_ignored() {
        let mut slider = rendered_at(TrackConfig::default(), 20.0, 60.0);
        slider.handle_drag(DragEvent::drag(90.0, 0.0));
        assert_eq!(slider.max_knob().unwrap().x(), 60.0);
    }

    #[test]
    fn test_min_knob_stops_at_max_knob() {
        let mut slider = rendered_at(TrackConfig::default(), 0.0, 50.0);
        slider.handle_drag(DragEvent::start(0.0, 0.0));
        slider.handle_drag(DragEvent::drag(95.0, 0.0));
        assert_eq!(slider.min_knob().unwrap().x(), 40.0);
        assert_not_crossed(&slider);
    }

    #[test]
    fn test_max_knob_stops_at_track_end() {
        let mut slider = rendered_at(TrackConfig::default(), 0.0, 50.0);
        slider.handle_drag(DragEvent::start(50.0, 0.0));
        slider.handle_drag(DragEvent::end(400.0, 0.0));
        assert_eq!(slider.max_knob().unwrap().x(), 100.0);
        assert_eq!(slider.range().unwrap().max, 100.0);
    }

    #[test]
    fn test_knobs_never_cross_under_random_drags() {
        let mut slider = rendered_at(TrackConfig::default(), 0.0, 80.0);
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 1400) as f64 / 10.0 - 20.0
        };

        for _ in 0..200 {
            slider.handle_drag(DragEvent::start(next(), 0.0));
            for _ in 0..5 {
                slider.handle_drag(DragEvent::drag(next(), 0.0));
                assert_not_crossed(&slider);
            }
            slider.handle_drag(DragEvent::end(next(), 0.0));
            assert_not_crossed(&slider);
        }
    }

    #[test]
    fn test_increment_and_decrement_endpoints() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(20.0, 60.0));
        slider.increment_min_value();
        slider.decrement_max_value();
        assert_eq!(slider.range(), Some(Range::new(21.0, 59.0)));
        slider.decrement_min_value();
        slider.increment_max_value();
        assert_eq!(slider.range(), Some(Range::new(20.0, 60.0)));
    }

    #[test]
    fn test_increment_min_into_max_stays_separated() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(59.0, 60.0));
        slider.increment_min_value();
        assert_eq!(slider.range(), Some(Range::new(60.0, 61.0)));
    }

    #[test]
    fn test_adjust_before_attach_uses_pending() {
        let mut slider = RangeSlider::new();
        slider.set_extent(Size::new(110.0, 20.0));
        slider.increment_min_value();
        slider.set_range(Range::new(10.0, 20.0));
        slider.increment_max_value();
        slider.attach(NodeFrame::new(KNOB), NodeFrame::new(KNOB));
        slider.confirm_layout();
        assert_eq!(slider.range(), Some(Range::new(10.0, 21.0)));
    }

    #[test]
    fn test_range_signal_fires_on_change_only() {
        let mut slider = rendered(TrackConfig::default());
        let count = counter(&mut slider);
        slider.set_range(Range::new(20.0, 60.0));
        assert_eq!(count.get(), 1);
        slider.set_range(Range::new(20.0, 60.0));
        assert_eq!(count.get(), 1);

        slider.handle_drag(DragEvent::start(25.0, 0.0));
        slider.handle_drag(DragEvent::drag(25.2, 0.0));
        assert_eq!(count.get(), 1);
        slider.handle_drag(DragEvent::end(45.0, 0.0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_resize_keeps_range() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(25.0, 75.0));
        slider.set_extent(Size::new(210.0, 20.0));
        assert_eq!(slider.range(), Some(Range::new(25.0, 75.0)));
        assert!((slider.max_knob().unwrap().x() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_change_keeps_separation() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(41.0, 44.0));
        slider.set_increment(10.0).unwrap();
        assert_eq!(slider.range(), Some(Range::new(40.0, 50.0)));
    }

    #[test]
    fn test_drag_overlapping_knobs_stays_on_track() {
        let mut slider = rendered(TrackConfig::default());
        slider.set_range(Range::new(0.0, 1.0));
        assert!((slider.max_knob().unwrap().x() - 1.0).abs() < 1e-9);

        slider.handle_drag(DragEvent::start(0.0, 0.0));
        assert_eq!(slider.dragged_handle(), Some(HandleKind::Min));
        slider.handle_drag(DragEvent::drag(3.0, 0.0));
        assert_eq!(slider.min_knob().unwrap().x(), 0.0);
        assert_eq!(slider.range(), Some(Range::new(0.0, 1.0)));
    }

    #[test]
    fn test_degenerate_track_keeps_knobs_in_place() {
        let mut slider = RangeSlider::new();
        slider.set_extent(Size::new(10.0, 20.0));
        slider.attach(NodeFrame::new(KNOB), NodeFrame::new(KNOB));
        slider.confirm_layout();
        assert_eq!(slider.max_position(), Some(0.0));

        slider.handle_drag(DragEvent::start(5.0, 0.0));
        assert_eq!(slider.dragged_handle(), Some(HandleKind::Max));
        slider.handle_drag(DragEvent::drag(8.0, 0.0));
        slider.handle_drag(DragEvent::end(-4.0, 0.0));
        assert_eq!(slider.min_knob().unwrap().x(), 0.0);
        assert_eq!(slider.max_knob().unwrap().x(), 0.0);
        assert_eq!(slider.range(), Some(Range::new(0.0, 0.0)));
    }
}
