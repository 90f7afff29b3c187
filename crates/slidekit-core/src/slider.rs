//! Single-handle slider: one knob on a track exposing a scalar value.

use kurbo::Size;

use crate::config::{ConfigResult, RawTrackConfig, TrackConfig, DEFAULT_VALUE};
use crate::handle::{Handle, HandleKind, PositionInterval};
use crate::input::{DragEvent, DragPhase};
use crate::layout::LayoutGate;
use crate::mapping::ValueMapping;
use crate::node::PositionableNode;
use crate::signal::{ChangeNotifier, NotifyPolicy, Signal, UpdateKind};
use crate::track::Track;

/// A slider with a single knob.
///
/// The value is never stored: it is read back from the knob position every
/// time. Before a knob is attached, [`Slider::value`] reports the normalized
/// middle of the domain.
#[derive(Debug)]
pub struct Slider {
    track: Track,
    knob: Option<Handle>,
    gate: LayoutGate<f64>,
    notifier: ChangeNotifier<f64>,
    value_changed: Signal,
}

impl Default for Slider {
    fn default() -> Self {
        Self::with_track(Track::new(TrackConfig::default()))
    }
}

impl Slider {
    /// Create a slider with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slider with a validated configuration.
    pub fn with_config(config: TrackConfig) -> Self {
        Self::with_track(Track::new(config))
    }

    /// Create a slider over an existing track.
    pub fn with_track(track: Track) -> Self {
        Self {
            track,
            knob: None,
            gate: LayoutGate::new(),
            notifier: ChangeNotifier::default(),
            value_changed: Signal::new(),
        }
    }

    /// Create a slider from a possibly incomplete configuration.
    ///
    /// Missing fields are repaired; a full reset also resets the value.
    pub fn from_raw_config(raw: RawTrackConfig) -> Self {
        let repaired = raw.repair();
        let mut slider = Self::with_config(repaired.config);
        if repaired.reset {
            let value = slider.track.normalize_value(DEFAULT_VALUE);
            slider.write_value(value);
        }
        slider
    }

    /// Builder: choose when `value_changed` fires.
    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notifier.set_policy(policy);
        self
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn config(&self) -> &TrackConfig {
        self.track.config()
    }

    pub fn knob(&self) -> Option<&Handle> {
        self.knob.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.knob.is_some()
    }

    pub fn is_rendered(&self) -> bool {
        self.gate.is_rendered()
    }

    /// Signal fired when the value changes. Listeners re-read [`Slider::value`].
    pub fn value_changed(&mut self) -> &mut Signal {
        &mut self.value_changed
    }

    /// Attach the host's knob node.
    pub fn attach(&mut self, knob: impl PositionableNode + 'static) {
        self.knob = Some(Handle::new(HandleKind::Value, knob));
        let value = self.value();
        self.notifier.reset(Some(value));
    }

    /// Host notification that the widget has been laid out.
    ///
    /// Applies any value set before layout. Without a knob there is nothing to
    /// lay out yet, so queued writes keep waiting.
    pub fn confirm_layout(&mut self) {
        if self.knob.is_none() {
            log::debug!("Layout confirmed before a knob was attached; deferring");
            return;
        }
        if let Some(value) = self.gate.confirm() {
            log::debug!("Applying deferred value {}", value);
            self.place_knob(value);
            self.publish(UpdateKind::Settled);
        }
    }

    fn mapping(&self) -> Option<ValueMapping> {
        self.knob.as_ref().map(|knob| self.track.mapping(knob.width()))
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        match (&self.knob, self.mapping()) {
            (Some(knob), Some(mapping)) => mapping.value_for_position(knob.x()),
            _ => self.track.midpoint(),
        }
    }

    /// The value a reader will see once pending writes are applied.
    fn effective_value(&self) -> f64 {
        match self.gate.pending() {
            Some(&pending) => pending,
            None => self.value(),
        }
    }

    /// The value the knob is known to land on, if any. Before layout with no
    /// queued write, the knob position is still up to the host.
    fn settled_value(&self) -> Option<f64> {
        match self.gate.pending() {
            Some(&pending) => Some(pending),
            None if self.is_rendered() => Some(self.value()),
            None => None,
        }
    }

    /// Set the value. Out-of-range and unaligned values are normalized.
    ///
    /// Before layout the write is queued and applied by [`Slider::confirm_layout`].
    pub fn set_value(&mut self, value: f64) {
        if self.settled_value() == Some(value) {
            return;
        }
        let value = self.track.normalize_value(value);
        self.write_value(value);
    }

    /// Place the knob for an already-normalized value, deferred until layout.
    fn write_value(&mut self, value: f64) {
        if let Some(value) = self.gate.when_rendered(value) {
            self.place_knob(value);
            self.publish(UpdateKind::Settled);
        }
    }

    pub fn increment_value(&mut self) {
        let value = self.effective_value() + self.config().increment();
        self.set_value(value);
    }

    pub fn decrement_value(&mut self) {
        let value = self.effective_value() - self.config().increment();
        self.set_value(value);
    }

    /// Move the knob in response to pointer input on the track.
    pub fn handle_drag(&mut self, event: DragEvent) {
        let Some(mapping) = self.mapping() else {
            log::trace!("Ignoring {:?} on a slider without a knob", event.phase);
            return;
        };
        let interval = PositionInterval::new(mapping.geometry.min_pos, mapping.geometry.max_pos);
        if let Some(knob) = self.knob.as_mut() {
            knob.drag_to(event.position.x, interval);
        }
        let kind = match event.phase {
            DragPhase::Press | DragPhase::End => UpdateKind::Settled,
            DragPhase::Start | DragPhase::Drag => UpdateKind::Tick,
        };
        self.publish(kind);
    }

    /// Resize the widget, keeping the knob at the same value.
    pub fn set_extent(&mut self, extent: Size) {
        if self.track.extent() == extent {
            return;
        }
        self.relayout(|slider| slider.track.set_extent(extent));
    }

    /// Resize the knob, keeping it at the same value.
    pub fn set_handle_size(&mut self, size: Size) {
        if self.knob.as_ref().is_some_and(|knob| knob.extent() == size) {
            return;
        }
        self.relayout(|slider| {
            if let Some(knob) = slider.knob.as_mut() {
                knob.set_extent(size);
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

    /// Apply a geometry or configuration change, then put the knob back at
    /// its previous value (normalized under the new configuration).
    fn relayout(&mut self, change: impl FnOnce(&mut Self)) {
        let keep = (self.is_attached() && self.is_rendered()).then(|| self.value());
        change(self);
        if let Some(value) = keep {
            let value = self.track.normalize_value(value);
            self.place_knob(value);
            self.publish(UpdateKind::Settled);
        }
    }

    fn place_knob(&mut self, value: f64) {
        let Some(mapping) = self.mapping() else {
            return;
        };
        if let Some(knob) = self.knob.as_mut() {
            knob.set_x(mapping.position_for_value(value));
        }
    }

    fn publish(&mut self, kind: UpdateKind) {
        if self.knob.is_none() {
            return;
        }
        let value = self.value();
        if self.notifier.observe(value, kind) {
            self.value_changed.fire();
        }
    }
}
