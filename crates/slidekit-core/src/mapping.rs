//! Bidirectional mapping between the value domain and handle positions.

use crate::config::TrackConfig;

/// Spans shorter than this are treated as zero-length tracks.
pub const DEGENERATE_SPAN: f64 = 1e-9;

/// Round half-up, so ties always move toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Snap a value to the nearest multiple of `increment`.
pub fn snap_to_increment(value: f64, increment: f64) -> f64 {
    round_half_up(value / increment) * increment
}

/// Position interval available to a handle's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Leftmost handle position.
    pub min_pos: f64,
    /// Rightmost handle position (the right edge then touches the track end).
    pub max_pos: f64,
}

impl TrackGeometry {
    /// Geometry for a track of `track_length` carrying a handle of `handle_width`.
    ///
    /// A handle wider than the track yields a zero-length span.
    pub fn new(track_length: f64, handle_width: f64) -> Self {
        let min_pos = 0.0;
        Self {
            min_pos,
            max_pos: (track_length - handle_width).max(min_pos),
        }
    }

    /// Length of the usable position span.
    pub fn span(&self) -> f64 {
        self.max_pos - self.min_pos
    }

    /// Whether the track has no usable span.
    pub fn is_degenerate(&self) -> bool {
        self.span().abs() < DEGENERATE_SPAN
    }

    /// Clamp a position into the track.
    pub fn clamp(&self, x: f64) -> f64 {
        x.min(self.max_pos).max(self.min_pos)
    }
}

/// Value mapping for a track's current configuration and geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMapping {
    pub config: TrackConfig,
    pub geometry: TrackGeometry,
}

impl ValueMapping {
    pub fn new(config: TrackConfig, geometry: TrackGeometry) -> Self {
        Self { config, geometry }
    }

    /// Snap to an increment, then clamp into the domain.
    pub fn normalize_value(&self, value: f64) -> f64 {
        normalize_value(&self.config, value)
    }

    /// Handle position representing `value`.
    pub fn position_for_value(&self, value: f64) -> f64 {
        let TrackGeometry { min_pos, max_pos } = self.geometry;
        if value >= self.config.max_value() {
            return max_pos;
        }
        if value <= self.config.min_value() {
            return min_pos;
        }
        let value = self.normalize_value(value);
        (value - self.config.min_value()) / self.config.span() * (max_pos - min_pos) + min_pos
    }

    /// Value represented by a handle at `x`.
    ///
    /// A zero-length track always reads as the domain minimum.
    pub fn value_for_position(&self, x: f64) -> f64 {
        if self.geometry.is_degenerate() {
            return self.config.min_value();
        }
        let proportion = (x - self.geometry.min_pos) / self.geometry.span();
        self.normalize_value(proportion * self.config.span() + self.config.min_value())
    }
}

/// Snap to an increment, then clamp into the configured domain.
pub fn normalize_value(config: &TrackConfig, value: f64) -> f64 {
    snap_to_increment(value, config.increment())
        .min(config.max_value())
        .max(config.min_value())
}
