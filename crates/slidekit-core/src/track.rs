//! The track: domain configuration plus the widget body it is laid out in.

use std::fmt;

use kurbo::Size;

use crate::config::{ConfigResult, TrackConfig};
use crate::mapping::{normalize_value, TrackGeometry, ValueMapping};
use crate::node::{NodeFrame, PositionableNode};

/// Domain bounds, increment, and the body node whose width is the track length.
pub struct Track {
    config: TrackConfig,
    body: Box<dyn PositionableNode>,
}

impl Track {
    /// Create a track over an unmeasured body.
    pub fn new(config: TrackConfig) -> Self {
        Self::with_body(config, NodeFrame::default())
    }

    /// Create a track over a host-supplied body node.
    pub fn with_body(config: TrackConfig, body: impl PositionableNode + 'static) -> Self {
        Self {
            config,
            body: Box::new(body),
        }
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TrackConfig) {
        self.config = config;
    }

    pub fn set_min_value(&mut self, min_value: f64) -> ConfigResult<()> {
        self.config = self.config.with_min_value(min_value)?;
        Ok(())
    }

    pub fn set_max_value(&mut self, max_value: f64) -> ConfigResult<()> {
        self.config = self.config.with_max_value(max_value)?;
        Ok(())
    }

    pub fn set_increment(&mut self, increment: f64) -> ConfigResult<()> {
        self.config = self.config.with_increment(increment)?;
        Ok(())
    }

    /// Widget extent as reported by the host.
    pub fn extent(&self) -> Size {
        self.body.extent()
    }

    pub fn set_extent(&mut self, extent: Size) {
        self.body.set_extent(extent);
    }

    /// Length of the draggable region.
    pub fn track_length(&self) -> f64 {
        self.body.extent().width.max(0.0)
    }

    /// Geometry for a handle of `handle_width`.
    pub fn geometry(&self, handle_width: f64) -> TrackGeometry {
        TrackGeometry::new(self.track_length(), handle_width)
    }

    /// Value mapping for a handle of `handle_width`.
    pub fn mapping(&self, handle_width: f64) -> ValueMapping {
        ValueMapping::new(self.config, self.geometry(handle_width))
    }

    pub fn normalize_value(&self, value: f64) -> f64 {
        normalize_value(&self.config, value)
    }

    /// Normalized middle of the domain.
    pub fn midpoint(&self) -> f64 {
        self.normalize_value((self.config.max_value() + self.config.min_value()) / 2.0)
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("config", &self.config)
            .field("extent", &self.extent())
            .finish()
    }
}
