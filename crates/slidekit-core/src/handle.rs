//! Draggable handles (knobs) on a slider track.

use std::fmt;

use kurbo::{Point, Rect, Size};

use crate::node::PositionableNode;

/// Which endpoint a handle represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// The only handle of a single-value slider.
    Value,
    /// Lower handle of a range slider.
    Min,
    /// Upper handle of a range slider.
    Max,
}

/// Legal interval for a handle's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInterval {
    pub min: f64,
    pub max: f64,
}

impl PositionInterval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into the interval. If the interval is inverted, `max` wins.
    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.min).min(self.max)
    }

    /// Pull both ends inside `outer`, so any clamped position stays in `outer`
    /// even when this interval is inverted.
    pub fn within(&self, outer: PositionInterval) -> Self {
        Self {
            min: outer.clamp(self.min),
            max: outer.clamp(self.max),
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

/// A handle owns only its position; everything else is read from the track.
pub struct Handle {
    kind: HandleKind,
    node: Box<dyn PositionableNode>,
}

impl Handle {
    /// Wrap a host node as a handle. The node is moved onto the track's axis.
    pub fn new(kind: HandleKind, node: impl PositionableNode + 'static) -> Self {
        let mut handle = Self {
            kind,
            node: Box::new(node),
        };
        let x = handle.x();
        handle.set_x(x);
        handle
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.node.position().x
    }

    /// Top-left corner (y is always 0).
    pub fn position(&self) -> Point {
        self.node.position()
    }

    pub fn width(&self) -> f64 {
        self.node.extent().width
    }

    pub fn extent(&self) -> Size {
        self.node.extent()
    }

    pub fn set_extent(&mut self, extent: Size) {
        self.node.set_extent(extent);
    }

    pub fn bounds(&self) -> Rect {
        self.node.bounds()
    }

    pub fn center(&self) -> Point {
        self.node.center()
    }

    /// Move the left edge. The vertical position is pinned to 0.
    pub fn set_x(&mut self, x: f64) {
        self.node.set_position(Point::new(x, 0.0));
    }

    /// Move so the handle is centered on `pointer_x`, then clamp into `interval`.
    pub fn drag_to(&mut self, pointer_x: f64, interval: PositionInterval) -> f64 {
        let x = interval.clamp(pointer_x - self.width() / 2.0);
        self.set_x(x);
        x
    }

    /// Distance from `point` to the handle's position.
    pub fn distance_to(&self, point: Point) -> f64 {
        self.position().distance(point)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds())
            .finish()
    }
}
