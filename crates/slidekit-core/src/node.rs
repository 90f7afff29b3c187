//! Positionable node capability supplied by the rendering host.

use kurbo::{Point, Rect, Size};

/// Something the host can place and size.
///
/// Tracks and handles hold one of these rather than being scene nodes
/// themselves. Positions are relative to the owning widget.
pub trait PositionableNode {
    /// Top-left corner.
    fn position(&self) -> Point;
    /// Move the top-left corner.
    fn set_position(&mut self, position: Point);
    /// Width and height.
    fn extent(&self) -> Size;
    /// Resize.
    fn set_extent(&mut self, extent: Size);

    /// Bounding rectangle.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.extent())
    }

    /// Center point.
    fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Plain in-memory node, used when the host keeps no retained scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeFrame {
    pub position: Point,
    pub extent: Size,
}

impl NodeFrame {
    /// Create a node of the given size at the origin.
    pub fn new(extent: Size) -> Self {
        Self {
            position: Point::ZERO,
            extent,
        }
    }

    /// Builder: place the node.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

impl PositionableNode for NodeFrame {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn extent(&self) -> Size {
        self.extent
    }

    fn set_extent(&mut self, extent: Size) {
        self.extent = extent;
    }
}

impl<N: PositionableNode + ?Sized> PositionableNode for Box<N> {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn set_position(&mut self, position: Point) {
        (**self).set_position(position)
    }

    fn extent(&self) -> Size {
        (**self).extent()
    }

    fn set_extent(&mut self, extent: Size) {
        (**self).set_extent(extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bounds_and_center() {
        let node = NodeFrame::new(Size::new(10.0, 20.0)).at(Point::new(5.0, 0.0));
        assert_eq!(node.bounds(), Rect::new(5.0, 0.0, 15.0, 20.0));
        assert_eq!(node.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_boxed_node_delegates() {
        let mut node: Box<dyn PositionableNode> = Box::new(NodeFrame::default());
        node.set_position(Point::new(3.0, 4.0));
        node.set_extent(Size::new(1.0, 2.0));
        assert_eq!(node.position(), Point::new(3.0, 4.0));
        assert_eq!(node.extent(), Size::new(1.0, 2.0));
    }
}
