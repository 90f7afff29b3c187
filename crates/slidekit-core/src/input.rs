//! Pointer input and drag gesture tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer event in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Stage of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    /// Primary button pressed on the widget.
    Press,
    /// First movement while pressed.
    Start,
    /// Subsequent movement while pressed.
    Drag,
    /// Button released after dragging.
    End,
}

/// Pointer event relative to a widget's track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub phase: DragPhase,
    /// Pointer position relative to the track's top-left corner.
    pub position: Point,
}

impl DragEvent {
    pub fn new(phase: DragPhase, position: Point) -> Self {
        Self { phase, position }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::new(DragPhase::Press, Point::new(x, y))
    }

    pub fn start(x: f64, y: f64) -> Self {
        Self::new(DragPhase::Start, Point::new(x, y))
    }

    pub fn drag(x: f64, y: f64) -> Self {
        Self::new(DragPhase::Drag, Point::new(x, y))
    }

    pub fn end(x: f64, y: f64) -> Self {
        Self::new(DragPhase::End, Point::new(x, y))
    }
}

/// Turns raw pointer events into drag events for one widget.
///
/// Only the left button drives gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    /// Track origin in host coordinates.
    origin: Point,
    pressed: bool,
    dragging: bool,
    /// Where the current press began (track-relative).
    press_position: Option<Point>,
    last_position: Point,
}

impl GestureTracker {
    /// Create a tracker for a track whose top-left corner sits at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Update the track origin (e.g. after the host re-laid the widget out).
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn to_local(&self, position: Point) -> Point {
        position - self.origin.to_vec2()
    }

    /// Process a pointer event, returning the drag event it produces, if any.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<DragEvent> {
        match event {
            PointerEvent::Down { position, button } if button == MouseButton::Left => {
                let local = self.to_local(position);
                self.pressed = true;
                self.dragging = false;
                self.press_position = Some(local);
                self.last_position = local;
                Some(DragEvent::new(DragPhase::Press, local))
            }
            PointerEvent::Move { position } if self.pressed => {
                let local = self.to_local(position);
                self.last_position = local;
                let phase = if self.dragging {
                    DragPhase::Drag
                } else {
                    self.dragging = true;
                    DragPhase::Start
                };
                log::trace!("Gesture {:?} at {:?}", phase, local);
                Some(DragEvent::new(phase, local))
            }
            PointerEvent::Up { position, button } if button == MouseButton::Left => {
                let local = self.to_local(position);
                let was_dragging = self.dragging;
                self.pressed = false;
                self.dragging = false;
                self.press_position = None;
                self.last_position = local;
                was_dragging.then(|| DragEvent::new(DragPhase::End, local))
            }
            _ => None,
        }
    }

    /// Pointer displacement since the press, if pressed.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.press_position.map(|start| self.last_position - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_full_gesture() {
        let mut tracker = GestureTracker::new(Point::new(100.0, 50.0));

        let press = tracker.handle_pointer_event(down(110.0, 55.0)).unwrap();
        assert_eq!(press, DragEvent::press(10.0, 5.0));
        assert!(!tracker.is_dragging());

        let start = tracker.handle_pointer_event(moved(120.0, 55.0)).unwrap();
        assert_eq!(start.phase, DragPhase::Start);
        assert!(tracker.is_dragging());

        let drag = tracker.handle_pointer_event(moved(130.0, 60.0)).unwrap();
        assert_eq!(drag, DragEvent::drag(30.0, 10.0));

        let delta = tracker.drag_delta().unwrap();
        assert!((delta.x - 20.0).abs() < f64::EPSILON);
        assert!((delta.y - 5.0).abs() < f64::EPSILON);

        let end = tracker.handle_pointer_event(up(140.0, 60.0)).unwrap();
        assert_eq!(end, DragEvent::end(40.0, 10.0));
        assert!(!tracker.is_dragging());
        assert!(tracker.drag_delta().is_none());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut tracker = GestureTracker::default();
        assert!(tracker.handle_pointer_event(moved(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_click_without_drag_has_no_end() {
        let mut tracker = GestureTracker::default();
        assert!(tracker.handle_pointer_event(down(5.0, 5.0)).is_some());
        assert!(tracker.handle_pointer_event(up(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_right_button_ignored() {
        let mut tracker = GestureTracker::default();
        let event = PointerEvent::Down {
            position: Point::new(1.0, 1.0),
            button: MouseButton::Right,
        };
        assert!(tracker.handle_pointer_event(event).is_none());
        assert!(tracker.handle_pointer_event(moved(2.0, 2.0)).is_none());
    }
}
