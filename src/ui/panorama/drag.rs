// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks the pointer while the user drags the panorama around.

use iced::{Point, Vector};

/// Pixels the pointer may travel before a press counts as a drag.
const DRAG_THRESHOLD: f32 = 3.0;

#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Pointer position at the previous move event, while dragging.
    last_position: Option<Point>,

    /// Whether the pointer travelled beyond the click threshold.
    moved: bool,
}

impl DragState {
    pub fn start(&mut self, position: Point) {
        self.last_position = Some(position);
        self.moved = false;
    }

    pub fn stop(&mut self) {
        self.last_position = None;
        self.moved = false;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_position.is_some()
    }

    /// Movement since the previous call, or `None` when not dragging or
    /// still within the click threshold.
    pub fn advance(&mut self, position: Point) -> Option<Vector> {
        let last = self.last_position?;
        let delta = position - last;
        if !self.moved && delta.x.hypot(delta.y) < DRAG_THRESHOLD {
            return None;
        }
        self.moved = true;
        self.last_position = Some(position);
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let mut state = DragState::default();
        assert!(!state.is_dragging());
        assert!(state.advance(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn small_jitter_is_ignored() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        assert!(state.advance(Point::new(101.0, 51.0)).is_none());
    }

    #[test]
    fn advance_reports_incremental_deltas() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));

        assert_eq!(
            state.advance(Point::new(110.0, 50.0)),
            Some(Vector::new(10.0, 0.0))
        );
        // Once moving, even one pixel counts.
        assert_eq!(
            state.advance(Point::new(111.0, 49.0)),
            Some(Vector::new(1.0, -1.0))
        );
    }

    #[test]
    fn stop_drag_clears_state() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        state.stop();
        assert!(!state.is_dragging());
    }
}
