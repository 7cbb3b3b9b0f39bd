// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per‑frame change detection.
//!
//! The tracker compares the transform at the end of each frame with the one
//! recorded at the end of the previous frame. Motion that stops produces a
//! single `MovedEnd` or `ZoomedEnd`, and any change marks the view dirty until
//! the host clears it.

use kurbo::Vec2;
use understory_view2d::ViewTransform;

use crate::event::ViewportEvent;

#[derive(Debug, Clone)]
pub(crate) struct FrameTracker {
    last_pan: Vec2,
    last_scale: Vec2,
    moving: bool,
    zooming: bool,
    dirty: bool,
}

impl FrameTracker {
    pub(crate) fn new(view: &ViewTransform) -> Self {
        Self {
            last_pan: view.pan(),
            last_scale: view.scale(),
            moving: false,
            zooming: false,
            dirty: true,
        }
    }

    /// Closes a frame, queueing end‑of‑motion events and then `FrameEnd`.
    pub(crate) fn end_frame(&mut self, view: &ViewTransform, events: &mut Vec<ViewportEvent>) {
        let pan = view.pan();
        let scale = view.scale();
        let moved = pan != self.last_pan;
        let zoomed = scale != self.last_scale;

        if moved {
            self.moving = true;
        } else if self.moving {
            self.moving = false;
            events.push(ViewportEvent::MovedEnd);
        }
        if zoomed {
            self.zooming = true;
        } else if self.zooming {
            self.zooming = false;
            events.push(ViewportEvent::ZoomedEnd);
        }

        self.dirty |= moved || zoomed;
        self.last_pan = pan;
        self.last_scale = scale;
        events.push(ViewportEvent::FrameEnd);
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.moving
    }

    pub(crate) fn is_zooming(&self) -> bool {
        self.zooming
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;

    #[test]
    fn motion_end_fires_once_after_motion_stops() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        let mut tracker = FrameTracker::new(&view);
        let mut events = Vec::new();

        tracker.end_frame(&view, &mut events);
        assert_eq!(events, [ViewportEvent::FrameEnd]);

        events.clear();
        view.pan_by(Vec2::new(3.0, 0.0));
        tracker.end_frame(&view, &mut events);
        assert!(tracker.is_moving());
        assert_eq!(events, [ViewportEvent::FrameEnd]);

        events.clear();
        tracker.end_frame(&view, &mut events);
        assert_eq!(events, [ViewportEvent::MovedEnd, ViewportEvent::FrameEnd]);

        events.clear();
        tracker.end_frame(&view, &mut events);
        assert_eq!(events, [ViewportEvent::FrameEnd]);
    }

    #[test]
    fn zoom_end_and_dirty() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        let mut tracker = FrameTracker::new(&view);
        let mut events = Vec::new();
        tracker.set_dirty(false);

        view.set_scale(Vec2::new(2.0, 2.0));
        tracker.end_frame(&view, &mut events);
        assert!(tracker.is_zooming());
        assert!(tracker.is_dirty());

        tracker.set_dirty(false);
        events.clear();
        tracker.end_frame(&view, &mut events);
        assert!(!tracker.is_zooming());
        assert!(!tracker.is_dirty());
        assert_eq!(events, [ViewportEvent::ZoomedEnd, ViewportEvent::FrameEnd]);
    }
}
