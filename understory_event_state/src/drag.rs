// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas, total offsets and release velocity.
//!
//! ## Usage
//!
//! 1) Start a drag operation by calling [`DragState::start`] with the initial
//!    position and a timestamp in milliseconds.
//! 2) On each move event, call [`DragState::update`] to get the movement delta
//!    since the last update. Each update is also kept as a velocity sample.
//! 3) Call [`DragState::total_offset`] for the cumulative offset from the start.
//! 4) When the tracked point jumps for reasons other than motion (a finger
//!    joins or leaves a multi‑touch centroid), call [`DragState::rebase`] so
//!    the jump is neither reported as a delta nor counted as velocity.
//! 5) On release, [`DragState::velocity`] estimates the release velocity over
//!    a trailing time window; then end the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start dragging at (10, 20) at t = 0 ms.
//! drag.start(Point::new(10.0, 20.0), 0);
//! assert!(drag.is_dragging());
//!
//! // Move to (15, 25) at t = 10 ms: delta is (5, 5).
//! let delta = drag.update(Point::new(15.0, 25.0), 10).unwrap();
//! assert_eq!(delta.x, 5.0);
//!
//! // 5 px over 10 ms is 0.5 px/ms.
//! let v = drag.velocity(10, 100).unwrap();
//! assert_eq!(v.x, 0.5);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Maximum number of retained velocity samples.
const MAX_SAMPLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    pos: Point,
    time: u64,
}

/// Tracks drag state for move event processing.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Start position of the drag operation.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag.
    pub last_pos: Option<Point>,
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(&mut self, pos: Point, time: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.samples.clear();
        self.samples.push(Sample { pos, time });
    }

    /// Update the drag state with a new position, returning the movement delta
    /// since the last update.
    pub fn update(&mut self, pos: Point, time: u64) -> Option<Vec2> {
        self.start_pos?;
        self.record(pos, time);
        self.last_pos.replace(pos).map(|last| pos - last)
    }

    /// Moves the tracked point to `pos` without producing a delta.
    ///
    /// The start position and every velocity sample are shifted by the same
    /// jump, so offsets and velocity stay continuous.
    pub fn rebase(&mut self, pos: Point) {
        let Some(last) = self.last_pos else {
            return;
        };
        let shift = pos - last;
        self.start_pos = self.start_pos.map(|s| s + shift);
        for sample in &mut self.samples {
            sample.pos += shift;
        }
        self.last_pos = Some(pos);
    }

    /// Get total offset from drag start position.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Estimates the velocity, in units per millisecond, at time `now`.
    ///
    /// The estimate is the displacement from the oldest sample no older than
    /// `window_ms` to the last position, divided by the elapsed time. Returns
    /// `None` when not dragging or when no sample inside the window is older
    /// than `now`.
    #[must_use]
    pub fn velocity(&self, now: u64, window_ms: u64) -> Option<Vec2> {
        let last = self.last_pos?;
        let cutoff = now.saturating_sub(window_ms);
        let sample = self.samples.iter().find(|s| s.time >= cutoff)?;
        let elapsed = now.checked_sub(sample.time).filter(|&dt| dt > 0)?;
        Some((last - sample.pos) / elapsed as f64)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.samples.clear();
    }

    /// Returns `true` while a drag operation is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    fn record(&mut self, pos: Point, time: u64) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(Sample { pos, time });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_is_not_dragging() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn update_returns_delta_when_dragging() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0), 0);

        let new_pos = Point::new(15.0, 25.0);
        assert_eq!(drag.update(new_pos, 5), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.last_pos, Some(new_pos));
    }

    #[test]
    fn update_returns_none_when_not_dragging() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(15.0, 25.0), 0), None);
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn multiple_updates_track_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0), 0);

        assert_eq!(drag.update(Point::new(5.0, 3.0), 1), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0), 2), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.total_offset(Point::new(8.0, 7.0)), Some(Vec2::new(8.0, 7.0)));
    }

    #[test]
    fn rebase_hides_jumps() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0), 0);
        drag.update(Point::new(10.0, 0.0), 10);

        // A second finger lands and the centroid jumps by (50, 50).
        drag.rebase(Point::new(60.0, 50.0));
        assert_eq!(drag.total_offset(Point::new(60.0, 50.0)), Some(Vec2::new(10.0, 0.0)));

        assert_eq!(drag.update(Point::new(70.0, 50.0), 20), Some(Vec2::new(10.0, 0.0)));
        let v = drag.velocity(20, 100).unwrap();
        assert_eq!(v, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn velocity_uses_trailing_window() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0), 0);
        // Slow start, then a fast flick in the last 100 ms.
        drag.update(Point::new(10.0, 0.0), 500);
        drag.update(Point::new(60.0, 0.0), 550);
        drag.update(Point::new(110.0, 0.0), 600);

        let v = drag.velocity(600, 100).unwrap();
        assert_eq!(v, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn velocity_requires_elapsed_time() {
        let mut drag = DragState::default();
        assert_eq!(drag.velocity(0, 100), None);

        drag.start(Point::new(0.0, 0.0), 40);
        assert_eq!(drag.velocity(40, 100), None);

        // Everything is older than the window.
        drag.update(Point::new(5.0, 0.0), 50);
        assert_eq!(drag.velocity(1_000, 100), None);
    }

    #[test]
    fn sample_buffer_is_bounded() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO, 0);
        for i in 1..100_u32 {
            drag.update(Point::new(f64::from(i), 0.0), u64::from(i));
        }
        assert_eq!(drag.samples.len(), MAX_SAMPLES);
        let v = drag.velocity(99, 100).unwrap();
        assert_eq!(v.x, 1.0);
    }

    #[test]
    fn end_resets_drag_state() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0), 0);
        drag.update(Point::new(15.0, 25.0), 1);

        drag.end();

        assert!(drag.start_pos.is_none());
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.velocity(2, 100), None);
    }

    #[test]
    fn start_overwrites_previous_drag() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0), 0);
        drag.update(Point::new(10.0, 10.0), 1);

        let new_start = Point::new(50.0, 60.0);
        drag.start(new_start, 2);

        assert_eq!(drag.start_pos, Some(new_start));
        assert_eq!(drag.total_offset(Point::new(55.0, 65.0)), Some(Vec2::new(5.0, 5.0)));
    }
}
