// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two‑finger zoom.

use kurbo::{Point, Vec2};
use serde::Deserialize;
use tracing::trace;
use understory_event_state::pointer::PointerId;

use crate::event::ViewportEvent;
use crate::input::PointerEvent;
use crate::options::Direction;
use crate::plugin::{Activity, Context, Hooks, Outcome, PluginKind};

/// Smallest finger distance used as a baseline.
const MIN_DISTANCE: f64 = 1e-10;

/// Options for [`Pinch`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PinchOptions {
    /// Zoom about the fingers without panning along with them.
    pub no_drag: bool,
    /// Zoom sensitivity; `1` tracks the fingers exactly.
    pub percent: f64,
    /// Multiplier for the pan that follows the finger midpoint.
    pub factor: f64,
    /// Keep this world point centered instead of zooming about the fingers.
    pub center: Option<Point>,
    /// Axes that zoom.
    pub axis: Direction,
}

impl Default for PinchOptions {
    fn default() -> Self {
        Self {
            no_drag: false,
            percent: 1.0,
            factor: 1.0,
            center: None,
            axis: Direction::All,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    fingers: [PointerId; 2],
    distance: f64,
    scale: Vec2,
    midpoint: Point,
}

/// Zooms with two pointers, taking them over from [`Drag`](super::Drag).
#[derive(Debug, Clone)]
pub struct Pinch {
    options: PinchOptions,
    gesture: Option<Gesture>,
}

impl Pinch {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: PinchOptions) -> Self {
        Self {
            options,
            gesture: None,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &PinchOptions {
        &self.options
    }

    /// Returns `true` while two pointers are pinching.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    fn fingers(cx: &Context<'_>, ids: [PointerId; 2]) -> Option<(Point, Point)> {
        let a = cx.pointers.get(ids[0])?.position;
        let b = cx.pointers.get(ids[1])?.position;
        Some((a, b))
    }

    fn end(&mut self, cx: &mut Context<'_>) {
        if self.gesture.take().is_some() {
            cx.pointers.release_all(PluginKind::Pinch);
            cx.emit(ViewportEvent::PinchEnd);
            trace!("pinch end");
        }
    }
}

impl Hooks for Pinch {
    fn down(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if self.gesture.is_some() || cx.pointers.len() < 2 {
            return Outcome::Continue;
        }
        let (first, second) = {
            let mut ids = cx.pointers.iter().map(|p| p.id);
            match (ids.next(), ids.next()) {
                (Some(first), Some(second)) => (first, second),
                _ => return Outcome::Continue,
            }
        };
        cx.pointers.transfer(first, PluginKind::Pinch);
        cx.pointers.transfer(second, PluginKind::Pinch);
        let Some((a, b)) = Self::fingers(cx, [first, second]) else {
            return Outcome::Continue;
        };
        self.gesture = Some(Gesture {
            fingers: [first, second],
            distance: (b - a).hypot().max(MIN_DISTANCE),
            scale: cx.view.scale(),
            midpoint: a.midpoint(b),
        });
        cx.emit(ViewportEvent::PinchStart);
        trace!("pinch start");
        Outcome::Handled
    }

    fn moved(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        let Some(gesture) = self.gesture.as_mut() else {
            return Outcome::Continue;
        };
        if !gesture.fingers.contains(&event.id) {
            return Outcome::Continue;
        }
        let Some((a, b)) = Self::fingers(cx, gesture.fingers) else {
            return Outcome::Continue;
        };
        let midpoint = a.midpoint(b);
        let ratio = (b - a).hypot().max(MIN_DISTANCE) / gesture.distance;
        let change = 1.0 + (ratio - 1.0) * self.options.percent;

        let mut scale = cx.view.scale();
        if self.options.axis.x() {
            scale.x = gesture.scale.x * change;
        }
        if self.options.axis.y() {
            scale.y = gesture.scale.y * change;
        }

        // With drag, the world point under the previous midpoint follows the
        // fingers; without, the one under the current midpoint stays put.
        let (from, to) = if self.options.no_drag {
            (midpoint, midpoint)
        } else {
            let to = gesture.midpoint + (midpoint - gesture.midpoint) * self.options.factor;
            (gesture.midpoint, to)
        };
        let anchor = cx.view.to_world(from);
        cx.view.set_scale(scale);
        cx.zoomed(PluginKind::Pinch);
        cx.clamp_zoom();

        if let Some(center) = self.options.center {
            cx.view.set_center(center);
        } else {
            let drifted = cx.view.to_screen(anchor);
            cx.view.pan_by(to - drifted);
        }
        gesture.midpoint = midpoint;
        cx.moved(PluginKind::Pinch);
        Outcome::Stop
    }

    fn up(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if cx.released_owner() != Some(PluginKind::Pinch) {
            return Outcome::Continue;
        }
        self.end(cx);
        Outcome::Handled
    }

    fn report(&self, activity: &mut Activity) {
        activity.pinching |= self.gesture.is_some();
    }
}
