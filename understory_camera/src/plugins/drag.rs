// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer panning and wheel scrolling.
//!
//! Drag claims every pointer it accepts and pans by the movement of their
//! centroid, so a second finger landing or lifting never makes the view jump.
//! Panning starts once the centroid has moved past the viewport threshold on
//! an enabled axis. On release of the last pointer the recent velocity is
//! handed to [`Decelerate`](super::Decelerate) as a fling.

use kurbo::{Point, Vec2};
use serde::Deserialize;
use tracing::trace;
use understory_event_state::drag::DragState;
use understory_event_state::pointer::PointerKind;

use crate::event::ViewportEvent;
use crate::input::{Buttons, PointerEvent, WheelEvent};
use crate::options::{Direction, Underflow};
use crate::plugin::{Activity, Context, Hooks, Outcome, PluginKind, Signal};

/// Trailing window for the release velocity estimate.
const VELOCITY_WINDOW_MS: u64 = 100;

/// Options for [`Drag`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    /// Axes the drag pans.
    pub direction: Direction,
    /// Pan while a pointer is pressed and moved.
    pub press_drag: bool,
    /// Scroll with the wheel when wheel zoom is not active.
    pub wheel: bool,
    /// Multiplier for wheel scrolling.
    pub wheel_scroll: f64,
    /// Scroll with the wheel delta instead of against it.
    pub reverse: bool,
    /// Keep wheel scrolling inside the world.
    pub clamp_wheel: bool,
    /// Alignment when `clamp_wheel` meets a world smaller than the screen.
    pub underflow: Underflow,
    /// Multiplier for pointer movement.
    pub factor: f64,
    /// Mouse buttons that start a drag. Touch and pen always do.
    pub mouse_buttons: Buttons,
    /// Pixels per line for line‑mode wheel deltas.
    pub line_height: f64,
    /// Scroll vertically with horizontal deltas and vice versa.
    pub wheel_swap_axes: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            direction: Direction::All,
            press_drag: true,
            wheel: true,
            wheel_scroll: 1.0,
            reverse: false,
            clamp_wheel: false,
            underflow: Underflow::CENTER,
            factor: 1.0,
            mouse_buttons: Buttons::all(),
            line_height: 20.0,
            wheel_swap_axes: false,
        }
    }
}

/// Pans the view with pointer drags and wheel scrolls.
#[derive(Debug, Clone)]
pub struct Drag {
    options: DragOptions,
    state: DragState,
    moved: bool,
}

impl Drag {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            state: DragState::default(),
            moved: false,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Returns `true` once the drag has moved past the threshold.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.moved
    }

    fn mask(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            if self.options.direction.x() { v.x } else { 0.0 },
            if self.options.direction.y() { v.y } else { 0.0 },
        )
    }

    fn accepts(&self, event: &PointerEvent) -> bool {
        self.options.press_drag
            && (event.kind != PointerKind::Mouse
                || event.buttons.intersects(self.options.mouse_buttons))
    }

    fn begin(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> bool {
        if !cx.pointers.claim(event.id, PluginKind::Drag) {
            return false;
        }
        let Some(centroid) = cx.pointers.centroid(PluginKind::Drag) else {
            return false;
        };
        if self.state.is_dragging() {
            self.state.rebase(centroid);
        } else {
            self.state.start(centroid, event.timestamp);
            self.moved = false;
        }
        true
    }

    /// Ends the drag, emitting `DragEnd` if it had started panning.
    fn finish(&mut self, cx: &mut Context<'_>, at: Point) {
        if self.moved {
            let world = cx.to_world(at);
            cx.emit(ViewportEvent::DragEnd { screen: at, world });
            trace!(x = at.x, y = at.y, "drag end");
        }
        cx.pointers.release_all(PluginKind::Drag);
        self.state.end();
        self.moved = false;
    }

    /// Another plugin took every pointer this drag held.
    fn abandoned(&mut self, cx: &mut Context<'_>) -> bool {
        if self.state.is_dragging() && cx.pointers.owned_by(PluginKind::Drag).next().is_none() {
            let at = self.state.last_pos.unwrap_or_default();
            self.finish(cx, at);
            return true;
        }
        false
    }

    fn clamp_wheel(&self, cx: &mut Context<'_>) {
        let screen = cx.view.screen_size();
        let world = cx.view.world_size();
        let scale = cx.view.scale();
        let mut pan = cx.view.pan();
        let (mut halt_x, mut halt_y) = (false, false);

        if self.options.direction.x() {
            let content = world.width * scale.x;
            if content < screen.width {
                if let Some(align) = self.options.underflow.x() {
                    pan.x = align.offset(screen.width, content);
                }
            } else if pan.x > 0.0 {
                pan.x = 0.0;
                halt_x = true;
            } else if pan.x < screen.width - content {
                pan.x = screen.width - content;
                halt_x = true;
            }
        }
        if self.options.direction.y() {
            let content = world.height * scale.y;
            if content < screen.height {
                if let Some(align) = self.options.underflow.y() {
                    pan.y = align.offset(screen.height, content);
                }
            } else if pan.y > 0.0 {
                pan.y = 0.0;
                halt_y = true;
            } else if pan.y < screen.height - content {
                pan.y = screen.height - content;
                halt_y = true;
            }
        }
        cx.view.set_pan(pan);
        if halt_x || halt_y {
            cx.signal(Signal::Halt { x: halt_x, y: halt_y });
        }
    }
}

impl Hooks for Drag {
    fn down(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        if cx.activity.pinching || !self.accepts(event) {
            return Outcome::Continue;
        }
        if self.begin(cx, event) {
            Outcome::Handled
        } else {
            Outcome::Continue
        }
    }

    fn moved(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        if self.abandoned(cx) {
            return Outcome::Continue;
        }
        match cx.pointers.owner(event.id) {
            Some(PluginKind::Drag) => {}
            // A pointer left over from a pinch is adopted.
            None if !self.state.is_dragging()
                && !cx.activity.pinching
                && cx.pointers.get(event.id).is_some()
                && self.accepts(event) =>
            {
                self.begin(cx, event);
                return Outcome::Handled;
            }
            _ => return Outcome::Continue,
        }

        let Some(centroid) = cx.pointers.centroid(PluginKind::Drag) else {
            return Outcome::Continue;
        };
        let Some(delta) = self.state.update(centroid, event.timestamp) else {
            return Outcome::Continue;
        };

        let step = if self.moved {
            delta
        } else {
            let total = self.state.total_offset(centroid).unwrap_or_default();
            let crossed = (self.options.direction.x() && total.x.abs() >= cx.threshold)
                || (self.options.direction.y() && total.y.abs() >= cx.threshold);
            if !crossed {
                return Outcome::Continue;
            }
            self.moved = true;
            let world = cx.to_world(centroid);
            cx.emit(ViewportEvent::DragStart { screen: centroid, world });
            trace!(x = centroid.x, y = centroid.y, "drag start");
            total
        };

        cx.view.pan_by(self.mask(step) * self.options.factor);
        cx.moved(PluginKind::Drag);
        Outcome::Stop
    }

    fn up(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        if cx.released_owner() != Some(PluginKind::Drag) {
            self.abandoned(cx);
            return Outcome::Continue;
        }
        if let Some(centroid) = cx.pointers.centroid(PluginKind::Drag) {
            self.state.rebase(centroid);
            return Outcome::Handled;
        }
        if self.moved
            && let Some(v) = self.state.velocity(event.timestamp, VELOCITY_WINDOW_MS)
        {
            let v = self.mask(v) * self.options.factor;
            if v != Vec2::ZERO {
                cx.signal(Signal::Fling(v));
            }
        }
        self.finish(cx, event.position);
        Outcome::Handled
    }

    fn cancel(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        if cx.released_owner() != Some(PluginKind::Drag) {
            return Outcome::Continue;
        }
        if let Some(centroid) = cx.pointers.centroid(PluginKind::Drag) {
            self.state.rebase(centroid);
        } else {
            self.finish(cx, event.position);
        }
        Outcome::Handled
    }

    fn wheel(&mut self, cx: &mut Context<'_>, event: &WheelEvent) -> Outcome {
        let a = cx.activity;
        if !self.options.wheel || (a.wheel_present && (a.wheel_zoom || event.ctrl)) {
            return Outcome::Continue;
        }
        let step = event.step(self.options.line_height);
        let delta = if self.options.wheel_swap_axes {
            Vec2::new(event.delta.y, event.delta.x)
        } else {
            event.delta
        };
        let sign = if self.options.reverse { 1.0 } else { -1.0 };
        cx.view.pan_by(self.mask(delta) * (step * self.options.wheel_scroll * sign));
        if self.options.clamp_wheel {
            self.clamp_wheel(cx);
        }
        cx.emit(ViewportEvent::WheelScroll);
        cx.moved(PluginKind::Drag);
        Outcome::Handled
    }

    fn update(&mut self, cx: &mut Context<'_>, _elapsed: f64) {
        self.abandoned(cx);
    }

    fn resumed(&mut self) {
        self.state.end();
        self.moved = false;
    }

    fn report(&self, activity: &mut Activity) {
        activity.dragging |= self.state.is_dragging();
    }
}
