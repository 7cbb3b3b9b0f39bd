// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased move to a fixed point.

use kurbo::{Point, Vec2};
use serde::Deserialize;
use tracing::trace;
use understory_view2d::ViewTransform;

use crate::ease::Ease;
use crate::event::ViewportEvent;
use crate::input::{PointerEvent, WheelEvent};
use crate::plugin::{Context, Hooks, Outcome, PluginKind, Signal};

/// Distance, in world units, under which the view counts as arrived.
const ARRIVED: f64 = 1e-6;

/// Options for [`Snap`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapOptions {
    /// Snap the top‑left corner instead of the center.
    pub top_left: bool,
    /// Momentum decay applied when the last pointer lifts mid‑coast.
    pub friction: f64,
    /// Duration in milliseconds.
    pub time: f64,
    /// Easing.
    pub ease: Ease,
    /// Hold off while pointers are down; a press cancels a running snap.
    pub interrupt: bool,
    /// Remove the plugin on arrival.
    pub remove_on_complete: bool,
    /// Remove the plugin on a press or wheel event.
    pub remove_on_interrupt: bool,
    /// Start immediately, even when already at the target.
    pub force_start: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            top_left: false,
            friction: 0.8,
            time: 1000.0,
            ease: Ease::IN_OUT_SINE,
            interrupt: true,
            remove_on_complete: false,
            remove_on_interrupt: false,
            force_start: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    start: Point,
    delta: Vec2,
    time: f64,
}

/// Moves the view to a target point and keeps it there.
#[derive(Debug, Clone)]
pub struct Snap {
    target: Point,
    options: SnapOptions,
    flight: Option<Flight>,
    force: bool,
}

impl Snap {
    /// Creates the plugin, snapping to `target` (the center, or the corner
    /// with [`SnapOptions::top_left`]).
    #[must_use]
    pub fn new(target: Point, options: SnapOptions) -> Self {
        Self {
            target,
            options,
            flight: None,
            force: options.force_start,
        }
    }

    /// The snap target.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Returns `true` while moving toward the target.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    fn current(&self, view: &ViewTransform) -> Point {
        if self.options.top_left { view.corner() } else { view.center() }
    }

    fn place(&self, view: &mut ViewTransform, at: Point) {
        if self.options.top_left {
            view.set_corner(at);
        } else {
            view.set_center(at);
        }
    }
}

impl Hooks for Snap {
    fn down(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if self.options.remove_on_interrupt {
            cx.signal(Signal::Remove(PluginKind::Snap));
        } else if self.options.interrupt {
            self.flight = None;
        }
        Outcome::Continue
    }

    fn up(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if cx.pointers.is_empty() && cx.activity.coasting() {
            let k = Some(self.options.friction);
            cx.signal(Signal::Damp { x: k, y: k });
        }
        Outcome::Continue
    }

    fn wheel(&mut self, cx: &mut Context<'_>, _event: &WheelEvent) -> Outcome {
        if self.options.remove_on_interrupt {
            cx.signal(Signal::Remove(PluginKind::Snap));
        }
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        if self.options.interrupt && !cx.pointers.is_empty() {
            return;
        }
        let Some(flight) = self.flight.as_mut() else {
            let current = self.current(cx.view);
            if self.force || (self.target - current).hypot() > ARRIVED {
                self.force = false;
                self.flight = Some(Flight {
                    start: current,
                    delta: self.target - current,
                    time: 0.0,
                });
                cx.emit(ViewportEvent::SnapStart);
                trace!(x = self.target.x, y = self.target.y, "snap start");
            }
            return;
        };

        flight.time += elapsed;
        if flight.time >= self.options.time {
            self.flight = None;
            self.place(cx.view, self.target);
            cx.moved(PluginKind::Snap);
            cx.emit(ViewportEvent::SnapEnd);
            trace!("snap end");
            if self.options.remove_on_complete {
                cx.signal(Signal::Remove(PluginKind::Snap));
            }
        } else {
            let p = self.options.ease.progress(flight.time / self.options.time);
            let at = flight.start + flight.delta * p;
            self.place(cx.view, at);
            cx.moved(PluginKind::Snap);
        }
    }
}
