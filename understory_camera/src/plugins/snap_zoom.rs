// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased zoom to a fixed scale.

use kurbo::{Point, Vec2};
use serde::Deserialize;
use tracing::trace;
use understory_view2d::ViewTransform;

use crate::ease::Ease;
use crate::event::ViewportEvent;
use crate::input::{PointerEvent, WheelEvent};
use crate::plugin::{Context, Hooks, Outcome, PluginKind, Signal};
use crate::plugins::ClampZoomOptions;

/// Relative scale difference under which the zoom counts as arrived.
const ARRIVED: f64 = 1e-9;

/// Options for [`SnapZoom`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapZoomOptions {
    /// World width to fit on screen. Without it the height decides both axes.
    pub width: Option<f64>,
    /// World height to fit on screen. Without it the width decides both axes.
    pub height: Option<f64>,
    /// Duration in milliseconds; `0` zooms at once.
    pub time: f64,
    /// Easing.
    pub ease: Ease,
    /// Remove the plugin on arrival.
    pub remove_on_complete: bool,
    /// Remove the plugin on a press or wheel event.
    pub remove_on_interrupt: bool,
    /// Keep this world point centered while zooming.
    pub center: Option<Point>,
    /// Hold off while pointers are down; a press cancels a running zoom.
    pub interrupt: bool,
    /// Start immediately, even when already at the target.
    pub force_start: bool,
    /// Zoom about the origin instead of keeping the center.
    pub no_move: bool,
}

impl Default for SnapZoomOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            time: 1000.0,
            ease: Ease::IN_OUT_SINE,
            remove_on_complete: false,
            remove_on_interrupt: false,
            center: None,
            interrupt: true,
            force_start: false,
            no_move: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    /// World‑screen extent at the start.
    start: Vec2,
    time: f64,
}

/// Zooms the view to show a given world width and/or height.
#[derive(Debug, Clone)]
pub struct SnapZoom {
    options: SnapZoomOptions,
    flight: Option<Flight>,
    force: bool,
}

impl SnapZoom {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: SnapZoomOptions) -> Self {
        Self {
            options,
            flight: None,
            force: options.force_start,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &SnapZoomOptions {
        &self.options
    }

    /// Returns `true` while zooming toward the target.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    /// Target scale for `view`, inside `limits`. `None` when neither width
    /// nor height is set.
    fn target(&self, view: &ViewTransform, limits: Option<ClampZoomOptions>) -> Option<Vec2> {
        let screen = view.screen_size();
        let x = self.options.width.map(|w| screen.width / w);
        let y = self.options.height.map(|h| screen.height / h);
        let (x, y) = match (x, y) {
            (None, None) => return None,
            (Some(x), None) => (x, x),
            (None, Some(y)) => (y, y),
            (Some(x), Some(y)) => (x, y),
        };
        let mut probe = *view;
        probe.set_scale(Vec2::new(x, y));
        if let Some(limits) = limits {
            limits.apply(&mut probe);
        }
        Some(probe.scale())
    }

    /// Sets `scale` and keeps the view's anchor per the options.
    fn place(&self, view: &mut ViewTransform, scale: Vec2, center: Point) {
        view.set_scale(scale);
        if !self.options.no_move {
            view.set_center(self.options.center.unwrap_or(center));
        }
    }

    /// Zooms straight to the target. Used when the duration is zero.
    pub(crate) fn jump(&self, view: &mut ViewTransform, limits: Option<ClampZoomOptions>) {
        if let Some(target) = self.target(view, limits) {
            let center = view.center();
            self.place(view, target, center);
        }
    }

    fn finish(&mut self, cx: &mut Context<'_>, target: Vec2, center: Point) {
        self.place(cx.view, target, center);
        cx.zoomed(PluginKind::SnapZoom);
        cx.emit(ViewportEvent::SnapZoomEnd);
        trace!("snap zoom end");
        if self.options.remove_on_complete {
            cx.signal(Signal::Remove(PluginKind::SnapZoom));
        }
    }

    fn interrupted(&mut self, cx: &mut Context<'_>) {
        if self.options.remove_on_interrupt {
            cx.signal(Signal::Remove(PluginKind::SnapZoom));
        }
    }
}

fn arrived(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() <= ARRIVED * b.x.abs() && (a.y - b.y).abs() <= ARRIVED * b.y.abs()
}

impl Hooks for SnapZoom {
    fn down(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if self.options.interrupt && !self.options.remove_on_interrupt {
            self.flight = None;
        }
        self.interrupted(cx);
        Outcome::Continue
    }

    fn wheel(&mut self, cx: &mut Context<'_>, _event: &WheelEvent) -> Outcome {
        self.interrupted(cx);
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        if self.options.interrupt && !cx.pointers.is_empty() {
            return;
        }
        let Some(target) = self.target(cx.view, cx.zoom_limits) else {
            return;
        };
        let center = cx.view.center();

        let Some(flight) = self.flight.as_mut() else {
            if !self.force && arrived(cx.view.scale(), target) {
                return;
            }
            self.force = false;
            cx.emit(ViewportEvent::SnapZoomStart);
            trace!(sx = target.x, sy = target.y, "snap zoom start");
            if self.options.time <= 0.0 {
                self.finish(cx, target, center);
            } else {
                self.flight = Some(Flight {
                    start: Vec2::new(cx.view.world_screen_width(), cx.view.world_screen_height()),
                    time: 0.0,
                });
            }
            return;
        };

        flight.time += elapsed;
        if flight.time >= self.options.time {
            self.flight = None;
            self.finish(cx, target, center);
            return;
        }

        let screen = cx.view.screen_size();
        let end = Vec2::new(screen.width / target.x, screen.height / target.y);
        let p = self.options.ease.progress(flight.time / self.options.time);
        let extent = flight.start + (end - flight.start) * p;
        let scale = Vec2::new(screen.width / extent.x, screen.height / extent.y);
        self.place(cx.view, scale, center);
        cx.zoomed(PluginKind::SnapZoom);
        if cx.clamp_zoom() && !self.options.no_move {
            cx.view.set_center(self.options.center.unwrap_or(center));
        }
        if !self.options.no_move {
            cx.moved(PluginKind::SnapZoom);
        }
    }
}
