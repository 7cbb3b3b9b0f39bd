// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed move and zoom to a destination.

use kurbo::{Point, Size};
use serde::Deserialize;
use tracing::trace;
use understory_view2d::ViewTransform;

use crate::ease::Ease;
use crate::event::ViewportEvent;
use crate::input::PointerEvent;
use crate::plugin::{Context, Hooks, Outcome, PluginKind, Signal};

/// Options for [`Animate`].
///
/// The zoom target is taken from `scale`, else from `scale_x`/`scale_y`,
/// else from `width`/`height`. A missing axis follows the other one.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimateOptions {
    /// Duration in milliseconds.
    pub time: f64,
    /// Easing.
    pub ease: Ease,
    /// World point to center on.
    pub position: Option<Point>,
    /// World width to fit on screen.
    pub width: Option<f64>,
    /// World height to fit on screen.
    pub height: Option<f64>,
    /// Uniform scale.
    pub scale: Option<f64>,
    /// Horizontal scale.
    pub scale_x: Option<f64>,
    /// Vertical scale.
    pub scale_y: Option<f64>,
    /// Remove the plugin when a pointer is pressed.
    pub remove_on_interrupt: bool,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            time: 1000.0,
            ease: Ease::Linear,
            position: None,
            width: None,
            height: None,
            scale: None,
            scale_x: None,
            scale_y: None,
            remove_on_interrupt: false,
        }
    }
}

impl AnimateOptions {
    /// World width and height to end at, for a screen of size `screen`.
    fn extent(&self, screen: Size) -> (Option<f64>, Option<f64>) {
        if let Some(s) = self.scale {
            return (Some(screen.width / s), Some(screen.height / s));
        }
        if self.scale_x.is_some() || self.scale_y.is_some() {
            return (
                self.scale_x.map(|s| screen.width / s),
                self.scale_y.map(|s| screen.height / s),
            );
        }
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy)]
struct Start {
    center: Point,
    width: f64,
    height: f64,
}

/// Moves and zooms the view to a destination over a fixed time, then
/// removes itself.
#[derive(Debug, Clone)]
pub struct Animate {
    options: AnimateOptions,
    start: Option<Start>,
    time: f64,
}

impl Animate {
    /// Creates the plugin. The starting view is captured on the first frame.
    #[must_use]
    pub fn new(options: AnimateOptions) -> Self {
        Self {
            options,
            start: None,
            time: 0.0,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &AnimateOptions {
        &self.options
    }

    /// Places the view at progress `p` in `[0, 1]`.
    fn place(&self, view: &mut ViewTransform, start: Start, p: f64) -> (bool, bool) {
        let before = *view;
        let center = view.center();
        let (width, height) = self.options.extent(view.screen_size());
        if let Some(w) = width {
            view.fit_width(start.width + (w - start.width) * p, height.is_none());
        }
        if let Some(h) = height {
            view.fit_height(start.height + (h - start.height) * p, width.is_none());
        }
        match self.options.position {
            Some(to) => view.set_center(start.center + (to - start.center) * p),
            None => view.set_center(center),
        }
        (view.pan() != before.pan(), view.scale() != before.scale())
    }
}

impl Hooks for Animate {
    fn down(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if self.options.remove_on_interrupt {
            cx.signal(Signal::Remove(PluginKind::Animate));
        }
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        let start = *self.start.get_or_insert_with(|| Start {
            center: cx.view.center(),
            width: cx.view.world_screen_width(),
            height: cx.view.world_screen_height(),
        });
        self.time += elapsed;
        let done = self.time >= self.options.time;
        let p = if done { 1.0 } else { self.options.ease.progress(self.time / self.options.time) };

        let (moved, zoomed) = self.place(cx.view, start, p);
        if zoomed {
            cx.zoomed(PluginKind::Animate);
            if cx.clamp_zoom() {
                let center = self
                    .options
                    .position
                    .filter(|_| done)
                    .unwrap_or_else(|| cx.view.center());
                cx.view.set_center(center);
            }
        }
        if moved {
            cx.moved(PluginKind::Animate);
        }
        if done {
            cx.emit(ViewportEvent::AnimateEnd);
            cx.signal(Signal::Remove(PluginKind::Animate));
            trace!("animate end");
        }
    }
}
