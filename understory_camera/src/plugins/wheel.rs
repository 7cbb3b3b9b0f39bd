// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel zoom.
//!
//! Each wheel event multiplies the scale by `2^((1 + percent) * step)` with
//! `step = -delta.y * mode / 500`, then moves the view so the world point
//! under the pointer stays under it. With `smooth` the change is spread over
//! that many frames instead.

use kurbo::{Point, Vec2};
use serde::Deserialize;

use crate::input::{PointerEvent, WheelEvent};
use crate::options::Direction;
use crate::plugin::{Activity, Context, Hooks, Outcome, PluginKind};

/// Options for [`Wheel`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WheelOptions {
    /// Zoom sensitivity.
    pub percent: f64,
    /// Spread each zoom step over this many frames.
    pub smooth: Option<u32>,
    /// A pointer press cancels smoothing in progress.
    pub interrupt: bool,
    /// Zoom in when scrolling down.
    pub reverse: bool,
    /// Keep this world point centered instead of zooming about the pointer.
    pub center: Option<Point>,
    /// Pixels per line for line‑mode deltas.
    pub line_height: f64,
    /// Axes that zoom.
    pub axis: Direction,
    /// Treat ctrl + wheel as a trackpad pinch.
    pub trackpad_pinch: bool,
    /// Zoom on plain wheel events; when off only ctrl + wheel zooms.
    pub wheel_zoom: bool,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            percent: 0.1,
            smooth: None,
            interrupt: true,
            reverse: false,
            center: None,
            line_height: 20.0,
            axis: Direction::All,
            trackpad_pinch: false,
            wheel_zoom: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Smoothing {
    /// Scale added per frame.
    step: Vec2,
    frames_left: u32,
    anchor: Point,
}

/// Zooms with the mouse wheel or a trackpad pinch.
#[derive(Debug, Clone)]
pub struct Wheel {
    options: WheelOptions,
    smoothing: Option<Smoothing>,
}

impl Wheel {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: WheelOptions) -> Self {
        Self {
            options,
            smoothing: None,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    fn scaled(&self, scale: Vec2, change: f64) -> Vec2 {
        Vec2::new(
            if self.options.axis.x() { scale.x * change } else { scale.x },
            if self.options.axis.y() { scale.y * change } else { scale.y },
        )
    }

    /// Sets the scale, applies zoom limits and keeps `anchor` in place.
    fn zoom_to(&self, cx: &mut Context<'_>, scale: Vec2, anchor: Point) {
        let world = cx.view.to_world(anchor);
        cx.view.set_scale(scale);
        cx.clamp_zoom();
        if let Some(center) = self.options.center {
            cx.view.set_center(center);
        } else {
            let drifted = cx.view.to_screen(world);
            cx.view.pan_by(anchor - drifted);
        }
        cx.zoomed(PluginKind::Wheel);
        cx.moved(PluginKind::Wheel);
    }
}

impl Hooks for Wheel {
    fn down(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if self.options.interrupt {
            self.smoothing = None;
        }
        Outcome::Continue
    }

    fn wheel(&mut self, cx: &mut Context<'_>, event: &WheelEvent) -> Outcome {
        if !self.options.wheel_zoom && !event.ctrl {
            return Outcome::Continue;
        }
        let units = event.step(self.options.line_height);
        let divisor = if self.options.trackpad_pinch && event.ctrl { 200.0 } else { 500.0 };
        let sign = if self.options.reverse { -1.0 } else { 1.0 };
        let step = sign * -event.delta.y * units / divisor;
        let change = 2_f64.powf((1.0 + self.options.percent) * step);

        match self.options.smooth.filter(|&n| n > 0) {
            Some(frames) => {
                let scale = cx.view.scale();
                // Fold in whatever the previous smoothing had left to apply.
                let pending = self
                    .smoothing
                    .map_or(Vec2::ZERO, |s| s.step * f64::from(s.frames_left));
                let target = self.scaled(scale + pending, change);
                self.smoothing = Some(Smoothing {
                    step: (target - scale) / f64::from(frames),
                    frames_left: frames,
                    anchor: event.position,
                });
            }
            None => {
                let scale = self.scaled(cx.view.scale(), change);
                self.zoom_to(cx, scale, event.position);
            }
        }
        Outcome::Handled
    }

    fn update(&mut self, cx: &mut Context<'_>, _elapsed: f64) {
        let Some(mut smoothing) = self.smoothing.take() else {
            return;
        };
        let scale = cx.view.scale() + smoothing.step;
        self.zoom_to(cx, scale, smoothing.anchor);
        smoothing.frames_left -= 1;
        if smoothing.frames_left > 0 {
            self.smoothing = Some(smoothing);
        }
    }

    fn report(&self, activity: &mut Activity) {
        activity.wheel_present = true;
        activity.wheel_zoom |= self.options.wheel_zoom;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_event_state::pointer::PointerRegistry;
    use understory_view2d::ViewTransform;

    use super::*;
    use crate::event::ViewportEvent;
    use crate::input::DeltaMode;
    use crate::plugins::{ClampZoomOptions, ScaleBound};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    struct Rig {
        view: ViewTransform,
        pointers: PointerRegistry<PluginKind>,
        events: Vec<ViewportEvent>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                view: ViewTransform::new(Size::new(800.0, 600.0)),
                pointers: PointerRegistry::new(),
                events: Vec::new(),
            }
        }

        fn cx(&mut self) -> Context<'_> {
            Context::new(&mut self.view, &mut self.pointers, &mut self.events, 5.0)
        }
    }

    #[test]
    fn scroll_up_zooms_in_about_the_pointer() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions::default());
        let at = Point::new(200.0, 150.0);
        let before = rig.view.to_world(at);
        let mut cx = rig.cx();
        assert_eq!(wheel.wheel(&mut cx, &WheelEvent::new(at, (0.0, -500.0))), Outcome::Handled);
        // step = 1, change = 2^1.1
        assert!(close(rig.view.scale().x, 2_f64.powf(1.1)));
        let after = rig.view.to_world(at);
        assert!(close(before.x, after.x) && close(before.y, after.y));
    }

    #[test]
    fn line_mode_and_reverse() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions { reverse: true, ..WheelOptions::default() });
        let mut cx = rig.cx();
        let e = WheelEvent::new((0.0, 0.0), (0.0, -25.0)).with_mode(DeltaMode::Line);
        wheel.wheel(&mut cx, &e);
        // 25 lines * 20 px = 500 px, reversed: zoom out by 2^1.1.
        assert!(close(rig.view.scale().x, 2_f64.powf(-1.1)));
    }

    #[test]
    fn zoom_respects_limits() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions::default());
        let mut cx = rig.cx();
        cx.zoom_limits = Some(ClampZoomOptions {
            max_scale: Some(ScaleBound::Uniform(1.5)),
            ..ClampZoomOptions::default()
        });
        wheel.wheel(&mut cx, &WheelEvent::new((100.0, 100.0), (0.0, -1000.0)));
        assert_eq!(rig.view.scale(), Vec2::new(1.5, 1.5));
        assert!(rig.events.contains(&ViewportEvent::Zoomed { source: PluginKind::ClampZoom }));
    }

    #[test]
    fn wheel_zoom_off_requires_ctrl() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions { wheel_zoom: false, ..WheelOptions::default() });
        let mut cx = rig.cx();
        let e = WheelEvent::new((0.0, 0.0), (0.0, -100.0));
        assert_eq!(wheel.wheel(&mut cx, &e), Outcome::Continue);
        assert_eq!(wheel.wheel(&mut cx, &e.with_ctrl()), Outcome::Handled);
        assert!(rig.view.scale().x > 1.0);
    }

    #[test]
    fn smoothing_spreads_over_frames() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions { smooth: Some(4), ..WheelOptions::default() });
        let mut cx = rig.cx();
        wheel.wheel(&mut cx, &WheelEvent::new((0.0, 0.0), (0.0, -500.0)));
        assert_eq!(cx.view.scale().x, 1.0);
        for _ in 0..4 {
            wheel.update(&mut cx, 16.0);
        }
        assert!(close(cx.view.scale().x, 2_f64.powf(1.1)));
        wheel.update(&mut cx, 16.0);
        assert!(close(cx.view.scale().x, 2_f64.powf(1.1)));
    }

    #[test]
    fn press_interrupts_smoothing() {
        let mut rig = Rig::new();
        let mut wheel = Wheel::new(WheelOptions { smooth: Some(10), ..WheelOptions::default() });
        let mut cx = rig.cx();
        wheel.wheel(&mut cx, &WheelEvent::new((0.0, 0.0), (0.0, -500.0)));
        wheel.update(&mut cx, 16.0);
        let partial = cx.view.scale().x;
        wheel.down(&mut cx, &PointerEvent::mouse((0.0, 0.0)));
        wheel.update(&mut cx, 16.0);
        assert_eq!(cx.view.scale().x, partial);
    }
}
