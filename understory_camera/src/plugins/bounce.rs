// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elastic return into bounds.
//!
//! Bounce never fights an active gesture. While the view coasts out of
//! bounds it only shortens the coast by damping momentum; once nothing is
//! holding or pushing an axis it tweens that axis back inside.

use kurbo::Rect;
use serde::Deserialize;
use tracing::trace;
use understory_view2d::ViewTransform;

use crate::ease::Ease;
use crate::event::{Axis, ViewportEvent};
use crate::input::PointerEvent;
use crate::options::{Sides, Underflow};
use crate::plugin::{Activity, Context, Hooks, Outcome, PluginKind, Signal};

/// Pan differences below this many pixels count as in bounds.
const EPSILON: f64 = 1e-6;

/// Options for [`Bounce`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BounceOptions {
    /// Sides that bounce.
    pub sides: Sides,
    /// Momentum decay applied while coasting out of bounds.
    pub friction: f64,
    /// Tween duration in milliseconds.
    pub time: f64,
    /// Tween easing.
    pub ease: Ease,
    /// Alignment when the bounds are smaller than the screen. `None` leaves
    /// undersized content alone.
    pub underflow: Underflow,
    /// Bounds in world coordinates; the world rectangle when unset.
    pub bounce_box: Option<Rect>,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            sides: Sides::all(),
            friction: 0.5,
            time: 150.0,
            ease: Ease::IN_OUT_SINE,
            underflow: Underflow::CENTER,
            bounce_box: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    start: f64,
    target: f64,
    time: f64,
}

/// Tweens the view back inside its bounds after it was left outside.
#[derive(Debug, Clone)]
pub struct Bounce {
    options: BounceOptions,
    x: Option<Tween>,
    y: Option<Tween>,
}

impl Bounce {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: BounceOptions) -> Self {
        Self {
            options,
            x: None,
            y: None,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &BounceOptions {
        &self.options
    }

    /// Returns `true` while a tween is running on either axis.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    fn bounds(&self, view: &ViewTransform) -> Rect {
        self.options
            .bounce_box
            .unwrap_or_else(|| view.world_size().to_rect())
    }

    /// In‑bounds pan per axis, or `None` where the axis is already in bounds.
    fn targets(&self, view: &ViewTransform) -> (Option<f64>, Option<f64>) {
        let bounds = self.bounds(view);
        let screen = view.screen_size();
        let scale = view.scale();
        let pan = view.pan();
        let sides = self.options.sides;

        let x = axis_target(
            pan.x,
            screen.width,
            scale.x,
            (bounds.x0, bounds.x1),
            (sides.contains(Sides::LEFT), sides.contains(Sides::RIGHT)),
            self.options.underflow.x().map(|a| a.offset(screen.width, bounds.width() * scale.x)),
        );
        let y = axis_target(
            pan.y,
            screen.height,
            scale.y,
            (bounds.y0, bounds.y1),
            (sides.contains(Sides::TOP), sides.contains(Sides::BOTTOM)),
            self.options.underflow.y().map(|a| a.offset(screen.height, bounds.height() * scale.y)),
        );
        (x, y)
    }

    fn advance(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        let options = self.options;
        let mut pan = cx.view.pan();
        for (axis, slot, value) in [
            (Axis::X, &mut self.x, &mut pan.x),
            (Axis::Y, &mut self.y, &mut pan.y),
        ] {
            let Some(tween) = slot.as_mut() else {
                continue;
            };
            tween.time += elapsed;
            if tween.time >= options.time {
                *value = tween.target;
                *slot = None;
                cx.emit(ViewportEvent::BounceEnd { axis });
                trace!(?axis, "bounce end");
            } else {
                *value = options
                    .ease
                    .apply(tween.time, tween.start, tween.target - tween.start, options.time);
            }
        }
        cx.view.set_pan(pan);
        cx.moved(PluginKind::Bounce);
    }
}

/// Pan that puts one axis back in bounds, if it is out.
///
/// `edges` are the world‑space bounds, `enabled` the (near, far) sides that
/// bounce and `underflow` the aligned offset of undersized bounds.
fn axis_target(
    pan: f64,
    screen: f64,
    scale: f64,
    edges: (f64, f64),
    enabled: (bool, bool),
    underflow: Option<f64>,
) -> Option<f64> {
    if !enabled.0 && !enabled.1 {
        return None;
    }
    let (near, far) = edges;
    let target = if (far - near) * scale < screen {
        underflow? - near * scale
    } else {
        let left = -pan / scale;
        let right = left + screen / scale;
        if enabled.0 && left < near {
            -near * scale
        } else if enabled.1 && right > far {
            screen - far * scale
        } else {
            return None;
        }
    };
    ((target - pan).abs() > EPSILON).then_some(target)
}

impl Hooks for Bounce {
    fn down(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        self.x = None;
        self.y = None;
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        if self.is_active() {
            self.advance(cx, elapsed);
        }

        let a = cx.activity;
        let (x, y) = self.targets(cx.view);

        let damp_x = (a.undamped_x && x.is_some()).then_some(self.options.friction);
        let damp_y = (a.undamped_y && y.is_some()).then_some(self.options.friction);
        if damp_x.is_some() || damp_y.is_some() {
            cx.signal(Signal::Damp { x: damp_x, y: damp_y });
        }

        if a.dragging || a.pinching {
            return;
        }
        let pan = cx.view.pan();
        if let Some(target) = x
            && self.x.is_none()
            && !a.coasting_x
        {
            self.x = Some(Tween { start: pan.x, target, time: 0.0 });
            cx.emit(ViewportEvent::BounceStart { axis: Axis::X });
            trace!(from = pan.x, to = target, "bounce start x");
        }
        if let Some(target) = y
            && self.y.is_none()
            && !a.coasting_y
        {
            self.y = Some(Tween { start: pan.y, target, time: 0.0 });
            cx.emit(ViewportEvent::BounceStart { axis: Axis::Y });
            trace!(from = pan.y, to = target, "bounce start y");
        }
    }

    fn reset(&mut self, _cx: &mut Context<'_>) {
        self.x = None;
        self.y = None;
    }

    fn report(&self, activity: &mut Activity) {
        activity.bouncing |= self.is_active();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};
    use understory_event_state::pointer::PointerRegistry;

    use super::*;

    fn offset(bounce: &Bounce, view: &ViewTransform) -> Vec2 {
        let (x, y) = bounce.targets(view);
        Vec2::new(x.map_or(0.0, |t| t - view.pan().x), y.map_or(0.0, |t| t - view.pan().y))
    }

    struct Rig {
        view: ViewTransform,
        pointers: PointerRegistry<PluginKind>,
        events: Vec<ViewportEvent>,
        bounce: Bounce,
    }

    impl Rig {
        fn new(options: BounceOptions) -> Self {
            Self {
                view: ViewTransform::new(Size::new(100.0, 100.0))
                    .with_world_size(Size::new(400.0, 400.0)),
                pointers: PointerRegistry::new(),
                events: Vec::new(),
                bounce: Bounce::new(options),
            }
        }

        fn tick(&mut self, elapsed: f64, activity: Activity) -> Vec<Signal> {
            let mut cx = Context::new(&mut self.view, &mut self.pointers, &mut self.events, 5.0);
            cx.activity = activity;
            self.bounce.update(&mut cx, elapsed);
            cx.signals.to_vec()
        }
    }

    #[test]
    fn in_bounds_view_is_left_alone() {
        let mut rig = Rig::new(BounceOptions::default());
        rig.view.set_pan(Vec2::new(-50.0, -300.0));
        rig.tick(16.0, Activity::default());
        assert!(!rig.bounce.is_active());
        assert!(rig.events.is_empty());
        assert_eq!(offset(&rig.bounce, &rig.view), Vec2::ZERO);
    }

    #[test]
    fn tweens_back_and_ends_exactly() {
        let mut rig = Rig::new(BounceOptions::default());
        rig.view.set_pan(Vec2::new(40.0, -330.0));
        rig.tick(0.0, Activity::default());
        assert!(rig.bounce.is_active());
        assert!(rig.events.contains(&ViewportEvent::BounceStart { axis: Axis::X }));
        assert!(rig.events.contains(&ViewportEvent::BounceStart { axis: Axis::Y }));

        rig.tick(75.0, Activity::default());
        assert!(rig.view.pan().x > 0.0 && rig.view.pan().x < 40.0);

        rig.tick(100.0, Activity::default());
        assert_eq!(rig.view.pan(), Vec2::new(0.0, -300.0));
        assert!(!rig.bounce.is_active());
        assert!(rig.events.contains(&ViewportEvent::BounceEnd { axis: Axis::X }));
    }

    #[test]
    fn waits_for_drag_and_damps_coasting() {
        let mut rig = Rig::new(BounceOptions::default());
        rig.view.set_pan(Vec2::new(40.0, 0.0));
        let dragging = Activity { dragging: true, ..Activity::default() };
        assert!(rig.tick(16.0, dragging).is_empty());
        assert!(!rig.bounce.is_active());

        let coasting = Activity { coasting_x: true, undamped_x: true, ..Activity::default() };
        let signals = rig.tick(16.0, coasting);
        assert_eq!(signals, [Signal::Damp { x: Some(0.5), y: None }]);
        assert!(!rig.bounce.is_active());
    }

    #[test]
    fn disabled_sides_do_not_bounce() {
        let mut rig = Rig::new(BounceOptions { sides: Sides::RIGHT, ..BounceOptions::default() });
        rig.view.set_pan(Vec2::new(40.0, 0.0));
        rig.tick(16.0, Activity::default());
        assert!(!rig.bounce.is_active());

        rig.view.set_pan(Vec2::new(-350.0, 0.0));
        rig.tick(200.0, Activity::default());
        rig.tick(200.0, Activity::default());
        assert_eq!(rig.view.pan().x, -300.0);
    }

    #[test]
    fn undersized_bounds_align() {
        let mut rig = Rig::new(BounceOptions {
            bounce_box: Some(Rect::new(10.0, 10.0, 60.0, 60.0)),
            ..BounceOptions::default()
        });
        rig.tick(0.0, Activity::default());
        rig.tick(1000.0, Activity::default());
        // 50 world units centered on a 100 px screen.
        assert_eq!(rig.view.to_screen(Point::new(10.0, 10.0)), Point::new(25.0, 25.0));
    }

    #[test]
    fn press_cancels_tweens() {
        let mut rig = Rig::new(BounceOptions::default());
        rig.view.set_pan(Vec2::new(40.0, 0.0));
        rig.tick(0.0, Activity::default());
        let mut cx = Context::new(&mut rig.view, &mut rig.pointers, &mut rig.events, 5.0);
        rig.bounce.down(&mut cx, &PointerEvent::mouse((0.0, 0.0)));
        assert!(!rig.bounce.is_active());
    }
}
