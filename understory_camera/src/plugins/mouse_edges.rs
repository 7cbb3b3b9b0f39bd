// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling while the mouse rests near an edge.
//!
//! Zones are either insets from the screen edges or everything outside a
//! circle around the screen center. While the mouse is in a zone the view
//! scrolls toward that edge; leaving the zone hands the current velocity to
//! [`Decelerate`](super::Decelerate).

use kurbo::{Point, Size, Vec2};
use serde::Deserialize;
use understory_event_state::pointer::PointerKind;

use crate::input::PointerEvent;
use crate::plugin::{Context, Hooks, Outcome, PluginKind, Signal};

/// Length of a 60 Hz frame in milliseconds; speed is given per frame.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Options for [`MouseEdges`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MouseEdgesOptions {
    /// Circle around the screen center; the zone is everything outside it.
    /// Takes precedence over the insets.
    pub radius: Option<f64>,
    /// Inset from every edge.
    pub distance: Option<f64>,
    /// Inset from the top edge.
    pub top: Option<f64>,
    /// Inset from the bottom edge.
    pub bottom: Option<f64>,
    /// Inset from the left edge.
    pub left: Option<f64>,
    /// Inset from the right edge.
    pub right: Option<f64>,
    /// Screen pixels per 60 Hz frame at full depth.
    pub speed: f64,
    /// Scroll away from the edge instead of toward it.
    pub reverse: bool,
    /// Do not hand the velocity to momentum when leaving a zone.
    pub no_decelerate: bool,
    /// Full speed anywhere in a zone; in radius mode, snap to eight
    /// directions.
    pub linear: bool,
    /// Keep scrolling while mouse buttons are held.
    pub allow_buttons: bool,
}

impl Default for MouseEdgesOptions {
    fn default() -> Self {
        Self {
            radius: None,
            distance: None,
            top: None,
            bottom: None,
            left: None,
            right: None,
            speed: 8.0,
            reverse: false,
            no_decelerate: false,
            linear: false,
            allow_buttons: false,
        }
    }
}

/// Scrolls the view while the mouse is near the screen edges.
#[derive(Debug, Clone)]
pub struct MouseEdges {
    options: MouseEdgesOptions,
    /// Screen pixels per frame.
    velocity: Vec2,
}

impl MouseEdges {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: MouseEdgesOptions) -> Self {
        Self {
            options,
            velocity: Vec2::ZERO,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &MouseEdgesOptions {
        &self.options
    }

    /// Returns `true` while scrolling.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Scroll direction and depth for a pointer at `at`, each axis in
    /// `[-1, 1]`. Positive pans the content right/down, revealing the
    /// left/top edge.
    fn pull(&self, at: Point, screen: Size) -> Vec2 {
        let o = &self.options;
        if let Some(radius) = o.radius {
            let center = Point::new(screen.width / 2.0, screen.height / 2.0);
            let toward_center = center - at;
            let distance = toward_center.hypot();
            if distance < radius || distance == 0.0 {
                return Vec2::ZERO;
            }
            let angle = toward_center.atan2();
            let dir = Vec2::new(angle.cos(), angle.sin());
            return if o.linear { Vec2::new(dir.x.round(), dir.y.round()) } else { dir };
        }
        let inset = |side: Option<f64>| side.or(o.distance).filter(|d| *d > 0.0);
        let depth = |d: f64, zone: f64| {
            if o.linear {
                1.0
            } else {
                (1.0 - d / zone).clamp(0.0, 1.0)
            }
        };

        let mut pull = Vec2::ZERO;
        if let Some(zone) = inset(o.left)
            && at.x < zone
        {
            pull.x = depth(at.x, zone);
        } else if let Some(zone) = inset(o.right)
            && at.x > screen.width - zone
        {
            pull.x = -depth(screen.width - at.x, zone);
        }
        if let Some(zone) = inset(o.top)
            && at.y < zone
        {
            pull.y = depth(at.y, zone);
        } else if let Some(zone) = inset(o.bottom)
            && at.y > screen.height - zone
        {
            pull.y = -depth(screen.height - at.y, zone);
        }
        pull
    }

    /// Switches to `next`, handing the velocity of axes that stop to momentum.
    fn settle(&mut self, cx: &mut Context<'_>, next: Vec2, hand_off: bool) {
        let launch = |now: f64, next: f64| {
            (hand_off && now != 0.0 && next == 0.0).then_some(now / FRAME_MS)
        };
        let x = launch(self.velocity.x, next.x);
        let y = launch(self.velocity.y, next.y);
        if !self.options.no_decelerate && (x.is_some() || y.is_some()) {
            cx.signal(Signal::Launch { x, y });
        }
        self.velocity = next;
    }
}

impl Hooks for MouseEdges {
    fn down(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        if !self.options.allow_buttons {
            self.settle(cx, Vec2::ZERO, false);
        }
        Outcome::Continue
    }

    fn moved(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        if event.kind != PointerKind::Mouse {
            return Outcome::Continue;
        }
        if !self.options.allow_buttons && !event.buttons.is_empty() {
            self.settle(cx, Vec2::ZERO, false);
            return Outcome::Continue;
        }
        let sign = if self.options.reverse { -1.0 } else { 1.0 };
        let next = self.pull(event.position, cx.view.screen_size()) * (self.options.speed * sign);
        self.settle(cx, next, true);
        Outcome::Continue
    }

    fn up(&mut self, cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        self.settle(cx, Vec2::ZERO, false);
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        if !self.is_active() {
            return;
        }
        cx.view.pan_by(self.velocity * (elapsed / FRAME_MS));
        cx.moved(PluginKind::MouseEdges);
    }
}
