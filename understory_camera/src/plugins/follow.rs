// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chasing a target point.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use serde::Deserialize;

use crate::plugin::{Context, Hooks, PluginKind};

/// Length of a 60 Hz frame in milliseconds; speeds are given per frame.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Something the camera can follow.
///
/// The position is read on every frame, so a shared cell lets the host move
/// the target without touching the viewport.
pub trait FollowTarget: fmt::Debug {
    /// Current world position.
    fn position(&self) -> Point;
}

impl FollowTarget for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl FollowTarget for Rc<Cell<Point>> {
    fn position(&self) -> Point {
        self.get()
    }
}

/// Options for [`Follow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FollowOptions {
    /// World units per 60 Hz frame; `0` jumps straight to the target.
    pub speed: f64,
    /// Speed gained per millisecond; requires a non‑zero `speed`.
    pub acceleration: Option<f64>,
    /// Dead zone around the center in which the target may move freely.
    pub radius: Option<f64>,
}

/// Keeps the view centered on a target.
#[derive(Debug)]
pub struct Follow {
    target: Box<dyn FollowTarget>,
    options: FollowOptions,
    velocity: f64,
}

impl Follow {
    /// Creates the plugin.
    #[must_use]
    pub fn new(target: impl FollowTarget + 'static, options: FollowOptions) -> Self {
        Self {
            target: Box::new(target),
            options,
            velocity: 0.0,
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &FollowOptions {
        &self.options
    }

    /// Where the target currently is.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target.position()
    }

    /// The center the view is heading for, or `None` when the target is
    /// inside the dead zone.
    fn destination(&self, center: Point) -> Option<Point> {
        let target = self.target.position();
        let Some(radius) = self.options.radius else {
            return Some(target);
        };
        let offset = target - center;
        let distance = offset.hypot();
        if distance <= radius {
            return None;
        }
        Some(target - offset * (radius / distance))
    }

    /// Distance to cover this frame.
    fn step(&mut self, distance: f64, elapsed: f64) -> f64 {
        let frames = elapsed / FRAME_MS;
        let speed = self.options.speed;
        match self.options.acceleration.filter(|&a| a > 0.0) {
            None => speed * frames,
            Some(a) => {
                // Per‑frame acceleration, used for the braking distance.
                let per_frame = a * FRAME_MS;
                if distance > self.velocity * self.velocity / (2.0 * per_frame) {
                    self.velocity = (self.velocity + a * elapsed).min(speed);
                } else {
                    self.velocity = self.velocity.min((2.0 * per_frame * distance).sqrt());
                }
                self.velocity * frames
            }
        }
    }
}

impl Hooks for Follow {
    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        let center = cx.view.center();
        let Some(to) = self.destination(center) else {
            self.velocity = 0.0;
            return;
        };
        let delta: Vec2 = to - center;
        let distance = delta.hypot();
        if distance == 0.0 {
            self.velocity = 0.0;
            return;
        }
        let next = if self.options.speed <= 0.0 {
            to
        } else {
            let step = self.step(distance, elapsed);
            if step >= distance {
                self.velocity = 0.0;
                to
            } else {
                center + delta * (step / distance)
            }
        };
        cx.view.set_center(next);
        cx.moved(PluginKind::Follow);
    }
}
