// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum after a fling.
//!
//! Velocity is kept in screen pixels per millisecond and decays
//! geometrically: after `t` milliseconds it has been multiplied by
//! `friction^(t / 16)`. Position integrates that curve exactly, so the
//! distance covered does not depend on how the host slices time into frames.

use kurbo::Vec2;
use serde::Deserialize;
use tracing::trace;

use crate::input::PointerEvent;
use crate::plugin::{Activity, Context, Hooks, Outcome, PluginKind, Signal};

/// Reference frame length for the friction factor, in milliseconds.
const FRAME_MS: f64 = 16.0;

/// Options for [`Decelerate`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecelerateOptions {
    /// Fraction of velocity kept per 16 ms; in `(0, 1]`.
    pub friction: f64,
    /// Speed, in pixels per millisecond, below which momentum stops.
    pub min_speed: f64,
}

impl Default for DecelerateOptions {
    fn default() -> Self {
        Self {
            friction: 0.98,
            min_speed: 0.01,
        }
    }
}

/// Keeps the view moving after a fling and slows it down.
#[derive(Debug, Clone)]
pub struct Decelerate {
    options: DecelerateOptions,
    velocity: Vec2,
    decay: Vec2,
}

impl Decelerate {
    /// Creates the plugin. Out‑of‑range friction saturates into `(0, 1]`.
    #[must_use]
    pub fn new(mut options: DecelerateOptions) -> Self {
        options.friction = sanitize_decay(options.friction);
        Self {
            options,
            velocity: Vec2::ZERO,
            decay: Vec2::new(options.friction, options.friction),
        }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &DecelerateOptions {
        &self.options
    }

    /// Current velocity in screen pixels per millisecond.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` while momentum is moving the view.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Starts momentum on the given axes, leaving the others untouched.
    pub fn activate(&mut self, x: Option<f64>, y: Option<f64>) {
        if let Some(x) = x {
            self.velocity.x = x;
            self.decay.x = self.options.friction;
        }
        if let Some(y) = y {
            self.velocity.y = y;
            self.decay.y = self.options.friction;
        }
    }

    /// Stops all momentum.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Advances momentum by `elapsed` milliseconds and returns the distance
    /// the view should move.
    fn step(&mut self, elapsed: f64) -> Vec2 {
        let x = integrate(&mut self.velocity.x, self.decay.x, elapsed);
        let y = integrate(&mut self.velocity.y, self.decay.y, elapsed);

        let min = self.options.min_speed;
        if self.velocity.x != 0.0 && self.velocity.y != 0.0 {
            if self.velocity.x.abs() < min && self.velocity.y.abs() < min {
                self.velocity = Vec2::ZERO;
            }
        } else {
            if self.velocity.x.abs() < min {
                self.velocity.x = 0.0;
            }
            if self.velocity.y.abs() < min {
                self.velocity.y = 0.0;
            }
        }
        Vec2::new(x, y)
    }
}

/// Distance covered in `dt` ms starting at velocity `v` with per‑frame decay
/// `k`; `v` is advanced in place.
fn integrate(v: &mut f64, k: f64, dt: f64) -> f64 {
    if *v == 0.0 || dt <= 0.0 {
        return 0.0;
    }
    let factor = k.powf(dt / FRAME_MS);
    let distance = if (k - 1.0).abs() < 1e-12 {
        *v * dt
    } else {
        *v * FRAME_MS / k.ln() * (factor - 1.0)
    };
    *v *= factor;
    distance
}

fn sanitize_decay(k: f64) -> f64 {
    if k.is_nan() {
        DecelerateOptions::default().friction
    } else {
        k.clamp(1e-6, 1.0)
    }
}

impl Hooks for Decelerate {
    fn down(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        self.stop();
        Outcome::Continue
    }

    fn cancel(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        self.stop();
        Outcome::Continue
    }

    fn update(&mut self, cx: &mut Context<'_>, elapsed: f64) {
        if !self.is_active() {
            return;
        }
        let delta = self.step(elapsed);
        cx.view.pan_by(delta);
        cx.moved(PluginKind::Decelerate);
    }

    fn reset(&mut self, _cx: &mut Context<'_>) {
        self.stop();
    }

    fn signal(&mut self, _cx: &mut Context<'_>, signal: Signal) {
        match signal {
            Signal::Fling(v) => {
                trace!(vx = v.x, vy = v.y, "fling");
                self.activate(Some(v.x), Some(v.y));
            }
            Signal::Launch { x, y } => self.activate(x, y),
            Signal::Halt { x, y } => {
                if x {
                    self.velocity.x = 0.0;
                }
                if y {
                    self.velocity.y = 0.0;
                }
            }
            Signal::Damp { x, y } => {
                if let Some(k) = x
                    && self.velocity.x != 0.0
                {
                    self.decay.x = sanitize_decay(k);
                }
                if let Some(k) = y
                    && self.velocity.y != 0.0
                {
                    self.decay.y = sanitize_decay(k);
                }
            }
            Signal::Remove(_) => {}
        }
    }

    fn report(&self, activity: &mut Activity) {
        activity.coasting_x |= self.velocity.x != 0.0;
        activity.coasting_y |= self.velocity.y != 0.0;
        activity.undamped_x |= self.velocity.x != 0.0 && self.decay.x == self.options.friction;
        activity.undamped_y |= self.velocity.y != 0.0 && self.decay.y == self.options.friction;
    }
}
