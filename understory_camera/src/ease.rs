// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions, looked up by their Penner names.
//!
//! Timed behaviors (bounce, snap, snap‑zoom, animate) accept an [`Ease`],
//! either one of the named curves or a custom function on `[0, 1]`.
//!
//! ```
//! use understory_camera::Ease;
//!
//! let ease: Ease = "easeInOutSine".parse().unwrap();
//! assert_eq!(ease.to_string(), "easeInOutSine");
//! // Penner form: (time, begin, change, duration).
//! assert!((ease.apply(500.0, 10.0, 20.0, 1000.0) - 20.0).abs() < 1e-9);
//! ```

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use crate::error::CameraError;

/// Shape of a Penner easing curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// `p²`.
    Quad,
    /// `p³`.
    Cubic,
    /// `p⁴`.
    Quart,
    /// `p⁵`.
    Quint,
    /// Quarter cosine wave.
    Sine,
    /// Base‑2 exponential.
    Expo,
    /// Quarter circle.
    Circ,
    /// Slight overshoot past the start.
    Back,
    /// Bouncing‑ball rebounds.
    Bounce,
}

const CURVES: [(&str, Curve); 9] = [
    ("Quad", Curve::Quad),
    ("Cubic", Curve::Cubic),
    ("Quart", Curve::Quart),
    ("Quint", Curve::Quint),
    ("Sine", Curve::Sine),
    ("Expo", Curve::Expo),
    ("Circ", Curve::Circ),
    ("Back", Curve::Back),
    ("Bounce", Curve::Bounce),
];

impl Curve {
    fn ease_in(self, p: f64) -> f64 {
        match self {
            Self::Quad => p * p,
            Self::Cubic => p * p * p,
            Self::Quart => p.powi(4),
            Self::Quint => p.powi(5),
            Self::Sine => 1.0 - (p * PI / 2.0).cos(),
            Self::Expo => {
                if p == 0.0 {
                    0.0
                } else {
                    2_f64.powf(10.0 * (p - 1.0))
                }
            }
            Self::Circ => 1.0 - (1.0 - p * p).max(0.0).sqrt(),
            Self::Back => {
                let s = 1.70158;
                p * p * ((s + 1.0) * p - s)
            }
            Self::Bounce => 1.0 - bounce_out(1.0 - p),
        }
    }

    fn name(self) -> &'static str {
        CURVES
            .iter()
            .find(|(_, c)| *c == self)
            .map_or("", |(name, _)| name)
    }
}

fn bounce_out(p: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if p < 1.0 / D {
        N * p * p
    } else if p < 2.0 / D {
        let p = p - 1.5 / D;
        N * p * p + 0.75
    } else if p < 2.5 / D {
        let p = p - 2.25 / D;
        N * p * p + 0.9375
    } else {
        let p = p - 2.625 / D;
        N * p * p + 0.984_375
    }
}

/// An easing function mapping progress in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Starts slowly.
    In(Curve),
    /// Ends slowly.
    Out(Curve),
    /// Starts and ends slowly.
    InOut(Curve),
    /// A caller supplied function on `[0, 1]`.
    Custom(fn(f64) -> f64),
}

impl PartialEq for Ease {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Linear, Self::Linear) => true,
            (Self::In(a), Self::In(b))
            | (Self::Out(a), Self::Out(b))
            | (Self::InOut(a), Self::InOut(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => core::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::IN_OUT_SINE
    }
}

impl Ease {
    /// `easeInOutSine`, the default for bounce and snapping.
    pub const IN_OUT_SINE: Self = Self::InOut(Curve::Sine);

    /// Eased progress for linear progress `p`, which is clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::In(c) => c.ease_in(p),
            Self::Out(c) => 1.0 - c.ease_in(1.0 - p),
            Self::InOut(c) => {
                if p < 0.5 {
                    c.ease_in(2.0 * p) / 2.0
                } else {
                    1.0 - c.ease_in(2.0 - 2.0 * p) / 2.0
                }
            }
            Self::Custom(f) => f(p),
        }
    }

    /// Penner form: the value at `time` of a transition from `begin` by
    /// `change` over `duration`.
    #[must_use]
    pub fn apply(self, time: f64, begin: f64, change: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return begin + change;
        }
        begin + change * self.progress(time / duration)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::In(c) => write!(f, "easeIn{}", c.name()),
            Self::Out(c) => write!(f, "easeOut{}", c.name()),
            Self::InOut(c) => write!(f, "easeInOut{}", c.name()),
            Self::Custom(_) => f.write_str("custom"),
        }
    }
}

impl FromStr for Ease {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "linear" {
            return Ok(Self::Linear);
        }
        let curve = |name: &str| {
            CURVES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, c)| *c)
                .ok_or_else(|| CameraError::UnknownEase(s.to_owned()))
        };
        if let Some(rest) = s.strip_prefix("easeInOut") {
            curve(rest).map(Self::InOut)
        } else if let Some(rest) = s.strip_prefix("easeIn") {
            curve(rest).map(Self::In)
        } else if let Some(rest) = s.strip_prefix("easeOut") {
            curve(rest).map(Self::Out)
        } else {
            Err(CameraError::UnknownEase(s.to_owned()))
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = CameraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
