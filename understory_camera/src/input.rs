// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized input events delivered by the host.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Deserializer};
use understory_event_state::pointer::{PointerId, PointerKind};

use crate::error::CameraError;

bitflags! {
    /// Pressed pointer buttons.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Left mouse button, pen or finger contact.
        const LEFT = 1;
        /// Right mouse button.
        const RIGHT = 1 << 1;
        /// Middle mouse button.
        const MIDDLE = 1 << 2;
    }
}

impl FromStr for Buttons {
    type Err = CameraError;

    /// Parses `"all"` or a space separated list of `left`, `right`, `middle`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" || s.is_empty() {
            return Ok(Self::all());
        }
        s.split_whitespace().try_fold(Self::empty(), |acc, word| {
            let button = match word {
                "left" => Self::LEFT,
                "right" => Self::RIGHT,
                "middle" => Self::MIDDLE,
                _ => return Err(CameraError::UnknownButton(word.to_owned())),
            };
            Ok(acc | button)
        })
    }
}

impl<'de> Deserialize<'de> for Buttons {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A pointer press, move, release or cancel in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Host pointer id.
    pub id: PointerId,
    /// Device class.
    pub kind: PointerKind,
    /// Position in screen pixels.
    pub position: Point,
    /// Buttons held while the event fired.
    pub buttons: Buttons,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl PointerEvent {
    /// A mouse event with the left button held.
    #[must_use]
    pub fn mouse(position: impl Into<Point>) -> Self {
        Self {
            id: PointerId(1),
            kind: PointerKind::Mouse,
            position: position.into(),
            buttons: Buttons::LEFT,
            timestamp: 0,
        }
    }

    /// A mouse move with no button held.
    #[must_use]
    pub fn hover(position: impl Into<Point>) -> Self {
        Self {
            buttons: Buttons::empty(),
            ..Self::mouse(position)
        }
    }

    /// A touch contact.
    #[must_use]
    pub fn touch(id: u64, position: impl Into<Point>) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            position: position.into(),
            buttons: Buttons::LEFT,
            timestamp: 0,
        }
    }

    /// Returns this event with the given timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns this event with the given buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Units of a wheel delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Pixels.
    #[default]
    Pixel,
    /// Lines; scaled by the configured line height.
    Line,
    /// Pages; treated like lines.
    Page,
}

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position in screen pixels.
    pub position: Point,
    /// Scroll delta.
    pub delta: Vec2,
    /// Units of `delta`.
    pub mode: DeltaMode,
    /// Whether the control key was held (trackpad pinch on most platforms).
    pub ctrl: bool,
}

impl WheelEvent {
    /// A pixel‑mode wheel event.
    #[must_use]
    pub fn new(position: impl Into<Point>, delta: impl Into<Vec2>) -> Self {
        Self {
            position: position.into(),
            delta: delta.into(),
            mode: DeltaMode::Pixel,
            ctrl: false,
        }
    }

    /// Returns this event with the given delta mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns this event with the control key held.
    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Delta multiplier: `line_height` for line/page deltas, `1` for pixels.
    #[must_use]
    pub fn step(&self, line_height: f64) -> f64 {
        match self.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line | DeltaMode::Page => line_height,
        }
    }
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::all() {
            return f.write_str("all");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(&name.to_ascii_lowercase())?;
        }
        Ok(())
    }
}
