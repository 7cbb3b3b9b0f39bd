// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small option types shared by several plugins.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer};

use crate::error::CameraError;

/// Axes a gesture may affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Both axes.
    #[default]
    All,
    /// Horizontal only.
    X,
    /// Vertical only.
    Y,
}

impl Direction {
    /// Whether the horizontal axis is enabled.
    #[must_use]
    pub fn x(self) -> bool {
        matches!(self, Self::All | Self::X)
    }

    /// Whether the vertical axis is enabled.
    #[must_use]
    pub fn y(self) -> bool {
        matches!(self, Self::All | Self::Y)
    }
}

impl FromStr for Direction {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(CameraError::UnknownDirection(s.to_owned())),
        }
    }
}

/// Where to place content along one axis when it is smaller than the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Left or top.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Right or bottom.
    End,
}

impl Align {
    /// Pan that places `content` screen pixels inside `screen` pixels.
    pub(crate) fn offset(self, screen: f64, content: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (screen - content) / 2.0,
            Self::End => screen - content,
        }
    }
}

/// Alignment of an undersized world, e.g. `"center"`, `"top-left"` or
/// `"bottom"`. `"none"` disables alignment where the plugin supports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Underflow {
    /// Leave undersized content where it is.
    None,
    /// Align undersized content per axis.
    Align {
        /// Horizontal alignment.
        x: Align,
        /// Vertical alignment.
        y: Align,
    },
}

impl Default for Underflow {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Underflow {
    /// Centered on both axes.
    pub const CENTER: Self = Self::Align {
        x: Align::Center,
        y: Align::Center,
    };

    /// Horizontal alignment, or `None` when disabled.
    #[must_use]
    pub fn x(self) -> Option<Align> {
        match self {
            Self::None => None,
            Self::Align { x, .. } => Some(x),
        }
    }

    /// Vertical alignment, or `None` when disabled.
    #[must_use]
    pub fn y(self) -> Option<Align> {
        match self {
            Self::None => None,
            Self::Align { y, .. } => Some(y),
        }
    }
}

impl FromStr for Underflow {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "none" {
            return Ok(Self::None);
        }
        let (mut x, mut y) = (Align::Center, Align::Center);
        for word in s.split(['-', ' ']).filter(|w| !w.is_empty()) {
            match word {
                "left" => x = Align::Start,
                "right" => x = Align::End,
                "top" => y = Align::Start,
                "bottom" => y = Align::End,
                "center" => {}
                _ => return Err(CameraError::UnknownUnderflow(s.clone())),
            }
        }
        Ok(Self::Align { x, y })
    }
}

impl<'de> Deserialize<'de> for Underflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

bitflags! {
    /// Sides of a bounds rectangle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        /// Left edge.
        const LEFT = 1;
        /// Right edge.
        const RIGHT = 1 << 1;
        /// Top edge.
        const TOP = 1 << 2;
        /// Bottom edge.
        const BOTTOM = 1 << 3;
        /// Left and right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Top and bottom.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl Default for Sides {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for Sides {
    type Err = CameraError;

    /// Parses `"all"` or any combination of `left`, `right`, `top`,
    /// `bottom`, `horizontal` and `vertical`, separated by spaces or dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "all" {
            return Ok(Self::all());
        }
        let mut sides = Self::empty();
        for word in s.split(['-', ' ', ',']).filter(|w| !w.is_empty()) {
            sides |= match word {
                "left" => Self::LEFT,
                "right" => Self::RIGHT,
                "top" => Self::TOP,
                "bottom" => Self::BOTTOM,
                "horizontal" => Self::HORIZONTAL,
                "vertical" => Self::VERTICAL,
                _ => return Err(CameraError::UnknownSide(word.to_owned())),
            };
        }
        Ok(sides)
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_parse() {
        assert_eq!("all".parse::<Sides>().unwrap(), Sides::all());
        assert_eq!("horizontal".parse::<Sides>().unwrap(), Sides::LEFT | Sides::RIGHT);
        assert_eq!("top-left".parse::<Sides>().unwrap(), Sides::TOP | Sides::LEFT);
        assert_eq!("bottom vertical".parse::<Sides>().unwrap(), Sides::VERTICAL);
        assert!("diagonal".parse::<Sides>().is_err());
    }

    #[test]
    fn underflow_parse() {
        assert_eq!("center".parse::<Underflow>().unwrap(), Underflow::CENTER);
        assert_eq!("none".parse::<Underflow>().unwrap(), Underflow::None);
        assert_eq!(
            "top-left".parse::<Underflow>().unwrap(),
            Underflow::Align {
                x: Align::Start,
                y: Align::Start
            }
        );
        assert_eq!(
            "bottom".parse::<Underflow>().unwrap(),
            Underflow::Align {
                x: Align::Center,
                y: Align::End
            }
        );
        assert!("sideways".parse::<Underflow>().is_err());
    }

    #[test]
    fn align_offsets() {
        assert_eq!(Align::Start.offset(100.0, 40.0), 0.0);
        assert_eq!(Align::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(Align::End.offset(100.0, 40.0), 60.0);
    }

    #[test]
    fn direction_axes() {
        assert!(Direction::All.x() && Direction::All.y());
        assert!(Direction::X.x() && !Direction::X.y());
        assert_eq!("y".parse::<Direction>().unwrap(), Direction::Y);
        assert_eq!(Direction::X.to_string(), "x");
        let d: Direction = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(d, Direction::X);
    }
}
