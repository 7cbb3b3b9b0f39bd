// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position limits.

use serde::{Deserialize, Deserializer};
use understory_view2d::ViewTransform;

use crate::options::{Direction, Underflow};
use crate::plugin::{Context, Hooks, PluginKind, Signal};

/// One clamped edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Edge {
    /// Not clamped.
    #[default]
    Off,
    /// Clamped to the matching world edge.
    World,
    /// Clamped to a world coordinate.
    At(f64),
}

impl Edge {
    /// World coordinate of the edge, with `world` used for [`Edge::World`].
    #[must_use]
    pub fn resolve(self, world: f64) -> Option<f64> {
        match self {
            Self::Off => None,
            Self::World => Some(world),
            Self::At(v) => Some(v),
        }
    }
}

impl<'de> Deserialize<'de> for Edge {
    /// Accepts `null`/`false` (off), `true` (world edge) or a number.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            At(f64),
        }
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Flag(false)) => Self::Off,
            Some(Raw::Flag(true)) => Self::World,
            Some(Raw::At(v)) => Self::At(v),
        })
    }
}

/// Options for [`Clamp`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClampOptions {
    /// Left edge.
    pub left: Edge,
    /// Right edge.
    pub right: Edge,
    /// Top edge.
    pub top: Edge,
    /// Bottom edge.
    pub bottom: Edge,
    /// Shorthand that clamps the given axes to the world edges. Overrides
    /// the individual edges when set.
    pub direction: Option<Direction>,
    /// Alignment when the world is smaller than the screen.
    pub underflow: Underflow,
}

impl Default for ClampOptions {
    fn default() -> Self {
        Self {
            left: Edge::Off,
            right: Edge::Off,
            top: Edge::Off,
            bottom: Edge::Off,
            direction: None,
            underflow: Underflow::CENTER,
        }
    }
}

impl ClampOptions {
    /// Clamps the world edges on the given axes.
    #[must_use]
    pub fn world(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// Edges after applying `direction`: left, right, top, bottom.
    fn edges(&self) -> [Edge; 4] {
        match self.direction {
            Some(d) => {
                let on = |b: bool| if b { Edge::World } else { Edge::Off };
                [on(d.x()), on(d.x()), on(d.y()), on(d.y())]
            }
            None => [self.left, self.right, self.top, self.bottom],
        }
    }

    /// Pans `view` back inside the edges. Returns the axes that moved.
    pub(crate) fn apply(&self, view: &mut ViewTransform) -> (bool, bool) {
        let [left, right, top, bottom] = self.edges();
        let screen = view.screen_size();
        let world = view.world_size();
        let scale = view.scale();
        let before = view.pan();
        let mut pan = before;

        if left != Edge::Off || right != Edge::Off {
            let content = world.width * scale.x;
            if content < screen.width {
                if let Some(align) = self.underflow.x() {
                    pan.x = align.offset(screen.width, content);
                }
            } else {
                if let Some(l) = left.resolve(0.0)
                    && view.left() < l
                {
                    pan.x = -l * scale.x;
                }
                if let Some(r) = right.resolve(world.width)
                    && view.right() > r
                {
                    pan.x = screen.width - r * scale.x;
                }
            }
        }
        if top != Edge::Off || bottom != Edge::Off {
            let content = world.height * scale.y;
            if content < screen.height {
                if let Some(align) = self.underflow.y() {
                    pan.y = align.offset(screen.height, content);
                }
            } else {
                if let Some(t) = top.resolve(0.0)
                    && view.top() < t
                {
                    pan.y = -t * scale.y;
                }
                if let Some(b) = bottom.resolve(world.height)
                    && view.bottom() > b
                {
                    pan.y = screen.height - b * scale.y;
                }
            }
        }

        view.set_pan(pan);
        (pan.x != before.x, pan.y != before.y)
    }
}

/// Keeps the view inside fixed edges.
///
/// Runs on every frame, after every input event, when the host moves the
/// view and on resize. Corrections halt momentum on the corrected axis.
#[derive(Debug, Clone)]
pub struct Clamp {
    options: ClampOptions,
}

impl Clamp {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: ClampOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &ClampOptions {
        &self.options
    }

    fn clamp(&self, cx: &mut Context<'_>) {
        let (x, y) = self.options.apply(cx.view);
        if x || y {
            cx.signal(Signal::Halt { x, y });
            cx.moved(PluginKind::Clamp);
        }
    }
}

impl Hooks for Clamp {
    fn update(&mut self, cx: &mut Context<'_>, _elapsed: f64) {
        self.clamp(cx);
    }

    fn after_input(&mut self, cx: &mut Context<'_>) {
        self.clamp(cx);
    }

    fn resize(&mut self, cx: &mut Context<'_>) {
        self.clamp(cx);
    }

    fn reset(&mut self, cx: &mut Context<'_>) {
        self.clamp(cx);
    }
}
