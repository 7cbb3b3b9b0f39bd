// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plugin kinds, the hook interface and the per‑dispatch context.
//!
//! Every behavior is one variant of [`Plugin`]. The pipeline drives them all
//! through one internal hook trait; hooks a behavior does not care about
//! default to no‑ops. Plugins never call each other. They coordinate through
//! two channels:
//!
//! - an activity snapshot, rebuilt before each hook, that answers questions
//!   such as "is a drag in progress?" or "is the view coasting on x?";
//! - signals, which a hook queues on the context and the pipeline delivers to
//!   the other enabled plugins as soon as that hook returns.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Deserializer};
use smallvec::SmallVec;
use understory_event_state::pointer::{Pointer, PointerRegistry};
use understory_view2d::ViewTransform;

use crate::error::CameraError;
use crate::event::ViewportEvent;
use crate::input::{PointerEvent, WheelEvent};
use crate::plugins::{
    Animate, Bounce, Clamp, ClampZoom, ClampZoomOptions, Decelerate, Drag, Follow, MouseEdges,
    Pinch, Snap, SnapZoom, Wheel,
};

/// The kind of a plugin; also its unique name in the pipeline.
///
/// Variants are declared in the default priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluginKind {
    /// `"drag"`
    Drag,
    /// `"pinch"`
    Pinch,
    /// `"wheel"`
    Wheel,
    /// `"mouse-edges"`
    MouseEdges,
    /// `"decelerate"`
    Decelerate,
    /// `"animate"`
    Animate,
    /// `"follow"`
    Follow,
    /// `"snap"`
    Snap,
    /// `"snap-zoom"`
    SnapZoom,
    /// `"clamp-zoom"`
    ClampZoom,
    /// `"clamp"`
    Clamp,
    /// `"bounce"`
    Bounce,
}

impl PluginKind {
    /// Number of plugin kinds.
    pub const COUNT: usize = 12;

    /// Every kind, in the default priority order.
    pub const DEFAULT_ORDER: [Self; Self::COUNT] = [
        Self::Drag,
        Self::Pinch,
        Self::Wheel,
        Self::MouseEdges,
        Self::Decelerate,
        Self::Animate,
        Self::Follow,
        Self::Snap,
        Self::SnapZoom,
        Self::ClampZoom,
        Self::Clamp,
        Self::Bounce,
    ];

    /// The plugin's registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Pinch => "pinch",
            Self::Wheel => "wheel",
            Self::MouseEdges => "mouse-edges",
            Self::Decelerate => "decelerate",
            Self::Animate => "animate",
            Self::Follow => "follow",
            Self::Snap => "snap",
            Self::SnapZoom => "snap-zoom",
            Self::ClampZoom => "clamp-zoom",
            Self::Clamp => "clamp",
            Self::Bounce => "bounce",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PluginKind {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CameraError::UnknownPlugin(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for PluginKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Anything that names a plugin: a [`PluginKind`] or its string name.
///
/// Strings that name no plugin resolve to `None`, which every pipeline
/// operation treats as a no‑op.
pub trait PluginKey {
    /// Resolves to a kind, if any.
    fn kind(&self) -> Option<PluginKind>;
}

impl PluginKey for PluginKind {
    fn kind(&self) -> Option<PluginKind> {
        Some(*self)
    }
}

impl PluginKey for &str {
    fn kind(&self) -> Option<PluginKind> {
        self.parse().ok()
    }
}

/// What a hook did with an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Not used; keep propagating.
    #[default]
    Continue,
    /// Used; keep propagating.
    Handled,
    /// Used; lower‑priority plugins do not see this event.
    Stop,
}

/// Cross‑plugin requests, delivered by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Signal {
    /// Release velocity in screen pixels per millisecond.
    Fling(Vec2),
    /// Velocity injected on individual axes.
    Launch { x: Option<f64>, y: Option<f64> },
    /// Stop momentum on the flagged axes.
    Halt { x: bool, y: bool },
    /// Replace the momentum decay on the given axes.
    Damp { x: Option<f64>, y: Option<f64> },
    /// Remove a plugin once the current dispatch finishes.
    Remove(PluginKind),
}

/// Snapshot of what the enabled plugins are doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Activity {
    /// Drag holds at least one pointer.
    pub(crate) dragging: bool,
    /// Pinch owns two pointers.
    pub(crate) pinching: bool,
    /// Momentum on x.
    pub(crate) coasting_x: bool,
    /// Momentum on y.
    pub(crate) coasting_y: bool,
    /// Momentum on x still decaying at its own friction.
    pub(crate) undamped_x: bool,
    /// Momentum on y still decaying at its own friction.
    pub(crate) undamped_y: bool,
    /// A bounce tween is running.
    pub(crate) bouncing: bool,
    /// A wheel plugin is enabled.
    pub(crate) wheel_present: bool,
    /// The wheel plugin zooms on plain wheel events.
    pub(crate) wheel_zoom: bool,
}

impl Activity {
    pub(crate) fn coasting(&self) -> bool {
        self.coasting_x || self.coasting_y
    }
}

/// Everything a hook may touch during one dispatch.
#[derive(Debug)]
pub(crate) struct Context<'a> {
    pub(crate) view: &'a mut ViewTransform,
    pub(crate) pointers: &'a mut PointerRegistry<PluginKind>,
    /// The pointer removed by the current up or cancel event.
    pub(crate) released: Option<Pointer<PluginKind>>,
    pub(crate) activity: Activity,
    pub(crate) zoom_limits: Option<ClampZoomOptions>,
    pub(crate) threshold: f64,
    pub(crate) signals: SmallVec<[Signal; 4]>,
    events: &'a mut Vec<ViewportEvent>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        view: &'a mut ViewTransform,
        pointers: &'a mut PointerRegistry<PluginKind>,
        events: &'a mut Vec<ViewportEvent>,
        threshold: f64,
    ) -> Self {
        Self {
            view,
            pointers,
            released: None,
            activity: Activity::default(),
            zoom_limits: None,
            threshold,
            signals: SmallVec::new(),
            events,
        }
    }

    pub(crate) fn emit(&mut self, event: ViewportEvent) {
        self.events.push(event);
    }

    pub(crate) fn moved(&mut self, source: PluginKind) {
        self.emit(ViewportEvent::Moved { source });
    }

    pub(crate) fn zoomed(&mut self, source: PluginKind) {
        self.emit(ViewportEvent::Zoomed { source });
    }

    pub(crate) fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    /// Owner of the pointer released by the current event.
    pub(crate) fn released_owner(&self) -> Option<PluginKind> {
        self.released.and_then(|p| p.owner)
    }

    /// Applies the enabled zoom limits, if any. Returns `true` if the scale
    /// changed.
    pub(crate) fn clamp_zoom(&mut self) -> bool {
        let Some(limits) = self.zoom_limits else {
            return false;
        };
        let changed = limits.apply(self.view);
        if changed {
            self.zoomed(PluginKind::ClampZoom);
        }
        changed
    }

    pub(crate) fn to_world(&self, screen: Point) -> Point {
        self.view.to_world(screen)
    }
}

/// Hooks the pipeline calls on every enabled plugin.
pub(crate) trait Hooks {
    fn down(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        Outcome::Continue
    }

    fn moved(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        Outcome::Continue
    }

    fn up(&mut self, _cx: &mut Context<'_>, _event: &PointerEvent) -> Outcome {
        Outcome::Continue
    }

    fn cancel(&mut self, cx: &mut Context<'_>, event: &PointerEvent) -> Outcome {
        self.up(cx, event)
    }

    fn wheel(&mut self, _cx: &mut Context<'_>, _event: &WheelEvent) -> Outcome {
        Outcome::Continue
    }

    fn update(&mut self, _cx: &mut Context<'_>, _elapsed: f64) {}

    /// Runs after every input dispatch, even when a plugin stopped it.
    fn after_input(&mut self, _cx: &mut Context<'_>) {}

    fn resize(&mut self, _cx: &mut Context<'_>) {}

    /// The host moved the view directly.
    fn reset(&mut self, _cx: &mut Context<'_>) {}

    fn signal(&mut self, _cx: &mut Context<'_>, _signal: Signal) {}

    fn report(&self, _activity: &mut Activity) {}

    fn resumed(&mut self) {}
}

/// A registered behavior.
#[derive(Debug)]
pub enum Plugin {
    /// Pointer panning and wheel scrolling.
    Drag(Drag),
    /// Two‑finger zoom.
    Pinch(Pinch),
    /// Wheel zoom.
    Wheel(Wheel),
    /// Scrolling while the mouse rests near an edge.
    MouseEdges(MouseEdges),
    /// Momentum after a fling.
    Decelerate(Decelerate),
    /// Timed move and zoom to a destination.
    Animate(Animate),
    /// Chasing a target point.
    Follow(Follow),
    /// Eased move to a fixed point.
    Snap(Snap),
    /// Eased zoom to a fixed scale.
    SnapZoom(SnapZoom),
    /// Zoom limits.
    ClampZoom(ClampZoom),
    /// Position limits.
    Clamp(Clamp),
    /// Elastic return into bounds.
    Bounce(Bounce),
}

macro_rules! plugin_variants {
    ($($variant:ident),* $(,)?) => {
        impl Plugin {
            /// The kind of this plugin.
            #[must_use]
            pub fn kind(&self) -> PluginKind {
                match self {
                    $(Self::$variant(_) => PluginKind::$variant,)*
                }
            }

            pub(crate) fn hooks(&self) -> &dyn Hooks {
                match self {
                    $(Self::$variant(p) => p,)*
                }
            }

            pub(crate) fn hooks_mut(&mut self) -> &mut dyn Hooks {
                match self {
                    $(Self::$variant(p) => p,)*
                }
            }
        }

        $(
            impl From<$variant> for Plugin {
                fn from(plugin: $variant) -> Self {
                    Self::$variant(plugin)
                }
            }
        )*
    };
}

plugin_variants!(
    Drag, Pinch, Wheel, MouseEdges, Decelerate, Animate, Follow, Snap, SnapZoom, ClampZoom, Clamp,
    Bounce,
);
