// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications queued by the viewport for the host.

use kurbo::Point;

use crate::plugin::PluginKind;

/// A screen axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// A notification produced while handling input or advancing a frame.
///
/// Events are queued in the order they happen and drained with
/// [`Viewport::drain_events`](crate::Viewport::drain_events).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// A frame finished; fired once per [`Viewport::update`](crate::Viewport::update).
    FrameEnd,
    /// A plugin moved the view.
    Moved {
        /// The plugin responsible.
        source: PluginKind,
    },
    /// A plugin changed the zoom.
    Zoomed {
        /// The plugin responsible.
        source: PluginKind,
    },
    /// The view stopped moving after at least one frame of motion.
    MovedEnd,
    /// The zoom stopped changing after at least one frame of change.
    ZoomedEnd,
    /// A press and release without movement past the drag threshold.
    Clicked {
        /// Release position in screen pixels.
        screen: Point,
        /// Release position in world units.
        world: Point,
    },
    /// A drag crossed the threshold and started panning.
    DragStart {
        /// Pointer position in screen pixels.
        screen: Point,
        /// Pointer position in world units.
        world: Point,
    },
    /// A drag ended.
    DragEnd {
        /// Pointer position in screen pixels.
        screen: Point,
        /// Pointer position in world units.
        world: Point,
    },
    /// Two pointers started a pinch.
    PinchStart,
    /// A pinch ended.
    PinchEnd,
    /// The wheel scrolled the view instead of zooming it.
    WheelScroll,
    /// A snap started moving toward its target.
    SnapStart,
    /// A snap reached its target.
    SnapEnd,
    /// A snap‑zoom started.
    SnapZoomStart,
    /// A snap‑zoom reached its target.
    SnapZoomEnd,
    /// A bounce tween started on `axis`.
    BounceStart {
        /// The corrected axis.
        axis: Axis,
    },
    /// A bounce tween finished on `axis`.
    BounceEnd {
        /// The corrected axis.
        axis: Axis,
    },
    /// An animation reached its destination.
    AnimateEnd,
    /// A plugin was removed, by the host or by itself.
    PluginRemoved {
        /// The removed plugin.
        kind: PluginKind,
    },
}
