// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built‑in behaviors and their options.
//!
//! Each plugin is a plain struct built from an options struct whose
//! `Default` matches the documented defaults. Options deserialize with
//! `serde`, so any field can be left out of a configuration file.

mod animate;
mod bounce;
mod clamp;
mod clamp_zoom;
mod decelerate;
mod drag;
mod follow;
mod mouse_edges;
mod pinch;
mod snap;
mod snap_zoom;
mod wheel;

pub use animate::{Animate, AnimateOptions};
pub use bounce::{Bounce, BounceOptions};
pub use clamp::{Clamp, ClampOptions, Edge};
pub use clamp_zoom::{ClampZoom, ClampZoomOptions, ScaleBound};
pub use decelerate::{Decelerate, DecelerateOptions};
pub use drag::{Drag, DragOptions};
pub use follow::{Follow, FollowOptions, FollowTarget};
pub use mouse_edges::{MouseEdges, MouseEdgesOptions};
pub use pinch::{Pinch, PinchOptions};
pub use snap::{Snap, SnapOptions};
pub use snap_zoom::{SnapZoom, SnapZoomOptions};
pub use wheel::{Wheel, WheelOptions};
