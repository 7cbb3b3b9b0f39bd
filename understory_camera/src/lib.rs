// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_camera --heading-base-level=0

//! Understory Camera: an interactive 2D camera with pluggable behaviors.
//!
//! A [`Viewport`] wraps a [`ViewTransform`](understory_view2d::ViewTransform)
//! and turns host input into pan and zoom through a pipeline of plugins:
//!
//! - Gestures: [`Drag`](plugins::Drag), [`Pinch`](plugins::Pinch),
//!   [`Wheel`](plugins::Wheel) and [`MouseEdges`](plugins::MouseEdges).
//! - Motion: [`Decelerate`](plugins::Decelerate),
//!   [`Animate`](plugins::Animate), [`Follow`](plugins::Follow),
//!   [`Snap`](plugins::Snap) and [`SnapZoom`](plugins::SnapZoom).
//! - Limits: [`ClampZoom`](plugins::ClampZoom), [`Clamp`](plugins::Clamp)
//!   and [`Bounce`](plugins::Bounce).
//!
//! The crate is headless. The host forwards pointer and wheel events in
//! screen pixels, calls [`Viewport::update`] once per frame with the elapsed
//! milliseconds, reads the transform back and drains [`ViewportEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_camera::plugins::{DecelerateOptions, DragOptions};
//! use understory_camera::{PointerEvent, Viewport, ViewportEvent, ViewportOptions};
//!
//! let mut viewport = Viewport::new(ViewportOptions {
//!     screen_width: 400.0,
//!     screen_height: 300.0,
//!     world_width: Some(2000.0),
//!     world_height: Some(2000.0),
//!     ..ViewportOptions::default()
//! });
//! viewport
//!     .drag(DragOptions::default())
//!     .decelerate(DecelerateOptions::default());
//!
//! // Press, drag 50 px to the left over 50 ms and let go.
//! viewport.handle_pointer_down(&PointerEvent::mouse((200.0, 150.0)).at(0));
//! viewport.handle_pointer_move(&PointerEvent::mouse((175.0, 150.0)).at(25));
//! viewport.handle_pointer_move(&PointerEvent::mouse((150.0, 150.0)).at(50));
//! viewport.handle_pointer_up(&PointerEvent::mouse((150.0, 150.0)).at(50));
//! assert_eq!(viewport.corner(), Point::new(50.0, 0.0));
//!
//! // Momentum keeps the view moving on the next frame.
//! viewport.update(16.0);
//! assert!(viewport.corner().x > 50.0);
//!
//! let events: Vec<_> = viewport.drain_events().collect();
//! assert!(events.iter().any(|e| matches!(e, ViewportEvent::DragStart { .. })));
//! assert_eq!(events.last(), Some(&ViewportEvent::FrameEnd));
//! ```
//!
//! ## Plugins
//!
//! At most one plugin of each [`PluginKind`] is installed; installing a
//! second replaces the first and drops its in‑flight state. Plugins run in a
//! fixed priority order that [`Pipeline::set_priority`] can change. A plugin
//! can be paused, resumed or removed by kind or by name:
//!
//! ```rust
//! use understory_camera::plugins::WheelOptions;
//! use understory_camera::Viewport;
//!
//! let mut viewport = Viewport::default();
//! viewport.wheel(WheelOptions::default());
//! assert!(viewport.plugins_mut().pause("wheel"));
//! assert!(viewport.remove_plugin("wheel").is_some());
//! // Unknown names are ignored.
//! assert!(viewport.remove_plugin("teleport").is_none());
//! ```
//!
//! ## Configuration
//!
//! Every options struct deserializes with `serde`, and [`CameraConfig`]
//! describes a whole viewport in JSON. Names that cannot be parsed, such as
//! an unknown easing, are reported as [`CameraError`]s. Once running, the
//! camera never fails: degenerate numbers saturate instead.

mod config;
mod ease;
mod error;
mod event;
mod frame;
mod input;
mod options;
mod pipeline;
mod plugin;
pub mod plugins;
mod viewport;

pub use config::{CameraConfig, FollowConfig, SnapConfig};
pub use ease::{Curve, Ease};
pub use error::{CameraError, CameraResult};
pub use event::{Axis, ViewportEvent};
pub use input::{Buttons, DeltaMode, PointerEvent, WheelEvent};
pub use options::{Align, Direction, Sides, Underflow};
pub use pipeline::Pipeline;
pub use plugin::{Outcome, Plugin, PluginKey, PluginKind};
pub use viewport::{Viewport, ViewportOptions};

pub use understory_event_state::pointer::{PointerId, PointerKind};
