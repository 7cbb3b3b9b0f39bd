// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative viewport setup.
//!
//! A [`CameraConfig`] holds the viewport options at the top level and one
//! optional section per plugin. Sections that are present install the
//! plugin; fields left out take their defaults. Keys are `snake_case`.
//!
//! ```
//! use understory_camera::{CameraConfig, Viewport};
//!
//! let config = CameraConfig::from_json(
//!     r#"{
//!         "screen_width": 400,
//!         "screen_height": 300,
//!         "world_width": 2000,
//!         "world_height": 1500,
//!         "drag": {},
//!         "decelerate": { "friction": 0.9 },
//!         "clamp": { "direction": "all" },
//!         "snap": { "x": 1000, "y": 750, "time": 500, "ease": "easeOutQuad" }
//!     }"#,
//! )
//! .unwrap();
//!
//! let viewport = Viewport::from_config(&config);
//! assert!(viewport.plugins().contains("drag"));
//! assert!(viewport.plugins().contains("snap"));
//! assert!(!viewport.plugins().contains("wheel"));
//! ```

use kurbo::Point;
use serde::Deserialize;

use crate::error::CameraResult;
use crate::plugins::{
    AnimateOptions, BounceOptions, ClampOptions, ClampZoomOptions, DecelerateOptions, DragOptions,
    FollowOptions, MouseEdgesOptions, PinchOptions, SnapOptions, SnapZoomOptions, WheelOptions,
};
use crate::viewport::ViewportOptions;

/// Snap target plus options.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SnapConfig {
    /// Target x in world units.
    pub x: f64,
    /// Target y in world units.
    pub y: f64,
    /// Remaining snap options.
    #[serde(flatten)]
    pub options: SnapOptions,
}

/// Follow target plus options.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FollowConfig {
    /// Fixed world point to follow.
    pub target: Point,
    /// Remaining follow options.
    #[serde(flatten)]
    pub options: FollowOptions,
}

/// Viewport options and the plugins to install.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Screen, world and threshold settings.
    #[serde(flatten)]
    pub viewport: ViewportOptions,
    /// Installs [`Drag`](crate::plugins::Drag).
    pub drag: Option<DragOptions>,
    /// Installs [`Pinch`](crate::plugins::Pinch).
    pub pinch: Option<PinchOptions>,
    /// Installs [`Wheel`](crate::plugins::Wheel).
    pub wheel: Option<WheelOptions>,
    /// Installs [`MouseEdges`](crate::plugins::MouseEdges).
    pub mouse_edges: Option<MouseEdgesOptions>,
    /// Installs [`Decelerate`](crate::plugins::Decelerate).
    pub decelerate: Option<DecelerateOptions>,
    /// Installs [`Animate`](crate::plugins::Animate).
    pub animate: Option<AnimateOptions>,
    /// Installs [`Follow`](crate::plugins::Follow).
    pub follow: Option<FollowConfig>,
    /// Installs [`Snap`](crate::plugins::Snap).
    pub snap: Option<SnapConfig>,
    /// Installs [`SnapZoom`](crate::plugins::SnapZoom).
    pub snap_zoom: Option<SnapZoomOptions>,
    /// Installs [`ClampZoom`](crate::plugins::ClampZoom).
    pub clamp_zoom: Option<ClampZoomOptions>,
    /// Installs [`Clamp`](crate::plugins::Clamp).
    pub clamp: Option<ClampOptions>,
    /// Installs [`Bounce`](crate::plugins::Bounce).
    pub bounce: Option<BounceOptions>,
}

impl CameraConfig {
    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> CameraResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
