// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View 2D: a per‑axis pan/zoom transform between a world plane
//! and a screen.
//!
//! This crate provides a small, headless model of a 2D camera:
//! - The authoritative transform state: a screen‑space pan and an
//!   independent horizontal/vertical scale.
//! - Derived quantities (corner, center, visible world bounds, world extents
//!   shown on screen) that are always computed, never cached.
//! - Coordinate conversion between screen and world space.
//! - Anchor‑preserving zoom and simple fitting helpers.
//!
//! It does **not** interpret input or run animations. Gesture handling,
//! momentum, clamping and snapping live in `understory_camera`, which owns a
//! [`ViewTransform`] and mutates it through its plugin pipeline.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_view2d::ViewTransform;
//!
//! let mut view = ViewTransform::new(Size::new(200.0, 300.0))
//!     .with_world_size(Size::new(1000.0, 1000.0));
//!
//! // Show the whole world width on screen, keeping the zoom uniform.
//! view.fit_width(1000.0, true);
//! assert!((view.world_screen_width() - 1000.0).abs() < 1e-9);
//!
//! // Center the camera on a world point.
//! view.set_center(Point::new(500.0, 500.0));
//! let world = view.to_world(Point::new(100.0, 150.0));
//! assert!((world.x - 500.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The transform is axis‑aligned; rotation is out of scope.
//! - Scales are per axis so callers can stretch one axis (for example a
//!   timeline that zooms only horizontally).
//! - Scales are kept strictly positive: degenerate requests saturate to
//!   [`MIN_SCALE`] instead of failing.
//!
//! This crate is `no_std`.

#![no_std]

mod transform;

pub use transform::{MIN_SCALE, ViewTransform};
