// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: Common event state managers for UI interactions.
//!
//! This crate provides small, focused state machines for pointer interactions
//! that require stateful tracking across multiple events:
//!
//! - [`pointer`]: Track pressed pointers, their last positions, and which
//!   handler has claimed each one
//! - [`drag`]: Track drag operations with movement deltas, total offsets and a
//!   release velocity estimate
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Work with any event routing or gesture system
//! - **Generic**: Accept application-specific owner/handler ID types
//!
//! The crate does not assume any particular UI framework or event system.
//! Positions are plain [`kurbo::Point`]s and timestamps are host milliseconds.
//!
//! ## Usage Patterns
//!
//! ### Pointer ownership
//!
//! Use [`pointer::PointerRegistry`] to let several gesture recognizers share a
//! pointer stream while making sure each pointer drives at most one of them:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::pointer::{PointerId, PointerKind, PointerRegistry};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Gesture { Pan, Pinch }
//!
//! let mut pointers = PointerRegistry::new();
//! pointers.down(PointerId(1), PointerKind::Touch, Point::new(0.0, 0.0), 0);
//! pointers.down(PointerId(2), PointerKind::Touch, Point::new(40.0, 0.0), 5);
//!
//! // The pan recognizer grabs the first finger...
//! assert!(pointers.claim(PointerId(1), Gesture::Pan));
//! // ...and the pinch recognizer takes over both once a second finger lands.
//! pointers.transfer(PointerId(1), Gesture::Pinch);
//! pointers.transfer(PointerId(2), Gesture::Pinch);
//! assert_eq!(pointers.centroid(Gesture::Pinch), Some(Point::new(20.0, 0.0)));
//! ```
//!
//! ### Drag Operations
//!
//! Use [`drag::DragState`] to track pointer drag operations:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start drag at (10, 10)
//! drag.start(Point::new(10.0, 10.0), 0);
//!
//! // Move pointer, get delta since last position
//! let delta = drag.update(Point::new(15.0, 12.0), 16).unwrap();
//! // delta is (5.0, 2.0)
//!
//! // Get total offset from start
//! let total = drag.total_offset(Point::new(15.0, 12.0)).unwrap();
//! // total is (5.0, 2.0)
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

pub mod drag;
pub mod pointer;
