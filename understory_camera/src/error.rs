// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for parsing named options and loading configuration.
//!
//! Steady‑state camera operation never fails: out‑of‑range numbers saturate
//! and unknown plugin names are ignored. Only turning strings into typed
//! options can go wrong.

use thiserror::Error;

/// Errors produced while parsing camera options.
#[derive(Error, Debug)]
pub enum CameraError {
    /// The easing name is not in the easing table.
    #[error("unknown easing function: {0:?}")]
    UnknownEase(String),

    /// The string names no plugin kind.
    #[error("unknown plugin: {0:?}")]
    UnknownPlugin(String),

    /// The string is not a valid bounce side list.
    #[error("unknown side: {0:?}")]
    UnknownSide(String),

    /// The string is not a mouse button name.
    #[error("unknown mouse button: {0:?}")]
    UnknownButton(String),

    /// The string is not `all`, `x` or `y`.
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),

    /// The string is not a valid underflow alignment.
    #[error("unknown underflow alignment: {0:?}")]
    UnknownUnderflow(String),

    /// JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for camera option parsing.
pub type CameraResult<T> = Result<T, CameraError>;
