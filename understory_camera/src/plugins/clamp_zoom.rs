// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom limits.

use serde::Deserialize;
use understory_view2d::ViewTransform;

use crate::plugin::{Context, Hooks, PluginKind};

/// A scale bound, uniform or per axis. A `None` axis is unconstrained.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScaleBound {
    /// Same bound on both axes.
    Uniform(f64),
    /// Independent bounds.
    PerAxis {
        /// Horizontal bound.
        #[serde(default)]
        x: Option<f64>,
        /// Vertical bound.
        #[serde(default)]
        y: Option<f64>,
    },
}

impl ScaleBound {
    /// Horizontal bound.
    #[must_use]
    pub fn x(self) -> Option<f64> {
        match self {
            Self::Uniform(v) => Some(v),
            Self::PerAxis { x, .. } => x,
        }
    }

    /// Vertical bound.
    #[must_use]
    pub fn y(self) -> Option<f64> {
        match self {
            Self::Uniform(v) => Some(v),
            Self::PerAxis { y, .. } => y,
        }
    }
}

impl From<f64> for ScaleBound {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

/// Options for [`ClampZoom`]. Every limit defaults to unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClampZoomOptions {
    /// Smallest world width visible on screen.
    pub min_width: Option<f64>,
    /// Smallest world height visible on screen.
    pub min_height: Option<f64>,
    /// Largest world width visible on screen.
    pub max_width: Option<f64>,
    /// Largest world height visible on screen.
    pub max_height: Option<f64>,
    /// Smallest scale.
    pub min_scale: Option<ScaleBound>,
    /// Largest scale.
    pub max_scale: Option<ScaleBound>,
}

impl ClampZoomOptions {
    /// Forces `view` inside the limits. Returns `true` if the scale changed.
    ///
    /// Width and height limits come first; each rescales the other axis by
    /// the same factor so the aspect ratio is kept. Scale limits follow. A
    /// minimum above its maximum saturates at the maximum.
    pub fn apply(&self, view: &mut ViewTransform) -> bool {
        let before = view.scale();

        if let Some(min) = self.min_width
            && view.world_screen_width() < min
        {
            refit_width(view, min);
        }
        if let Some(max) = self.max_width
            && view.world_screen_width() > max
        {
            refit_width(view, max);
        }
        if let Some(min) = self.min_height
            && view.world_screen_height() < min
        {
            refit_height(view, min);
        }
        if let Some(max) = self.max_height
            && view.world_screen_height() > max
        {
            refit_height(view, max);
        }

        let mut scale = view.scale();
        if let Some(min) = self.min_scale {
            if let Some(x) = min.x() {
                scale.x = scale.x.max(x);
            }
            if let Some(y) = min.y() {
                scale.y = scale.y.max(y);
            }
        }
        if let Some(max) = self.max_scale {
            if let Some(x) = max.x() {
                scale.x = scale.x.min(x);
            }
            if let Some(y) = max.y() {
                scale.y = scale.y.min(y);
            }
        }
        if scale != view.scale() {
            view.set_scale(scale);
        }

        view.scale() != before
    }
}

fn refit_width(view: &mut ViewTransform, width: f64) {
    let original = view.scale().x;
    view.fit_width(width, false);
    view.set_scale_y(view.scale().y * view.scale().x / original);
}

fn refit_height(view: &mut ViewTransform, height: f64) {
    let original = view.scale().y;
    view.fit_height(height, false);
    view.set_scale_x(view.scale().x * view.scale().y / original);
}

/// Keeps the zoom within limits.
///
/// The limits apply on registration, after every zoom change made by the
/// host or by another plugin, on resize and on every frame.
#[derive(Debug, Clone)]
pub struct ClampZoom {
    options: ClampZoomOptions,
}

impl ClampZoom {
    /// Creates the plugin.
    #[must_use]
    pub fn new(options: ClampZoomOptions) -> Self {
        Self { options }
    }

    /// The configured limits.
    #[must_use]
    pub fn options(&self) -> &ClampZoomOptions {
        &self.options
    }

    fn clamp(&self, cx: &mut Context<'_>) {
        if self.options.apply(cx.view) {
            cx.zoomed(PluginKind::ClampZoom);
        }
    }
}

impl Hooks for ClampZoom {
    fn update(&mut self, cx: &mut Context<'_>, _elapsed: f64) {
        self.clamp(cx);
    }

    fn after_input(&mut self, cx: &mut Context<'_>) {
        self.clamp(cx);
    }

    fn resize(&mut self, cx: &mut Context<'_>) {
        self.clamp(cx);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn view() -> ViewTransform {
        ViewTransform::new(Size::new(100.0, 200.0))
    }

    #[test]
    fn uniform_scale_limits() {
        let limits = ClampZoomOptions {
            min_scale: Some(0.25.into()),
            max_scale: Some(2.0.into()),
            ..ClampZoomOptions::default()
        };
        let mut v = view();
        v.set_scale(Vec2::new(0.15, 0.15));
        assert!(limits.apply(&mut v));
        assert_eq!(v.scale(), Vec2::new(0.25, 0.25));
        v.set_scale(Vec2::new(3.0, 3.0));
        limits.apply(&mut v);
        assert_eq!(v.scale(), Vec2::new(2.0, 2.0));
        v.set_scale(Vec2::new(1.2, 1.2));
        assert!(!limits.apply(&mut v));
    }

    #[test]
    fn per_axis_scale_limits() {
        let limits = ClampZoomOptions {
            min_scale: Some(ScaleBound::PerAxis { x: Some(1.0), y: Some(0.0) }),
            max_scale: Some(ScaleBound::PerAxis { x: Some(1.0), y: Some(3.0) }),
            ..ClampZoomOptions::default()
        };
        let mut v = view();
        v.set_scale(Vec2::new(0.3, 0.3));
        limits.apply(&mut v);
        assert_eq!(v.scale(), Vec2::new(1.0, 0.3));
        v.set_scale(Vec2::new(3.0, 3.0));
        limits.apply(&mut v);
        assert_eq!(v.scale(), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn unconstrained_axis() {
        let limits = ClampZoomOptions {
            max_scale: Some(ScaleBound::PerAxis { x: None, y: Some(1.0) }),
            ..ClampZoomOptions::default()
        };
        let mut v = view();
        v.set_scale(Vec2::new(50.0, 50.0));
        limits.apply(&mut v);
        assert_eq!(v.scale(), Vec2::new(50.0, 1.0));
    }

    #[test]
    fn width_and_height_limits_keep_aspect() {
        let limits = ClampZoomOptions {
            min_width: Some(10.0),
            min_height: Some(20.0),
            max_width: Some(100.0),
            max_height: Some(150.0),
            ..ClampZoomOptions::default()
        };
        let mut v = view();
        v.fit_width(110.0, true);
        limits.apply(&mut v);
        // Max width first, then max height shrinks the width further.
        assert!(close(v.world_screen_width(), 75.0), "{}", v.world_screen_width());
        assert!(close(v.world_screen_height(), 150.0));
        assert!(close(v.scale().x, v.scale().y));

        v.fit_width(5.0, true);
        limits.apply(&mut v);
        assert!(close(v.world_screen_width(), 10.0));
    }

    #[test]
    fn min_above_max_saturates_at_max() {
        let limits = ClampZoomOptions {
            min_scale: Some(4.0.into()),
            max_scale: Some(2.0.into()),
            ..ClampZoomOptions::default()
        };
        let mut v = view();
        limits.apply(&mut v);
        assert_eq!(v.scale(), Vec2::new(2.0, 2.0));
        // Applying again is a fixed point.
        assert!(!limits.apply(&mut v));
    }

    #[test]
    fn options_deserialize_numbers_and_axes() {
        let json = r#"{
            "min_scale": 0.5,
            "max_scale": { "x": 2, "y": null },
            "min_width": 10
        }"#;
        let o: ClampZoomOptions = serde_json::from_str(json).unwrap();
        assert_eq!(o.min_scale, Some(ScaleBound::Uniform(0.5)));
        assert_eq!(o.max_scale, Some(ScaleBound::PerAxis { x: Some(2.0), y: None }));
        assert_eq!(o.min_width, Some(10.0));
        assert_eq!(o.max_height, None);
    }
}
