// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest scale factor a [`ViewTransform`] will hold on either axis.
///
/// Requests for zero, negative or NaN scales saturate to this value so the
/// transform always stays invertible.
pub const MIN_SCALE: f64 = 1e-9;

/// Per‑axis pan + zoom mapping between a world plane and a screen rectangle.
///
/// The mapping is `screen = world * scale + pan`, evaluated per axis:
/// - `pan` is the screen‑space position of the world origin, in pixels.
/// - `scale` is an independent horizontal/vertical zoom factor, always `> 0`.
///
/// Everything else (corner, center, visible bounds, world‑screen extents) is
/// derived on demand and never cached, so the relation
/// `world_screen_width() * scale().x == screen_size().width` holds after
/// every mutation.
///
/// The world size defaults to the screen size until one is set explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    screen: Size,
    world: Option<Size>,
    pan: Vec2,
    scale: Vec2,
}

impl ViewTransform {
    /// Creates a transform for a screen of the given size, at scale `1.0`
    /// with the world origin in the top‑left screen corner.
    #[must_use]
    pub fn new(screen: Size) -> Self {
        Self {
            screen: sanitize_size(screen),
            world: None,
            pan: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Returns this transform with an explicit world size.
    #[must_use]
    pub fn with_world_size(mut self, world: Size) -> Self {
        self.world = Some(sanitize_size(world));
        self
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Sets the screen size. Negative extents saturate to zero.
    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = sanitize_size(screen);
    }

    /// World size in world units, falling back to the screen size when no
    /// explicit world size was set.
    #[must_use]
    pub fn world_size(&self) -> Size {
        self.world.unwrap_or(self.screen)
    }

    /// The explicitly configured world size, if any.
    #[must_use]
    pub fn explicit_world_size(&self) -> Option<Size> {
        self.world
    }

    /// Sets or clears the explicit world size.
    pub fn set_world_size(&mut self, world: Option<Size>) {
        self.world = world.map(sanitize_size);
    }

    /// Screen‑space position of the world origin.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Sets the screen‑space position of the world origin.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Moves the world origin by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Current per‑axis scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Sets the per‑axis scale without moving the world origin.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = Vec2::new(sanitize_scale(scale.x), sanitize_scale(scale.y));
    }

    /// Sets the horizontal scale.
    pub fn set_scale_x(&mut self, x: f64) {
        self.scale.x = sanitize_scale(x);
    }

    /// Sets the vertical scale.
    pub fn set_scale_y(&mut self, y: f64) {
        self.scale.y = sanitize_scale(y);
    }

    /// Horizontal scale, used as "the" zoom level by uniform‑zoom callers.
    #[must_use]
    pub fn scaled(&self) -> f64 {
        self.scale.x
    }

    /// World units visible across the screen width.
    #[must_use]
    pub fn world_screen_width(&self) -> f64 {
        self.screen.width / self.scale.x
    }

    /// World units visible across the screen height.
    #[must_use]
    pub fn world_screen_height(&self) -> f64 {
        self.screen.height / self.scale.y
    }

    /// Screen pixels spanned by the world width.
    #[must_use]
    pub fn screen_world_width(&self) -> f64 {
        self.world_size().width * self.scale.x
    }

    /// Screen pixels spanned by the world height.
    #[must_use]
    pub fn screen_world_height(&self) -> f64 {
        self.world_size().height * self.scale.y
    }

    /// World coordinate shown at the top‑left screen pixel.
    #[must_use]
    pub fn corner(&self) -> Point {
        Point::new(-self.pan.x / self.scale.x, -self.pan.y / self.scale.y)
    }

    /// Pans so that `corner` is shown at the top‑left screen pixel.
    pub fn set_corner(&mut self, corner: Point) {
        self.pan = Vec2::new(-corner.x * self.scale.x, -corner.y * self.scale.y);
    }

    /// World coordinate shown at the center of the screen.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.world_screen_width() / 2.0 - self.pan.x / self.scale.x,
            self.world_screen_height() / 2.0 - self.pan.y / self.scale.y,
        )
    }

    /// Pans so that `center` is shown at the center of the screen.
    pub fn set_center(&mut self, center: Point) {
        self.pan = Vec2::new(
            (self.world_screen_width() / 2.0 - center.x) * self.scale.x,
            (self.world_screen_height() / 2.0 - center.y) * self.scale.y,
        );
    }

    /// World‑space x coordinate of the left screen edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        -self.pan.x / self.scale.x
    }

    /// World‑space x coordinate of the right screen edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left() + self.world_screen_width()
    }

    /// World‑space y coordinate of the top screen edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        -self.pan.y / self.scale.y
    }

    /// World‑space y coordinate of the bottom screen edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top() + self.world_screen_height()
    }

    /// The world‑space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        Rect::from_origin_size(
            (self.left(), self.top()),
            (self.world_screen_width(), self.world_screen_height()),
        )
    }

    /// Converts a screen point into world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.scale.x,
            (screen.y - self.pan.y) / self.scale.y,
        )
    }

    /// Converts a world point into screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale.x + self.pan.x,
            world.y * self.scale.y + self.pan.y,
        )
    }

    /// The world → screen mapping as an affine transform.
    #[must_use]
    pub fn world_to_screen(&self) -> Affine {
        Affine::new([self.scale.x, 0.0, 0.0, self.scale.y, self.pan.x, self.pan.y])
    }

    /// The screen → world mapping as an affine transform.
    #[must_use]
    pub fn screen_to_world(&self) -> Affine {
        Affine::new([
            1.0 / self.scale.x,
            0.0,
            0.0,
            1.0 / self.scale.y,
            -self.pan.x / self.scale.x,
            -self.pan.y / self.scale.y,
        ])
    }

    /// Changes the scale while keeping the world point under the screen
    /// point `anchor` fixed on screen.
    pub fn zoom_about(&mut self, anchor: Point, scale: Vec2) {
        let world = self.to_world(anchor);
        self.set_scale(scale);
        let moved = self.to_screen(world);
        self.pan += anchor - moved;
    }

    /// Scales horizontally so that `width` world units fill the screen width.
    ///
    /// With `scale_y`, the vertical scale follows so the zoom stays uniform.
    pub fn fit_width(&mut self, width: f64, scale_y: bool) {
        self.set_scale_x(self.screen.width / width);
        if scale_y {
            self.scale.y = self.scale.x;
        }
    }

    /// Scales vertically so that `height` world units fill the screen height.
    ///
    /// With `scale_x`, the horizontal scale follows so the zoom stays uniform.
    pub fn fit_height(&mut self, height: f64, scale_x: bool) {
        self.set_scale_y(self.screen.height / height);
        if scale_x {
            self.scale.x = self.scale.y;
        }
    }

    /// Picks the largest uniform scale at which a `width` × `height` region
    /// fits on screen.
    pub fn fit(&mut self, width: f64, height: f64) {
        let sx = sanitize_scale(self.screen.width / width);
        let sy = sanitize_scale(self.screen.height / height);
        let s = sx.min(sy);
        self.scale = Vec2::new(s, s);
    }
}

fn sanitize_scale(value: f64) -> f64 {
    if value.is_nan() || value < MIN_SCALE {
        MIN_SCALE
    } else if value.is_infinite() {
        f64::MAX
    } else {
        value
    }
}

fn sanitize_size(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}
