// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport: transform, pointer registry, plugins and the frame driver.
//!
//! ## Input flow
//!
//! Each host event first updates the pointer registry, then runs through the
//! plugin pipeline, then the corrective pass. Releases hand the removed
//! pointer to the hooks so a plugin can tell whether it owned it.
//!
//! ## Host operations
//!
//! Host moves ([`Viewport::move_center`], [`Viewport::move_corner`],
//! [`Viewport::ensure_visible`]) run the reset pass, which stops momentum
//! and re‑applies position limits. Host zooms apply the enabled zoom limits
//! unless told not to, and keep the center only when asked.

use kurbo::{Point, Rect, Size, Vec2};
use serde::Deserialize;
use tracing::{debug, trace};
use understory_event_state::pointer::{Pointer, PointerRegistry};
use understory_view2d::ViewTransform;

use crate::config::CameraConfig;
use crate::event::ViewportEvent;
use crate::frame::FrameTracker;
use crate::input::{PointerEvent, WheelEvent};
use crate::pipeline::Pipeline;
use crate::plugin::{Context, Hooks, Outcome, Plugin, PluginKey, PluginKind};
use crate::plugins::{
    Animate, AnimateOptions, Bounce, BounceOptions, Clamp, ClampOptions, ClampZoom,
    ClampZoomOptions, Decelerate, DecelerateOptions, Drag, DragOptions, Follow, FollowOptions,
    FollowTarget, MouseEdges, MouseEdgesOptions, Pinch, PinchOptions, Snap, SnapOptions, SnapZoom,
    SnapZoomOptions, Wheel, WheelOptions,
};

/// Construction options for [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    /// Screen width in pixels.
    pub screen_width: f64,
    /// Screen height in pixels.
    pub screen_height: f64,
    /// World width; follows the screen width when unset.
    pub world_width: Option<f64>,
    /// World height; follows the screen height when unset.
    pub world_height: Option<f64>,
    /// Screen pixels a pointer must travel before a press counts as a drag.
    pub threshold: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            world_width: None,
            world_height: None,
            threshold: 5.0,
        }
    }
}

/// World size after overriding the given axes.
fn merge_world(view: &ViewTransform, width: Option<f64>, height: Option<f64>) -> Option<Size> {
    if width.is_none() && height.is_none() {
        return view.explicit_world_size();
    }
    let current = view.world_size();
    Some(Size::new(
        width.unwrap_or(current.width),
        height.unwrap_or(current.height),
    ))
}

/// An interactive 2D camera.
///
/// The viewport owns the [`ViewTransform`] and a [`Pipeline`] of plugins.
/// Hosts feed it pointer and wheel events, call [`update`](Self::update)
/// once per frame and drain the queued [`ViewportEvent`]s.
#[derive(Debug)]
pub struct Viewport {
    view: ViewTransform,
    pointers: PointerRegistry<PluginKind>,
    plugins: Pipeline,
    events: Vec<ViewportEvent>,
    threshold: f64,
    hit_area: Option<Rect>,
    paused: bool,
    /// Where the only pressed pointer went down, while a click is possible.
    click: Option<Point>,
    frame: FrameTracker,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportOptions::default())
    }
}

impl Viewport {
    /// Creates a viewport with no plugins.
    #[must_use]
    pub fn new(options: ViewportOptions) -> Self {
        let mut view = ViewTransform::new(Size::new(options.screen_width, options.screen_height));
        let world = merge_world(&view, options.world_width, options.world_height);
        view.set_world_size(world);
        Self {
            frame: FrameTracker::new(&view),
            view,
            pointers: PointerRegistry::new(),
            plugins: Pipeline::new(),
            events: Vec::new(),
            threshold: options.threshold,
            hit_area: None,
            paused: false,
            click: None,
        }
    }

    /// Creates a viewport and installs the configured plugins.
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut viewport = Self::new(config.viewport);
        viewport.configure(config);
        viewport
    }

    /// Installs every plugin named in `config`, replacing plugins of the
    /// same kind.
    pub fn configure(&mut self, config: &CameraConfig) -> &mut Self {
        // Zoom limits first so snap-zoom targets respect them.
        if let Some(options) = config.clamp_zoom {
            self.clamp_zoom(options);
        }
        if let Some(options) = config.drag {
            self.drag(options);
        }
        if let Some(options) = config.pinch {
            self.pinch(options);
        }
        if let Some(options) = config.wheel {
            self.wheel(options);
        }
        if let Some(options) = config.mouse_edges {
            self.mouse_edges(options);
        }
        if let Some(options) = config.decelerate {
            self.decelerate(options);
        }
        if let Some(options) = config.animate {
            self.animate(options);
        }
        if let Some(follow) = config.follow {
            self.follow(follow.target, follow.options);
        }
        if let Some(snap) = config.snap {
            self.snap(Point::new(snap.x, snap.y), snap.options);
        }
        if let Some(options) = config.snap_zoom {
            self.snap_zoom(options);
        }
        if let Some(options) = config.clamp {
            self.clamp(options);
        }
        if let Some(options) = config.bounce {
            self.bounce(options);
        }
        self
    }

    // --- Plugins ---

    /// The plugin pipeline.
    #[must_use]
    pub fn plugins(&self) -> &Pipeline {
        &self.plugins
    }

    /// The plugin pipeline, for pausing, reordering or removing plugins.
    pub fn plugins_mut(&mut self) -> &mut Pipeline {
        &mut self.plugins
    }

    /// Removes a plugin, releasing its pointers. Unknown names are ignored.
    pub fn remove_plugin(&mut self, key: impl PluginKey) -> Option<Plugin> {
        let removed = self.plugins.remove(key);
        self.flush_removed();
        removed
    }

    fn install(&mut self, plugin: impl Into<Plugin>) -> &mut Self {
        let plugin = plugin.into();
        let kind = plugin.kind();
        if self.plugins.add(plugin).is_some() {
            self.pointers.release_all(kind);
        }
        self
    }

    /// Pans with pointer drags and, optionally, the wheel.
    pub fn drag(&mut self, options: DragOptions) -> &mut Self {
        self.install(Drag::new(options))
    }

    /// Zooms and pans with two touch points.
    pub fn pinch(&mut self, options: PinchOptions) -> &mut Self {
        self.install(Pinch::new(options))
    }

    /// Zooms with the wheel.
    pub fn wheel(&mut self, options: WheelOptions) -> &mut Self {
        self.install(Wheel::new(options))
    }

    /// Scrolls while the mouse is near the screen edges.
    pub fn mouse_edges(&mut self, options: MouseEdgesOptions) -> &mut Self {
        self.install(MouseEdges::new(options))
    }

    /// Keeps coasting after a drag is released.
    pub fn decelerate(&mut self, options: DecelerateOptions) -> &mut Self {
        self.install(Decelerate::new(options))
    }

    /// Moves and zooms to a destination over time, then removes itself.
    pub fn animate(&mut self, options: AnimateOptions) -> &mut Self {
        self.install(Animate::new(options))
    }

    /// Keeps the view centered on `target`.
    pub fn follow(
        &mut self,
        target: impl FollowTarget + 'static,
        options: FollowOptions,
    ) -> &mut Self {
        self.install(Follow::new(target, options))
    }

    /// Eases the view to `target`, a center or, with `top_left`, a corner.
    pub fn snap(&mut self, target: Point, options: SnapOptions) -> &mut Self {
        self.install(Snap::new(target, options))
    }

    /// Eases the zoom to a world width and/or height.
    ///
    /// A zero duration zooms at once; combined with `remove_on_complete`
    /// nothing is installed.
    pub fn snap_zoom(&mut self, options: SnapZoomOptions) -> &mut Self {
        let plugin = SnapZoom::new(options);
        if options.time <= 0.0 {
            plugin.jump(&mut self.view, self.plugins.zoom_limits());
            if options.remove_on_complete {
                return self;
            }
        }
        self.install(plugin)
    }

    /// Limits the zoom. The limits apply at once.
    pub fn clamp_zoom(&mut self, options: ClampZoomOptions) -> &mut Self {
        self.install(ClampZoom::new(options));
        options.apply(&mut self.view);
        self
    }

    /// Limits the position. The limits apply at once.
    pub fn clamp(&mut self, options: ClampOptions) -> &mut Self {
        self.install(Clamp::new(options));
        options.apply(&mut self.view);
        self
    }

    /// Springs back into bounds after a gesture overshoots them.
    pub fn bounce(&mut self, options: BounceOptions) -> &mut Self {
        self.install(Bounce::new(options))
    }

    // --- Input ---

    /// Handles a pointer press. Returns `true` if a plugin used it.
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) -> bool {
        if self.paused || !self.hits(event.position) {
            return false;
        }
        if !self.pointers.down(event.id, event.kind, event.position, event.timestamp) {
            return false;
        }
        let activity = self.plugins.activity();
        self.click = (self.pointers.len() == 1 && !activity.coasting() && !activity.bouncing)
            .then_some(event.position);
        self.dispatch(None, |h, cx| h.down(cx, event))
    }

    /// Handles a pointer move, pressed or hovering. Returns `true` if a
    /// plugin used it.
    pub fn handle_pointer_move(&mut self, event: &PointerEvent) -> bool {
        if self.paused {
            return false;
        }
        let pressed = self.pointers.moved(event.id, event.position).is_some();
        if pressed && let Some(start) = self.click {
            let d = event.position - start;
            if d.x.abs() >= self.threshold || d.y.abs() >= self.threshold {
                self.click = None;
            }
        }
        self.dispatch(None, |h, cx| h.moved(cx, event))
    }

    /// Handles a pointer release. Returns `true` if a plugin used it.
    ///
    /// Emits [`ViewportEvent::Clicked`] when the last pointer comes up
    /// without having moved past the threshold.
    pub fn handle_pointer_up(&mut self, event: &PointerEvent) -> bool {
        let released = self.pointers.up(event.id);
        if self.paused {
            self.click = None;
            return false;
        }
        let used = self.dispatch(released, |h, cx| h.up(cx, event));
        if released.is_some() && self.pointers.is_empty() && self.click.take().is_some() {
            let world = self.view.to_world(event.position);
            trace!(x = event.position.x, y = event.position.y, "clicked");
            self.events.push(ViewportEvent::Clicked {
                screen: event.position,
                world,
            });
        }
        used
    }

    /// Handles a pointer cancel. Like a release, without a click.
    pub fn handle_pointer_cancel(&mut self, event: &PointerEvent) -> bool {
        let released = self.pointers.up(event.id);
        self.click = None;
        if self.paused {
            return false;
        }
        self.dispatch(released, |h, cx| h.cancel(cx, event))
    }

    /// Handles a wheel event. Returns `true` if a plugin used it; hosts
    /// should then suppress the default page scroll.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        if self.paused || !self.hits(event.position) {
            return false;
        }
        self.dispatch(None, |h, cx| h.wheel(cx, event))
    }

    /// Advances every plugin by `elapsed` milliseconds and closes the frame.
    pub fn update(&mut self, elapsed: f64) {
        if self.paused {
            return;
        }
        self.pass(|h, cx| h.update(cx, elapsed));
        self.frame.end_frame(&self.view, &mut self.events);
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, ViewportEvent> {
        self.events.drain(..)
    }

    fn context(&mut self) -> (&mut Pipeline, Context<'_>) {
        let cx = Context::new(&mut self.view, &mut self.pointers, &mut self.events, self.threshold);
        (&mut self.plugins, cx)
    }

    fn dispatch(
        &mut self,
        released: Option<Pointer<PluginKind>>,
        hook: impl FnMut(&mut dyn Hooks, &mut Context<'_>) -> Outcome,
    ) -> bool {
        let used = {
            let (plugins, mut cx) = self.context();
            cx.released = released;
            plugins.dispatch(&mut cx, hook)
        };
        self.flush_removed();
        used
    }

    fn pass(&mut self, hook: impl FnMut(&mut dyn Hooks, &mut Context<'_>)) {
        if self.paused {
            return;
        }
        {
            let (plugins, mut cx) = self.context();
            plugins.each(&mut cx, hook);
        }
        self.flush_removed();
    }

    fn flush_removed(&mut self) {
        for kind in self.plugins.take_removed() {
            self.pointers.release_all(kind);
            self.events.push(ViewportEvent::PluginRemoved { kind });
        }
    }

    fn hits(&self, at: Point) -> bool {
        self.hit_area
            .unwrap_or_else(|| Rect::from_origin_size(Point::ORIGIN, self.view.screen_size()))
            .contains(at)
    }

    // --- Host operations ---

    /// Changes the screen size and, for the given axes, the world size.
    pub fn resize(
        &mut self,
        screen_width: f64,
        screen_height: f64,
        world_width: Option<f64>,
        world_height: Option<f64>,
    ) -> &mut Self {
        self.view.set_screen_size(Size::new(screen_width, screen_height));
        let world = merge_world(&self.view, world_width, world_height);
        self.view.set_world_size(world);
        debug!(screen_width, screen_height, ?world, "resized viewport");
        self.pass(|h, cx| h.resize(cx));
        self
    }

    /// Centers the view on a world point.
    pub fn move_center(&mut self, center: Point) -> &mut Self {
        self.view.set_center(center);
        self.pass(|h, cx| h.reset(cx));
        self
    }

    /// Puts a world point at the top‑left of the screen.
    pub fn move_corner(&mut self, corner: Point) -> &mut Self {
        self.view.set_corner(corner);
        self.pass(|h, cx| h.reset(cx));
        self
    }

    fn apply_zoom_limits(&mut self) {
        if let Some(limits) = self.plugins.zoom_limits() {
            limits.apply(&mut self.view);
        }
    }

    /// Sets a uniform scale, keeping the center when `center` is `true`.
    pub fn set_zoom(&mut self, scale: f64, center: bool) -> &mut Self {
        let keep = center.then(|| self.view.center());
        self.view.set_scale(Vec2::new(scale, scale));
        self.apply_zoom_limits();
        if let Some(c) = keep {
            self.view.set_center(c);
        }
        self
    }

    /// Changes the visible world width by `change` world units.
    pub fn zoom(&mut self, change: f64, center: bool) -> &mut Self {
        let width = self.view.world_screen_width() + change;
        self.fit_width(width, center, true, false)
    }

    /// Scales by `1 + percent`.
    pub fn zoom_percent(&mut self, percent: f64, center: bool) -> &mut Self {
        let scale = self.view.scale().x * (1.0 + percent);
        self.set_zoom(scale, center)
    }

    /// Fits `width` world units across the screen. With `scale_y` the zoom
    /// stays uniform; `no_clamp` skips the zoom limits.
    pub fn fit_width(
        &mut self,
        width: f64,
        center: bool,
        scale_y: bool,
        no_clamp: bool,
    ) -> &mut Self {
        let keep = center.then(|| self.view.center());
        self.view.fit_width(width, scale_y);
        if !no_clamp {
            self.apply_zoom_limits();
        }
        if let Some(c) = keep {
            self.view.set_center(c);
        }
        self
    }

    /// Fits `height` world units down the screen. With `scale_x` the zoom
    /// stays uniform; `no_clamp` skips the zoom limits.
    pub fn fit_height(
        &mut self,
        height: f64,
        center: bool,
        scale_x: bool,
        no_clamp: bool,
    ) -> &mut Self {
        let keep = center.then(|| self.view.center());
        self.view.fit_height(height, scale_x);
        if !no_clamp {
            self.apply_zoom_limits();
        }
        if let Some(c) = keep {
            self.view.set_center(c);
        }
        self
    }

    /// Fits a world region, defaulting to the world size, with a uniform
    /// zoom.
    pub fn fit(&mut self, center: bool, width: Option<f64>, height: Option<f64>) -> &mut Self {
        let world = self.view.world_size();
        let keep = center.then(|| self.view.center());
        self.view
            .fit(width.unwrap_or(world.width), height.unwrap_or(world.height));
        self.apply_zoom_limits();
        if let Some(c) = keep {
            self.view.set_center(c);
        }
        self
    }

    /// Fits the whole world with a uniform zoom.
    pub fn fit_world(&mut self, center: bool) -> &mut Self {
        self.fit(center, None, None)
    }

    /// Moves the view the least distance that shows `rect`. With
    /// `resize_to_fit`, zooms out first when `rect` is larger than the view.
    pub fn ensure_visible(&mut self, rect: Rect, resize_to_fit: bool) -> &mut Self {
        if resize_to_fit
            && (rect.width() > self.view.world_screen_width()
                || rect.height() > self.view.world_screen_height())
        {
            self.fit(true, Some(rect.width()), Some(rect.height()));
        }
        let screen = self.view.screen_size();
        let scale = self.view.scale();
        let mut pan = self.view.pan();
        if rect.x0 < self.view.left() {
            pan.x = -rect.x0 * scale.x;
        } else if rect.x1 > self.view.right() {
            pan.x = screen.width - rect.x1 * scale.x;
        }
        if rect.y0 < self.view.top() {
            pan.y = -rect.y0 * scale.y;
        } else if rect.y1 > self.view.bottom() {
            pan.y = screen.height - rect.y1 * scale.y;
        }
        if pan != self.view.pan() {
            self.view.set_pan(pan);
            self.pass(|h, cx| h.reset(cx));
        }
        self
    }

    /// Sets a uniform scale about the center.
    pub fn set_scaled(&mut self, scale: f64) -> &mut Self {
        self.set_zoom(scale, true)
    }

    // --- State ---

    /// Freezes or resumes the whole viewport. While paused, input is ignored
    /// and [`update`](Self::update) does nothing.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "viewport pause changed");
        }
        self.paused = paused;
    }

    /// Returns `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Restricts presses and wheel events to `area`, in screen pixels.
    /// `None` accepts the whole screen.
    pub fn set_hit_area(&mut self, area: Option<Rect>) {
        self.hit_area = area;
    }

    /// The explicit hit area, if any.
    #[must_use]
    pub fn hit_area(&self) -> Option<Rect> {
        self.hit_area
    }

    /// Drag threshold in screen pixels.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sets the drag threshold.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// The pressed pointers and their owners.
    #[must_use]
    pub fn pointers(&self) -> &PointerRegistry<PluginKind> {
        &self.pointers
    }

    /// Returns `true` if the view moved during the last frame.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.frame.is_moving()
    }

    /// Returns `true` if the zoom changed during the last frame.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.frame.is_zooming()
    }

    /// Returns `true` if the view changed since the flag was last cleared.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.frame.is_dirty()
    }

    /// Sets or clears the dirty flag, typically after redrawing.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.frame.set_dirty(dirty);
    }

    // --- Transform ---

    /// The current transform.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.view.screen_size()
    }

    /// World size; the screen size when none was given.
    #[must_use]
    pub fn world_size(&self) -> Size {
        self.view.world_size()
    }

    /// Per‑axis scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.view.scale()
    }

    /// Horizontal scale.
    #[must_use]
    pub fn scaled(&self) -> f64 {
        self.view.scaled()
    }

    /// World point at the screen center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.view.center()
    }

    /// World point at the top‑left of the screen.
    #[must_use]
    pub fn corner(&self) -> Point {
        self.view.corner()
    }

    /// World width visible on screen.
    #[must_use]
    pub fn world_screen_width(&self) -> f64 {
        self.view.world_screen_width()
    }

    /// World height visible on screen.
    #[must_use]
    pub fn world_screen_height(&self) -> f64 {
        self.view.world_screen_height()
    }

    /// World width in screen pixels.
    #[must_use]
    pub fn screen_world_width(&self) -> f64 {
        self.view.screen_world_width()
    }

    /// World height in screen pixels.
    #[must_use]
    pub fn screen_world_height(&self) -> f64 {
        self.view.screen_world_height()
    }

    /// World x at the left screen edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.view.left()
    }

    /// World x at the right screen edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.view.right()
    }

    /// World y at the top screen edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.view.top()
    }

    /// World y at the bottom screen edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.view.bottom()
    }

    /// The world rectangle on screen.
    #[must_use]
    pub fn visible_bounds(&self) -> Rect {
        self.view.visible_world_rect()
    }

    /// Screen to world.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        self.view.to_world(screen)
    }

    /// World to screen.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        self.view.to_screen(world)
    }
}
