// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `Viewport` host operations.
//!
//! These cover construction, resizing, the derived bounds and the zoom and
//! fit helpers, without any plugins installed.

use kurbo::{Point, Rect, Size};
use understory_camera::{Viewport, ViewportOptions};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn assert_point(actual: Point, x: f64, y: f64) {
    assert_close(actual.x, x);
    assert_close(actual.y, y);
}

fn sized(screen: Size, world: Option<Size>) -> Viewport {
    Viewport::new(ViewportOptions {
        screen_width: screen.width,
        screen_height: screen.height,
        world_width: world.map(|w| w.width),
        world_height: world.map(|w| w.height),
        ..ViewportOptions::default()
    })
}

#[test]
fn constructor_with_passed_options() {
    let viewport = Viewport::new(ViewportOptions {
        screen_width: 100.0,
        screen_height: 101.0,
        world_width: Some(1000.0),
        world_height: Some(1001.0),
        threshold: 10.0,
    });
    assert_eq!(viewport.screen_size(), Size::new(100.0, 101.0));
    assert_eq!(viewport.world_size(), Size::new(1000.0, 1001.0));
    assert_eq!(viewport.threshold(), 10.0);
    assert_eq!(viewport.scaled(), 1.0);
}

#[test]
fn resize_changes_screen_and_world() {
    let mut viewport = Viewport::default();
    viewport.resize(101.0, 102.0, Some(10000.0), Some(10001.0));
    assert_eq!(viewport.screen_size(), Size::new(101.0, 102.0));
    assert_eq!(viewport.world_size(), Size::new(10000.0, 10001.0));

    // Leaving the world out keeps it.
    viewport.resize(50.0, 60.0, None, None);
    assert_eq!(viewport.world_size(), Size::new(10000.0, 10001.0));
}

#[test]
fn visible_bounds_after_move_corner() {
    let mut viewport = Viewport::default();
    viewport.resize(101.0, 102.0, None, None);
    viewport.move_corner(Point::new(10.0, 11.0));
    let bounds = viewport.visible_bounds();
    assert_close(bounds.x0, 10.0);
    assert_close(bounds.y0, 11.0);
    assert_close(bounds.width(), 101.0);
    assert_close(bounds.height(), 102.0);
}

#[test]
fn zoom_about_center() {
    let mut viewport = Viewport::default();
    viewport.resize(100.0, 200.0, None, None);
    viewport.zoom(100.0, true);
    assert_point(viewport.center(), 50.0, 100.0);
    assert_close(viewport.world_screen_width(), 200.0);
}

#[test]
fn world_screen_extents() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    assert_close(viewport.world_screen_width(), 200.0);
    assert_close(viewport.world_screen_height(), 300.0);
    viewport.fit_width(1000.0, false, true, false);
    assert_close(viewport.world_screen_width(), 1000.0);
    assert_close(viewport.world_screen_height(), 1500.0);
}

#[test]
fn conversions_after_fit() {
    let mut viewport = Viewport::default();
    viewport.resize(200.0, 300.0, Some(1000.0), Some(1000.0));
    viewport.fit(false, None, None);
    assert_point(viewport.to_world(Point::new(50.0, 60.0)), 250.0, 300.0);
    assert_point(viewport.to_screen(Point::new(100.0, 200.0)), 20.0, 40.0);
    assert_close(viewport.screen_world_width(), 200.0);
    assert_close(viewport.screen_world_height(), 200.0);
}

#[test]
fn world_size_is_independent_of_screen() {
    let mut viewport = Viewport::default();
    viewport.resize(200.0, 300.0, Some(500.0), Some(1000.0));
    assert_eq!(viewport.world_size(), Size::new(500.0, 1000.0));
}

#[test]
fn move_center_and_edges() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    viewport.move_center(Point::new(500.0, 500.0));
    assert_close(viewport.top(), 350.0);
    assert_close(viewport.bottom(), 650.0);
    assert_close(viewport.left(), 400.0);
    assert_close(viewport.right(), 600.0);
}

#[test]
fn move_corner_and_corner() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    viewport.move_corner(Point::new(11.0, 12.0));
    assert_point(viewport.corner(), 11.0, 12.0);
}

#[test]
fn fit_width() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    viewport.fit_width(1000.0, true, true, false);
    assert_close(viewport.screen_world_width(), 200.0);
    assert_close(viewport.screen_world_height(), 200.0);
    assert_point(viewport.center(), 100.0, 150.0);

    // Without the center and without touching y.
    viewport.fit_width(500.0, false, false, false);
    assert_point(viewport.center(), 50.0, 150.0);
    assert_close(viewport.screen_world_width(), 400.0);
    assert_close(viewport.screen_world_height(), 200.0);
}

#[test]
fn fit_height() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    viewport.fit_height(400.0, true, true, false);
    assert_close(viewport.screen_world_width(), 750.0);
    assert_close(viewport.screen_world_height(), 750.0);
    assert_point(viewport.center(), 100.0, 150.0);

    viewport.move_center(Point::new(202.0, 22.0));
    viewport.fit_height(800.0, false, false, false);
    assert_point(viewport.center(), 202.0, 44.0);
    assert_close(viewport.world_screen_height(), 800.0);
    assert_close(viewport.screen_world_height(), 375.0);
}

#[test]
fn fit_world() {
    let mut viewport = sized(Size::new(200.0, 300.0), Some(Size::new(1000.0, 1000.0)));
    viewport.fit_world(false);
    viewport.move_corner(Point::ZERO);
    assert_point(viewport.center(), 500.0, 750.0);
    assert_close(viewport.screen_world_width(), 200.0);
    assert_close(viewport.screen_world_height(), 200.0);
}

#[test]
fn pause_toggles() {
    let mut viewport = Viewport::default();
    viewport.set_paused(true);
    assert!(viewport.is_paused());
    viewport.set_paused(false);
    assert!(!viewport.is_paused());
}

#[test]
fn set_zoom() {
    let mut viewport = Viewport::default();
    viewport.set_zoom(5.0, false);
    assert_eq!(viewport.scale().x, 5.0);
    assert_eq!(viewport.scale().y, 5.0);
}

#[test]
fn scaled_keeps_center() {
    let mut viewport = sized(Size::new(100.0, 100.0), Some(Size::new(1000.0, 1000.0)));
    let center = viewport.center();
    assert_eq!(viewport.scaled(), 1.0);
    viewport.set_scaled(5.0);
    assert_eq!(viewport.scale().x, 5.0);
    assert_eq!(viewport.scale().y, 5.0);
    assert_point(viewport.center(), center.x, center.y);
    assert_eq!(viewport.scaled(), 5.0);
}

#[test]
fn zoom_percent_scales_relative() {
    let mut viewport = sized(Size::new(100.0, 100.0), None);
    viewport.zoom_percent(0.5, true);
    assert_close(viewport.scaled(), 1.5);
    assert_point(viewport.center(), 50.0, 50.0);
    viewport.zoom_percent(-0.5, false);
    assert_close(viewport.scaled(), 0.75);
}

#[test]
fn ensure_visible_moves_the_least_distance() {
    let mut viewport = sized(Size::new(100.0, 100.0), Some(Size::new(1000.0, 1000.0)));

    // Already visible: nothing moves.
    viewport.ensure_visible(Rect::new(10.0, 10.0, 20.0, 20.0), false);
    assert_point(viewport.corner(), 0.0, 0.0);

    // Off to the right and below: the far edges line up.
    viewport.ensure_visible(Rect::new(300.0, 400.0, 350.0, 450.0), false);
    assert_close(viewport.right(), 350.0);
    assert_close(viewport.bottom(), 450.0);

    // Back to the left: the near edge lines up.
    viewport.ensure_visible(Rect::new(5.0, 400.0, 15.0, 410.0), false);
    assert_close(viewport.left(), 5.0);
    assert_close(viewport.bottom(), 450.0);
}

#[test]
fn ensure_visible_can_zoom_out() {
    let mut viewport = sized(Size::new(100.0, 100.0), Some(Size::new(1000.0, 1000.0)));
    viewport.ensure_visible(Rect::new(0.0, 0.0, 400.0, 200.0), true);
    assert_close(viewport.scaled(), 0.25);
    let bounds = viewport.visible_bounds();
    assert!(bounds.x0 <= 0.0 && bounds.x1 >= 400.0, "{bounds:?}");
    assert!(bounds.y0 <= 0.0 && bounds.y1 >= 200.0, "{bounds:?}");
}
