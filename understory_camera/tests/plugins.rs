// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for plugins working together inside a `Viewport`.
//!
//! Each test feeds host input and frames through the public API and checks
//! the resulting transform and event stream.

use kurbo::{Point, Rect, Size};
use understory_camera::plugins::{
    AnimateOptions, BounceOptions, ClampOptions, DecelerateOptions, DragOptions,
    MouseEdgesOptions, PinchOptions, SnapOptions, WheelOptions,
};
use understory_camera::{
    Axis, CameraConfig, Direction, Plugin, PluginKind, PointerEvent, Viewport, ViewportEvent,
    ViewportOptions, WheelEvent,
};

const FRAME: f64 = 1000.0 / 60.0;

fn viewport(screen: Size, world: Size) -> Viewport {
    Viewport::new(ViewportOptions {
        screen_width: screen.width,
        screen_height: screen.height,
        world_width: Some(world.width),
        world_height: Some(world.height),
        ..ViewportOptions::default()
    })
}

fn square() -> Viewport {
    viewport(Size::new(100.0, 100.0), Size::new(1000.0, 1000.0))
}

fn events(viewport: &mut Viewport) -> Vec<ViewportEvent> {
    viewport.drain_events().collect()
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

/// Presses at `from`, moves to `to` in `steps` moves 10 ms apart and releases.
fn drag(viewport: &mut Viewport, from: Point, to: Point, steps: u32) {
    viewport.handle_pointer_down(&PointerEvent::mouse(from).at(0));
    let mut t = 0;
    for i in 1..=steps {
        t += 10;
        let p = from.lerp(to, f64::from(i) / f64::from(steps));
        viewport.handle_pointer_move(&PointerEvent::mouse(p).at(t));
    }
    viewport.handle_pointer_up(&PointerEvent::mouse(to).at(t));
}

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut viewport = square();
    viewport.drag(DragOptions::default());
    viewport.move_corner(Point::new(100.0, 200.0));

    viewport.handle_pointer_down(&PointerEvent::mouse((30.0, 40.0)));
    // Below the threshold.
    viewport.handle_pointer_move(&PointerEvent::mouse((32.0, 41.0)));
    viewport.handle_pointer_up(&PointerEvent::mouse((32.0, 41.0)));
    assert_eq!(
        events(&mut viewport),
        [ViewportEvent::Clicked {
            screen: Point::new(32.0, 41.0),
            world: Point::new(132.0, 241.0),
        }]
    );
    assert_eq!(viewport.corner(), Point::new(100.0, 200.0));
}

#[test]
fn drag_past_threshold_pans_and_is_not_a_click() {
    let mut viewport = square();
    viewport.drag(DragOptions::default());
    drag(&mut viewport, Point::new(50.0, 50.0), Point::new(20.0, 10.0), 3);

    assert!(close(viewport.corner(), Point::new(30.0, 40.0)));
    let events = events(&mut viewport);
    assert!(matches!(events.first(), Some(ViewportEvent::DragStart { .. })));
    assert!(matches!(events.last(), Some(ViewportEvent::DragEnd { .. })));
    assert!(!events.iter().any(|e| matches!(e, ViewportEvent::Clicked { .. })));
    assert!(viewport.pointers().is_empty());
}

#[test]
fn fling_coasts_and_comes_to_rest() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).decelerate(DecelerateOptions::default());
    drag(&mut viewport, Point::new(80.0, 50.0), Point::new(40.0, 50.0), 4);
    let released = viewport.corner();
    events(&mut viewport);

    viewport.update(FRAME);
    assert!(viewport.corner().x > released.x);
    assert!(viewport.is_moving());

    for _ in 0..2000 {
        viewport.update(FRAME);
    }
    assert!(!viewport.is_moving());
    let events = events(&mut viewport);
    assert_eq!(
        events.iter().filter(|e| **e == ViewportEvent::MovedEnd).count(),
        1
    );

    // A press in flight stops momentum without a click.
    drag(&mut viewport, Point::new(80.0, 50.0), Point::new(40.0, 50.0), 4);
    viewport.update(FRAME);
    viewport.handle_pointer_down(&PointerEvent::mouse((50.0, 50.0)));
    viewport.handle_pointer_up(&PointerEvent::mouse((50.0, 50.0)));
    let at = viewport.corner();
    viewport.update(FRAME);
    assert_eq!(viewport.corner(), at);
    assert!(!events_contain_click(&mut viewport));
}

fn events_contain_click(viewport: &mut Viewport) -> bool {
    viewport
        .drain_events()
        .any(|e| matches!(e, ViewportEvent::Clicked { .. }))
}

#[test]
fn clamp_holds_the_view_inside_the_world() {
    let mut viewport = square();
    viewport
        .drag(DragOptions::default())
        .decelerate(DecelerateOptions::default())
        .clamp(ClampOptions::world(Direction::All));

    // Pull the content right: the view would show negative world x.
    drag(&mut viewport, Point::new(10.0, 50.0), Point::new(90.0, 50.0), 4);
    assert_eq!(viewport.left(), 0.0);
    for _ in 0..30 {
        viewport.update(FRAME);
        assert!(viewport.left() >= 0.0);
    }

    viewport.move_corner(Point::new(5000.0, 5000.0));
    assert_eq!(viewport.right(), 1000.0);
    assert_eq!(viewport.bottom(), 1000.0);
}

#[test]
fn bounce_returns_into_bounds() {
    let mut viewport = square();
    viewport.bounce(BounceOptions::default());
    viewport.move_corner(Point::new(-50.0, 0.0));

    let mut frames = 0;
    while viewport.plugins().get(PluginKind::Bounce).is_some_and(|p| match p {
        Plugin::Bounce(b) => b.is_active() || frames == 0,
        _ => false,
    }) {
        viewport.update(FRAME);
        frames += 1;
        assert!(frames < 100, "bounce never finished");
    }
    assert_eq!(viewport.left(), 0.0);
    let events = events(&mut viewport);
    assert!(events.contains(&ViewportEvent::BounceStart { axis: Axis::X }));
    assert!(events.contains(&ViewportEvent::BounceEnd { axis: Axis::X }));
    assert!(!events.contains(&ViewportEvent::BounceStart { axis: Axis::Y }));
}

#[test]
fn snap_waits_for_pointers_then_arrives() {
    let mut viewport = square();
    viewport.snap(
        Point::new(500.0, 500.0),
        SnapOptions { time: 100.0, remove_on_complete: true, ..SnapOptions::default() },
    );
    viewport.handle_pointer_down(&PointerEvent::touch(7, (10.0, 10.0)));
    viewport.update(FRAME);
    assert!(events(&mut viewport).iter().all(|e| *e != ViewportEvent::SnapStart));

    viewport.handle_pointer_up(&PointerEvent::touch(7, (10.0, 10.0)));
    for _ in 0..10 {
        viewport.update(FRAME);
    }
    assert!(close(viewport.center(), Point::new(500.0, 500.0)));
    let events = events(&mut viewport);
    assert!(events.contains(&ViewportEvent::SnapStart));
    assert!(events.contains(&ViewportEvent::SnapEnd));
    assert!(events.contains(&ViewportEvent::PluginRemoved { kind: PluginKind::Snap }));
    assert!(!viewport.plugins().contains("snap"));
}

#[test]
fn wheel_zooms_about_the_pointer() {
    let mut viewport = square();
    viewport.wheel(WheelOptions::default());
    let at = Point::new(20.0, 70.0);
    let before = viewport.to_world(at);

    assert!(viewport.handle_wheel(&WheelEvent::new(at, (0.0, -100.0))));
    assert!(viewport.scaled() > 1.0);
    assert!(close(viewport.to_world(at), before));
    assert!(events(&mut viewport).contains(&ViewportEvent::Zoomed { source: PluginKind::Wheel }));

    // Outside the hit area nothing happens.
    viewport.set_hit_area(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    let scale = viewport.scaled();
    assert!(!viewport.handle_wheel(&WheelEvent::new(at, (0.0, -100.0))));
    assert_eq!(viewport.scaled(), scale);
}

#[test]
fn wheel_scrolls_when_zoom_is_off() {
    let mut viewport = square();
    viewport
        .drag(DragOptions::default())
        .wheel(WheelOptions { wheel_zoom: false, ..WheelOptions::default() });
    assert!(viewport.handle_wheel(&WheelEvent::new((50.0, 50.0), (0.0, 30.0))));
    assert_eq!(viewport.scaled(), 1.0);
    assert_eq!(viewport.top(), 30.0);
}

#[test]
fn pinch_takes_over_from_drag() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).pinch(PinchOptions::default());
    let anchor = viewport.to_world(Point::new(50.0, 50.0));

    viewport.handle_pointer_down(&PointerEvent::touch(1, (40.0, 50.0)));
    viewport.handle_pointer_down(&PointerEvent::touch(2, (60.0, 50.0)));
    assert_eq!(viewport.pointers().owned_by(PluginKind::Pinch).count(), 2);

    viewport.handle_pointer_move(&PointerEvent::touch(2, (80.0, 50.0)));
    assert!((viewport.scaled() - 2.0).abs() < 1e-9);
    // The world point under the old midpoint followed the fingers.
    assert!(close(viewport.to_screen(anchor), Point::new(60.0, 50.0)));

    viewport.handle_pointer_up(&PointerEvent::touch(2, (80.0, 50.0)));
    viewport.handle_pointer_up(&PointerEvent::touch(1, (40.0, 50.0)));
    let events = events(&mut viewport);
    assert!(events.contains(&ViewportEvent::PinchStart));
    assert!(events.contains(&ViewportEvent::PinchEnd));
    assert!(viewport.pointers().is_empty());
}

#[test]
fn cancel_drops_the_drag_without_momentum() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).decelerate(DecelerateOptions::default());
    let from = Point::new(80.0, 50.0);
    viewport.handle_pointer_down(&PointerEvent::mouse(from).at(0));
    for i in 1_u32..=4 {
        let p = from.lerp(Point::new(40.0, 50.0), f64::from(i) / 4.0);
        viewport.handle_pointer_move(&PointerEvent::mouse(p).at(u64::from(i) * 10));
    }
    viewport.handle_pointer_cancel(&PointerEvent::mouse((40.0, 50.0)).at(40));
    assert!(viewport.pointers().is_empty());
    assert_eq!(viewport.pointers().owned_by(PluginKind::Drag).count(), 0);

    let at = viewport.corner();
    viewport.update(FRAME);
    assert_eq!(viewport.corner(), at);
    events(&mut viewport);

    // Nothing is coasting, so the next press can be a click.
    viewport.handle_pointer_down(&PointerEvent::mouse((50.0, 50.0)).at(100));
    viewport.handle_pointer_up(&PointerEvent::mouse((50.0, 50.0)).at(110));
    assert!(events_contain_click(&mut viewport));
}

#[test]
fn cancel_ends_the_pinch_and_releases_both_fingers() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).pinch(PinchOptions::default());
    viewport.handle_pointer_down(&PointerEvent::touch(1, (40.0, 50.0)));
    viewport.handle_pointer_down(&PointerEvent::touch(2, (60.0, 50.0)));
    viewport.handle_pointer_move(&PointerEvent::touch(2, (80.0, 50.0)));
    assert_eq!(viewport.pointers().owned_by(PluginKind::Pinch).count(), 2);
    events(&mut viewport);

    viewport.handle_pointer_cancel(&PointerEvent::touch(2, (80.0, 50.0)));
    assert!(events(&mut viewport).contains(&ViewportEvent::PinchEnd));
    assert_eq!(viewport.pointers().owned_by(PluginKind::Pinch).count(), 0);
    assert_eq!(viewport.pointers().len(), 1);
    let Some(Plugin::Pinch(pinch)) = viewport.plugins().get("pinch") else {
        panic!("pinch should still be installed");
    };
    assert!(!pinch.is_active());
}

#[test]
fn mouse_edges_scroll_on_hover() {
    let mut viewport = square();
    viewport.move_center(Point::new(500.0, 500.0));
    viewport.mouse_edges(MouseEdgesOptions {
        distance: Some(10.0),
        linear: true,
        ..MouseEdgesOptions::default()
    });
    viewport.handle_pointer_move(&PointerEvent::hover((95.0, 50.0)));
    viewport.update(FRAME);
    // Near the right edge: the view moves right by 8 px.
    assert!((viewport.left() - 458.0).abs() < 1e-9, "{}", viewport.left());
}

#[test]
fn animate_finishes_and_removes_itself() {
    let mut viewport = square();
    viewport.animate(AnimateOptions {
        time: 50.0,
        position: Some(Point::new(300.0, 400.0)),
        scale: Some(2.0),
        ..AnimateOptions::default()
    });
    for _ in 0..5 {
        viewport.update(FRAME);
    }
    assert!(close(viewport.center(), Point::new(300.0, 400.0)));
    assert_eq!(viewport.scaled(), 2.0);
    let events = events(&mut viewport);
    assert!(events.contains(&ViewportEvent::AnimateEnd));
    assert!(events.contains(&ViewportEvent::PluginRemoved { kind: PluginKind::Animate }));
    assert!(!viewport.plugins().contains(PluginKind::Animate));
}

#[test]
fn paused_viewport_ignores_everything() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).decelerate(DecelerateOptions::default());
    drag(&mut viewport, Point::new(80.0, 50.0), Point::new(40.0, 50.0), 4);
    events(&mut viewport);

    viewport.set_paused(true);
    let at = viewport.corner();
    assert!(!viewport.handle_pointer_down(&PointerEvent::mouse((50.0, 50.0))));
    viewport.update(FRAME);
    assert_eq!(viewport.corner(), at);
    assert!(events(&mut viewport).is_empty());

    // Momentum picks up where it left off.
    viewport.set_paused(false);
    viewport.update(FRAME);
    assert!(viewport.corner().x > at.x);
}

#[test]
fn paused_plugin_keeps_its_state() {
    let mut viewport = square();
    viewport.drag(DragOptions::default()).decelerate(DecelerateOptions::default());
    drag(&mut viewport, Point::new(80.0, 50.0), Point::new(40.0, 50.0), 4);

    assert!(viewport.plugins_mut().pause("decelerate"));
    let at = viewport.corner();
    viewport.update(FRAME);
    assert_eq!(viewport.corner(), at);

    assert!(viewport.plugins_mut().resume("decelerate"));
    viewport.update(FRAME);
    assert!(viewport.corner().x > at.x);
}

#[test]
fn scale_never_reaches_zero() {
    let mut viewport = square();
    viewport.set_zoom(0.0, true);
    assert!(viewport.scale().x > 0.0 && viewport.scale().y > 0.0);
    viewport.set_zoom(-3.0, false);
    assert!(viewport.scale().x > 0.0 && viewport.scale().y > 0.0);
}

#[test]
fn config_installs_plugins() {
    let config = CameraConfig::from_json(
        r#"{
            "screen_width": 100,
            "screen_height": 100,
            "world_width": 1000,
            "world_height": 1000,
            "drag": { "direction": "x" },
            "decelerate": {},
            "clamp_zoom": { "max_scale": 2 },
            "snap_zoom": { "width": 25, "time": 0, "remove_on_complete": true },
            "bounce": { "sides": "left, right" }
        }"#,
    )
    .unwrap();
    let mut viewport = Viewport::from_config(&config);
    assert!(viewport.plugins().contains("drag"));
    assert!(viewport.plugins().contains("decelerate"));
    assert!(viewport.plugins().contains("bounce"));
    // Zero-time snap-zoom applied immediately within the zoom limits and
    // was never installed.
    assert!(!viewport.plugins().contains("snap-zoom"));
    assert_eq!(viewport.scaled(), 2.0);

    // Drag is limited to x.
    let (left, top) = (viewport.left(), viewport.top());
    drag(&mut viewport, Point::new(50.0, 50.0), Point::new(40.0, 40.0), 2);
    assert_eq!(viewport.top(), top);
    assert!(viewport.left() > left);

    assert!(CameraConfig::from_json(r#"{ "snap_zoom": { "ease": "easeSideways" } }"#).is_err());
}
