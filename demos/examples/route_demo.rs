// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end routing over a quad space: touch stickiness, gesture streams,
//! and scroll bubbling.
//!
//! This example shows how to combine:
//! - `canopy_space` for the spatial capability (quads, z order, parents),
//! - `canopy_surface` for registration and delivery endpoints,
//! - `canopy_router` for the routing itself.
//!
//! Run:
//! - `cargo run -p canopy_demos --example route_demo`

use canopy_event::{
    GestureDevice, GestureEvent, GestureKind, MouseEvent, MouseWheelEvent, TouchAction, TouchEvent,
    TouchPhase, TouchPoint,
};
use canopy_router::EventRouter;
use canopy_space::{Placement, QuadSpace};
use canopy_surface::{Surface, SurfaceId};
use kurbo::{Affine, Point, Rect, Vec2};

/// Delivery endpoint that prints what it receives.
struct PrintingSurface(&'static str);

impl Surface for PrintingSurface {
    fn process_mouse_event(&mut self, event: &MouseEvent) {
        println!(
            "  {} <- mouse {:?} @ ({:.0}, {:.0})",
            self.0, event.action, event.position.x, event.position.y
        );
    }

    fn process_mouse_wheel_event(&mut self, event: &MouseWheelEvent) {
        println!(
            "  {} <- wheel {:?} @ ({:.0}, {:.0})",
            self.0, event.delta, event.position.x, event.position.y
        );
    }

    fn process_touch_event(&mut self, event: &TouchEvent) {
        let p = event.points[0].position;
        println!(
            "  {} <- touch {:?} @ ({:.0}, {:.0})",
            self.0, event.action, p.x, p.y
        );
    }

    fn process_gesture_event(&mut self, event: &GestureEvent) {
        println!(
            "  {} <- gesture {:?} @ ({:.0}, {:.0})",
            self.0, event.kind, event.position.x, event.position.y
        );
    }
}

fn touch(action: TouchAction, phase: TouchPhase, position: Point) -> TouchEvent {
    TouchEvent::new(
        action,
        [TouchPoint {
            id: 1,
            position,
            phase,
        }],
    )
}

fn main() {
    let root = SurfaceId::new(1);
    let frame = SurfaceId::new(2);

    // A 200×200 root with one embedded frame offset to (10, 20).
    let mut space = QuadSpace::new();
    space.place(root, None, Placement::new(Rect::new(0.0, 0.0, 200.0, 200.0)));
    space.place(
        frame,
        Some(root),
        Placement::new(Rect::new(0.0, 0.0, 80.0, 80.0))
            .with_transform(Affine::translate(Vec2::new(10.0, 20.0)))
            .with_z(1),
    );

    let mut router = EventRouter::new(space);
    router.add_surface(root, PrintingSurface("root "));
    router.add_surface(frame, PrintingSurface("frame"));

    println!("== Touch sequence into the frame (sticky target) ==");
    router.route_touch_event(
        root,
        &touch(TouchAction::Start, TouchPhase::Pressed, Point::new(50.0, 60.0)),
    );
    router.route_touch_event(
        root,
        &touch(TouchAction::Move, TouchPhase::Moved, Point::new(150.0, 150.0)),
    );
    router.route_touch_event(
        root,
        &touch(TouchAction::End, TouchPhase::Released, Point::new(150.0, 150.0)),
    );

    println!("\n== Gesture stream follows the queued touch target ==");
    router.route_gesture_event(
        root,
        &GestureEvent::new(
            GestureDevice::Touchscreen,
            Point::new(50.0, 60.0),
            GestureKind::TapDown,
        ),
    );
    router.route_gesture_event(
        root,
        &GestureEvent::new(
            GestureDevice::Touchscreen,
            Point::new(50.0, 60.0),
            GestureKind::ScrollBegin,
        ),
    );
    router.route_gesture_event(
        root,
        &GestureEvent::new(
            GestureDevice::Touchscreen,
            Point::new(50.0, 70.0),
            GestureKind::ScrollUpdate {
                delta: Vec2::new(0.0, 10.0),
            },
        ),
    );
    router.route_gesture_event(
        root,
        &GestureEvent::new(
            GestureDevice::Touchscreen,
            Point::new(50.0, 70.0),
            GestureKind::ScrollEnd,
        ),
    );

    println!("\n== The frame declines a scroll; it bubbles to the root ==");
    router.bubble_scroll(
        root,
        &GestureEvent::new(
            GestureDevice::Touchscreen,
            Point::new(40.0, 40.0),
            GestureKind::ScrollUpdate {
                delta: Vec2::new(0.0, 10.0),
            },
        ),
    );
    router.cancel_bubbling(root);

    println!("\n== Hover moves from frame to root ==");
    router.route_mouse_event(
        root,
        &MouseEvent::new(canopy_event::MouseAction::Move, Point::new(50.0, 60.0)),
    );
    router.route_mouse_event(
        root,
        &MouseEvent::new(canopy_event::MouseAction::Move, Point::new(5.0, 5.0)),
    );
}
