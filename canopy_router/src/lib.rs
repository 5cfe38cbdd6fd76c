// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_router --heading-base-level=0

//! Canopy Router: cross-surface input event routing.
//!
//! ## Overview
//!
//! Pointer, touch, and gesture input arrives at a single root rendering
//! surface; this crate dispatches each event to the correct embedded
//! sub-surface while preserving, for each sub-surface, the illusion of a
//! normal locally-addressed input stream. Four concerns meet here:
//!
//! - **Hit testing** across a dynamic tree of surfaces, consumed through
//!   [`canopy_surface::SurfaceSpace`] with a fail-soft fallback to the root.
//! - **Stream stickiness**: a touch sequence, a touchscreen gesture stream,
//!   a touchpad gesture stream, and a mouse capture each resolve to one
//!   fixed target for their whole duration, even though hit testing runs
//!   only at stream start.
//! - **Scroll bubbling**: scroll gestures a child declined to consume are
//!   re-targeted up the surface tree, framed by synthesized
//!   scroll-begin/scroll-end events.
//! - **Safe teardown**: a surface destroyed mid-stream is nulled out of
//!   every stream record in the same step, so later events of the stream are
//!   dropped rather than misrouted.
//!
//! ## Workflow
//!
//! 1) Implement [`canopy_surface::Surface`] for your delivery endpoints and
//!    [`canopy_surface::SurfaceSpace`] for your scene (or use
//!    `canopy_space::QuadSpace`).
//! 2) Register surfaces with [`EventRouter::add_surface`] and keep geometry
//!    current.
//! 3) Feed every root-space event to the matching `route_*` entry point;
//!    forward unconsumed scrolls through [`EventRouter::bubble_scroll`].
//! 4) Notify the router of surface destruction with
//!    [`EventRouter::on_surface_destroyed`].
//!
//! ```
//! use canopy_event::{TouchAction, TouchEvent, TouchPhase, TouchPoint};
//! use canopy_event::{GestureEvent, MouseEvent, MouseWheelEvent};
//! use canopy_router::EventRouter;
//! use canopy_space::{Placement, QuadSpace};
//! use canopy_surface::{Surface, SurfaceId};
//! use kurbo::{Affine, Point, Rect, Vec2};
//!
//! struct Sink(Vec<Point>);
//!
//! impl Surface for Sink {
//!     fn process_mouse_event(&mut self, _: &MouseEvent) {}
//!     fn process_mouse_wheel_event(&mut self, _: &MouseWheelEvent) {}
//!     fn process_touch_event(&mut self, event: &TouchEvent) {
//!         self.0.push(event.points[0].position);
//!     }
//!     fn process_gesture_event(&mut self, _: &GestureEvent) {}
//! }
//!
//! let root = SurfaceId::new(1);
//! let child = SurfaceId::new(2);
//!
//! let mut space = QuadSpace::new();
//! space.place(root, None, Placement::new(Rect::new(0.0, 0.0, 200.0, 200.0)));
//! space.place(
//!     child,
//!     Some(root),
//!     Placement::new(Rect::new(0.0, 0.0, 80.0, 80.0))
//!         .with_transform(Affine::translate(Vec2::new(10.0, 20.0)))
//!         .with_z(1),
//! );
//!
//! let mut router = EventRouter::new(space);
//! router.add_surface(root, Sink(Vec::new()));
//! router.add_surface(child, Sink(Vec::new()));
//!
//! // A touch at root (50, 60) lands in the child as (40, 40).
//! router.route_touch_event(
//!     root,
//!     &TouchEvent::new(
//!         TouchAction::Start,
//!         [TouchPoint {
//!             id: 1,
//!             position: Point::new(50.0, 60.0),
//!             phase: TouchPhase::Pressed,
//!         }],
//!     ),
//! );
//! assert_eq!(router.surface(child).unwrap().0, vec![Point::new(40.0, 40.0)]);
//! ```
//!
//! ## Non-goals
//!
//! The router never decides whether an event is consumed, never buffers or
//! reorders, and synthesizes no events beyond scroll framing and hover
//! enter/leave. Failures degrade to a dropped event or a root-targeted
//! delivery; nothing here is fatal.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bubble;
pub mod gesture;
pub mod hover;
pub mod queue;
pub mod router;
pub mod touch;
pub mod types;

pub use router::EventRouter;
pub use types::StreamTarget;
