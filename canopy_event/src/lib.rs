// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Event: the input event model shared by the Canopy crates.
//!
//! ## Overview
//!
//! This crate defines the four event families a root surface receives and
//! forwards into its embedded tree: mouse, mouse wheel, touch, and gesture.
//! Positions are [`kurbo::Point`]s in the coordinate space of whichever
//! surface the event is addressed to; the router shifts them between spaces
//! before delivery, so a receiving surface always sees locally-addressed
//! coordinates.
//!
//! Events are plain data. Nothing here decides where an event goes or
//! whether it is consumed — that is the router's and the receiving
//! surface's job respectively.
//!
//! ## Translation
//!
//! Every event type has a `translated` method returning a copy with all
//! positions shifted by a [`kurbo::Vec2`]. The router uses this to apply a
//! stream's captured root→target offset:
//!
//! ```
//! use canopy_event::{MouseAction, MouseEvent};
//! use kurbo::{Point, Vec2};
//!
//! let ev = MouseEvent::new(MouseAction::Move, Point::new(50.0, 60.0));
//! let local = ev.translated(Vec2::new(-10.0, -20.0));
//! assert_eq!(local.position, Point::new(40.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod gesture;
mod mouse;
mod touch;

pub use gesture::{GestureDevice, GestureEvent, GestureKind};
pub use mouse::{MouseAction, MouseButton, MouseButtons, MouseEvent, MouseWheelEvent};
pub use touch::{TouchAction, TouchEvent, TouchPhase, TouchPoint};
