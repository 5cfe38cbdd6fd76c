// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture events.
//!
//! Gestures arrive on two device classes with different routing contracts:
//! touchscreen gestures are recognized from a preceding touch sequence and
//! inherit its target, while touchpad gestures have no touch precursor and
//! resolve their own target at stream start. The router also synthesizes
//! scroll framing events ([`GestureKind::ScrollBegin`]/[`GestureKind::ScrollEnd`])
//! to keep pinch nesting and bubbling hand-offs well formed on the receiving
//! side.

use kurbo::{Point, Vec2};

/// The device class a gesture was recognized from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureDevice {
    /// Direct-touch screen; gestures follow a touch sequence.
    Touchscreen,
    /// Touchpad; gestures arrive without a touch sequence.
    Touchpad,
}

/// The specific gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureKind {
    /// A finger came to rest; opens a touchscreen gesture stream.
    TapDown,
    /// The rest was abandoned without a tap.
    TapCancel,
    /// A completed tap.
    Tap,
    /// A scroll sequence starts.
    ScrollBegin,
    /// A scroll step.
    ScrollUpdate {
        /// Scroll distance for this step.
        delta: Vec2,
    },
    /// The scroll sequence ends.
    ScrollEnd,
    /// A pinch starts.
    PinchBegin,
    /// A pinch step.
    PinchUpdate {
        /// Scale factor relative to the previous step.
        scale: f64,
    },
    /// The pinch ends.
    PinchEnd,
    /// A fling launches with the given velocity.
    FlingStart {
        /// Velocity in logical pixels per second.
        velocity: Vec2,
    },
    /// An active fling was stopped.
    FlingCancel,
}

impl GestureKind {
    /// Whether this is part of a pinch.
    pub fn is_pinch(self) -> bool {
        matches!(
            self,
            Self::PinchBegin | Self::PinchUpdate { .. } | Self::PinchEnd
        )
    }

    /// Whether this is part of a scroll.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            Self::ScrollBegin | Self::ScrollUpdate { .. } | Self::ScrollEnd
        )
    }
}

/// A gesture event addressed to one surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// Device class the gesture came from.
    pub device: GestureDevice,
    /// Anchor position in the addressee's coordinate space.
    pub position: Point,
    /// The specific gesture.
    pub kind: GestureKind,
}

impl GestureEvent {
    /// Create a gesture event.
    pub fn new(device: GestureDevice, position: Point, kind: GestureKind) -> Self {
        Self {
            device,
            position,
            kind,
        }
    }

    /// A scroll-begin at `position`, used for synthesized framing.
    pub fn scroll_begin(device: GestureDevice, position: Point) -> Self {
        Self::new(device, position, GestureKind::ScrollBegin)
    }

    /// A scroll-end at `position`, used for synthesized framing.
    pub fn scroll_end(device: GestureDevice, position: Point) -> Self {
        Self::new(device, position, GestureKind::ScrollEnd)
    }

    /// Copy of this event with the position shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Copy of this event at an explicit position.
    #[must_use]
    pub fn at(&self, position: Point) -> Self {
        Self { position, ..*self }
    }
}
