// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture stream state for both device classes.
//!
//! Touchscreen gesture streams inherit their target from the gesture target
//! queue (popped at tap-down); touchpad streams resolve their own target at
//! pinch-begin or fling-start. Pinch is superimposed on the touchscreen
//! stream and always addresses the root, framed by a synthesized
//! scroll-begin/scroll-end pair when the root was not already mid-scroll —
//! the root's gesture recognizer then sees a well-formed scroll→pinch
//! nesting either way.

use canopy_event::GestureKind;
use canopy_surface::SurfaceId;

use crate::types::StreamTarget;

/// State of the active touchscreen gesture stream.
#[derive(Clone, Debug, Default)]
pub struct TouchscreenGestureState {
    target: Option<StreamTarget>,
    pinch_active: bool,
    scroll_begin_synthesized: bool,
    root_in_scroll: bool,
}

impl TouchscreenGestureState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stream's target as popped from the queue, if any.
    pub fn target(&self) -> Option<StreamTarget> {
        self.target
    }

    /// Record the target popped at tap-down (null on queue starvation).
    pub fn set_target(&mut self, target: Option<StreamTarget>) {
        self.target = target;
    }

    /// Whether a pinch is currently superimposed on the stream.
    pub fn pinch_active(&self) -> bool {
        self.pinch_active
    }

    /// Whether the root is currently inside a scroll sequence.
    pub fn root_in_scroll(&self) -> bool {
        self.root_in_scroll
    }

    /// Open a pinch. Returns whether a scroll-begin must be synthesized
    /// for the root first.
    pub fn begin_pinch(&mut self) -> bool {
        self.pinch_active = true;
        if self.root_in_scroll {
            false
        } else {
            self.scroll_begin_synthesized = true;
            self.root_in_scroll = true;
            true
        }
    }

    /// Close a pinch. Returns whether the matching scroll-end must be
    /// synthesized for the root afterwards.
    pub fn end_pinch(&mut self) -> bool {
        self.pinch_active = false;
        if self.scroll_begin_synthesized {
            self.scroll_begin_synthesized = false;
            self.root_in_scroll = false;
            true
        } else {
            false
        }
    }

    /// Track scroll framing delivered to the root through the regular
    /// (queued-target) path.
    pub fn note_scroll_to_root(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::ScrollBegin => self.root_in_scroll = true,
            GestureKind::ScrollEnd => self.root_in_scroll = false,
            _ => {}
        }
    }

    /// Null the target if it references `id`.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        if self.target.is_some_and(|t| t.surface == id) {
            self.target = None;
        }
    }
}

/// State of the active touchpad gesture stream.
///
/// The recorded target persists until the next pinch-begin or fling-start
/// re-resolves it; there is no explicit stream-end marker on this device
/// class.
#[derive(Clone, Debug, Default)]
pub struct TouchpadGestureState {
    target: Option<StreamTarget>,
}

impl TouchpadGestureState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stream's recorded target, if any.
    pub fn target(&self) -> Option<StreamTarget> {
        self.target
    }

    /// Record the target resolved at stream start.
    pub fn set_target(&mut self, target: Option<StreamTarget>) {
        self.target = target;
    }

    /// Null the target if it references `id`.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        if self.target.is_some_and(|t| t.surface == id) {
            self.target = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_frames_scroll_when_root_idle() {
        let mut state = TouchscreenGestureState::new();
        assert!(state.begin_pinch(), "idle root needs a synthesized begin");
        assert!(state.pinch_active());
        assert!(state.root_in_scroll());
        assert!(state.end_pinch(), "synthesized begin needs a matching end");
        assert!(!state.pinch_active());
        assert!(!state.root_in_scroll());
    }

    #[test]
    fn pinch_inside_existing_root_scroll_adds_no_framing() {
        let mut state = TouchscreenGestureState::new();
        state.note_scroll_to_root(GestureKind::ScrollBegin);
        assert!(!state.begin_pinch());
        assert!(!state.end_pinch());
        // The pre-existing scroll is still open.
        assert!(state.root_in_scroll());
        state.note_scroll_to_root(GestureKind::ScrollEnd);
        assert!(!state.root_in_scroll());
    }

    #[test]
    fn forget_nulls_matching_target() {
        let mut state = TouchscreenGestureState::new();
        state.set_target(Some(StreamTarget {
            surface: SurfaceId::new(2),
            delta: kurbo::Vec2::ZERO,
        }));
        state.forget_surface(SurfaceId::new(3));
        assert!(state.target().is_some());
        state.forget_surface(SurfaceId::new(2));
        assert!(state.target().is_none());
    }
}
