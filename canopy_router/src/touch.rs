// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch stream tracking.
//!
//! One touch *sequence* runs from the first pressed point to the release or
//! cancellation of the last. The boundary is governed by a counter of active
//! points, not by event actions alone: multi-point starts and ends are legal
//! and a second finger joining an active sequence does not re-resolve the
//! target.

use canopy_surface::SurfaceId;

use crate::types::StreamTarget;

/// Counter-governed tracker for the active touch sequence.
///
/// The target may be null while the counter is still positive — resolution
/// failed or the target was destroyed mid-sequence — in which case the
/// remaining events of the sequence are dropped rather than misrouted.
#[derive(Clone, Debug, Default)]
pub struct TouchStreamTracker {
    active_points: u32,
    target: Option<StreamTarget>,
}

impl TouchStreamTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sequence is in flight.
    pub fn is_active(&self) -> bool {
        self.active_points > 0
    }

    /// The sequence's recorded target, if it still has one.
    pub fn target(&self) -> Option<StreamTarget> {
        self.target
    }

    /// Account for newly pressed points.
    ///
    /// Returns `true` when this transition opened a new sequence (counter
    /// went 0→N); the caller then resolves a target and records it with
    /// [`TouchStreamTracker::set_target`].
    pub fn observe_pressed(&mut self, pressed: u32) -> bool {
        let opened = self.active_points == 0 && pressed > 0;
        self.active_points += pressed;
        opened
    }

    /// Record the resolution of a sequence that just opened.
    pub fn set_target(&mut self, target: Option<StreamTarget>) {
        self.target = target;
    }

    /// Account for points reaching a terminal phase.
    ///
    /// The counter decrements unconditionally — also for cancellations on a
    /// null-target sequence. Returns `true` when the sequence closed; the
    /// target clears at that point.
    pub fn observe_terminal(&mut self, terminal: u32) -> bool {
        self.active_points = self.active_points.saturating_sub(terminal);
        if self.active_points == 0 {
            self.target = None;
            terminal > 0
        } else {
            false
        }
    }

    /// Null the target if it references `id`, leaving the counter intact.
    ///
    /// The sequence keeps draining through its counter; its remaining events
    /// are dropped.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        if self.target.is_some_and(|t| t.surface == id) {
            self.target = None;
        }
    }
}
