// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture target queue.
//!
//! Gesture recognition lags touch delivery by one indirection layer, so a
//! touchscreen gesture stream cannot reuse the live touch target directly.
//! Instead, every touch sequence start pushes a copy of its resolved target
//! here, and the tap-down that opens the corresponding gesture stream pops
//! the oldest entry. Queue order matches touch-sequence start order; a
//! destroyed surface nulls its entries *in place* so the FIFO alignment
//! with pending tap-downs survives teardown.

use alloc::collections::VecDeque;

use canopy_surface::SurfaceId;

use crate::types::StreamTarget;

/// One queued touch-sequence resolution awaiting its tap-down.
///
/// `target` is `None` when the sequence resolved to nothing or its surface
/// was destroyed while queued; the entry still occupies its slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueuedTarget {
    /// The recorded stream target, if still valid.
    pub target: Option<StreamTarget>,
}

/// FIFO of touch-started targets awaiting their gesture streams.
#[derive(Clone, Debug, Default)]
pub struct GestureTargetQueue {
    entries: VecDeque<QueuedTarget>,
}

impl GestureTargetQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the resolution of a touch sequence that just started.
    pub fn push(&mut self, target: Option<StreamTarget>) {
        self.entries.push_back(QueuedTarget { target });
    }

    /// Pop the oldest entry, or `None` when the queue is starved.
    pub fn pop(&mut self) -> Option<QueuedTarget> {
        self.entries.pop_front()
    }

    /// Null every entry referencing `id`, keeping the entries in place.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        for entry in &mut self.entries {
            if entry.target.is_some_and(|t| t.surface == id) {
                entry.target = None;
            }
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn target(raw: u64) -> StreamTarget {
        StreamTarget {
            surface: SurfaceId::new(raw),
            delta: Vec2::ZERO,
        }
    }

    #[test]
    fn fifo_order() {
        let mut q = GestureTargetQueue::new();
        q.push(Some(target(1)));
        q.push(Some(target(2)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().unwrap().target.unwrap().surface, SurfaceId::new(1));
        assert_eq!(q.pop().unwrap().target.unwrap().surface, SurfaceId::new(2));
        assert!(q.pop().is_none());
    }

    #[test]
    fn forget_nulls_in_place() {
        let mut q = GestureTargetQueue::new();
        q.push(Some(target(1)));
        q.push(Some(target(2)));
        q.push(Some(target(1)));
        q.forget_surface(SurfaceId::new(1));
        // Three slots remain; only the middle one still carries a target.
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().unwrap().target, None);
        assert_eq!(q.pop().unwrap().target.unwrap().surface, SurfaceId::new(2));
        assert_eq!(q.pop().unwrap().target, None);
    }
}
