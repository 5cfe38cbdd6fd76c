// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll bubbling: re-targeting unconsumed scroll gestures up the tree.
//!
//! A child surface that received a scroll-update or scroll-end it did not
//! consume hands it back for re-delivery to an ancestor. Bubbling may chain
//! through more than one ancestor level, so the state keeps two targets: the
//! ancestor of the *original* request (`first`) and the current hop
//! (`current`). Cancellation is keyed to `first`; retargeting replaces
//! `current` and frames the hand-off with synthesized scroll-end/begin
//! events so every ancestor sees a well-formed scroll sequence.
//!
//! Both targets are set or neither is — the state is a single `Option`.

use canopy_surface::SurfaceId;

/// What the router should do with a bubble request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BubbleDecision {
    /// The target is already the active hop; forward the event as-is.
    Forward,
    /// Drop the request (stale scroll-end, or cross-stream conflict).
    Discard,
    /// Start or move the bubble: synthesize a scroll-end on `previous` (if
    /// any), a scroll-begin on the new target, then forward the event.
    Retarget {
        /// The hop to close out before the new one begins.
        previous: Option<SurfaceId>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct BubbleTargets {
    first: SurfaceId,
    current: SurfaceId,
}

/// State of the in-flight bubbling scroll, if any.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScrollBubblingState {
    targets: Option<BubbleTargets>,
}

impl ScrollBubblingState {
    /// Create an inactive state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ancestor of the original bubble request, if active.
    pub fn first_target(&self) -> Option<SurfaceId> {
        self.targets.map(|t| t.first)
    }

    /// The current hop, if active.
    pub fn current_target(&self) -> Option<SurfaceId> {
        self.targets.map(|t| t.current)
    }

    /// Classify a bubble request. Rules apply in order:
    ///
    /// 1. repeat bubbling to the active hop forwards directly;
    /// 2. a scroll-end for any other target is stale (it acknowledges a
    ///    synthesized scroll-end already issued) and is discarded;
    /// 3. a target busy with an unrelated live stream is rejected;
    /// 4. otherwise the bubble starts or moves to `target`.
    ///
    /// [`BubbleDecision::Retarget`] must be applied with
    /// [`ScrollBubblingState::retarget`] once the framing events went out.
    pub fn decide(
        &self,
        target: SurfaceId,
        is_scroll_end: bool,
        target_busy: bool,
    ) -> BubbleDecision {
        if self.current_target() == Some(target) {
            return BubbleDecision::Forward;
        }
        if is_scroll_end {
            return BubbleDecision::Discard;
        }
        if target_busy {
            return BubbleDecision::Discard;
        }
        BubbleDecision::Retarget {
            previous: self.current_target(),
        }
    }

    /// Record `target` as the current hop, keeping the original `first`.
    pub fn retarget(&mut self, target: SurfaceId) {
        self.targets = Some(match self.targets {
            Some(t) => BubbleTargets {
                first: t.first,
                current: target,
            },
            None => BubbleTargets {
                first: target,
                current: target,
            },
        });
    }

    /// Clear the bubble if `target` matches the original request's target.
    ///
    /// Returns whether anything was cleared. Intermediate hops cannot cancel
    /// a bubble they did not start.
    pub fn cancel(&mut self, target: SurfaceId) -> bool {
        if self.first_target() == Some(target) {
            self.targets = None;
            true
        } else {
            false
        }
    }

    /// Clear the bubble unconditionally, returning the hop that was active.
    ///
    /// Used when a new stream resolves to the bubble target and the router
    /// must close the scroll out to avoid double delivery.
    pub fn take(&mut self) -> Option<SurfaceId> {
        self.targets.take().map(|t| t.current)
    }

    /// Clear the whole state if either target references `id`.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        if self
            .targets
            .is_some_and(|t| t.first == id || t.current == id)
        {
            self.targets = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: SurfaceId = SurfaceId::new(10);
    const GRANDPARENT: SurfaceId = SurfaceId::new(11);

    #[test]
    fn first_request_retargets_with_no_previous() {
        let state = ScrollBubblingState::new();
        assert_eq!(
            state.decide(PARENT, false, false),
            BubbleDecision::Retarget { previous: None }
        );
    }

    #[test]
    fn repeat_request_forwards_without_reframing() {
        let mut state = ScrollBubblingState::new();
        state.retarget(PARENT);
        assert_eq!(state.decide(PARENT, false, false), BubbleDecision::Forward);
        assert_eq!(state.decide(PARENT, true, false), BubbleDecision::Forward);
    }

    #[test]
    fn stale_scroll_end_is_discarded() {
        let mut state = ScrollBubblingState::new();
        state.retarget(PARENT);
        assert_eq!(
            state.decide(GRANDPARENT, true, false),
            BubbleDecision::Discard
        );
    }

    #[test]
    fn busy_target_is_rejected() {
        let state = ScrollBubblingState::new();
        assert_eq!(state.decide(PARENT, false, true), BubbleDecision::Discard);
    }

    #[test]
    fn chaining_keeps_first_target() {
        let mut state = ScrollBubblingState::new();
        state.retarget(PARENT);
        assert_eq!(
            state.decide(GRANDPARENT, false, false),
            BubbleDecision::Retarget {
                previous: Some(PARENT)
            }
        );
        state.retarget(GRANDPARENT);
        assert_eq!(state.first_target(), Some(PARENT));
        assert_eq!(state.current_target(), Some(GRANDPARENT));
    }

    #[test]
    fn cancel_is_keyed_to_first_target() {
        let mut state = ScrollBubblingState::new();
        state.retarget(PARENT);
        state.retarget(GRANDPARENT);
        // The current hop cannot cancel a bubble it did not start.
        assert!(!state.cancel(GRANDPARENT));
        assert!(state.current_target().is_some());
        assert!(state.cancel(PARENT));
        assert_eq!(state.current_target(), None);
        assert_eq!(state.first_target(), None);
    }

    #[test]
    fn forget_clears_on_either_target() {
        let mut state = ScrollBubblingState::new();
        state.retarget(PARENT);
        state.retarget(GRANDPARENT);
        state.forget_surface(PARENT); // matches `first`
        assert_eq!(state.current_target(), None);

        state.retarget(PARENT);
        state.retarget(GRANDPARENT);
        state.forget_surface(GRANDPARENT); // matches `current`
        assert_eq!(state.first_target(), None);
    }
}
