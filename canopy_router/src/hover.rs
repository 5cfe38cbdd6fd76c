// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions: leave/move/enter fan-out when the hovered surface changes.
//!
//! Chains run target-first (surface → parent → … → root). When the hover
//! target changes, the old and new chains are compared by trimming their
//! matching suffix; the deepest shared surface is the lowest common
//! ancestor. The transition then:
//!
//! - leaves every old-chain surface below the ancestor (inner→outer),
//! - moves the ancestor itself when it is not the new target,
//! - enters every new-chain surface strictly between the ancestor and the
//!   new target (outer→inner).
//!
//! The new target itself is *not* part of the fan-out: the router's regular
//! delivery of the triggering move doubles as its enter. Enters are plain
//! moves on the wire; a surface receiving a move it was not previously
//! hovered by treats it as an enter.

use smallvec::SmallVec;

use alloc::vec::Vec;

use canopy_surface::{SurfaceId, SurfaceSpace};

/// Inline chain storage; surface trees are shallow.
pub type HoverChain = SmallVec<[SurfaceId; 8]>;

/// One step of a hover transition fan-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverStep {
    /// The pointer left this surface.
    Leave(SurfaceId),
    /// A plain move to the common ancestor.
    Move(SurfaceId),
    /// The pointer entered this surface (delivered as a move).
    Enter(SurfaceId),
}

/// Walk `from` up to `root` through the spatial capability.
///
/// Returns the target-first chain including both endpoints, or `None` when a
/// parent lookup gives out before the root is reached — a partially
/// destroyed tree, which the caller treats as "discard the transition".
/// The caller ensures acyclic ancestry.
pub fn ancestor_chain<P: SurfaceSpace>(
    space: &P,
    from: SurfaceId,
    root: SurfaceId,
) -> Option<HoverChain> {
    let mut chain = HoverChain::new();
    chain.push(from);
    let mut current = from;
    while current != root {
        match space.parent_of(current) {
            Some(parent) => {
                chain.push(parent);
                current = parent;
            }
            None => return None,
        }
    }
    Some(chain)
}

/// The currently hovered chain and its transition arithmetic.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
    chain: HoverChain,
}

impl HoverState {
    /// Create an un-hovered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered surface, if any.
    pub fn target(&self) -> Option<SurfaceId> {
        self.chain.first().copied()
    }

    /// Move hover to `new_chain` and return the fan-out steps.
    pub fn update(&mut self, new_chain: &[SurfaceId]) -> Vec<HoverStep> {
        // Length of the matching suffix (shared ancestry up from the root).
        let mut common = 0;
        while common < self.chain.len()
            && common < new_chain.len()
            && self.chain[self.chain.len() - 1 - common] == new_chain[new_chain.len() - 1 - common]
        {
            common += 1;
        }

        let mut out = Vec::new();
        // Leaves: old chain below the ancestor, inner→outer.
        for &id in &self.chain[..self.chain.len() - common] {
            out.push(HoverStep::Leave(id));
        }
        let new_target = new_chain.first().copied();
        if common > 0 {
            let ancestor = new_chain[new_chain.len() - common];
            if Some(ancestor) != new_target {
                out.push(HoverStep::Move(ancestor));
            }
        }
        // Enters: new chain strictly between ancestor and target, outer→inner.
        // The target itself is delivered by the caller.
        let entered = new_chain.len() - common;
        if entered > 1 {
            for &id in new_chain[1..entered].iter().rev() {
                out.push(HoverStep::Enter(id));
            }
        }

        self.chain.clear();
        self.chain.extend_from_slice(new_chain);
        out
    }

    /// Record a hover target without chain knowledge and without fan-out.
    ///
    /// Used when the new chain could not be computed: the transition is
    /// discarded, but later transitions still know where the pointer was.
    pub fn set_target_only(&mut self, target: SurfaceId) {
        self.chain.clear();
        self.chain.push(target);
    }

    /// Clear hover, returning leaves over the whole chain (inner→outer).
    pub fn clear(&mut self) -> Vec<HoverStep> {
        self.update(&[])
    }

    /// Drop the chain without fan-out if it references `id`.
    ///
    /// A destroyed surface receives nothing, and its ancestors' hover state
    /// is re-derived by the next move.
    pub fn forget_surface(&mut self, id: SurfaceId) {
        if self.chain.contains(&id) {
            self.chain.clear();
        }
    }
}
