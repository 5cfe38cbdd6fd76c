// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Space: a reference [`SurfaceSpace`] over transformed quads.
//!
//! ## Overview
//!
//! The router consumes its spatial knowledge through the
//! [`SurfaceSpace`] trait; in production that is implemented by the
//! compositor's scene. This crate provides a small self-contained
//! implementation for embedders without a scene of their own and for tests:
//! each surface contributes one quad — local bounds, a local→root affine,
//! a z order — plus a parent link.
//!
//! Hit testing walks quads front to back (higher z first), skipping
//! surfaces the override table marks as ignored, and returns the winning
//! surface with the point expressed in its local space. Ties on z prefer
//! the deeper surface, then the higher id, which keeps results
//! deterministic for overlapping siblings.
//!
//! ```
//! use canopy_space::{Placement, QuadSpace};
//! use canopy_surface::{HitTestOverrides, SurfaceId, SurfaceSpace};
//! use kurbo::{Affine, Point, Rect, Vec2};
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
//! let overrides = HitTestOverrides::new();
//! let (hit, local) = space.hit_test(root, Point::new(50.0, 60.0), &overrides).unwrap();
//! assert_eq!(hit, child);
//! assert_eq!(local, Point::new(40.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use hashbrown::HashMap;
use kurbo::{Affine, Point, Rect};

use canopy_surface::{HitTestOverrides, SurfaceId, SurfaceSpace};

/// Where a surface's quad sits relative to the root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Local bounds of the quad.
    pub bounds: Rect,
    /// Local→root transform.
    pub to_root: Affine,
    /// Stacking order; higher is hit first.
    pub z: i32,
}

impl Placement {
    /// A placement with the given bounds, identity transform, and z 0.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            to_root: Affine::IDENTITY,
            z: 0,
        }
    }

    /// Replace the local→root transform.
    #[must_use]
    pub fn with_transform(mut self, to_root: Affine) -> Self {
        self.to_root = to_root;
        self
    }

    /// Replace the z order.
    #[must_use]
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}

#[derive(Clone, Debug)]
struct Entry {
    placement: Placement,
    parent: Option<SurfaceId>,
    depth: u32,
}

/// A flat quad list implementing [`SurfaceSpace`].
#[derive(Clone, Debug, Default)]
pub struct QuadSpace {
    entries: HashMap<SurfaceId, Entry>,
}

impl QuadSpace {
    /// Create an empty space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a surface's quad.
    ///
    /// `parent` is recorded for ancestry walks; depth is derived from it at
    /// placement time, so parents should be placed before their children.
    pub fn place(&mut self, id: SurfaceId, parent: Option<SurfaceId>, placement: Placement) {
        let depth = parent
            .and_then(|p| self.entries.get(&p))
            .map_or(0, |e| e.depth + 1);
        self.entries.insert(
            id,
            Entry {
                placement,
                parent,
                depth,
            },
        );
    }

    /// Remove a surface's quad. No-op when absent.
    pub fn remove(&mut self, id: SurfaceId) {
        self.entries.remove(&id);
    }

    /// The placement of a surface, if present.
    pub fn placement(&self, id: SurfaceId) -> Option<Placement> {
        self.entries.get(&id).map(|e| e.placement)
    }

    /// Number of placed surfaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no surface is placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SurfaceSpace for QuadSpace {
    fn hit_test(
        &self,
        _root: SurfaceId,
        point: Point,
        overrides: &HitTestOverrides,
    ) -> Option<(SurfaceId, Point)> {
        let mut best: Option<(SurfaceId, Point, i32, u32)> = None;
        for (&id, entry) in &self.entries {
            if overrides.is_ignored(id) {
                continue;
            }
            let local = entry.placement.to_root.inverse() * point;
            if !entry.placement.bounds.contains(local) {
                continue;
            }
            let z = entry.placement.z;
            let wins = match best {
                None => true,
                Some((best_id, _, best_z, best_depth)) => {
                    z > best_z
                        || (z == best_z
                            && (entry.depth > best_depth
                                || (entry.depth == best_depth
                                    && id.to_raw() > best_id.to_raw())))
                }
            };
            if wins {
                best = Some((id, local, z, entry.depth));
            }
        }
        best.map(|(id, local, _, _)| (id, local))
    }

    fn transform_point(&self, from: SurfaceId, to: SurfaceId, point: Point) -> Option<Point> {
        let from_tf = self.entries.get(&from)?.placement.to_root;
        let to_tf = self.entries.get(&to)?.placement.to_root;
        Some(to_tf.inverse() * (from_tf * point))
    }

    fn parent_of(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.entries.get(&id).and_then(|e| e.parent)
    }
}
