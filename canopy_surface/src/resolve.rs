// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test resolution with fail-soft fallback.

use kurbo::{Point, Vec2};

use crate::registry::SurfaceRegistry;
use crate::surface::{SurfaceId, SurfaceSpace};

/// The outcome of resolving a root-space point to a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedTarget {
    /// The surface the point resolved to.
    pub surface: SurfaceId,
    /// The point expressed in that surface's local space.
    pub location: Point,
}

impl ResolvedTarget {
    /// The root→local offset captured by this resolution.
    ///
    /// Adding the returned delta to a root-space point yields the
    /// corresponding local-space point. Stream trackers capture this once at
    /// stream start and apply it to every later event of the stream.
    pub fn delta_from(&self, root_point: Point) -> Vec2 {
        self.location - root_point
    }
}

/// Resolve the surface under a root-space point.
///
/// With at most one registered surface there is no tree to search and the
/// point resolves to `root` unchanged. Otherwise the spatial capability
/// walks drawn content front-to-back under the override table. Two races
/// degrade to the root rather than dropping the event:
///
/// - the walk hits nothing (the tree changed under the event), or
/// - the returned id is not in the owner map (a child was destroyed but the
///   parent's drawn content still references it).
pub fn resolve_target<S, P: SurfaceSpace>(
    registry: &SurfaceRegistry<S>,
    space: &P,
    root: SurfaceId,
    point: Point,
) -> ResolvedTarget {
    if registry.len() <= 1 {
        return ResolvedTarget {
            surface: root,
            location: point,
        };
    }
    match space.hit_test(root, point, registry.overrides()) {
        Some((surface, location)) if registry.contains(surface) => ResolvedTarget {
            surface,
            location,
        },
        _ => ResolvedTarget {
            surface: root,
            location: point,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HitTestOverrides;
    use alloc::vec::Vec;

    /// Fixture space: an ordered list of `(id, origin)` slabs, hit in order.
    struct Slabs(Vec<(SurfaceId, Point)>);

    impl SurfaceSpace for Slabs {
        fn hit_test(
            &self,
            _root: SurfaceId,
            point: Point,
            overrides: &HitTestOverrides,
        ) -> Option<(SurfaceId, Point)> {
            self.0
                .iter()
                .find(|(id, _)| !overrides.is_ignored(*id))
                .map(|&(id, origin)| (id, point - origin.to_vec2()))
        }

        fn transform_point(&self, _: SurfaceId, _: SurfaceId, point: Point) -> Option<Point> {
            Some(point)
        }

        fn parent_of(&self, _: SurfaceId) -> Option<SurfaceId> {
            None
        }
    }

    const ROOT: SurfaceId = SurfaceId::new(1);
    const CHILD: SurfaceId = SurfaceId::new(2);

    #[test]
    fn single_surface_short_circuits() {
        let mut reg: SurfaceRegistry<()> = SurfaceRegistry::new();
        reg.add(ROOT, ());
        // The space would say CHILD, but with one entry it is never asked.
        let space = Slabs(alloc::vec![(CHILD, Point::new(10.0, 10.0))]);
        let resolved = resolve_target(&reg, &space, ROOT, Point::new(5.0, 5.0));
        assert_eq!(resolved.surface, ROOT);
        assert_eq!(resolved.location, Point::new(5.0, 5.0));
    }

    #[test]
    fn delegates_and_reports_local_point() {
        let mut reg: SurfaceRegistry<()> = SurfaceRegistry::new();
        reg.add(ROOT, ());
        reg.add(CHILD, ());
        let space = Slabs(alloc::vec![(CHILD, Point::new(10.0, 20.0))]);
        let resolved = resolve_target(&reg, &space, ROOT, Point::new(50.0, 60.0));
        assert_eq!(resolved.surface, CHILD);
        assert_eq!(resolved.location, Point::new(40.0, 40.0));
        assert_eq!(
            resolved.delta_from(Point::new(50.0, 60.0)),
            Vec2::new(-10.0, -20.0)
        );
    }

    #[test]
    fn unknown_hit_falls_back_to_root() {
        let mut reg: SurfaceRegistry<()> = SurfaceRegistry::new();
        reg.add(ROOT, ());
        reg.add(CHILD, ());
        // Space still reports a surface the registry no longer knows.
        let stale = SurfaceId::new(99);
        let space = Slabs(alloc::vec![(stale, Point::new(10.0, 10.0))]);
        let resolved = resolve_target(&reg, &space, ROOT, Point::new(5.0, 5.0));
        assert_eq!(resolved.surface, ROOT);
        assert_eq!(resolved.location, Point::new(5.0, 5.0));
    }

    #[test]
    fn override_skips_to_next_candidate() {
        let mut reg: SurfaceRegistry<()> = SurfaceRegistry::new();
        reg.add(ROOT, ());
        reg.add(CHILD, ());
        let space = Slabs(alloc::vec![
            (CHILD, Point::new(10.0, 10.0)),
            (ROOT, Point::ZERO),
        ]);
        reg.set_hit_test_override(CHILD, true);
        let resolved = resolve_target(&reg, &space, ROOT, Point::new(5.0, 5.0));
        assert_eq!(resolved.surface, ROOT);
    }

    #[test]
    fn miss_falls_back_to_root() {
        let mut reg: SurfaceRegistry<()> = SurfaceRegistry::new();
        reg.add(ROOT, ());
        reg.add(CHILD, ());
        let space = Slabs(Vec::new());
        let resolved = resolve_target(&reg, &space, ROOT, Point::new(5.0, 5.0));
        assert_eq!(resolved.surface, ROOT);
    }
}
