// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owner map and the hit-test override table.

use hashbrown::{HashMap, HashSet};

use crate::surface::SurfaceId;

/// Surfaces currently excluded from hit testing.
///
/// A surface marks regions of itself "not a valid target" to punch through
/// overlays; the resolver passes this table to the spatial capability so
/// candidate quads belonging to ignored surfaces are rejected during the
/// front-to-back walk.
#[derive(Clone, Debug, Default)]
pub struct HitTestOverrides {
    ignored: HashSet<SurfaceId>,
}

impl HitTestOverrides {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently ignored for hit testing.
    pub fn is_ignored(&self, id: SurfaceId) -> bool {
        self.ignored.contains(&id)
    }

    /// Number of ignored surfaces.
    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    /// Whether no surface is ignored.
    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }

    fn set(&mut self, id: SurfaceId, ignored: bool) {
        if ignored {
            self.ignored.insert(id);
        } else {
            self.ignored.remove(&id);
        }
    }
}

/// The owner map: every surface currently reachable by routing.
///
/// Invariant: every id resolvable by hit testing exists here. Entries leave
/// the map synchronously on removal or destruction; the router nulls any
/// in-flight stream target in the same step, so no routing call ever crosses
/// a boundary holding a reference to a removed surface.
#[derive(Clone, Debug)]
pub struct SurfaceRegistry<S> {
    surfaces: HashMap<SurfaceId, S>,
    overrides: HitTestOverrides,
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SurfaceRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            overrides: HitTestOverrides::new(),
        }
    }

    /// Register a surface under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered. Ids are unique and never
    /// reused; a duplicate registration is a caller bug.
    pub fn add(&mut self, id: SurfaceId, surface: S) {
        let previous = self.surfaces.insert(id, surface);
        assert!(previous.is_none(), "surface id registered twice");
    }

    /// Unregister `id`, returning its surface. No-op when absent.
    ///
    /// Any override entry scoped to `id` is purged with it.
    pub fn remove(&mut self, id: SurfaceId) -> Option<S> {
        self.overrides.set(id, false);
        self.surfaces.remove(&id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    /// Shared access to a registered surface.
    pub fn get(&self, id: SurfaceId) -> Option<&S> {
        self.surfaces.get(&id)
    }

    /// Mutable access to a registered surface.
    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.surfaces.get_mut(&id)
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Mark `id` as ignored (or valid again) for hit testing.
    ///
    /// Only registered surfaces may carry an override; the call is a no-op
    /// for unknown ids.
    pub fn set_hit_test_override(&mut self, id: SurfaceId, ignored: bool) {
        if self.surfaces.contains_key(&id) {
            self.overrides.set(id, ignored);
        }
    }

    /// The current override table, as passed to hit testing.
    pub fn overrides(&self) -> &HitTestOverrides {
        &self.overrides
    }

    /// Iterate registered ids in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.surfaces.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_remove_roundtrip() {
        let mut reg: SurfaceRegistry<&str> = SurfaceRegistry::new();
        let id = SurfaceId::new(1);
        reg.add(id, "a");
        assert!(reg.contains(id));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.remove(id), Some("a"));
        assert!(!reg.contains(id));
        assert!(reg.is_empty());
        // Removing again is a no-op.
        assert_eq!(reg.remove(id), None);
    }

    #[test]
    #[should_panic(expected = "surface id registered twice")]
    fn duplicate_add_panics() {
        let mut reg: SurfaceRegistry<u8> = SurfaceRegistry::new();
        reg.add(SurfaceId::new(7), 0);
        reg.add(SurfaceId::new(7), 1);
    }

    #[test]
    fn override_requires_registration() {
        let mut reg: SurfaceRegistry<u8> = SurfaceRegistry::new();
        let known = SurfaceId::new(1);
        let unknown = SurfaceId::new(2);
        reg.add(known, 0);

        reg.set_hit_test_override(known, true);
        reg.set_hit_test_override(unknown, true);
        assert!(reg.overrides().is_ignored(known));
        assert!(!reg.overrides().is_ignored(unknown));

        reg.set_hit_test_override(known, false);
        assert!(!reg.overrides().is_ignored(known));
    }

    #[test]
    fn remove_purges_override() {
        let mut reg: SurfaceRegistry<u8> = SurfaceRegistry::new();
        let id = SurfaceId::new(3);
        reg.add(id, 0);
        reg.set_hit_test_override(id, true);
        assert!(reg.overrides().is_ignored(id));

        reg.remove(id);
        assert!(!reg.overrides().is_ignored(id));
        assert!(reg.overrides().is_empty());
    }
}
