// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface identity and the capability traits at the router's seams.

use canopy_event::{GestureEvent, MouseEvent, MouseWheelEvent, TouchEvent};
use kurbo::Point;

use crate::registry::HitTestOverrides;

/// Identifier for a registered surface.
///
/// Ids are assigned by the embedder, are unique per registered surface, and
/// are never reused after unregistration. The raw value carries no meaning
/// to the router beyond identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Create an id from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value this id was created from.
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// A routed-input recipient.
///
/// The router's only outbound interface: after resolving a target and
/// shifting coordinates into its space, the router hands the event to one of
/// these methods. Whether the event is *consumed* is the surface's business
/// and is signaled elsewhere; the router never waits on it.
pub trait Surface {
    /// Receive a locally-addressed mouse event.
    fn process_mouse_event(&mut self, event: &MouseEvent);

    /// Receive a locally-addressed mouse wheel event.
    fn process_mouse_wheel_event(&mut self, event: &MouseWheelEvent);

    /// Receive a locally-addressed touch event.
    fn process_touch_event(&mut self, event: &TouchEvent);

    /// Receive a locally-addressed gesture event.
    fn process_gesture_event(&mut self, event: &GestureEvent);
}

/// The spatial capability the router consumes.
///
/// Implemented by whatever owns the surface tree's geometry — typically the
/// compositor's scene. The router holds an implementation by value, the same
/// way the responder holds its lookups.
pub trait SurfaceSpace {
    /// Hit test a root-space point against the current surface tree.
    ///
    /// Walks drawn content front-to-back, skipping surfaces the override
    /// table marks as ignored, and returns the deepest valid surface under
    /// the point together with the point expressed in that surface's local
    /// space. `None` means nothing was hit.
    fn hit_test(
        &self,
        root: SurfaceId,
        point: Point,
        overrides: &HitTestOverrides,
    ) -> Option<(SurfaceId, Point)>;

    /// Transform a point from one surface's space to another's.
    ///
    /// May fail when the destination's spatial metadata has not propagated
    /// yet; callers treat failure as an identity transform.
    fn transform_point(&self, from: SurfaceId, to: SurfaceId, point: Point) -> Option<Point>;

    /// The parent of a surface, or `None` for the root or an unknown id.
    fn parent_of(&self, id: SurfaceId) -> Option<SurfaceId>;
}
