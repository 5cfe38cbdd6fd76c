// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stream target records.

use kurbo::{Point, Vec2};

use canopy_surface::{ResolvedTarget, SurfaceId};

/// The fixed resolution of one input stream.
///
/// Captured once when the stream starts and held for its whole duration:
/// every root-space point of the stream is shifted by `delta` before being
/// handed to `surface`. The delta approximates the root→target transform at
/// stream start; it is deliberately not refreshed if the target repositions
/// mid-stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StreamTarget {
    /// The surface the stream resolved to.
    pub surface: SurfaceId,
    /// Root→local offset applied to every point of the stream.
    pub delta: Vec2,
}

impl StreamTarget {
    /// Capture a stream target from a resolution at `root_point`.
    pub fn from_resolution(resolved: &ResolvedTarget, root_point: Point) -> Self {
        Self {
            surface: resolved.surface,
            delta: resolved.delta_from(root_point),
        }
    }
}
