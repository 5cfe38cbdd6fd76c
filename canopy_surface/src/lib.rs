// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface --heading-base-level=0

//! Canopy Surface: surface identity, registration, and hit-test resolution.
//!
//! ## Overview
//!
//! A *surface* is an embeddable rendering and input target — a nested frame,
//! a guest view — that can receive routed input. This crate defines:
//!
//! - [`SurfaceId`]: the opaque identifier a surface registers under.
//! - [`Surface`]: the delivery capability set every surface implements
//!   (`process_mouse_event`, `process_mouse_wheel_event`,
//!   `process_touch_event`, `process_gesture_event`), each taking a
//!   locally-addressed event.
//! - [`SurfaceSpace`]: the consumed spatial capability — hit test a
//!   root-space point against the current surface tree, transform a point
//!   between two surfaces' spaces, look up a surface's parent. The
//!   compositor side implements this; `canopy_space` ships a reference
//!   implementation.
//! - [`SurfaceRegistry`]: the owner map from id to delivery endpoint, plus
//!   the hit-test override table used to punch through overlays.
//! - [`resolve_target`]: the hit-test resolver with its fail-soft fallback
//!   to the root surface.
//!
//! ## Liveness
//!
//! The registry is the single source of liveness: an id resolvable by hit
//! testing must be present in the owner map, and ids are never reused after
//! removal. When a surface is destroyed mid-stream the router drops the
//! registry entry and nulls every recorded stream target in the same step,
//! so a later-arriving event of that stream is dropped instead of delivered
//! to a dangling target.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod registry;
mod resolve;
mod surface;

pub use registry::{HitTestOverrides, SurfaceRegistry};
pub use resolve::{ResolvedTarget, resolve_target};
pub use surface::{Surface, SurfaceId, SurfaceSpace};
