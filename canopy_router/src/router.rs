// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! One [`EventRouter`] sits between the embedder's event source and the
//! registered surfaces. Every event enters through a `route_*` call carrying
//! the root surface's id and a root-space event; the router resolves a
//! target, shifts coordinates into its space, and calls the target's
//! `process_*` method. The router never calls back into the routing caller.
//!
//! ## Stream stickiness
//!
//! Hit testing runs once per stream, not once per event. A touch sequence, a
//! touchscreen gesture stream, and a touchpad gesture stream each latch a
//! [`StreamTarget`] at stream start and deliver every later event of the
//! stream there, shifted by the captured offset. Mouse capture latches a
//! target but recomputes the transform per event.
//!
//! ## Teardown
//!
//! [`EventRouter::on_surface_destroyed`] removes a surface and nulls every
//! in-flight reference to it in the same step. Streams that had resolved to
//! the destroyed surface keep draining with a null target, dropping their
//! remaining events instead of misrouting them.
//!
//! All routing is synchronous and single-threaded; the router owns all of
//! its state and no routing call is ever partially applied.

use kurbo::Point;

use canopy_event::{
    GestureDevice, GestureEvent, GestureKind, MouseAction, MouseEvent, MouseWheelEvent, TouchEvent,
};
use canopy_surface::{
    ResolvedTarget, Surface, SurfaceId, SurfaceRegistry, SurfaceSpace, resolve_target,
};

use crate::bubble::{BubbleDecision, ScrollBubblingState};
use crate::gesture::{TouchpadGestureState, TouchscreenGestureState};
use crate::hover::{HoverState, HoverStep, ancestor_chain};
use crate::queue::GestureTargetQueue;
use crate::touch::TouchStreamTracker;
use crate::types::StreamTarget;

/// The cross-surface input event router.
///
/// Generic over the surface type `S` (the delivery endpoints, owned by the
/// router's registry) and the spatial capability `P` (held by value, the way
/// the responder holds its lookups).
///
/// ## Usage
///
/// - Construct with [`EventRouter::new`] around a [`SurfaceSpace`].
/// - Register surfaces with [`EventRouter::add_surface`]; keep the space's
///   geometry current through [`EventRouter::space_mut`].
/// - Feed root-space events to the `route_*` entry points.
/// - Forward unconsumed scrolls from child surfaces through
///   [`EventRouter::bubble_scroll`].
/// - Notify destruction with [`EventRouter::on_surface_destroyed`].
pub struct EventRouter<S, P: SurfaceSpace> {
    registry: SurfaceRegistry<S>,
    space: P,
    touch: TouchStreamTracker,
    queue: GestureTargetQueue,
    touchscreen: TouchscreenGestureState,
    touchpad: TouchpadGestureState,
    bubble: ScrollBubblingState,
    capture: Option<SurfaceId>,
    hover: HoverState,
}

impl<S, P: SurfaceSpace> core::fmt::Debug for EventRouter<S, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRouter")
            .field("surfaces", &self.registry.len())
            .field("queued_targets", &self.queue.len())
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, P: SurfaceSpace> EventRouter<S, P> {
    /// Create a router over a spatial capability.
    pub fn new(space: P) -> Self {
        Self {
            registry: SurfaceRegistry::new(),
            space,
            touch: TouchStreamTracker::new(),
            queue: GestureTargetQueue::new(),
            touchscreen: TouchscreenGestureState::new(),
            touchpad: TouchpadGestureState::new(),
            bubble: ScrollBubblingState::new(),
            capture: None,
            hover: HoverState::new(),
        }
    }

    // --- registration ---

    /// Register a surface under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered.
    pub fn add_surface(&mut self, id: SurfaceId, surface: S) {
        self.registry.add(id, surface);
    }

    /// Unregister `id`, returning its surface. No-op when absent.
    ///
    /// Stream state referencing `id` is nulled in the same step.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<S> {
        self.purge_stream_state(id);
        self.registry.remove(id)
    }

    /// A surface announced its destruction.
    ///
    /// The registry entry and every in-flight target referencing `id` are
    /// cleared synchronously: later-arriving events of streams that had
    /// resolved to `id` are dropped, never delivered to a stale target.
    pub fn on_surface_destroyed(&mut self, id: SurfaceId) {
        let _ = self.remove_surface(id);
    }

    /// Mark `id` as ignored (or valid again) for hit testing.
    pub fn set_hit_test_override(&mut self, id: SurfaceId, ignored: bool) {
        self.registry.set_hit_test_override(id, ignored);
    }

    // --- routing entry points ---

    /// Route a root-space mouse event.
    pub fn route_mouse_event(&mut self, root: SurfaceId, event: &MouseEvent) {
        if let Some(target) = self.capture {
            // Captured targets are typically non-streaming; the transform is
            // recomputed per event rather than latched at capture time.
            let local = self.transform_or_identity(root, target, event.position);
            self.deliver_mouse(target, &event.at(local));
            if event.action == MouseAction::Up {
                self.capture = None;
            }
            return;
        }

        match event.action {
            MouseAction::Down => {
                let resolved = self.resolve(root, event.position);
                self.capture = Some(resolved.surface);
                self.deliver_mouse(resolved.surface, &event.at(resolved.location));
            }
            MouseAction::Move => {
                let resolved = self.resolve(root, event.position);
                if self.hover.target() != Some(resolved.surface) {
                    match ancestor_chain(&self.space, resolved.surface, root) {
                        Some(chain) => {
                            let steps = self.hover.update(&chain);
                            self.deliver_hover_steps(root, event, &steps);
                        }
                        // Partially destroyed tree: discard the transition
                        // but remember where the pointer is.
                        None => self.hover.set_target_only(resolved.surface),
                    }
                }
                self.deliver_mouse(resolved.surface, &event.at(resolved.location));
            }
            MouseAction::Leave => {
                let steps = self.hover.clear();
                self.deliver_hover_steps(root, event, &steps);
            }
            MouseAction::Up => {
                // An up without capture (the down predated this router or the
                // capture target died); deliver where it lands.
                let resolved = self.resolve(root, event.position);
                self.deliver_mouse(resolved.surface, &event.at(resolved.location));
            }
        }
    }

    /// Route a root-space mouse wheel event.
    pub fn route_mouse_wheel_event(&mut self, root: SurfaceId, event: &MouseWheelEvent) {
        let resolved = self.resolve(root, event.position);
        self.deliver_wheel(resolved.surface, &event.at(resolved.location));
    }

    /// Route a root-space touch event.
    pub fn route_touch_event(&mut self, root: SurfaceId, event: &TouchEvent) {
        let pressed = event.pressed_count();
        if pressed > 0 && self.touch.observe_pressed(pressed) {
            let target = match event.first_pressed() {
                Some(point) => {
                    let seed = point.position;
                    let resolved = self.resolve(root, seed);
                    let target = StreamTarget::from_resolution(&resolved, seed);
                    // The same physical scroll must not arrive twice: a new
                    // sequence landing on the bubble target closes the bubble.
                    self.close_bubble_for(target.surface, GestureDevice::Touchscreen, root, seed);
                    Some(target)
                }
                None => None,
            };
            self.touch.set_target(target);
            self.queue.push(target);
        }

        if let Some(target) = self.touch.target() {
            self.deliver_touch(target.surface, &event.translated(target.delta));
        }

        let terminal = event.terminal_count();
        if terminal > 0 {
            self.touch.observe_terminal(terminal);
        }
    }

    /// Route a root-space gesture event.
    pub fn route_gesture_event(&mut self, root: SurfaceId, event: &GestureEvent) {
        match event.device {
            GestureDevice::Touchscreen => self.route_touchscreen_gesture(root, event),
            GestureDevice::Touchpad => self.route_touchpad_gesture(root, event),
        }
    }

    // --- scroll bubbling ---

    /// Re-deliver an unconsumed scroll gesture to an ancestor surface.
    ///
    /// Called on behalf of a child surface that received a scroll-update or
    /// scroll-end it did not consume, with `target` the ancestor that should
    /// see it next. The event is delivered in the coordinates it arrives in.
    pub fn bubble_scroll(&mut self, target: SurfaceId, event: &GestureEvent) {
        let is_scroll_end = matches!(event.kind, GestureKind::ScrollEnd);
        let busy = self.is_stream_target(target);
        match self.bubble.decide(target, is_scroll_end, busy) {
            BubbleDecision::Forward => self.deliver_gesture(target, event),
            BubbleDecision::Discard => {}
            BubbleDecision::Retarget { previous } => {
                if let Some(previous) = previous {
                    self.deliver_gesture(
                        previous,
                        &GestureEvent::scroll_end(event.device, event.position),
                    );
                }
                self.deliver_gesture(
                    target,
                    &GestureEvent::scroll_begin(event.device, event.position),
                );
                self.bubble.retarget(target);
                self.deliver_gesture(target, event);
            }
        }
    }

    /// Cancel bubbling if `target` started it.
    ///
    /// Keyed to the original request's target, not the current hop.
    pub fn cancel_bubbling(&mut self, target: SurfaceId) {
        self.bubble.cancel(target);
    }

    // --- introspection ---

    /// Shared access to a registered surface.
    pub fn surface(&self, id: SurfaceId) -> Option<&S> {
        self.registry.get(id)
    }

    /// Mutable access to a registered surface.
    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.registry.get_mut(id)
    }

    /// Number of registered surfaces.
    pub fn surface_count(&self) -> usize {
        self.registry.len()
    }

    /// The spatial capability.
    pub fn space(&self) -> &P {
        &self.space
    }

    /// Mutable access to the spatial capability, for geometry updates.
    pub fn space_mut(&mut self) -> &mut P {
        &mut self.space
    }

    /// The live touch sequence's target surface, if any.
    pub fn touch_target(&self) -> Option<SurfaceId> {
        self.touch.target().map(|t| t.surface)
    }

    /// The active touchscreen gesture stream's target surface, if any.
    pub fn touchscreen_gesture_target(&self) -> Option<SurfaceId> {
        self.touchscreen.target().map(|t| t.surface)
    }

    /// The active touchpad gesture stream's target surface, if any.
    pub fn touchpad_gesture_target(&self) -> Option<SurfaceId> {
        self.touchpad.target().map(|t| t.surface)
    }

    /// The current bubbling hop, if a bubble is active.
    pub fn bubble_target(&self) -> Option<SurfaceId> {
        self.bubble.current_target()
    }

    /// The mouse capture target, if a button is held.
    pub fn capture_target(&self) -> Option<SurfaceId> {
        self.capture
    }

    /// The hovered surface, if any.
    pub fn hover_target(&self) -> Option<SurfaceId> {
        self.hover.target()
    }

    /// Number of touch sequences awaiting their gesture streams.
    pub fn gesture_queue_len(&self) -> usize {
        self.queue.len()
    }

    // --- internals ---

    fn resolve(&self, root: SurfaceId, point: Point) -> ResolvedTarget {
        resolve_target(&self.registry, &self.space, root, point)
    }

    fn transform_or_identity(&self, from: SurfaceId, to: SurfaceId, point: Point) -> Point {
        self.space.transform_point(from, to, point).unwrap_or(point)
    }

    fn route_touchscreen_gesture(&mut self, root: SurfaceId, event: &GestureEvent) {
        match event.kind {
            GestureKind::TapDown => {
                let target = match self.queue.pop() {
                    Some(queued) => queued.target,
                    None => {
                        log::error!("touchscreen tap-down arrived with an empty target queue");
                        None
                    }
                };
                self.touchscreen.set_target(target);
                if let Some(target) = target {
                    self.deliver_gesture(target.surface, &event.translated(target.delta));
                }
            }
            // Pinch cannot be meaningfully delegated to a sub-surface; it
            // always addresses the root, framed as a scroll when the root
            // was not already mid-scroll.
            GestureKind::PinchBegin => {
                if self.touchscreen.begin_pinch() {
                    self.deliver_gesture(
                        root,
                        &GestureEvent::scroll_begin(event.device, event.position),
                    );
                }
                self.deliver_gesture(root, event);
            }
            GestureKind::PinchUpdate { .. } => self.deliver_gesture(root, event),
            GestureKind::PinchEnd => {
                self.deliver_gesture(root, event);
                if self.touchscreen.end_pinch() {
                    self.deliver_gesture(
                        root,
                        &GestureEvent::scroll_end(event.device, event.position),
                    );
                }
            }
            _ => {
                if let Some(target) = self.touchscreen.target() {
                    if target.surface == root {
                        self.touchscreen.note_scroll_to_root(event.kind);
                    }
                    self.deliver_gesture(target.surface, &event.translated(target.delta));
                }
            }
        }
    }

    fn route_touchpad_gesture(&mut self, root: SurfaceId, event: &GestureEvent) {
        match event.kind {
            // No touch sequence precedes a touchpad stream; resolve here.
            GestureKind::PinchBegin | GestureKind::FlingStart { .. } => {
                let resolved = self.resolve(root, event.position);
                let target = StreamTarget::from_resolution(&resolved, event.position);
                self.close_bubble_for(target.surface, event.device, root, event.position);
                self.touchpad.set_target(Some(target));
                self.deliver_gesture(target.surface, &event.translated(target.delta));
            }
            _ => {
                if let Some(target) = self.touchpad.target() {
                    self.deliver_gesture(target.surface, &event.translated(target.delta));
                }
            }
        }
    }

    /// A newly resolved stream landing on the bubble target closes the
    /// bubble with a synthesized scroll-end, so the same physical scroll is
    /// not delivered twice.
    fn close_bubble_for(
        &mut self,
        target: SurfaceId,
        device: GestureDevice,
        root: SurfaceId,
        root_point: Point,
    ) {
        if self.bubble.current_target() == Some(target) {
            self.bubble.take();
            let local = self.transform_or_identity(root, target, root_point);
            self.deliver_gesture(target, &GestureEvent::scroll_end(device, local));
        }
    }

    fn is_stream_target(&self, id: SurfaceId) -> bool {
        self.touch.target().is_some_and(|t| t.surface == id)
            || self.touchscreen.target().is_some_and(|t| t.surface == id)
            || self.touchpad.target().is_some_and(|t| t.surface == id)
    }

    fn deliver_hover_steps(&mut self, root: SurfaceId, event: &MouseEvent, steps: &[HoverStep]) {
        for step in steps {
            let (id, action) = match *step {
                HoverStep::Leave(id) => (id, MouseAction::Leave),
                HoverStep::Move(id) | HoverStep::Enter(id) => (id, MouseAction::Move),
            };
            let local = self.transform_or_identity(root, id, event.position);
            self.deliver_mouse(id, &event.with_action(action).at(local));
        }
    }

    fn purge_stream_state(&mut self, id: SurfaceId) {
        self.touch.forget_surface(id);
        self.queue.forget_surface(id);
        self.touchscreen.forget_surface(id);
        self.touchpad.forget_surface(id);
        self.bubble.forget_surface(id);
        if self.capture == Some(id) {
            self.capture = None;
        }
        self.hover.forget_surface(id);
    }

    // Delivery drops silently when the id is gone: the registry is the
    // single liveness source and a missing entry means the stream's target
    // was already purged.

    fn deliver_mouse(&mut self, id: SurfaceId, event: &MouseEvent) {
        if let Some(surface) = self.registry.get_mut(id) {
            surface.process_mouse_event(event);
        }
    }

    fn deliver_wheel(&mut self, id: SurfaceId, event: &MouseWheelEvent) {
        if let Some(surface) = self.registry.get_mut(id) {
            surface.process_mouse_wheel_event(event);
        }
    }

    fn deliver_touch(&mut self, id: SurfaceId, event: &TouchEvent) {
        if let Some(surface) = self.registry.get_mut(id) {
            surface.process_touch_event(event);
        }
    }

    fn deliver_gesture(&mut self, id: SurfaceId, event: &GestureEvent) {
        if let Some(surface) = self.registry.get_mut(id) {
            surface.process_gesture_event(event);
        }
    }
}
