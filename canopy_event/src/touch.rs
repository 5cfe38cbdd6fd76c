// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch events.
//!
//! A touch event carries every active point of the sequence it belongs to,
//! each with its own per-event phase. Stream boundaries are governed by the
//! number of pressed vs. terminal points, not by the event action alone:
//! multi-point starts and ends are legal, and the router counts phases to
//! decide when a sequence opens and closes.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// What a touch event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// One or more points went down.
    Start,
    /// One or more points moved.
    Move,
    /// One or more points lifted.
    End,
    /// The sequence was aborted by the system.
    Cancel,
}

/// Per-event state of a single touch point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// The point went down in this event.
    Pressed,
    /// The point moved in this event.
    Moved,
    /// The point lifted in this event.
    Released,
    /// The point was cancelled in this event.
    Cancelled,
    /// The point is down but did not change in this event.
    Stationary,
}

impl TouchPhase {
    /// Whether this phase ends the point's participation in the sequence.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Released | Self::Cancelled)
    }
}

/// A single touch point within an event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Stable identifier of the point across the sequence.
    pub id: u32,
    /// Position in the addressee's coordinate space.
    pub position: Point,
    /// This point's phase in this event.
    pub phase: TouchPhase,
}

/// A touch event addressed to one surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// All points of the sequence, changed or stationary.
    pub points: SmallVec<[TouchPoint; 2]>,
}

impl TouchEvent {
    /// Create a touch event from its points.
    pub fn new(action: TouchAction, points: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self {
            action,
            points: points.into_iter().collect(),
        }
    }

    /// Number of points pressed in this event.
    pub fn pressed_count(&self) -> u32 {
        count(&self.points, |p| p.phase == TouchPhase::Pressed)
    }

    /// Number of points reaching a terminal phase in this event.
    pub fn terminal_count(&self) -> u32 {
        count(&self.points, |p| p.phase.is_terminal())
    }

    /// The first point pressed in this event, if any.
    ///
    /// This is the point whose position seeds target resolution when the
    /// event opens a new sequence.
    pub fn first_pressed(&self) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.phase == TouchPhase::Pressed)
    }

    /// Copy of this event with every point shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            action: self.action,
            points: self
                .points
                .iter()
                .map(|p| TouchPoint {
                    position: p.position + delta,
                    ..*p
                })
                .collect(),
        }
    }
}

fn count(points: &[TouchPoint], pred: impl Fn(&TouchPoint) -> bool) -> u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "An event never carries anywhere near 2^32 touch points."
    )]
    {
        points.iter().filter(|p| pred(p)).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(id: u32, x: f64, y: f64, phase: TouchPhase) -> TouchPoint {
        TouchPoint {
            id,
            position: Point::new(x, y),
            phase,
        }
    }

    #[test]
    fn pressed_and_terminal_counts() {
        let ev = TouchEvent::new(
            TouchAction::Start,
            [
                pt(1, 0.0, 0.0, TouchPhase::Pressed),
                pt(2, 5.0, 5.0, TouchPhase::Pressed),
                pt(3, 9.0, 9.0, TouchPhase::Stationary),
            ],
        );
        assert_eq!(ev.pressed_count(), 2);
        assert_eq!(ev.terminal_count(), 0);

        let end = TouchEvent::new(
            TouchAction::End,
            [
                pt(1, 0.0, 0.0, TouchPhase::Released),
                pt(2, 5.0, 5.0, TouchPhase::Cancelled),
            ],
        );
        assert_eq!(end.terminal_count(), 2);
    }

    #[test]
    fn first_pressed_skips_stationary_points() {
        let ev = TouchEvent::new(
            TouchAction::Start,
            [
                pt(7, 1.0, 1.0, TouchPhase::Stationary),
                pt(8, 2.0, 3.0, TouchPhase::Pressed),
            ],
        );
        assert_eq!(ev.first_pressed().map(|p| p.id), Some(8));
    }

    #[test]
    fn translated_shifts_every_point() {
        let ev = TouchEvent::new(
            TouchAction::Move,
            [
                pt(1, 10.0, 10.0, TouchPhase::Moved),
                pt(2, 20.0, 20.0, TouchPhase::Stationary),
            ],
        );
        let local = ev.translated(Vec2::new(-10.0, -20.0));
        assert_eq!(local.points[0].position, Point::new(0.0, -10.0));
        assert_eq!(local.points[1].position, Point::new(10.0, 0.0));
    }
}
