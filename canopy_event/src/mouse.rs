// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse and mouse wheel events.

use kurbo::{Point, Vec2};

/// What a mouse event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseAction {
    /// A button went down.
    Down,
    /// A button went up.
    Up,
    /// The pointer moved. Also used for hover enters: a surface receiving a
    /// move it was not previously hovered by treats it as an enter.
    Move,
    /// The pointer left the surface.
    Leave,
}

/// A single mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Left button.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
    /// Navigation back.
    Back,
    /// Navigation forward.
    Forward,
}

bitflags::bitflags! {
    /// The set of buttons held while an event fired.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Left button held.
        const PRIMARY   = 0b0000_0001;
        /// Right button held.
        const SECONDARY = 0b0000_0010;
        /// Middle button held.
        const MIDDLE    = 0b0000_0100;
        /// Back button held.
        const BACK      = 0b0000_1000;
        /// Forward button held.
        const FORWARD   = 0b0001_0000;
    }
}

/// A mouse event addressed to one surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub action: MouseAction,
    /// Pointer position in the addressee's coordinate space.
    pub position: Point,
    /// The button that changed state, for [`MouseAction::Down`]/[`MouseAction::Up`].
    pub button: Option<MouseButton>,
    /// Buttons held at the time of the event.
    pub buttons: MouseButtons,
}

impl MouseEvent {
    /// Create a buttonless event (moves, leaves).
    pub fn new(action: MouseAction, position: Point) -> Self {
        Self {
            action,
            position,
            button: None,
            buttons: MouseButtons::empty(),
        }
    }

    /// Create a button-change event with the button also recorded as held.
    pub fn with_button(action: MouseAction, position: Point, button: MouseButton) -> Self {
        let buttons = match button {
            MouseButton::Primary => MouseButtons::PRIMARY,
            MouseButton::Secondary => MouseButtons::SECONDARY,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Back => MouseButtons::BACK,
            MouseButton::Forward => MouseButtons::FORWARD,
        };
        Self {
            action,
            position,
            button: Some(button),
            buttons,
        }
    }

    /// Copy of this event with the position shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Copy of this event at an explicit position.
    #[must_use]
    pub fn at(&self, position: Point) -> Self {
        Self { position, ..*self }
    }

    /// Copy of this event with a different action, same position and buttons.
    #[must_use]
    pub fn with_action(&self, action: MouseAction) -> Self {
        Self { action, ..*self }
    }
}

/// A mouse wheel event addressed to one surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseWheelEvent {
    /// Pointer position in the addressee's coordinate space.
    pub position: Point,
    /// Scroll delta in logical pixels.
    pub delta: Vec2,
}

impl MouseWheelEvent {
    /// Create a wheel event.
    pub fn new(position: Point, delta: Vec2) -> Self {
        Self { position, delta }
    }

    /// Copy of this event with the position shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Copy of this event at an explicit position.
    #[must_use]
    pub fn at(&self, position: Point) -> Self {
        Self { position, ..*self }
    }
}
