//! Pointer events and listeners

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Vec2;

/// Raw action code for a mouse button press
pub const MOUSE_PRESS_ACTION: i32 = 1;
/// Raw action code for a mouse button release
pub const MOUSE_RELEASE_ACTION: i32 = 2;

/// Left mouse button
pub const MOUSE_BUTTON_LEFT: i32 = 0;
/// Right mouse button
pub const MOUSE_BUTTON_RIGHT: i32 = 1;
/// Middle mouse button
pub const MOUSE_BUTTON_MIDDLE: i32 = 2;

/// Translated mouse button action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
}

impl MouseAction {
    /// Translate a raw action code, `None` for unknown codes
    pub const fn from_raw(action: i32) -> Option<Self> {
        match action {
            MOUSE_PRESS_ACTION => Some(Self::Pressed),
            MOUSE_RELEASE_ACTION => Some(Self::Released),
            _ => None,
        }
    }

    /// Raw action code for this action
    pub const fn raw(self) -> i32 {
        match self {
            Self::Pressed => MOUSE_PRESS_ACTION,
            Self::Released => MOUSE_RELEASE_ACTION,
        }
    }
}

/// Receiver of pointer events
///
/// Positions are window coordinates of the last known cursor position; button
/// events carry no position of their own.
pub trait MouseListener {
    /// A button went down
    fn on_mouse_down(&mut self, _button: i32, _pos: Vec2) {}

    /// A button went up
    fn on_mouse_up(&mut self, _button: i32, _pos: Vec2) {}

    /// The cursor moved
    fn on_mouse_move(&mut self, _pos: Vec2) {}

    /// The wheel or touchpad scrolled
    fn on_mouse_wheel(&mut self, _delta: Vec2) {}
}

/// Shared reference to a registered mouse listener
pub type MouseListenerRef = Rc<RefCell<dyn MouseListener>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_translation() {
        assert_eq!(MouseAction::from_raw(1), Some(MouseAction::Pressed));
        assert_eq!(MouseAction::from_raw(2), Some(MouseAction::Released));
        assert_eq!(MouseAction::from_raw(3), None);
        assert_eq!(MouseAction::Released.raw(), MOUSE_RELEASE_ACTION);
    }
}
