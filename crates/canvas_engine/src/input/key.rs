//! Keyboard events and listeners
//!
//! Key codes and modifier bits use GLFW numbering for every backend, so a
//! headless or host-injected backend reports the same values as the native one.

use std::cell::RefCell;
use std::rc::Rc;

/// Raw action code for a key press
pub const KEY_PRESS_ACTION: i32 = 1;
/// Raw action code for a key release
pub const KEY_RELEASE_ACTION: i32 = 2;
/// Raw action code for a held key repeating
pub const KEY_REPEAT_ACTION: i32 = 3;

/// Space bar
pub const KEY_SPACE: i32 = 32;
/// A key
pub const KEY_A: i32 = 65;
/// D key
pub const KEY_D: i32 = 68;
/// S key
pub const KEY_S: i32 = 83;
/// W key
pub const KEY_W: i32 = 87;
/// Escape key
pub const KEY_ESCAPE: i32 = 256;
/// Enter key
pub const KEY_ENTER: i32 = 257;
/// Tab key
pub const KEY_TAB: i32 = 258;
/// Right arrow
pub const KEY_RIGHT: i32 = 262;
/// Left arrow
pub const KEY_LEFT: i32 = 263;
/// Down arrow
pub const KEY_DOWN: i32 = 264;
/// Up arrow
pub const KEY_UP: i32 = 265;

bitflags::bitflags! {
    /// Modifier keys held while a key or button event happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: i32 {
        /// Either Shift key
        const SHIFT = 0x0001;
        /// Either Control key
        const CONTROL = 0x0002;
        /// Either Alt key
        const ALT = 0x0004;
        /// Either Super (Windows/Command) key
        const SUPER = 0x0008;
        /// Caps Lock is enabled
        const CAPS_LOCK = 0x0010;
        /// Num Lock is enabled
        const NUM_LOCK = 0x0020;
    }
}

/// Translated key action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Pressed,
    /// Key went up
    Released,
    /// Key is held and the platform repeated it
    Repeat,
}

impl KeyAction {
    /// Translate a raw action code, `None` for unknown codes
    pub const fn from_raw(action: i32) -> Option<Self> {
        match action {
            KEY_PRESS_ACTION => Some(Self::Pressed),
            KEY_RELEASE_ACTION => Some(Self::Released),
            KEY_REPEAT_ACTION => Some(Self::Repeat),
            _ => None,
        }
    }

    /// Raw action code for this action
    pub const fn raw(self) -> i32 {
        match self {
            Self::Pressed => KEY_PRESS_ACTION,
            Self::Released => KEY_RELEASE_ACTION,
            Self::Repeat => KEY_REPEAT_ACTION,
        }
    }
}

/// Whether a raw key event is the close-window shortcut (Escape pressed)
///
/// Backends that honor `Parameters::close_on_escape` use this to decide when
/// to close instead of forwarding the event.
pub const fn is_close_shortcut(key: i32, action: i32) -> bool {
    key == KEY_ESCAPE && action == KEY_PRESS_ACTION
}

/// Keyboard event delivered to key listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Key code
    pub key: i32,
    /// Platform scancode
    pub scancode: i32,
    /// Raw modifier bits
    pub mods: i32,
}

impl KeyEvent {
    /// Create a new key event
    pub const fn new(key: i32, scancode: i32, mods: i32) -> Self {
        Self { key, scancode, mods }
    }

    /// Modifier bits as flags, unknown bits dropped
    pub fn modifiers(&self) -> KeyModifiers {
        KeyModifiers::from_bits_truncate(self.mods)
    }
}

/// Receiver of keyboard events
///
/// All methods default to doing nothing, so implementors only override what
/// they care about.
pub trait KeyListener {
    /// A key went down
    fn on_key_pressed(&mut self, _event: KeyEvent) {}

    /// A key went up
    fn on_key_released(&mut self, _event: KeyEvent) {}

    /// A held key repeated
    fn on_key_repeat(&mut self, _event: KeyEvent) {}
}

/// Shared reference to a registered key listener
pub type KeyListenerRef = Rc<RefCell<dyn KeyListener>>;

/// Closure-backed key listener bound to one action, or to all of them
pub struct KeyAdapter {
    action: Option<KeyAction>,
    callback: Box<dyn FnMut(KeyEvent)>,
}

impl KeyAdapter {
    /// Listener that calls `callback` for events with the given action
    pub fn new(action: KeyAction, callback: impl FnMut(KeyEvent) + 'static) -> Self {
        Self {
            action: Some(action),
            callback: Box::new(callback),
        }
    }

    /// Listener that calls `callback` for every key event
    pub fn any(callback: impl FnMut(KeyEvent) + 'static) -> Self {
        Self {
            action: None,
            callback: Box::new(callback),
        }
    }

    /// Wrap the adapter into a shareable listener reference
    pub fn into_listener(self) -> KeyListenerRef {
        Rc::new(RefCell::new(self))
    }

    fn handle(&mut self, action: KeyAction, event: KeyEvent) {
        if self.action.map_or(true, |wanted| wanted == action) {
            (self.callback)(event);
        }
    }
}

impl KeyListener for KeyAdapter {
    fn on_key_pressed(&mut self, event: KeyEvent) {
        self.handle(KeyAction::Pressed, event);
    }

    fn on_key_released(&mut self, event: KeyEvent) {
        self.handle(KeyAction::Released, event);
    }

    fn on_key_repeat(&mut self, event: KeyEvent) {
        self.handle(KeyAction::Repeat, event);
    }
}

impl std::fmt::Debug for KeyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyAdapter").field("action", &self.action).finish_non_exhaustive()
    }
}
