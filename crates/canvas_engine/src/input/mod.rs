//! Input handling
//!
//! Keyboard and pointer listener traits, the registries that hold them, and the
//! dispatcher that turns raw backend events into listener calls.

pub mod dispatch;
pub mod key;
pub mod mouse;
pub mod registry;

pub use dispatch::{InputDispatcher, ResizeCallback};
pub use key::{KeyAction, KeyAdapter, KeyEvent, KeyListener, KeyListenerRef, KeyModifiers};
pub use mouse::{MouseAction, MouseListener, MouseListenerRef};
pub use registry::ListenerRegistry;

/// Registry of keyboard listeners
pub type KeyListeners = ListenerRegistry<dyn KeyListener>;

/// Registry of pointer listeners
pub type MouseListeners = ListenerRegistry<dyn MouseListener>;
