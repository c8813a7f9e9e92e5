//! Translation of raw backend events into listener calls
//!
//! The dispatcher owns the authoritative window size and the last known cursor
//! position. Every fan-out iterates a snapshot of the target registry, so a
//! listener may register or unregister listeners (itself included) while it is
//! being called without disturbing the pass in flight.

use std::fmt;

use super::key::{KeyAction, KeyEvent, KeyListener};
use super::mouse::{MouseAction, MouseListener};
use super::registry::ListenerRegistry;
use crate::foundation::math::Vec2;
use crate::window::{BackendEvent, WindowSize};

/// Callback invoked when the backend reports a new window size
pub type ResizeCallback = Box<dyn FnMut(WindowSize)>;

/// Routes backend events to the resize callback and listener registries
pub struct InputDispatcher {
    size: WindowSize,
    last_mouse_pos: Vec2,
    resize_listener: Option<ResizeCallback>,
    key_listeners: ListenerRegistry<dyn KeyListener>,
    mouse_listeners: ListenerRegistry<dyn MouseListener>,
}

impl InputDispatcher {
    /// Create a dispatcher for a window of the given size
    pub fn new(size: WindowSize) -> Self {
        Self {
            size,
            last_mouse_pos: Vec2::zeros(),
            resize_listener: None,
            key_listeners: ListenerRegistry::new(),
            mouse_listeners: ListenerRegistry::new(),
        }
    }

    /// Current window size
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Replace the window size without notifying the resize callback
    pub fn set_size(&mut self, size: WindowSize) {
        self.size = size;
    }

    /// Last cursor position reported by the backend
    pub fn last_mouse_pos(&self) -> Vec2 {
        self.last_mouse_pos
    }

    /// Set the single resize callback, replacing any previous one
    pub fn set_resize_listener(&mut self, listener: impl FnMut(WindowSize) + 'static) {
        self.resize_listener = Some(Box::new(listener));
    }

    /// Registry of keyboard listeners
    pub fn key_listeners(&self) -> &ListenerRegistry<dyn KeyListener> {
        &self.key_listeners
    }

    /// Registry of pointer listeners
    pub fn mouse_listeners(&self) -> &ListenerRegistry<dyn MouseListener> {
        &self.mouse_listeners
    }

    /// Route one backend event
    pub fn dispatch(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Resized { width, height } => self.resized(WindowSize::new(width, height)),
            BackendEvent::Error { code, description } => {
                log::error!("Window backend error {code}: {description}");
            }
            BackendEvent::Scroll { dx, dy } => self.scrolled(dx, dy),
            BackendEvent::MouseButton { button, action, .. } => self.mouse_button(button, action),
            BackendEvent::CursorPos { x, y } => self.cursor_moved(x, y),
            BackendEvent::Key {
                key,
                scancode,
                action,
                mods,
            } => self.key(key, scancode, action, mods),
        }
    }

    fn resized(&mut self, size: WindowSize) {
        if !size.is_valid() {
            log::debug!("Ignoring resize to {}x{}", size.width, size.height);
            return;
        }
        self.size = size;
        if let Some(listener) = self.resize_listener.as_mut() {
            listener(size);
        }
    }

    fn scrolled(&self, dx: f64, dy: f64) {
        if self.mouse_listeners.is_empty() {
            return;
        }
        let delta = Vec2::new(dx as f32, dy as f32);
        for listener in self.mouse_listeners.snapshot() {
            listener.borrow_mut().on_mouse_wheel(delta);
        }
    }

    fn mouse_button(&self, button: i32, action: i32) {
        let Some(action) = MouseAction::from_raw(action) else {
            return;
        };
        let pos = self.last_mouse_pos;
        for listener in self.mouse_listeners.snapshot() {
            let mut listener = listener.borrow_mut();
            match action {
                MouseAction::Pressed => listener.on_mouse_down(button, pos),
                MouseAction::Released => listener.on_mouse_up(button, pos),
            }
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        self.last_mouse_pos = Vec2::new(x as f32, y as f32);
        let pos = self.last_mouse_pos;
        for listener in self.mouse_listeners.snapshot() {
            listener.borrow_mut().on_mouse_move(pos);
        }
    }

    fn key(&self, key: i32, scancode: i32, action: i32, mods: i32) {
        let Some(action) = KeyAction::from_raw(action) else {
            return;
        };
        if self.key_listeners.is_empty() {
            return;
        }
        let event = KeyEvent::new(key, scancode, mods);
        for listener in self.key_listeners.snapshot() {
            let mut listener = listener.borrow_mut();
            match action {
                KeyAction::Pressed => listener.on_key_pressed(event),
                KeyAction::Released => listener.on_key_released(event),
                KeyAction::Repeat => listener.on_key_repeat(event),
            }
        }
    }
}

impl fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("size", &self.size)
            .field("last_mouse_pos", &self.last_mouse_pos)
            .field("has_resize_listener", &self.resize_listener.is_some())
            .field("key_listeners", &self.key_listeners.len())
            .field("mouse_listeners", &self.mouse_listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use super::*;
    use crate::input::key::{KEY_A, KEY_ESCAPE, KEY_PRESS_ACTION, KEY_RELEASE_ACTION, KEY_REPEAT_ACTION};
    use crate::input::mouse::{MOUSE_BUTTON_LEFT, MOUSE_PRESS_ACTION, MOUSE_RELEASE_ACTION};

    #[derive(Default)]
    struct RecordingKeys {
        calls: Vec<(&'static str, i32)>,
    }

    impl KeyListener for RecordingKeys {
        fn on_key_pressed(&mut self, event: KeyEvent) {
            self.calls.push(("pressed", event.key));
        }

        fn on_key_released(&mut self, event: KeyEvent) {
            self.calls.push(("released", event.key));
        }

        fn on_key_repeat(&mut self, event: KeyEvent) {
            self.calls.push(("repeat", event.key));
        }
    }

    #[derive(Default)]
    struct RecordingMouse {
        calls: Vec<String>,
    }

    impl MouseListener for RecordingMouse {
        fn on_mouse_down(&mut self, button: i32, pos: Vec2) {
            self.calls.push(format!("down {button} {} {}", pos.x, pos.y));
        }

        fn on_mouse_up(&mut self, button: i32, pos: Vec2) {
            self.calls.push(format!("up {button} {} {}", pos.x, pos.y));
        }

        fn on_mouse_move(&mut self, pos: Vec2) {
            self.calls.push(format!("move {} {}", pos.x, pos.y));
        }

        fn on_mouse_wheel(&mut self, delta: Vec2) {
            self.calls.push(format!("wheel {} {}", delta.x, delta.y));
        }
    }

    fn key_event(key: i32, action: i32) -> BackendEvent {
        BackendEvent::Key {
            key,
            scancode: 0,
            action,
            mods: 0,
        }
    }

    #[test]
    fn test_key_actions_route_to_one_method() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let keys = Rc::new(RefCell::new(RecordingKeys::default()));
        dispatcher.key_listeners().add(keys.clone());

        dispatcher.dispatch(key_event(KEY_A, KEY_PRESS_ACTION));
        dispatcher.dispatch(key_event(KEY_A, KEY_REPEAT_ACTION));
        dispatcher.dispatch(key_event(KEY_A, KEY_RELEASE_ACTION));
        dispatcher.dispatch(key_event(KEY_A, 7));

        assert_eq!(
            keys.borrow().calls,
            vec![("pressed", KEY_A), ("repeat", KEY_A), ("released", KEY_A)]
        );
    }

    #[test]
    fn test_escape_is_forwarded_like_any_key() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let keys = Rc::new(RefCell::new(RecordingKeys::default()));
        dispatcher.key_listeners().add(keys.clone());

        dispatcher.dispatch(key_event(KEY_ESCAPE, KEY_PRESS_ACTION));

        assert_eq!(keys.borrow().calls, vec![("pressed", KEY_ESCAPE)]);
    }

    #[test]
    fn test_button_uses_last_cursor_position() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let mouse = Rc::new(RefCell::new(RecordingMouse::default()));
        dispatcher.mouse_listeners().add(mouse.clone());

        dispatcher.dispatch(BackendEvent::MouseButton {
            button: MOUSE_BUTTON_LEFT,
            action: MOUSE_PRESS_ACTION,
            mods: 0,
        });
        dispatcher.dispatch(BackendEvent::CursorPos { x: 10.0, y: 20.0 });
        dispatcher.dispatch(BackendEvent::MouseButton {
            button: MOUSE_BUTTON_LEFT,
            action: MOUSE_RELEASE_ACTION,
            mods: 0,
        });
        dispatcher.dispatch(BackendEvent::MouseButton {
            button: MOUSE_BUTTON_LEFT,
            action: 3,
            mods: 0,
        });

        assert_eq!(mouse.borrow().calls, vec!["down 0 0 0", "move 10 20", "up 0 10 20"]);
    }

    #[test]
    fn test_cursor_position_tracked_without_listeners() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        dispatcher.dispatch(BackendEvent::CursorPos { x: 3.0, y: 4.0 });
        assert_eq!(dispatcher.last_mouse_pos(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_scroll_delivers_delta() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        dispatcher.dispatch(BackendEvent::Scroll { dx: 1.0, dy: 1.0 });

        let mouse = Rc::new(RefCell::new(RecordingMouse::default()));
        dispatcher.mouse_listeners().add(mouse.clone());
        dispatcher.dispatch(BackendEvent::Scroll { dx: 0.0, dy: -2.0 });

        assert_eq!(mouse.borrow().calls, vec!["wheel 0 -2"]);
    }

    #[test]
    fn test_resize_updates_size_and_notifies_once() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        dispatcher.set_resize_listener(move |size| sink.borrow_mut().push(size));

        dispatcher.dispatch(BackendEvent::Resized { width: 1024, height: 768 });

        assert_eq!(dispatcher.size(), WindowSize::new(1024, 768));
        assert_eq!(*seen.borrow(), vec![WindowSize::new(1024, 768)]);
    }

    #[test]
    fn test_non_positive_resize_is_ignored() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        dispatcher.set_resize_listener(move |_| *sink.borrow_mut() += 1);

        dispatcher.dispatch(BackendEvent::Resized { width: 0, height: 0 });

        assert_eq!(dispatcher.size(), WindowSize::new(640, 480));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_error_event_is_not_fatal() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        dispatcher.dispatch(BackendEvent::Error {
            code: 65544,
            description: "platform error".to_string(),
        });
        assert_eq!(dispatcher.size(), WindowSize::default());
    }

    struct OneShot {
        registry: ListenerRegistry<dyn MouseListener>,
        this: Weak<RefCell<OneShot>>,
        moves: u32,
    }

    impl MouseListener for OneShot {
        fn on_mouse_move(&mut self, _pos: Vec2) {
            self.moves += 1;
            if let Some(this) = self.this.upgrade() {
                self.registry.remove(&this);
            }
        }
    }

    #[test]
    fn test_listener_can_unregister_itself() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let registry = dispatcher.mouse_listeners().clone();
        let one_shot = Rc::new_cyclic(|this| {
            RefCell::new(OneShot {
                registry: registry.clone(),
                this: this.clone(),
                moves: 0,
            })
        });
        let other = Rc::new(RefCell::new(RecordingMouse::default()));
        registry.add(one_shot.clone());
        registry.add(other.clone());

        dispatcher.dispatch(BackendEvent::CursorPos { x: 1.0, y: 1.0 });
        dispatcher.dispatch(BackendEvent::CursorPos { x: 2.0, y: 2.0 });

        assert_eq!(one_shot.borrow().moves, 1);
        assert_eq!(other.borrow().calls, vec!["move 1 1", "move 2 2"]);
        assert_eq!(registry.len(), 1);
    }

    struct Recruiter {
        registry: ListenerRegistry<dyn KeyListener>,
        recruit: Rc<RefCell<RecordingKeys>>,
    }

    impl KeyListener for Recruiter {
        fn on_key_pressed(&mut self, _event: KeyEvent) {
            self.registry.add(self.recruit.clone());
        }
    }

    #[test]
    fn test_listener_added_during_dispatch_waits_for_next_event() {
        let mut dispatcher = InputDispatcher::new(WindowSize::default());
        let recruit = Rc::new(RefCell::new(RecordingKeys::default()));
        let recruiter = Rc::new(RefCell::new(Recruiter {
            registry: dispatcher.key_listeners().clone(),
            recruit: recruit.clone(),
        }));
        dispatcher.key_listeners().add(recruiter);

        dispatcher.dispatch(key_event(KEY_A, KEY_PRESS_ACTION));
        assert!(recruit.borrow().calls.is_empty());

        dispatcher.dispatch(key_event(KEY_A, KEY_PRESS_ACTION));
        assert_eq!(recruit.borrow().calls, vec![("pressed", KEY_A)]);
    }
}
