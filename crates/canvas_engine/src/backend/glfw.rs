//! GLFW window backend
//!
//! Creates a native window with an OpenGL 3.3 core context and translates GLFW
//! window events into [`BackendEvent`] values. Only compiled with the `glfw`
//! feature.

use std::any::Any;

use glfw::Context;

use crate::assets::ImageData;
use crate::input::key::{is_close_shortcut, KEY_PRESS_ACTION, KEY_RELEASE_ACTION, KEY_REPEAT_ACTION};
use crate::input::mouse::{MOUSE_PRESS_ACTION, MOUSE_RELEASE_ACTION};
use crate::window::{BackendError, BackendEvent, Parameters, WindowBackend, WindowSize};

struct NativeWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// Native window backed by GLFW
#[derive(Default)]
pub struct GlfwBackend {
    native: Option<NativeWindow>,
    close_on_escape: bool,
}

impl GlfwBackend {
    /// Create a backend; the window itself is created by `init_window`
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying GLFW window, `None` before init or after destroy
    pub fn window(&self) -> Option<&glfw::PWindow> {
        self.native.as_ref().map(|native| &native.window)
    }

    /// Mutable access to the underlying GLFW window
    pub fn window_mut(&mut self) -> Option<&mut glfw::PWindow> {
        self.native.as_mut().map(|native| &mut native.window)
    }
}

// Native library errors are logged here and never become `BackendEvent::Error`.
fn report_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {error:?}: {description}");
}

const fn key_action(action: glfw::Action) -> i32 {
    match action {
        glfw::Action::Press => KEY_PRESS_ACTION,
        glfw::Action::Release => KEY_RELEASE_ACTION,
        glfw::Action::Repeat => KEY_REPEAT_ACTION,
    }
}

// Mouse buttons have no repeat action.
const fn mouse_action(action: glfw::Action) -> Option<i32> {
    match action {
        glfw::Action::Press => Some(MOUSE_PRESS_ACTION),
        glfw::Action::Release => Some(MOUSE_RELEASE_ACTION),
        glfw::Action::Repeat => None,
    }
}

impl WindowBackend for GlfwBackend {
    fn init_window(&mut self, params: &Parameters, icon: Option<&ImageData>) -> Result<(), BackendError> {
        let mut glfw = glfw::init(report_glfw_error)
            .map_err(|e| BackendError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        if params.antialiasing() > 0 {
            glfw.window_hint(glfw::WindowHint::Samples(Some(params.antialiasing())));
        }

        let size = params.size();
        let width = u32::try_from(size.width).map_err(|_| BackendError::CreationFailed)?;
        let height = u32::try_from(size.height).map_err(|_| BackendError::CreationFailed)?;
        let (mut window, events) = glfw
            .create_window(width, height, params.title(), glfw::WindowMode::Windowed)
            .ok_or(BackendError::CreationFailed)?;

        if let Some((icon, pixels)) = icon.and_then(|icon| Some((icon, icon.rgba_pixels()?))) {
            window.set_icon_from_pixels(vec![glfw::PixelImage {
                width: icon.width,
                height: icon.height,
                pixels,
            }]);
        }

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_size_polling(true);

        window.make_current();
        glfw.set_swap_interval(if params.vsync() {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        log::info!("GLFW window '{}' created ({}x{})", params.title(), size.width, size.height);

        self.close_on_escape = params.close_on_escape();
        self.native = Some(NativeWindow { glfw, window, events });
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.native.as_ref().map_or(true, |native| native.window.should_close())
    }

    fn set_window_size(&mut self, size: WindowSize) {
        if let Some(native) = self.native.as_mut() {
            native.window.set_size(size.width, size.height);
        }
    }

    fn now(&self) -> f64 {
        self.native.as_ref().map_or(0.0, |native| native.glfw.get_time())
    }

    fn present_frame(&mut self, events: &mut Vec<BackendEvent>) {
        let Some(native) = self.native.as_mut() else {
            return;
        };
        native.window.swap_buffers();
        native.glfw.poll_events();

        for (_, event) in glfw::flush_messages(&native.events) {
            let translated = match event {
                glfw::WindowEvent::Key(key, scancode, action, mods) => {
                    let key = key as i32;
                    let action = key_action(action);
                    if self.close_on_escape && is_close_shortcut(key, action) {
                        native.window.set_should_close(true);
                        continue;
                    }
                    BackendEvent::Key {
                        key,
                        scancode,
                        action,
                        mods: mods.bits(),
                    }
                }
                glfw::WindowEvent::MouseButton(button, action, mods) => {
                    let Some(action) = mouse_action(action) else {
                        continue;
                    };
                    BackendEvent::MouseButton {
                        button: button as i32,
                        action,
                        mods: mods.bits(),
                    }
                }
                glfw::WindowEvent::CursorPos(x, y) => BackendEvent::CursorPos { x, y },
                glfw::WindowEvent::Scroll(dx, dy) => BackendEvent::Scroll { dx, dy },
                glfw::WindowEvent::Size(width, height) => BackendEvent::Resized { width, height },
                _ => continue,
            };
            events.push(translated);
        }
    }

    fn destroy_window(&mut self) {
        if self.native.take().is_some() {
            log::info!("GLFW window destroyed");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyAction, MouseAction};

    #[test]
    fn test_mouse_actions_use_mouse_codes() {
        assert_eq!(mouse_action(glfw::Action::Press), Some(MOUSE_PRESS_ACTION));
        assert_eq!(mouse_action(glfw::Action::Release), Some(MOUSE_RELEASE_ACTION));
        assert_eq!(mouse_action(glfw::Action::Repeat), None);
        assert_eq!(
            mouse_action(glfw::Action::Release).and_then(MouseAction::from_raw),
            Some(MouseAction::Released)
        );
    }

    #[test]
    fn test_key_actions_use_key_codes() {
        assert_eq!(KeyAction::from_raw(key_action(glfw::Action::Press)), Some(KeyAction::Pressed));
        assert_eq!(KeyAction::from_raw(key_action(glfw::Action::Release)), Some(KeyAction::Release));
        assert_eq!(KeyAction::from_raw(key_action(glfw::Action::Repeat)), Some(KeyAction::Repeat));
    }
}
