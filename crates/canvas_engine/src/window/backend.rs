//! Backend-agnostic window management trait
//!
//! This module defines the contract every windowing backend implements. The
//! canvas only ever talks to a backend through this trait, which is what lets
//! the animation loop and input dispatch run without a display.

use std::any::Any;

use thiserror::Error;

use super::parameters::Parameters;
use super::size::WindowSize;
use crate::assets::ImageData;

/// Window backend errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// The windowing library could not be initialized
    #[error("Window backend initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its context could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Raw event reported by a backend while presenting a frame
///
/// Actions, buttons, keys and modifier bits are raw integers; the input
/// dispatcher translates them and drops values it does not recognize.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The window client area changed size
    Resized {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
    /// An error reported through the event stream
    ///
    /// Logged by the dispatcher and never fatal. The GLFW backend does not
    /// produce it: native library errors go straight to the log. Scripted or
    /// host-driven backends use it to surface their own failures.
    Error {
        /// Library error code
        code: i32,
        /// Human-readable description
        description: String,
    },
    /// Scroll wheel or touchpad scroll
    Scroll {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
    /// Mouse button pressed or released
    MouseButton {
        /// Button index
        button: i32,
        /// Raw action (see `input::mouse`)
        action: i32,
        /// Modifier bits
        mods: i32,
    },
    /// Cursor moved to a new position
    CursorPos {
        /// Cursor x in screen coordinates
        x: f64,
        /// Cursor y in screen coordinates
        y: f64,
    },
    /// Keyboard key pressed, released or repeated
    Key {
        /// Key code
        key: i32,
        /// Platform scancode
        scancode: i32,
        /// Raw action (see `input::key`)
        action: i32,
        /// Modifier bits
        mods: i32,
    },
}

/// Trait for window backend implementations
///
/// # Lifecycle
/// `init_window` is called once while the canvas is constructed and
/// `destroy_window` once when it is dropped. Every other method is only called
/// between the two, from the loop thread.
///
/// # Thread Safety
/// No `Send` bound: window operations happen on the thread that created the
/// window.
pub trait WindowBackend {
    /// Create and configure the window and its rendering context
    ///
    /// `icon` is an already decoded RGBA image, or `None` when no icon is
    /// available. Failure is fatal for the canvas being constructed.
    fn init_window(&mut self, params: &Parameters, icon: Option<&ImageData>) -> Result<(), BackendError>;

    /// Check if the user or the platform asked the window to close
    fn should_close(&self) -> bool;

    /// Request a resize of the window client area
    fn set_window_size(&mut self, size: WindowSize);

    /// Monotonic seconds since the backend was initialized
    fn now(&self) -> f64;

    /// Finish a frame: swap buffers and process pending platform events
    ///
    /// Events produced while processing are appended to `events`; the canvas
    /// dispatches them to listeners right after this call returns.
    fn present_frame(&mut self, events: &mut Vec<BackendEvent>);

    /// Release every backend resource
    fn destroy_window(&mut self);

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
