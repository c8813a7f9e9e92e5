//! Window backend implementations
//!
//! - [`HeadlessBackend`]: no display, deterministic time and scripted events
//! - `GlfwBackend`: native window and OpenGL context (feature `glfw`)

pub mod headless;

#[cfg(feature = "glfw")]
pub mod glfw;

pub use headless::{HeadlessBackend, HeadlessControl};

#[cfg(feature = "glfw")]
pub use self::glfw::GlfwBackend;
