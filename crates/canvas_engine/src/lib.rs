//! # Canvas Engine
//!
//! The windowing and event-loop core of the rendering engine: it owns the native
//! window, runs the per-frame animation loop, fans input events out to listeners
//! and executes deferred tasks on the loop thread.
//!
//! ## Features
//!
//! - **Pluggable Backends**: native GLFW window or a headless substitute
//! - **Animation Loop**: FPS measurement, frame timing, cooperative shutdown
//! - **Deferred Tasks**: time-ordered `invoke_later` scheduling
//! - **Input Fan-Out**: keyboard and pointer listeners with snapshot dispatch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use canvas_engine::prelude::*;
//!
//! fn main() -> Result<(), CanvasError> {
//!     let mut canvas = Canvas::builder()
//!         .parameters(Parameters::new().with_title("demo").with_dimensions(800, 600))
//!         .backend(HeadlessBackend::new().with_frame_limit(120))
//!         .build()?;
//!
//!     canvas.invoke_later(|| log::info!("one second in"), 1.0);
//!     canvas.animate_with_delta(|elapsed, delta| {
//!         // update and render the scene here
//!         let _ = (elapsed, delta);
//!     });
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod window;
pub mod backend;
pub mod scheduler;
pub mod input;

mod canvas;

pub use canvas::{Canvas, CanvasBuilder, CanvasError, CanvasState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Canvas, CanvasBuilder, CanvasError, CanvasState,
        assets::{IconProvider, ImageData, ImageLoader, NoIcon},
        backend::{HeadlessBackend, HeadlessControl},
        config::{Config, ConfigError},
        foundation::{math::Vec2, time::Clock},
        input::{
            KeyAction, KeyAdapter, KeyEvent, KeyListener, KeyListenerRef, KeyModifiers,
            MouseListener, MouseListenerRef,
        },
        scheduler::TaskScheduler,
        window::{BackendEvent, ParameterValue, Parameters, WindowBackend, WindowSize},
    };

    #[cfg(feature = "glfw")]
    pub use crate::backend::GlfwBackend;
}
