//! Window controller
//!
//! [`Canvas`] owns a window backend and drives the per-frame loop. Each
//! iteration, in this order:
//!
//! 1. stop if the backend reports the close condition
//! 2. update the FPS measurement
//! 3. run deferred tasks that are due
//! 4. call the frame callback
//! 5. present the frame and dispatch the events collected while presenting

use std::cell::{Ref, RefCell, RefMut};
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;

use crate::assets::{FileIconProvider, IconProvider};
use crate::config::{Config, ConfigError};
use crate::foundation::time::{Clock, FpsCounter};
use crate::input::{InputDispatcher, KeyListenerRef, KeyListeners, MouseListenerRef, MouseListeners};
use crate::scheduler::TaskScheduler;
use crate::window::{BackendError, BackendEvent, Parameters, WindowBackend, WindowSize};


/// Canvas errors
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The backend failed to create the window
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Width or height was not strictly positive
    #[error("Invalid window size {width}x{height}")]
    InvalidSize {
        /// Rejected width
        width: i32,
        /// Rejected height
        height: i32,
    },

    /// Parameters could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Observable canvas lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    /// Window is open; the loop may run
    Running,
    /// The close condition was observed; the loop will not run again
    Closed,
}

type SharedBackend = Rc<RefCell<Box<dyn WindowBackend>>>;

/// Window plus animation loop, input fan-out and deferred tasks
///
/// Single-threaded: the canvas, its listeners and its tasks live on the thread
/// that created it.
pub struct Canvas {
    backend: SharedBackend,
    params: Parameters,
    state: CanvasState,
    input: InputDispatcher,
    scheduler: TaskScheduler,
    fps: i32,
    events: Vec<BackendEvent>,
}

#[cfg(feature = "glfw")]
impl Canvas {
    /// Open a native window with default parameters
    pub fn new() -> Result<Self, CanvasError> {
        Self::builder().build()
    }

    /// Open a native window with default parameters and the given title
    pub fn with_title(title: impl Into<String>) -> Result<Self, CanvasError> {
        Self::builder().parameters(Parameters::new().with_title(title)).build()
    }

    /// Open a native window configured from a string-keyed option map
    pub fn with_values<I, K>(values: I) -> Result<Self, CanvasError>
    where
        I: IntoIterator<Item = (K, crate::window::ParameterValue)>,
        K: Into<String>,
    {
        Self::builder().parameters(Parameters::from_values(values)).build()
    }

    /// Open a native window configured from a `.toml` or `.ron` file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, CanvasError> {
        Self::builder().load_parameters(path)?.build()
    }
}

impl Canvas {
    /// Start configuring a canvas
    pub fn builder() -> CanvasBuilder {
        CanvasBuilder::new()
    }

    /// Run the loop until the close condition, calling `f` once per frame
    pub fn animate(&mut self, mut f: impl FnMut()) {
        self.run(|_, _| {
            f();
            Ok::<(), Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Like [`Canvas::animate`], passing seconds of backend time since init
    pub fn animate_with_time(&mut self, mut f: impl FnMut(f32)) {
        self.run(|elapsed, _| {
            f(elapsed);
            Ok::<(), Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Like [`Canvas::animate`], passing elapsed backend time and the frame delta
    pub fn animate_with_delta(&mut self, mut f: impl FnMut(f32, f32)) {
        self.run(|elapsed, delta| {
            f(elapsed, delta);
            Ok::<(), Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Fallible variant of [`Canvas::animate_with_delta`]
    ///
    /// The first error stops the loop and is returned. The canvas stays
    /// [`CanvasState::Running`], so the loop can be resumed.
    pub fn try_animate<E>(&mut self, f: impl FnMut(f32, f32) -> Result<(), E>) -> Result<(), E> {
        self.run(f)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn run<E>(&mut self, mut frame: impl FnMut(f32, f32) -> Result<(), E>) -> Result<(), E> {
        if self.state == CanvasState::Closed {
            return Ok(());
        }

        let mut clock = Clock::new();
        let mut fps = FpsCounter::new(self.now());

        loop {
            if self.backend.borrow().should_close() {
                self.state = CanvasState::Closed;
                log::info!("Canvas closed");
                return Ok(());
            }

            let now = self.now();
            if let Some(frames) = fps.tick(now) {
                self.fps = i32::try_from(frames).unwrap_or(i32::MAX);
            }

            self.scheduler.drain_due();

            frame(now as f32, clock.get_delta())?;

            self.present();
        }
    }

    fn present(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        self.backend.borrow_mut().present_frame(&mut events);
        for event in events.drain(..) {
            self.input.dispatch(event);
        }
        self.events = events;
    }

    fn now(&self) -> f64 {
        self.backend.borrow().now()
    }

    /// Current window size
    pub fn get_size(&self) -> WindowSize {
        self.input.size()
    }

    /// Resize the window
    ///
    /// Both dimensions must be strictly positive. The resize callback is not
    /// called; it only reacts to sizes reported by the backend.
    pub fn set_size(&mut self, size: WindowSize) -> Result<(), CanvasError> {
        if !size.is_valid() {
            return Err(CanvasError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        self.input.set_size(size);
        self.backend.borrow_mut().set_window_size(size);
        Ok(())
    }

    /// Width divided by height of the current size
    pub fn get_aspect(&self) -> f32 {
        self.input.size().aspect()
    }

    /// Frames counted in the last full second, -1 before the first one
    pub fn get_fps(&self) -> i32 {
        self.fps
    }

    /// Set the callback for backend-reported resizes, replacing any previous one
    pub fn on_window_resize(&mut self, f: impl FnMut(WindowSize) + 'static) {
        self.input.set_resize_listener(f);
    }

    /// Register a keyboard listener; registering it twice has no effect
    pub fn add_key_listener(&self, listener: KeyListenerRef) {
        self.input.key_listeners().add(listener);
    }

    /// Unregister a keyboard listener, returning whether it was registered
    pub fn remove_key_listener<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> bool {
        self.input.key_listeners().remove(listener)
    }

    /// Register a pointer listener; registering it twice has no effect
    pub fn add_mouse_listener(&self, listener: MouseListenerRef) {
        self.input.mouse_listeners().add(listener);
    }

    /// Unregister a pointer listener, returning whether it was registered
    pub fn remove_mouse_listener<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> bool {
        self.input.mouse_listeners().remove(listener)
    }

    /// Handle to the keyboard listener registry
    pub fn key_listeners(&self) -> KeyListeners {
        self.input.key_listeners().clone()
    }

    /// Handle to the pointer listener registry
    pub fn mouse_listeners(&self) -> MouseListeners {
        self.input.mouse_listeners().clone()
    }

    /// Run `f` on the loop thread once `delay_seconds` of backend time passed
    pub fn invoke_later(&self, f: impl FnOnce() + 'static, delay_seconds: f64) {
        self.scheduler.invoke_later(f, delay_seconds);
    }

    /// Handle to this canvas' task scheduler
    pub fn scheduler(&self) -> TaskScheduler {
        self.scheduler.clone()
    }

    /// Lifecycle state
    pub fn state(&self) -> CanvasState {
        self.state
    }

    /// Parameters the window was created with
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Borrow the backend, e.g. to downcast it through `as_any`
    pub fn backend(&self) -> Ref<'_, dyn WindowBackend + 'static> {
        Ref::map(self.backend.borrow(), |backend| &**backend)
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&self) -> RefMut<'_, dyn WindowBackend + 'static> {
        RefMut::map(self.backend.borrow_mut(), |backend| &mut **backend)
    }

    /// Dispatch an event as if the backend had reported it
    pub fn inject(&mut self, event: BackendEvent) {
        self.input.dispatch(event);
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        self.scheduler.clear();
        self.backend.borrow_mut().destroy_window();
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("input", &self.input)
            .field("scheduler", &self.scheduler)
            .field("fps", &self.fps)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Canvas`]
///
/// Defaults: default [`Parameters`], the GLFW backend when the `glfw` feature
/// is enabled (headless otherwise), and the icon read from `favicon.png`.
pub struct CanvasBuilder {
    params: Parameters,
    backend: Option<Box<dyn WindowBackend>>,
    icon_provider: Box<dyn IconProvider>,
}

impl CanvasBuilder {
    /// Create a builder with defaults
    pub fn new() -> Self {
        Self {
            params: Parameters::default(),
            backend: None,
            icon_provider: Box::new(FileIconProvider::default()),
        }
    }

    /// Use these window parameters
    pub fn parameters(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Read window parameters from a `.toml` or `.ron` file
    pub fn load_parameters<P: AsRef<Path>>(mut self, path: P) -> Result<Self, CanvasError> {
        self.params = Parameters::load_from_file(path)?;
        Ok(self)
    }

    /// Use this window backend
    pub fn backend(self, backend: impl WindowBackend + 'static) -> Self {
        self.boxed_backend(Box::new(backend))
    }

    /// Use an already boxed window backend
    pub fn boxed_backend(mut self, backend: Box<dyn WindowBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use this window icon source
    pub fn icon_provider(mut self, provider: impl IconProvider + 'static) -> Self {
        self.icon_provider = Box::new(provider);
        self
    }

    /// Validate the parameters, create the window and return the running canvas
    pub fn build(self) -> Result<Canvas, CanvasError> {
        let size = self.params.size();
        if !size.is_valid() {
            return Err(CanvasError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let mut backend = self.backend.unwrap_or_else(default_backend);
        let icon = self.icon_provider.load_icon();
        backend.init_window(&self.params, icon.as_ref())?;

        let backend: SharedBackend = Rc::new(RefCell::new(backend));
        let clock_source = Rc::downgrade(&backend);
        let scheduler = TaskScheduler::new(move || {
            clock_source
                .upgrade()
                .map_or(0.0, |backend| backend.borrow().now())
        });

        log::info!(
            "Canvas '{}' running at {}x{}",
            self.params.title(),
            size.width,
            size.height
        );

        Ok(Canvas {
            backend,
            input: InputDispatcher::new(size),
            params: self.params,
            state: CanvasState::Running,
            scheduler,
            fps: -1,
            events: Vec::new(),
        })
    }
}

impl Default for CanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CanvasBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasBuilder")
            .field("params", &self.params)
            .field("has_backend", &self.backend.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "glfw")]
fn default_backend() -> Box<dyn WindowBackend> {
    Box::new(crate::backend::GlfwBackend::new())
}

#[cfg(not(feature = "glfw"))]
fn default_backend() -> Box<dyn WindowBackend> {
    log::warn!("Built without the `glfw` feature, using the headless backend");
    Box::new(crate::backend::HeadlessBackend::new())
}
