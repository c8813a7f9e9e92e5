//! Headless window backend
//!
//! A backend without a display. By default every operation is a constant or a
//! no-op: time stays at 0 and the window never asks to close, so the loop runs
//! until something closes it. The optional time step, frame limit and scripted
//! events turn it into a deterministic driver for tests and offline tools.

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::assets::ImageData;
use crate::input::key::is_close_shortcut;
use crate::window::{BackendError, BackendEvent, Parameters, WindowBackend, WindowSize};

#[derive(Debug, Default)]
struct HeadlessState {
    time: f64,
    time_step: f64,
    frame_limit: Option<u64>,
    frames: u64,
    close_requested: bool,
    close_on_escape: bool,
    pending: VecDeque<BackendEvent>,
    requested_sizes: Vec<WindowSize>,
    title: Option<String>,
    icon_size: Option<(u32, u32)>,
    init_calls: u32,
    destroy_calls: u32,
}

/// Window backend that renders nothing
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessBackend {
    /// Create a backend at time 0 that never closes on its own
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `seconds` on every presented frame
    pub fn with_time_step(self, seconds: f64) -> Self {
        self.state.borrow_mut().time_step = seconds;
        self
    }

    /// Report the close condition once `frames` frames have been presented
    pub fn with_frame_limit(self, frames: u64) -> Self {
        self.state.borrow_mut().frame_limit = Some(frames);
        self
    }

    /// Handle for driving and inspecting the backend after it moved into a canvas
    pub fn control(&self) -> HeadlessControl {
        HeadlessControl {
            state: Rc::clone(&self.state),
        }
    }
}

impl WindowBackend for HeadlessBackend {
    fn init_window(&mut self, params: &Parameters, icon: Option<&ImageData>) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.init_calls += 1;
        state.close_on_escape = params.close_on_escape();
        state.title = Some(params.title().to_string());
        state.icon_size = icon.map(|icon| (icon.width, icon.height));
        log::info!(
            "Headless window '{}' created ({}x{})",
            params.title(),
            params.size().width,
            params.size().height
        );
        Ok(())
    }

    fn should_close(&self) -> bool {
        let state = self.state.borrow();
        state.close_requested || state.frame_limit.is_some_and(|limit| state.frames >= limit)
    }

    fn set_window_size(&mut self, size: WindowSize) {
        self.state.borrow_mut().requested_sizes.push(size);
    }

    fn now(&self) -> f64 {
        self.state.borrow().time
    }

    fn present_frame(&mut self, events: &mut Vec<BackendEvent>) {
        let state = &mut *self.state.borrow_mut();
        state.frames += 1;
        state.time += state.time_step;

        while let Some(event) = state.pending.pop_front() {
            if let BackendEvent::Key { key, action, .. } = event {
                if state.close_on_escape && is_close_shortcut(key, action) {
                    state.close_requested = true;
                    continue;
                }
            }
            events.push(event);
        }
    }

    fn destroy_window(&mut self) {
        let mut state = self.state.borrow_mut();
        state.destroy_calls += 1;
        state.pending.clear();
        log::info!("Headless window destroyed");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Shared handle to a [`HeadlessBackend`]
///
/// Keeps working after the backend has been moved into a canvas, and after the
/// canvas has been dropped.
#[derive(Debug, Clone)]
pub struct HeadlessControl {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessControl {
    /// Move the clock forward
    pub fn advance(&self, seconds: f64) {
        self.state.borrow_mut().time += seconds;
    }

    /// Set the clock to an absolute time
    pub fn set_time(&self, seconds: f64) {
        self.state.borrow_mut().time = seconds;
    }

    /// Queue a raw event for delivery at the next presented frame
    pub fn push_event(&self, event: BackendEvent) {
        self.state.borrow_mut().pending.push_back(event);
    }

    /// Make the close condition true
    pub fn request_close(&self) {
        self.state.borrow_mut().close_requested = true;
    }

    /// Current clock value
    pub fn time(&self) -> f64 {
        self.state.borrow().time
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    /// Whether a close was requested through this handle or the escape shortcut
    pub fn close_requested(&self) -> bool {
        self.state.borrow().close_requested
    }

    /// Sizes passed to `set_window_size`, oldest first
    pub fn requested_sizes(&self) -> Vec<WindowSize> {
        self.state.borrow().requested_sizes.clone()
    }

    /// Title the window was created with
    pub fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    /// Dimensions of the icon handed to `init_window`
    pub fn icon_size(&self) -> Option<(u32, u32)> {
        self.state.borrow().icon_size
    }

    /// Number of `init_window` calls
    pub fn init_calls(&self) -> u32 {
        self.state.borrow().init_calls
    }

    /// Number of `destroy_window` calls
    pub fn destroy_calls(&self) -> u32 {
        self.state.borrow().destroy_calls
    }
}
