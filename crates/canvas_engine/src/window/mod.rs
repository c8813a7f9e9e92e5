//! Window management subsystem
//!
//! Value types describing the window and the contract every windowing backend
//! implements.
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Canvas (loop + dispatch)    │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← contract (backend.rs)
//!      │ trait           │
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ backend::GlfwBackend  │ ← native window + GL context
//!   │ backend::Headless..   │ ← no display, scripted time/events
//!   └───────────────────────┘
//! ```

pub mod size;
pub mod parameters;
pub mod backend;

pub use size::WindowSize;
pub use parameters::{ParameterValue, Parameters};
pub use backend::{BackendError, BackendEvent, WindowBackend};
