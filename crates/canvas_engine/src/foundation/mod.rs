//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types for pointer positions and scroll deltas
//! - Time management (frame clock, FPS measurement)
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
