//! Math utilities and types
//!
//! Only the small subset of vector types the windowing layer hands to listeners.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;
