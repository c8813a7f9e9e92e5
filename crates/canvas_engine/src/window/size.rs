//! Window dimensions

use serde::{Deserialize, Serialize};

/// Window client-area size in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSize {
    /// Width in screen coordinates
    pub width: i32,
    /// Height in screen coordinates
    pub height: i32,
}

impl WindowSize {
    /// Create a new window size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    ///
    /// The caller guarantees a non-zero height; every size accepted by the
    /// canvas is positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Whether both dimensions are strictly positive
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl From<(i32, i32)> for WindowSize {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aspect() {
        assert_relative_eq!(WindowSize::new(800, 600).aspect(), 800.0 / 600.0);
        assert_relative_eq!(WindowSize::new(1024, 1024).aspect(), 1.0);
    }

    #[test]
    fn test_validity() {
        assert!(WindowSize::new(1, 1).is_valid());
        assert!(!WindowSize::new(0, 480).is_valid());
        assert!(!WindowSize::new(640, -1).is_valid());
    }
}
