//! # Canvas Parameters
//!
//! Construction-time configuration snapshot for a canvas window. Parameters are
//! read once when the window is created; changing them afterwards has no effect
//! on a live canvas.
//!
//! Three ways to build them:
//!
//! - chainable `with_*` setters on [`Parameters::new`]
//! - a string-keyed option map through [`Parameters::from_values`]
//! - a `.toml` / `.ron` file through the [`Config`] trait

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::size::WindowSize;
use crate::config::Config;

/// Value stored in a string-keyed parameter map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterValue {
    /// Boolean flag, e.g. `"vsync"`
    Bool(bool),
    /// Integer value, e.g. `"antialiasing"`
    Int(i32),
    /// Window size, e.g. `"size"`
    Size(WindowSize),
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<WindowSize> for ParameterValue {
    fn from(value: WindowSize) -> Self {
        Self::Size(value)
    }
}

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    title: String,
    antialiasing: u32,
    vsync: bool,
    close_on_escape: bool,
    size: WindowSize,
    #[serde(skip)]
    unused_keys: Vec<String>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            title: "canvas".to_string(),
            size: WindowSize::default(),
            antialiasing: 0,
            vsync: true,
            close_on_escape: true,
            unused_keys: Vec::new(),
        }
    }
}

impl Parameters {
    /// Create parameters with defaults (640x480, no MSAA, vsync on)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from a string-keyed option map
    ///
    /// Recognized keys are `"antialiasing"` (int), `"vsync"` (bool) and
    /// `"size"` (window size). Anything else, or a recognized key with the
    /// wrong value type, is logged and recorded in [`Parameters::unused_keys`].
    pub fn from_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: Into<String>,
    {
        let mut params = Self::default();
        params.apply_values(values);
        params
    }

    /// Apply a string-keyed option map on top of the current values
    pub fn apply_values<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: Into<String>,
    {
        for (key, value) in values {
            let key = key.into();
            match (key.as_str(), value) {
                ("antialiasing", ParameterValue::Int(samples)) => {
                    self.antialiasing = u32::try_from(samples).unwrap_or_else(|_| {
                        log::warn!("Negative antialiasing sample count {samples}, disabling MSAA");
                        0
                    });
                }
                ("vsync", ParameterValue::Bool(flag)) => self.vsync = flag,
                ("size", ParameterValue::Size(size)) => self.size = size,
                (_, value) => {
                    log::warn!("Unused canvas parameter '{key}' = {value:?}");
                    self.unused_keys.push(key);
                }
            }
        }
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size
    pub fn with_size(mut self, size: WindowSize) -> Self {
        self.size = size;
        self
    }

    /// Set the initial window size from width and height
    pub fn with_dimensions(self, width: i32, height: i32) -> Self {
        self.with_size(WindowSize::new(width, height))
    }

    /// Set the MSAA sample count (0 disables multisampling)
    pub fn with_antialiasing(mut self, samples: u32) -> Self {
        self.antialiasing = samples;
        self
    }

    /// Enable or disable vertical sync
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Let the backend close the window when Escape is pressed
    pub fn with_close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Initial window size
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// MSAA sample count, 0 when disabled
    pub fn antialiasing(&self) -> u32 {
        self.antialiasing
    }

    /// Whether vertical sync is requested
    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Whether Escape closes the window
    pub fn close_on_escape(&self) -> bool {
        self.close_on_escape
    }

    /// Keys from [`Parameters::from_values`] that were not applied
    pub fn unused_keys(&self) -> &[String] {
        &self.unused_keys
    }
}

impl From<HashMap<String, ParameterValue>> for Parameters {
    fn from(values: HashMap<String, ParameterValue>) -> Self {
        Self::from_values(values)
    }
}

impl Config for Parameters {}
