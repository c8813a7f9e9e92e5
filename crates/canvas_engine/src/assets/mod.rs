//! Asset loading
//!
//! Image decoding and the icon providers consulted while a canvas window is
//! created.

pub mod icon;
pub mod image_loader;

use thiserror::Error;

pub use icon::{FileIconProvider, IconProvider, NoIcon, DEFAULT_ICON_PATH};
pub use image_loader::{ImageData, ImageLoader};

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}
