//! Window icon sources

use std::path::PathBuf;

use super::image_loader::{ImageData, ImageLoader};

/// Default icon file, resolved against the working directory
pub const DEFAULT_ICON_PATH: &str = "favicon.png";

/// Supplies the optional window icon
///
/// Returning `None` leaves the platform default icon in place; it never fails
/// canvas construction. Any `Fn() -> Option<ImageData>` closure is a provider.
pub trait IconProvider {
    /// Produce an RGBA icon image, or `None`
    fn load_icon(&self) -> Option<ImageData>;
}

impl<F> IconProvider for F
where
    F: Fn() -> Option<ImageData>,
{
    fn load_icon(&self) -> Option<ImageData> {
        self()
    }
}

/// Loads the icon from an image file
#[derive(Debug, Clone)]
pub struct FileIconProvider {
    path: PathBuf,
}

impl FileIconProvider {
    /// Provider reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileIconProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_PATH)
    }
}

impl IconProvider for FileIconProvider {
    fn load_icon(&self) -> Option<ImageData> {
        ImageLoader::new().load(&self.path, Some(4))
    }
}

/// Provider that never supplies an icon
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcon;

impl IconProvider for NoIcon {
    fn load_icon(&self) -> Option<ImageData> {
        None
    }
}
