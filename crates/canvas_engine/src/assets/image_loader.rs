//! Image loading utilities
//!
//! Decodes PNG files into raw pixel buffers, used for the window icon.

use std::path::Path;

use image::DynamicImage;

use crate::assets::AssetError;

/// Decoded image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw pixel data, row-major, `channels` bytes per pixel
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an RGBA image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        Self::from_file_with_channels(path, 4)
    }

    /// Load an image from a file path, converted to the given channel count
    ///
    /// 1 is grey, 2 grey + alpha, 3 RGB; any other value yields RGBA.
    pub fn from_file_with_channels<P: AsRef<Path>>(path: P, channels: u8) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {path_ref:?}");

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {}: {e}", path_ref.display())))?;
        let image = Self::convert(&img, channels);

        log::info!("Loaded image {}x{} from {path_ref:?}", image.width, image.height);
        Ok(image)
    }

    /// Create a solid color RGBA image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let data = color.repeat(pixel_count);

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Pixels packed as native-endian `u32` values, RGBA only
    ///
    /// Returns `None` for images with fewer than four channels.
    pub fn rgba_pixels(&self) -> Option<Vec<u32>> {
        if self.channels != 4 {
            return None;
        }
        Some(
            self.data
                .chunks_exact(4)
                .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
                .collect(),
        )
    }

    fn convert(img: &DynamicImage, channels: u8) -> Self {
        let (width, height) = (img.width(), img.height());
        let (data, channels) = match channels {
            1 => (img.to_luma8().into_raw(), 1),
            2 => (img.to_luma_alpha8().into_raw(), 2),
            3 => (img.to_rgb8().into_raw(), 3),
            _ => (img.to_rgba8().into_raw(), 4),
        };
        Self {
            data,
            width,
            height,
            channels,
        }
    }
}

/// Loader returning `None` instead of an error
///
/// Failures are logged as warnings; callers treat a missing image as an
/// optional feature being unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageLoader;

impl ImageLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }

    /// Load `path`, converted to `desired_channels` (RGBA when `None`)
    pub fn load<P: AsRef<Path>>(&self, path: P, desired_channels: Option<u8>) -> Option<ImageData> {
        match ImageData::from_file_with_channels(&path, desired_channels.unwrap_or(4)) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("canvas_{name}_{}.png", std::process::id()));
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        img.save(&path).expect("write png");
        path
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_pixels_packing() {
        let img = ImageData::solid_color(2, 1, [1, 2, 3, 4]);
        let pixels = img.rgba_pixels().expect("rgba image");
        assert_eq!(pixels, vec![u32::from_ne_bytes([1, 2, 3, 4]); 2]);
    }

    #[test]
    fn test_load_with_channel_conversion() {
        let path = write_png("channels", 3, 2);
        let loader = ImageLoader::new();

        let rgba = loader.load(&path, None).expect("rgba");
        let rgb = loader.load(&path, Some(3)).expect("rgb");
        let grey = loader.load(&path, Some(1)).expect("grey");
        let _ = std::fs::remove_file(&path);

        assert_eq!((rgba.width, rgba.height, rgba.channels), (3, 2, 4));
        assert_eq!(rgba.data.len(), 3 * 2 * 4);
        assert_eq!(&rgb.data[0..3], &[10, 20, 30]);
        assert_eq!(rgb.channels, 3);
        assert_eq!(grey.data.len(), 3 * 2);
        assert!(rgb.rgba_pixels().is_none());
    }

    #[test]
    fn test_missing_file_yields_none() {
        let loader = ImageLoader::new();
        assert!(loader.load("definitely/not/here.png", Some(4)).is_none());
        assert!(matches!(
            ImageData::from_file("definitely/not/here.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_solid_color_non_square() {
        let img = ImageData::solid_color(70_000, 1, [9, 8, 7, 6]);
        assert_eq!(img.data.len(), 70_000 * 4);
        assert_eq!(&img.data[img.data.len() - 4..], &[9, 8, 7, 6]);
        assert_eq!(ImageData::solid_color(0, 5, [0; 4]).data.len(), 0);
    }

    #[test]
    fn test_corrupt_file_fails_to_load() {
        let path = std::env::temp_dir().join(format!("canvas_corrupt_{}.png", std::process::id()));
        std::fs::write(&path, b"not a png").expect("write file");

        let result = ImageData::from_file(&path);
        let fallback = ImageLoader::new().load(&path, None);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(AssetError::LoadFailed(_))));
        assert!(fallback.is_none());
    }
}
