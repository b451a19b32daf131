//! Image loading and normalization to 8-bit RGB
//!
//! The pipeline works on [`image::RgbImage`]. Decoding is delegated to the
//! `image` crate, which detects the format from the file contents, so a
//! mislabelled extension still decodes.
//!
//! ## Design
//!
//! Alpha and palette data are dropped during the conversion to RGB; there is
//! no compositing against a background. Animated formats yield their first
//! frame only.
//!
//! Extension checks ([`is_supported_extension`]) belong to the upload layer
//! and are not consulted by [`load_image`].

use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};
use log::debug;

use crate::constants::UPLOAD_EXTENSIONS;
use crate::error::{AnalysisError, Result};

/// Image formats accepted by the upload layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        Self::from_extension_str(path.extension()?.to_str()?)
    }

    /// Match a bare extension, ignoring case
    pub fn from_extension_str(ext: &str) -> Option<ImageFormat> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }
}

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns [`AnalysisError::ImageLoadError`] if:
/// - File cannot be opened
/// - Contents are not a recognised image format
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use top_colors::image_loader::load_image;
/// use std::path::Path;
///
/// let img = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", img.width(), img.height());
/// # Ok::<(), top_colors::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = decode(path)?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(to_rgb(img))
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let reader = reader.with_guessed_format().map_err(|e| {
        AnalysisError::image_load(format!("Failed to read image file: {}", path.display()), e)
    })?;

    reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })
}

/// Flatten any decoded color model to 3-channel RGB
pub fn to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

/// Get list of file extensions accepted for upload
pub fn supported_extensions() -> &'static [&'static str] {
    &UPLOAD_EXTENSIONS
}

/// Check if a file extension is accepted for upload
pub fn is_supported_extension(ext: &str) -> bool {
    ImageFormat::from_extension_str(ext).is_some()
}

/// Check if a file name carries an accepted extension
pub fn is_supported_file_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => is_supported_extension(ext),
        None => false,
    }
}
