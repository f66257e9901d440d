//! Image decoder for various formats
//!
//! Supports PNG, JPEG, GIF, WebP via the image crate.

use image::{DynamicImage, GenericImageView, ImageFormat as ImgFormat};
use std::io::Cursor;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Self::Gif;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// Format named by a MIME type
    pub fn from_mime(mime: &str) -> Self {
        match mime.to_ascii_lowercase().as_str() {
            "image/png" | "image/apng" => Self::Png,
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Self::Jpeg,
            "image/gif" => Self::Gif,
            "image/webp" => Self::WebP,
            _ => Self::Unknown,
        }
    }

    /// Convert to image crate format
    fn to_image_format(self) -> Option<ImgFormat> {
        match self {
            Self::Png => Some(ImgFormat::Png),
            Self::Jpeg => Some(ImgFormat::Jpeg),
            Self::Gif => Some(ImgFormat::Gif),
            Self::WebP => Some(ImgFormat::WebP),
            Self::Unknown => None,
        }
    }
}

/// A decoded image ready for rendering
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// RGBA pixel data
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Original format
    pub format: ImageFormat,
}

impl DecodedImage {
    /// Memory size in bytes
    pub fn memory_size(&self) -> usize {
        self.pixels.len()
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Image decoder
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode image from bytes, sniffing the format
    pub fn decode(data: &[u8]) -> Result<DecodedImage, ImageError> {
        if data.is_empty() {
            return Err(ImageError::MissingData);
        }
        let format = ImageFormat::from_bytes(data);
        Self::decode_with_format(data, format)
    }

    /// Decode with known format
    pub fn decode_with_format(data: &[u8], format: ImageFormat) -> Result<DecodedImage, ImageError> {
        let img_format = format.to_image_format().ok_or(ImageError::UnsupportedFormat)?;

        let img = image::load(Cursor::new(data), img_format)
            .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

        Ok(Self::image_to_decoded(img, format))
    }

    /// Convert DynamicImage to DecodedImage
    fn image_to_decoded(img: DynamicImage, format: ImageFormat) -> DecodedImage {
        let (width, height) = img.dimensions();
        let rgba = img.into_rgba8();

        DecodedImage {
            pixels: rgba.into_raw(),
            width,
            height,
            format,
        }
    }
}

/// Image decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    #[error("No image data")]
    MissingData,
}
