//! fOS Render - Images
//!
//! Decoding of fetched image resources into RGBA bitmaps.

pub mod image;

pub use crate::image::{DecodedImage, ImageDecoder, ImageError, ImageFormat, ImageLoadOutcome, ImageLoader};
