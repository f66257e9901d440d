//! Image handling module
//!
//! Format detection, decoding, and the loader that turns a fetched
//! resource into a decoded image.

mod decoder;
mod loader;

pub use decoder::{DecodedImage, ImageDecoder, ImageError, ImageFormat};
pub use loader::{ImageLoadOutcome, ImageLoader};
