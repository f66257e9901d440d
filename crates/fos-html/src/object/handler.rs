//! Representation handler
//!
//! Picks what a successfully fetched resource is shown as, given its
//! effective type.

use super::error::RepresentationError;
use fos_render::ImageError;

/// Outcome of the handler step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerDecision {
    /// Hand the resource to the image pipeline
    Image,
    Fallback(RepresentationError),
}

/// Types an `<object>` can represent. Without nested browsing contexts
/// that is images only, and only while images are enabled.
pub fn is_supported_type(resource_type: &str, images_enabled: bool) -> bool {
    images_enabled && resource_type.starts_with("image/")
}

/// Choose the handler for `resource_type`
///
/// Nested browsing contexts and plugins are not supported, so any
/// non-image type falls back.
pub fn select_handler(resource_type: &str, has_encoded_data: bool, images_enabled: bool) -> HandlerDecision {
    if !is_supported_type(resource_type, images_enabled) {
        return HandlerDecision::Fallback(RepresentationError::UnsupportedType(resource_type.to_string()));
    }

    if !has_encoded_data {
        return HandlerDecision::Fallback(RepresentationError::ImageDecode(ImageError::MissingData));
    }

    HandlerDecision::Image
}
