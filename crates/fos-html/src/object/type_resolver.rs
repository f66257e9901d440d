//! Resource type detection
//!
//! Decides the effective type of a fetched resource from its Content-Type
//! metadata, the element's `type` attribute and the resource's computed type.

use fos_net::mime::OCTET_STREAM;
use fos_net::HeaderMap;

/// Effective type when nothing usable is known
pub const UNKNOWN_TYPE: &str = "unknown";

/// Resolve the effective resource type. Never fails.
pub fn resolve_resource_type(
    headers: &HeaderMap,
    type_attribute: Option<&str>,
    sniffed_type: &str,
) -> String {
    let type_attribute = type_attribute.filter(|t| !t.is_empty());

    if let Some(content_type) = headers.get("Content-Type") {
        let binary = content_type == OCTET_STREAM;
        if !binary {
            return content_type.to_string();
        }

        // Binary metadata: only an image type hint can override it.
        return match type_attribute {
            Some(hint) if hint != OCTET_STREAM && hint.starts_with("image/") => hint.to_string(),
            _ => UNKNOWN_TYPE.to_string(),
        };
    }

    let tentative = type_attribute.unwrap_or(sniffed_type);
    if tentative != OCTET_STREAM {
        tentative.to_string()
    } else {
        UNKNOWN_TYPE.to_string()
    }
}
