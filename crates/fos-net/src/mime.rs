//! MIME type detection
//!
//! Computes a resource's type from its Content-Type metadata, falling back
//! to inspecting the leading bytes of the body.

use crate::HeaderMap;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";

/// Leading-byte signatures, checked in order
const SIGNATURES: &[(&[u8], &str)] = &[
    (&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], "image/png"),
    (&[0xFF, 0xD8, 0xFF], "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (&[0x00, 0x00, 0x01, 0x00], "image/x-icon"),
    (b"%PDF-", "application/pdf"),
];

/// Essence of a Content-Type value: `type/subtype`, lowercased, parameters dropped
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Sniff a type from body bytes
pub fn sniff(data: &[u8]) -> &'static str {
    if data.is_empty() {
        return OCTET_STREAM;
    }

    for &(magic, mime) in SIGNATURES {
        if data.starts_with(magic) {
            return mime;
        }
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return "image/webp";
    }

    let head = trimmed_head(data);
    if starts_with_ignore_case(head, b"<svg") {
        return "image/svg+xml";
    }
    if starts_with_ignore_case(head, b"<!doctype html") || starts_with_ignore_case(head, b"<html") {
        return "text/html";
    }

    if looks_textual(data) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

/// The computed type of a resource
///
/// The Content-Type essence when the header is present, otherwise the
/// sniffed type of the body (`application/octet-stream` with no body).
pub fn computed_type(headers: &HeaderMap, body: Option<&[u8]>) -> String {
    match headers.get("Content-Type") {
        Some(value) if !essence(value).is_empty() => essence(value),
        _ => sniff(body.unwrap_or_default()).to_string(),
    }
}

fn trimmed_head(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Binary data bytes: control characters other than TAB, LF, FF, CR and ESC
fn looks_textual(data: &[u8]) -> bool {
    !data.iter().take(512).any(|&b| {
        matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
    })
}
