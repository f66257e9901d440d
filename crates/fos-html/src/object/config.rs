//! Object element preferences

use serde::Deserialize;

/// User agent preferences that change how `<object>` picks its representation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    /// Image resources may be represented; when off they count as unsupported
    pub images_enabled: bool,
    /// Always show fallback content instead of fetching
    pub prefer_fallback: bool,
    /// Skip the fetch when the `type` attribute names a type we cannot represent
    pub skip_unsupported_type_hint: bool,
    /// Ignore completions of fetches that a later run superseded
    pub discard_stale_fetches: bool,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            images_enabled: true,
            prefer_fallback: false,
            skip_unsupported_type_hint: false,
            discard_stale_fetches: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObjectConfig::default();
        assert!(config.images_enabled);
        assert!(!config.prefer_fallback);
        assert!(!config.skip_unsupported_type_hint);
        assert!(!config.discard_stale_fetches);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ObjectConfig =
            serde_json::from_str(r#"{ "discard_stale_fetches": true }"#).unwrap();
        assert!(config.discard_stale_fetches);
        assert!(config.images_enabled);
    }
}
