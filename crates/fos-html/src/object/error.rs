//! Why an object element ended up showing its fallback content

use fos_net::NetError;
use fos_render::ImageError;
use std::fmt;

/// Failures along the representation algorithm
///
/// All of them are recovered inside the element by showing fallback
/// content. Only `UrlParse` and `Fetch` are reported with an `error` event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepresentationError {
    #[error("cannot parse data URL {input:?}: {source}")]
    UrlParse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("fetch failed: {0}")]
    Fetch(#[from] NetError),

    #[error("unsupported resource type {0:?}")]
    UnsupportedType(String),

    #[error("image cannot be rendered: {0}")]
    ImageDecode(#[from] ImageError),
}

/// Reason recorded with each transition into fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// `data` attribute absent or empty
    NoData,
    /// The user asked for fallback content
    UserPreference,
    /// The `type` attribute named an unsupported type and fetching was skipped
    UnsupportedTypeHint(String),
    Failed(RepresentationError),
}

impl FallbackReason {
    /// Whether entering fallback for this reason fires `error` at the element
    pub fn fires_error_event(&self) -> bool {
        matches!(
            self,
            FallbackReason::Failed(RepresentationError::UrlParse { .. } | RepresentationError::Fetch(_))
        )
    }
}

impl From<RepresentationError> for FallbackReason {
    fn from(error: RepresentationError) -> Self {
        FallbackReason::Failed(error)
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoData => write!(f, "no data attribute"),
            FallbackReason::UserPreference => write!(f, "user prefers fallback content"),
            FallbackReason::UnsupportedTypeHint(hint) => write!(f, "type hint {hint:?} not supported"),
            FallbackReason::Failed(error) => write!(f, "{error}"),
        }
    }
}
