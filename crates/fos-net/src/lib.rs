//! fOS Networking
//!
//! Resource loading: requests, response metadata, content sniffing and
//! loaders that report completion asynchronously over a channel.

pub mod headers;
pub mod loader;
pub mod memory;
pub mod mime;
mod resource;

pub use headers::HeaderMap;
pub use loader::{
    completion_channel, CompletionReceiver, CompletionSender, CredentialsMode, Destination,
    LoadCompletion, Method, Request, RequestMode, ResourceLoader,
};
pub use memory::{MemoryLoader, MemoryResponse};
pub use resource::{ResourceHandle, ResourceId, ResourceKind};
pub use url::Url;

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
