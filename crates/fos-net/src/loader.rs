//! Resource Loader
//!
//! Request model and the loader seam. A loader starts a fetch and returns
//! at once; the outcome arrives later as a [`LoadCompletion`] on the
//! loader's completion channel.

use crate::{HeaderMap, NetError, ResourceHandle, ResourceId, ResourceKind};
use url::Url;

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
        }
    }
}

/// Request destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Destination {
    #[default]
    Document,
    Image,
    Object,
}

/// Credentials mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialsMode {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// Request mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMode {
    #[default]
    NoCors,
    Cors,
    Navigate,
}

/// Request configuration
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub destination: Destination,
    pub credentials: CredentialsMode,
    pub mode: RequestMode,
    /// Opaque id of whoever issued the request, echoed on completion
    pub initiator: Option<u32>,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: HeaderMap::new(),
            destination: Destination::default(),
            credentials: CredentialsMode::default(),
            mode: RequestMode::default(),
            initiator: None,
        }
    }

    /// Request for an `<object>` element's data
    pub fn for_object(url: Url) -> Self {
        Self {
            destination: Destination::Object,
            credentials: CredentialsMode::Include,
            mode: RequestMode::Navigate,
            ..Self::get(url)
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_initiator(mut self, initiator: u32) -> Self {
        self.initiator = Some(initiator);
        self
    }
}

/// Outcome of one fetch
#[derive(Debug, Clone)]
pub struct LoadCompletion {
    pub resource: ResourceId,
    pub initiator: Option<u32>,
    pub outcome: Result<ResourceHandle, NetError>,
}

impl LoadCompletion {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub type CompletionSender = smol::channel::Sender<LoadCompletion>;
pub type CompletionReceiver = smol::channel::Receiver<LoadCompletion>;

/// Channel loaders report completions on
pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    smol::channel::unbounded()
}

/// Starts fetches
///
/// Implementations must deliver exactly one [`LoadCompletion`] per returned
/// id, and never from inside `load_resource` itself.
pub trait ResourceLoader {
    fn load_resource(&mut self, kind: ResourceKind, request: Request) -> ResourceId;
}
