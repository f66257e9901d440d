//! Fetched resources

use crate::HeaderMap;
use url::Url;

/// Identifier of one fetch, unique per loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub u64);

/// What the resource is being loaded as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceKind {
    /// Type unknown until the response arrives
    #[default]
    Generic,
    Image,
}

/// A successfully fetched resource
///
/// Owns the response metadata and encoded body. Consumers that take the
/// body over (an image pipeline, say) do so with [`ResourceHandle::into_encoded_data`],
/// which consumes the handle.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    id: ResourceId,
    kind: ResourceKind,
    url: Url,
    status: u16,
    headers: HeaderMap,
    mime_type: String,
    encoded_data: Option<Vec<u8>>,
}

impl ResourceHandle {
    pub fn new(
        id: ResourceId,
        kind: ResourceKind,
        url: Url,
        status: u16,
        headers: HeaderMap,
        encoded_data: Option<Vec<u8>>,
    ) -> Self {
        let mime_type = crate::mime::computed_type(&headers, encoded_data.as_deref());
        Self {
            id,
            kind,
            url,
            status,
            headers,
            mime_type,
            encoded_data,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Computed type of the resource (header essence or sniffed)
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// True when there are encoded bytes to hand to a decoder
    pub fn has_encoded_data(&self) -> bool {
        self.encoded_data.as_ref().is_some_and(|data| !data.is_empty())
    }

    pub fn encoded_data(&self) -> Option<&[u8]> {
        self.encoded_data.as_deref()
    }

    /// Give up the handle, keeping the encoded bytes
    pub fn into_encoded_data(self) -> Option<Vec<u8>> {
        self.encoded_data
    }
}
