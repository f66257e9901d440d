//! Document - High-level document API
//!
//! URL resolution against the document base plus the style and layout
//! dirtiness that element behaviours raise and the host's layout pass clears.

use crate::NodeId;
use std::collections::BTreeSet;
use url::Url;

/// Document errors
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("invalid document URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// Document URL, base for relative references
    url: Url,
    /// Elements whose computed style must be recomputed
    style_dirty: BTreeSet<NodeId>,
    /// Set when some element asked for a layout refresh
    needs_layout: bool,
    /// Total layout refresh requests, for diagnostics
    layout_requests: u64,
}

impl Document {
    /// Create a document at `url`
    pub fn new(url: &str) -> Result<Self, DomError> {
        let url = Url::parse(url).map_err(|source| DomError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::with_url(url))
    }

    pub fn with_url(url: Url) -> Self {
        Self {
            url,
            style_dirty: BTreeSet::new(),
            needs_layout: false,
            layout_requests: 0,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Parse a URL relative to the document URL
    pub fn parse_url(&self, input: &str) -> Result<Url, url::ParseError> {
        self.url.join(input)
    }

    /// Mark an element's style as needing recomputation
    pub fn set_needs_style_update(&mut self, node: NodeId) {
        self.style_dirty.insert(node);
    }

    /// Ask the layout collaborator to rebuild before the next frame
    pub fn request_layout_refresh(&mut self) {
        self.needs_layout = true;
        self.layout_requests += 1;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn needs_style_update(&self, node: NodeId) -> bool {
        self.style_dirty.contains(&node)
    }

    /// How many times a layout refresh was requested
    pub fn layout_requests(&self) -> u64 {
        self.layout_requests
    }

    /// Consume the pending layout request
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }

    /// Drain the elements waiting for a style update
    pub fn take_style_updates(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.style_dirty).into_iter().collect()
    }
}
