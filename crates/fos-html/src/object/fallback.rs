//! Fallback controller
//!
//! Holds what the element currently represents and tells the document when
//! that changes. It does not decide when to switch.

use super::image_adapter::ImageAdapter;
use fos_dom::{Document, NodeId};
use fos_render::DecodedImage;

/// What the element represents right now
#[derive(Debug, Default)]
pub enum Representation {
    /// The element's own children
    #[default]
    Fallback,
    /// A decoded image
    Image(ImageAdapter),
}

/// Node the layout builder should create for the element
#[derive(Debug, Clone, Copy)]
pub enum LayoutNodeKind<'a> {
    /// Lay out the element's children as usual
    FallbackContent,
    /// Replaced box showing the image
    Image(&'a DecodedImage),
    /// Nothing to show
    None,
}

impl LayoutNodeKind<'_> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LayoutNodeKind::FallbackContent)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, LayoutNodeKind::Image(_))
    }
}

#[derive(Debug, Default)]
pub struct FallbackController {
    representation: Representation,
}

impl FallbackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fallback_active(&self) -> bool {
        matches!(self.representation, Representation::Fallback)
    }

    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    /// The shown image's adapter, if any
    pub fn image(&self) -> Option<&ImageAdapter> {
        match &self.representation {
            Representation::Image(adapter) => Some(adapter),
            Representation::Fallback => None,
        }
    }

    /// Show fallback content. Calling it again only re-requests layout.
    pub fn show_fallback(&mut self, node: NodeId, document: &mut Document) {
        if let Representation::Image(adapter) = std::mem::take(&mut self.representation) {
            tracing::debug!("{:?} dropping image from {:?}", node, adapter.resource_id());
        }
        Self::invalidate(node, document);
    }

    /// Represent the adapter's image
    pub fn show_image(&mut self, adapter: ImageAdapter, node: NodeId, document: &mut Document) {
        self.representation = Representation::Image(adapter);
        Self::invalidate(node, document);
    }

    pub fn layout_node_kind(&self) -> LayoutNodeKind<'_> {
        match &self.representation {
            Representation::Fallback => LayoutNodeKind::FallbackContent,
            Representation::Image(adapter) => match adapter.image() {
                Some(image) => LayoutNodeKind::Image(image),
                None => LayoutNodeKind::None,
            },
        }
    }

    fn invalidate(node: NodeId, document: &mut Document) {
        document.set_needs_style_update(node);
        document.request_layout_refresh();
    }
}
