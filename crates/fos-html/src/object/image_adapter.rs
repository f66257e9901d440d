//! Image adapter
//!
//! Bridges a generic fetched resource into the image pipeline once its
//! type is known to be an image.

use fos_net::{ResourceHandle, ResourceId, Url};
use fos_render::{DecodedImage, ImageError, ImageLoadOutcome, ImageLoader};

/// Terminal result reported by the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    /// Decoded; the element can represent the image
    Completed,
    /// Malformed or unsupported bytes
    Failed(ImageError),
}

/// Owns an adopted resource through decoding
#[derive(Debug)]
pub struct ImageAdapter {
    resource: ResourceId,
    loader: ImageLoader,
    settled: bool,
}

impl ImageAdapter {
    /// Take ownership of `resource`; the generic handle is consumed
    pub fn adopt(resource: ResourceHandle) -> Self {
        let id = resource.id();
        let mut loader = ImageLoader::new();
        loader.adopt_resource(resource);
        Self {
            resource: id,
            loader,
            settled: false,
        }
    }

    /// Run the pipeline. Returns the outcome exactly once; `None` afterwards.
    pub fn finish(&mut self) -> Option<AdapterOutcome> {
        if self.settled {
            return None;
        }
        let outcome = match self.loader.decode()? {
            ImageLoadOutcome::Loaded => AdapterOutcome::Completed,
            ImageLoadOutcome::Failed(e) => AdapterOutcome::Failed(e),
        };
        self.settled = true;
        Some(outcome)
    }

    /// Id of the fetch the resource came from
    pub fn resource_id(&self) -> ResourceId {
        self.resource
    }

    pub fn url(&self) -> Option<&Url> {
        self.loader.url()
    }

    pub fn has_image(&self) -> bool {
        self.loader.has_image()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.loader.image()
    }
}
