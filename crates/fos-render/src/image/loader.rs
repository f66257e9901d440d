//! Image loader
//!
//! Adopts a fetched resource and decodes it once. The caller learns the
//! result from the single [`ImageLoadOutcome`] that [`ImageLoader::decode`]
//! returns; later calls return `None`.

use super::{DecodedImage, ImageDecoder, ImageError, ImageFormat};
use fos_net::{ResourceHandle, Url};

/// Terminal result of a decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadOutcome {
    Loaded,
    Failed(ImageError),
}

#[derive(Debug)]
enum LoaderState {
    Empty,
    Adopted { data: Option<Vec<u8>>, mime_type: String },
    Decoded(DecodedImage),
    Failed(ImageError),
}

/// Loads one image from an adopted resource
#[derive(Debug)]
pub struct ImageLoader {
    url: Option<Url>,
    state: LoaderState,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            url: None,
            state: LoaderState::Empty,
        }
    }

    /// Take over a fetched resource; its encoded bytes now belong to the loader
    pub fn adopt_resource(&mut self, resource: ResourceHandle) {
        tracing::debug!("Adopting {} ({}) as image", resource.url(), resource.mime_type());
        self.url = Some(resource.url().clone());
        let mime_type = resource.mime_type().to_string();
        self.state = LoaderState::Adopted {
            data: resource.into_encoded_data(),
            mime_type,
        };
    }

    /// Decode the adopted bytes
    ///
    /// Returns the outcome the first time it runs after adoption, `None` otherwise.
    pub fn decode(&mut self) -> Option<ImageLoadOutcome> {
        if !matches!(self.state, LoaderState::Adopted { .. }) {
            return None;
        }
        let LoaderState::Adopted { data, mime_type } =
            std::mem::replace(&mut self.state, LoaderState::Empty)
        else {
            return None;
        };

        let result = match data.as_deref() {
            None | Some([]) => Err(ImageError::MissingData),
            Some(bytes) => {
                let format = match ImageFormat::from_bytes(bytes) {
                    ImageFormat::Unknown => ImageFormat::from_mime(&mime_type),
                    sniffed => sniffed,
                };
                ImageDecoder::decode_with_format(bytes, format)
            }
        };

        match result {
            Ok(image) => {
                tracing::debug!("Decoded {}x{} image", image.width, image.height);
                self.state = LoaderState::Decoded(image);
                Some(ImageLoadOutcome::Loaded)
            }
            Err(e) => {
                tracing::debug!("Image decode failed: {}", e);
                self.state = LoaderState::Failed(e.clone());
                Some(ImageLoadOutcome::Failed(e))
            }
        }
    }

    pub fn has_image(&self) -> bool {
        matches!(self.state, LoaderState::Decoded(_))
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        match &self.state {
            LoaderState::Decoded(image) => Some(image),
            _ => None,
        }
    }

    /// Decoding ran, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self.state, LoaderState::Decoded(_) | LoaderState::Failed(_))
    }

    /// URL of the adopted resource
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}
