use serde::Serialize;
use std::fmt;

pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A normalized, size-bounded JPEG encoded as a data URI.
///
/// Only the normalization step can build one, so an image request can
/// never carry a raw capture.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageAsset(String);

impl ImageAsset {
    pub(crate) fn from_jpeg_base64(encoded: &str) -> Self {
        Self(format!("{}{}", DATA_URI_PREFIX, encoded))
    }

    pub fn as_data_uri(&self) -> &str {
        &self.0
    }

    /// The base64 payload without the data URI prefix.
    pub fn base64_payload(&self) -> &str {
        &self.0[DATA_URI_PREFIX.len()..]
    }

    /// Length of the base64 payload.
    pub fn len(&self) -> usize {
        self.base64_payload().len()
    }

    pub fn is_empty(&self) -> bool {
        self.base64_payload().is_empty()
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("bytes", &self.0.len())
            .finish()
    }
}

/// Body for image-to-notes, image-to-CQ, image-to-answer and
/// image-to-math-solver.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub image_base64: ImageAsset,
}

impl ImageRequest {
    pub fn new(image: ImageAsset) -> Self {
        Self { image_base64: image }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageMcqRequest {
    pub image_base64: ImageAsset,
    pub count: u32,
}

impl ImageMcqRequest {
    pub fn new(image: ImageAsset, count: u32) -> Self {
        Self {
            image_base64: image,
            count,
        }
    }
}
