use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::ImageConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Gallery,
}

impl ImageSource {
    /// Prefix for acquisition failures from this source.
    pub fn failure_context(&self) -> &'static str {
        match self {
            ImageSource::Camera => "Failed to take photo",
            ImageSource::Gallery => "Failed to pick image",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Camera => f.write_str("Camera"),
            ImageSource::Gallery => f.write_str("Gallery"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// What the native picker is asked to do.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub allows_editing: bool,
    pub aspect: (u32, u32),
    pub quality: f32,
    pub images_only: bool,
}

impl From<&ImageConfig> for PickerOptions {
    fn from(config: &ImageConfig) -> Self {
        PickerOptions {
            allows_editing: config.allows_editing,
            aspect: config.aspect,
            quality: config.capture_quality,
            images_only: true,
        }
    }
}

/// Encoded image bytes (JPEG, PNG, ...) straight from the picker.
#[derive(Clone)]
pub struct CapturedAsset {
    pub bytes: Vec<u8>,
    pub uri: Option<String>,
}

impl CapturedAsset {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, uri: None }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

impl fmt::Debug for CapturedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedAsset")
            .field("bytes", &self.bytes.len())
            .field("uri", &self.uri)
            .finish()
    }
}

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct DeviceError(pub String);

/// Platform camera and photo library.
#[async_trait]
pub trait MediaDevice: Send + Sync {
    async fn request_permission(&self, source: ImageSource)
        -> Result<PermissionStatus, DeviceError>;

    /// Shows the picker. `Ok(None)` means the user backed out.
    async fn launch(
        &self,
        source: ImageSource,
        options: &PickerOptions,
    ) -> Result<Option<CapturedAsset>, DeviceError>;
}
