use async_trait::async_trait;
use std::path::PathBuf;

use super::device::{
    CapturedAsset, DeviceError, ImageSource, MediaDevice, PermissionStatus, PickerOptions,
};

/// Desktop stand-in for the photo library: "picking" reads a file that was
/// chosen up front. There is no camera, so camera permission is denied.
#[derive(Debug, Clone, Default)]
pub struct FileDevice {
    path: Option<PathBuf>,
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A device whose picker is always dismissed.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaDevice for FileDevice {
    async fn request_permission(
        &self,
        source: ImageSource,
    ) -> Result<PermissionStatus, DeviceError> {
        Ok(match source {
            ImageSource::Camera => PermissionStatus::Denied,
            ImageSource::Gallery => PermissionStatus::Granted,
        })
    }

    async fn launch(
        &self,
        source: ImageSource,
        options: &PickerOptions,
    ) -> Result<Option<CapturedAsset>, DeviceError> {
        if source == ImageSource::Camera {
            return Err(DeviceError("no camera attached".into()));
        }
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DeviceError(format!("{}: {}", path.display(), e)))?;
        if options.images_only && image::guess_format(&bytes).is_err() {
            return Err(DeviceError(format!("{} is not an image", path.display())));
        }
        Ok(Some(
            CapturedAsset::new(bytes).with_uri(format!("file://{}", path.display())),
        ))
    }
}
