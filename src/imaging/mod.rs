pub mod device;
pub mod file_device;
pub mod normalize;

use std::sync::Arc;

use crate::{
    config::ImageConfig,
    error::{Result, StudyError},
    models::ImageAsset,
};

pub use device::{
    CapturedAsset, DeviceError, ImageSource, MediaDevice, PermissionStatus, PickerOptions,
};
pub use file_device::FileDevice;
pub use normalize::{fit_width, normalize_bytes, normalize_image};

/// Steps of a single acquisition. Each call walks these from
/// `RequestPermission` to one of the three terminal states.
#[derive(Debug)]
pub enum AcquisitionState {
    RequestPermission,
    Capture,
    Normalize(CapturedAsset),
    Done(ImageAsset),
    Denied,
    Cancelled,
}

impl AcquisitionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AcquisitionState::Done(_) | AcquisitionState::Denied | AcquisitionState::Cancelled
        )
    }

    fn name(&self) -> &'static str {
        match self {
            AcquisitionState::RequestPermission => "request-permission",
            AcquisitionState::Capture => "capture",
            AcquisitionState::Normalize(_) => "normalize",
            AcquisitionState::Done(_) => "done",
            AcquisitionState::Denied => "denied",
            AcquisitionState::Cancelled => "cancelled",
        }
    }
}

/// Gets one picture from the camera or photo library and turns it into an
/// upload-ready [`ImageAsset`].
#[derive(Clone)]
pub struct ImageAcquisition {
    device: Arc<dyn MediaDevice>,
    config: ImageConfig,
}

impl ImageAcquisition {
    pub fn new(device: Arc<dyn MediaDevice>) -> Self {
        Self::with_config(device, ImageConfig::default())
    }

    pub fn with_config(device: Arc<dyn MediaDevice>, config: ImageConfig) -> Self {
        Self { device, config }
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    pub async fn take_photo(&self) -> Result<Option<ImageAsset>> {
        self.acquire(ImageSource::Camera).await
    }

    pub async fn pick_image(&self) -> Result<Option<ImageAsset>> {
        self.acquire(ImageSource::Gallery).await
    }

    /// `Ok(None)` when the user cancels the picker. A denied permission is
    /// `StudyError::PermissionDenied` and never opens the picker.
    pub async fn acquire(&self, source: ImageSource) -> Result<Option<ImageAsset>> {
        let run = self.run(source);
        match self.config.acquisition_timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| StudyError::ImageAcquisition {
                    context: source.failure_context(),
                    message: format!("picker did not finish within {}ms", limit.as_millis()),
                })?,
            None => run.await,
        }
    }

    async fn run(&self, source: ImageSource) -> Result<Option<ImageAsset>> {
        let mut state = AcquisitionState::RequestPermission;

        while !state.is_terminal() {
            let next = self.step(source, state).await?;
            log::debug!("{} acquisition -> {}", source, next.name());
            state = next;
        }

        match state {
            AcquisitionState::Done(asset) => {
                log::info!("{} image ready ({} bytes)", source, asset.len());
                Ok(Some(asset))
            }
            AcquisitionState::Cancelled => {
                log::info!("{} picker cancelled", source);
                Ok(None)
            }
            _ => Err(StudyError::PermissionDenied(source)),
        }
    }

    async fn step(&self, source: ImageSource, state: AcquisitionState) -> Result<AcquisitionState> {
        let context = source.failure_context();
        let device_failure = |e: DeviceError| StudyError::ImageAcquisition {
            context,
            message: e.0,
        };

        let next = match state {
            AcquisitionState::RequestPermission => {
                let status = self
                    .device
                    .request_permission(source)
                    .await
                    .map_err(device_failure)?;
                if status.is_granted() {
                    AcquisitionState::Capture
                } else {
                    log::warn!("{} permission not granted ({:?})", source, status);
                    AcquisitionState::Denied
                }
            }
            AcquisitionState::Capture => {
                let options = PickerOptions::from(&self.config);
                match self
                    .device
                    .launch(source, &options)
                    .await
                    .map_err(device_failure)?
                {
                    Some(captured) => AcquisitionState::Normalize(captured),
                    None => AcquisitionState::Cancelled,
                }
            }
            AcquisitionState::Normalize(captured) => {
                let CapturedAsset { bytes, uri } = captured;
                let config = self.config.clone();

                // Decoding and resizing are CPU-bound; keep them off the
                // async workers so the acquisition timeout can still fire.
                let normalized =
                    tokio::task::spawn_blocking(move || normalize_bytes(&bytes, &config))
                        .await
                        .map_err(|e| StudyError::ImageAcquisition {
                            context,
                            message: format!("normalization task failed: {}", e),
                        })?;

                let asset = normalized.map_err(|e| StudyError::ImageAcquisition {
                    context,
                    message: match &uri {
                        Some(uri) => format!("{} ({})", e, uri),
                        None => e.to_string(),
                    },
                })?;
                AcquisitionState::Done(asset)
            }
            terminal => terminal,
        };
        Ok(next)
    }
}
