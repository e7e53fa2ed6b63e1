use std::env;
use std::time::Duration;

use crate::error::{Result, StudyError};

pub const DEFAULT_BASE_URL: &str = "https://smart-ai-assistant.onrender.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_USER_ID: &str = "mobile_user";

/// Widest image, in pixels, that is ever uploaded.
pub const MAX_IMAGE_WIDTH: u32 = 800;
/// JPEG quality (1-100) used when re-encoding a capture.
pub const JPEG_QUALITY: u8 = 70;
/// Quality hint handed to the native picker (0.0-1.0).
pub const CAPTURE_QUALITY: f32 = 0.7;
/// Crop aspect ratio offered by the picker editor.
pub const CAPTURE_ASPECT: (u32, u32) = (4, 3);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `STUDYAI_BASE_URL`, `STUDYAI_TIMEOUT_SECS` (0 disables the
    /// timeout) and `STUDYAI_USER_ID`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("STUDYAI_BASE_URL").unwrap_or(defaults.base_url);
        let timeout = match env::var("STUDYAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.timeout,
        };
        let user_id = env::var("STUDYAI_USER_ID").unwrap_or(defaults.user_id);

        ClientConfig {
            base_url,
            timeout,
            user_id,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(StudyError::Config("base URL is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StudyError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                url
            )));
        }
        Ok(())
    }

    /// Joins the base URL and a feature path without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub max_width: u32,
    pub jpeg_quality: u8,
    pub capture_quality: f32,
    pub aspect: (u32, u32),
    pub allows_editing: bool,
    pub acquisition_timeout: Option<Duration>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            max_width: MAX_IMAGE_WIDTH,
            jpeg_quality: JPEG_QUALITY,
            capture_quality: CAPTURE_QUALITY,
            aspect: CAPTURE_ASPECT,
            allows_editing: true,
            acquisition_timeout: None,
        }
    }
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_acquisition_timeout(mut self, timeout: Duration) -> Self {
        self.acquisition_timeout = Some(timeout);
        self
    }
}
