//! Serializable upload configuration
//!
//! `UploadConfig` carries everything in `UploadOptions` except the
//! completion callback, so pages can declare it as JSON (for example in a
//! `data-upload-config` attribute on the form).

use crate::error::{Result, UploadError};
use crate::upload::types::{
    UploadOptions, DEFAULT_FILE_FIELD, DEFAULT_FRAME_TIMEOUT_SECS, DEFAULT_MAX_SIZE,
};
use bytesize::ByteSize;
use serde::{Deserialize, Serialize, Serializer};

/// Writes sizes as plain byte counts; reading accepts numbers or strings
fn serialize_bytes<S>(size: &ByteSize, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(size.as_u64())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted file (default: 1 GiB)
    #[serde(rename = "max-size", serialize_with = "serialize_bytes")]
    pub max_size: ByteSize,

    /// Seconds before a fallback frame is abandoned; null disables the timeout
    #[serde(rename = "frame-timeout")]
    pub frame_timeout: Option<u64>,

    /// Invoke the completion callback for fallback transfers too (default: false)
    #[serde(rename = "notify-in-fallback")]
    pub notify_in_fallback: bool,

    /// Field name for dropped files when the input has no name (default: "file")
    #[serde(rename = "file-field")]
    pub file_field: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size: ByteSize::b(DEFAULT_MAX_SIZE),
            frame_timeout: Some(DEFAULT_FRAME_TIMEOUT_SECS),
            notify_in_fallback: false,
            file_field: DEFAULT_FILE_FIELD.to_string(),
        }
    }
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, max_size: ByteSize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn frame_timeout(mut self, timeout: Option<u64>) -> Self {
        self.frame_timeout = timeout;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: UploadConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(UploadError::from)
    }

    pub fn validate(&self) -> Result<()> {
        self.to_options().validate()
    }

    /// Options carrying this configuration and no completion callback
    pub fn to_options(&self) -> UploadOptions {
        UploadOptions::new()
            .max_size(self.max_size.as_u64())
            .frame_timeout(self.frame_timeout)
            .notify_in_fallback(self.notify_in_fallback)
            .file_field(self.file_field.clone())
    }
}

impl From<UploadConfig> for UploadOptions {
    fn from(config: UploadConfig) -> Self {
        config.to_options()
    }
}
