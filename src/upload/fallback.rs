//! Fallback upload strategy
//!
//! Lets the browser submit the form natively into a hidden frame, then
//! scrapes the frame's body text as JSON once it loads. The server must
//! render its JSON response as plain text in the document body.

use crate::error::{Result, UploadError};
use crate::upload::controller::UploadController;
use crate::upload::host::UploadHost;
use crate::upload::types::{StateClass, Submission, TransferOutcome};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Prefix of generated frame names
pub const FRAME_NAME_PREFIX: &str = "uploadiframe";

/// Frame name for a submission started at `time`
///
/// Names only collide for submissions within the same millisecond, which
/// the single-flight guard rules out for a given form.
pub fn frame_name_at(time: DateTime<Utc>) -> String {
    format!("{}{}", FRAME_NAME_PREFIX, time.timestamp_millis())
}

impl<H: UploadHost> UploadController<H> {
    pub(crate) fn prepare_frame(&self) -> Submission<H::File> {
        let frame_name = frame_name_at(Utc::now());

        if let Err(err) = self.host.attach_frame(&frame_name) {
            log::error!("Failed to create upload frame {}: {}", frame_name, err);
            return Submission::Aborted(err);
        }

        self.host.set_form_target(Some(&frame_name));
        *self.active_frame.borrow_mut() = Some(frame_name.clone());
        self.enter_uploading();

        log::debug!("Submitting form into frame {}", frame_name);
        Submission::Native { frame_name }
    }

    /// Name of the frame the current fallback upload targets
    pub fn active_frame(&self) -> Option<String> {
        self.active_frame.borrow().clone()
    }

    /// The upload frame finished loading with this body text
    ///
    /// Applies `success` or `error` to the form and discards the frame. A
    /// body that is not JSON is an error of the server's making: it is
    /// logged and returned, and the upload still settles as `error`.
    pub fn on_frame_load(&self, frame_name: &str, body_text: &str) -> Result<TransferOutcome> {
        self.release_frame(frame_name)?;

        let payload: Value = match serde_json::from_str(body_text.trim()) {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("Upload frame {} returned malformed JSON: {}", frame_name, err);
                self.finish_frame(frame_name, false);
                return Err(err.into());
            }
        };

        let outcome = TransferOutcome::from_payload(payload);
        self.finish_frame(frame_name, outcome.success);

        if self.options.notify_in_fallback {
            if let Some(payload) = outcome.payload.clone() {
                self.notify(payload);
            }
        }

        Ok(outcome)
    }

    /// The upload frame did not load within the configured timeout
    ///
    /// Settles the upload as `error`. A load arriving afterwards is
    /// reported as an unexpected frame.
    pub fn on_frame_timeout(&self, frame_name: &str) -> Result<()> {
        self.release_frame(frame_name)?;
        log::warn!("{}", UploadError::timeout(format!("upload frame {}", frame_name)));
        self.finish_frame(frame_name, false);
        Ok(())
    }

    fn release_frame(&self, frame_name: &str) -> Result<()> {
        let mut active = self.active_frame.borrow_mut();
        if active.as_deref() != Some(frame_name) {
            return Err(UploadError::unexpected_frame(frame_name));
        }
        active.take();
        Ok(())
    }

    fn finish_frame(&self, frame_name: &str, success: bool) {
        self.settle();
        let class = if success {
            StateClass::Success
        } else {
            StateClass::Error
        };
        self.host.set_class(class, true);
        self.host.set_form_target(None);
        self.host.remove_frame(frame_name);
    }
}
