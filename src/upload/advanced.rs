//! Advanced upload strategy
//!
//! Sends the form as an asynchronous multipart request and hands the
//! parsed JSON body to the completion callback.

use crate::upload::controller::UploadController;
use crate::upload::host::UploadHost;
use crate::upload::payload::{HttpMethod, MultipartRequest};
use crate::upload::types::{SubmitOutcome, Submission, TransferOutcome};

impl<H: UploadHost> UploadController<H> {
    pub(crate) fn prepare_multipart(&self, dropped: Option<H::File>) -> Submission<H::File> {
        let mut payload = match self.host.collect_fields() {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("Failed to serialize upload form: {}", err);
                return Submission::Aborted(err);
            }
        };

        if let Some(file) = dropped {
            let field = self
                .host
                .file_input_name()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.options.file_field.clone());
            payload.set_file(field, file);
        }

        let request = MultipartRequest::new(
            self.host.form_action(),
            HttpMethod::parse(&self.host.form_method()),
            payload,
        );

        self.enter_uploading();
        Submission::Multipart(request)
    }

    /// Send a prepared multipart request and settle the upload
    ///
    /// The state returns to `Idle` before the completion callback runs.
    /// A transport failure is logged and the callback is skipped.
    pub async fn run_transfer(&self, request: MultipartRequest<H::File>) -> SubmitOutcome {
        log::debug!(
            "Uploading {} field(s) to {} {}",
            request.payload.len(),
            request.method,
            request.url
        );

        let result = self.host.send_multipart(request).await;
        self.settle();

        match result {
            Ok(body) => {
                let outcome = TransferOutcome::from_payload(body.clone());
                self.notify(body);
                SubmitOutcome::Completed(outcome)
            }
            Err(err) => {
                log::error!("Upload transfer failed: {}", err);
                SubmitOutcome::Failed(err)
            }
        }
    }
}
