//! The upload controller
//!
//! One controller is bound per form. It owns the form's upload state,
//! the staged file and the size-limit dialog, and it is the only thing
//! that changes them. Transfer specifics live in `advanced` (multipart
//! requests) and `fallback` (hidden frames).

use crate::capability::{Capabilities, FeatureProbe};
use crate::dialog::{DialogConfig, FeedbackDialog};
use crate::error::{Result, UploadError};
use crate::upload::host::{SelectedFile, UploadHost};
use crate::upload::types::{
    DragEventKind, DropOutcome, StateClass, SubmitOutcome, Submission, UploadMode,
    UploadOptions, UploadState,
};
use bytesize::ByteSize;
use serde_json::Value;
use std::cell::{Cell, RefCell};

/// Upload controller for a single form
pub struct UploadController<H: UploadHost> {
    pub(crate) host: H,
    pub(crate) options: UploadOptions,
    capabilities: Capabilities,
    mode: UploadMode,
    state: Cell<UploadState>,
    pending: RefCell<Option<H::File>>,
    pub(crate) active_frame: RefCell<Option<String>>,
    size_dialog: FeedbackDialog<H::Surface>,
}

impl<H: UploadHost> UploadController<H> {
    /// Bind a controller to the host's form
    ///
    /// The transfer mode is chosen here from the probe and never
    /// re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The host's element is not a form
    /// - The options are invalid
    pub fn bind<P>(host: H, probe: &P, options: UploadOptions) -> Result<Self>
    where
        P: FeatureProbe + ?Sized,
    {
        if !host.is_form() {
            log::warn!("Invalid form element, upload controller not bound");
            return Err(UploadError::invalid_target("expected a form element"));
        }

        options.validate()?;

        let capabilities = Capabilities::detect(probe);
        let mode = UploadMode::from_capabilities(&capabilities);
        if mode == UploadMode::Advanced {
            host.set_class(StateClass::Advanced, true);
        }

        let size_dialog = FeedbackDialog::new(DialogConfig::file_too_large(), host.dialog_surface());

        log::debug!(
            "Bound upload controller in {} mode (limit {})",
            mode,
            ByteSize::b(options.max_size)
        );

        Ok(Self {
            host,
            options,
            capabilities,
            mode,
            state: Cell::new(UploadState::Idle),
            pending: RefCell::new(None),
            active_frame: RefCell::new(None),
            size_dialog,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn mode(&self) -> UploadMode {
        self.mode
    }

    pub fn state(&self) -> UploadState {
        self.state.get()
    }

    pub fn is_uploading(&self) -> bool {
        self.state.get().is_uploading()
    }

    /// The file staged by the last drop, if it has not been submitted yet
    pub fn pending_file(&self) -> Option<H::File> {
        self.pending.borrow().clone()
    }

    pub fn size_dialog(&self) -> &FeedbackDialog<H::Surface> {
        &self.size_dialog
    }

    /// Update the dragover marker for a drag-family event
    pub fn on_drag(&self, kind: DragEventKind) {
        if self.mode != UploadMode::Advanced {
            return;
        }
        if kind.adds_dragover_marker() {
            self.host.set_class(StateClass::Dragover, true);
        } else if kind.clears_dragover_marker() {
            self.host.set_class(StateClass::Dragover, false);
        }
    }

    /// Stage the first dropped file and request a submission
    pub fn on_drop(&self, files: Vec<H::File>) -> DropOutcome {
        if self.mode != UploadMode::Advanced {
            return DropOutcome::Ignored;
        }

        let Some(file) = files.into_iter().next() else {
            log::debug!("Drop carried no files");
            return DropOutcome::Ignored;
        };

        if let Err(err) = self.check_size(Some(&file)) {
            self.pending.borrow_mut().take();
            return DropOutcome::Rejected(err);
        }

        *self.pending.borrow_mut() = Some(file);
        self.host.request_submit();
        DropOutcome::Submitted
    }

    /// The file input's selection changed
    ///
    /// The picker selection supersedes any staged drop. Its size is checked
    /// when the submission starts.
    pub fn on_input_change(&self) {
        self.pending.borrow_mut().take();
        self.host.request_submit();
    }

    /// Decide what a submission does
    ///
    /// Runs synchronously inside the submit event. The returned value tells
    /// the caller whether to suppress the native submission and what to do
    /// next. The state only becomes `Uploading` when a transfer is actually
    /// about to start.
    pub fn prepare_submit(&self) -> Submission<H::File> {
        if self.is_uploading() {
            return Submission::Rejected;
        }

        let dropped = self.pending.borrow_mut().take();
        let candidate = dropped
            .clone()
            .or_else(|| self.host.selected_files().into_iter().next());

        if let Err(err) = self.check_size(candidate.as_ref()) {
            return Submission::Aborted(err);
        }

        match self.mode {
            UploadMode::Advanced => self.prepare_multipart(dropped),
            UploadMode::Fallback => self.prepare_frame(),
        }
    }

    /// Prepare a submission and, in advanced mode, run the transfer
    ///
    /// Resolves exactly once per call. In fallback mode the result is
    /// `Pending` and the outcome arrives through `on_frame_load`.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.prepare_submit() {
            Submission::Rejected => SubmitOutcome::Rejected,
            Submission::Aborted(err) => SubmitOutcome::Aborted(err),
            Submission::Multipart(request) => self.run_transfer(request).await,
            Submission::Native { frame_name } => SubmitOutcome::Pending { frame_name },
        }
    }

    fn check_size(&self, file: Option<&H::File>) -> Result<()> {
        let Some(file) = file else {
            return Ok(());
        };

        let size = file.size();
        if size <= self.options.max_size {
            return Ok(());
        }

        log::warn!(
            "Rejecting {} ({}): maximum upload size is {}",
            file.name(),
            ByteSize::b(size),
            ByteSize::b(self.options.max_size)
        );
        if let Err(err) = self.size_dialog.show() {
            log::error!("Failed to show size-limit dialog: {}", err);
        }
        Err(UploadError::file_too_large(
            file.name(),
            size,
            self.options.max_size,
        ))
    }

    pub(crate) fn enter_uploading(&self) {
        self.state.set(UploadState::Uploading);
        self.host.set_class(StateClass::Success, false);
        self.host.set_class(StateClass::Error, false);
        self.host.set_class(StateClass::Uploading, true);
    }

    pub(crate) fn settle(&self) {
        self.state.set(UploadState::Idle);
        self.host.set_class(StateClass::Uploading, false);
    }

    pub(crate) fn notify(&self, payload: Value) {
        // cloned out so the callback may call back into the controller
        if let Some(callback) = self.options.on_complete.clone() {
            callback(payload);
        }
    }
}
