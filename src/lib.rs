//! File upload and feedback dialog widgets for browser forms
//!
//! The upload controller sends a dropped or picked file to the form's
//! action, either as an asynchronous multipart request or through a hidden
//! frame on runtimes that cannot build one. Oversized files are reported
//! through a modal dialog. The browser bindings in `web` are only built
//! for `wasm32`.

pub mod capability;
pub mod config;
pub mod dialog;
pub mod error;
pub mod upload;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use capability::{can_drag_and_drop, Capabilities, FeatureProbe};

pub use config::UploadConfig;

pub use dialog::{DialogBody, DialogConfig, DialogSurface, DismissHandle, FeedbackDialog};

pub use error::{Result, UploadError};

pub use upload::{
    frame_name_at, DragEventKind, DropOutcome, FormValue, HttpMethod, MultipartPayload,
    MultipartRequest, SelectedFile, StateClass, SubmitOutcome, Submission, TransferOutcome,
    UploadController, UploadHost, UploadMode, UploadOptions, UploadState, FRAME_NAME_PREFIX,
    MAX_FRAME_TIMEOUT_SECS,
};
