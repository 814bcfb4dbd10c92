//! Dual-mode file upload
//!
//! This module provides the upload controller, which sends a dropped or
//! picked file either as an asynchronous multipart request or, on
//! runtimes without the needed features, through a hidden frame.

pub mod advanced;
pub mod controller;
pub mod fallback;
pub mod host;
pub mod payload;
pub mod types;

pub use controller::UploadController;
pub use fallback::{frame_name_at, FRAME_NAME_PREFIX};
pub use host::{SelectedFile, UploadHost};
pub use payload::{FormValue, HttpMethod, MultipartPayload, MultipartRequest};
pub use types::{
    DragEventKind, DropOutcome, OnComplete, StateClass, SubmitOutcome, Submission,
    TransferOutcome, UploadMode, UploadOptions, UploadState, DEFAULT_FILE_FIELD,
    DEFAULT_FRAME_TIMEOUT_SECS, DEFAULT_MAX_SIZE, MAX_FRAME_TIMEOUT_SECS,
};
