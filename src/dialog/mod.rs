//! Modal feedback dialogs
//!
//! This module provides the minimal dialog the upload controller relies
//! on for user-visible errors: a title, a message, an optional dismiss
//! button and an optional dismiss callback.

pub mod feedback;
pub mod types;

pub use feedback::{DialogSurface, DismissHandle, FeedbackDialog};
pub use types::{DialogBody, DialogConfig, FILE_TOO_LARGE_MESSAGE, FILE_TOO_LARGE_TITLE};
