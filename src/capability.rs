//! Runtime capability detection
//!
//! Decides whether the runtime can perform an asynchronous multipart
//! transfer with live access to drag-and-drop data. All three features
//! must be present: some runtimes expose drag events without a way to
//! build a multipart body, and those must use the frame fallback.

use serde::{Deserialize, Serialize};

/// Source of the individual feature checks
///
/// The browser implementation inspects the global object; tests use plain
/// structs. Implementations must be free of side effects.
pub trait FeatureProbe {
    /// `draggable` attribute, or the `ondragstart`/`ondrop` handler pair
    fn has_drag_and_drop(&self) -> bool;

    /// Multipart form-data construction (`FormData`)
    fn has_form_data(&self) -> bool;

    /// File reading (`FileReader`)
    fn has_file_reader(&self) -> bool;
}

/// Snapshot of the runtime features relevant to uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub drag_and_drop: bool,
    pub form_data: bool,
    pub file_reader: bool,
}

impl Capabilities {
    /// Query every feature from the probe
    pub fn detect<P: FeatureProbe + ?Sized>(probe: &P) -> Self {
        Self {
            drag_and_drop: probe.has_drag_and_drop(),
            form_data: probe.has_form_data(),
            file_reader: probe.has_file_reader(),
        }
    }

    /// All features present, so the advanced strategy can be used
    pub fn supports_advanced_upload(&self) -> bool {
        self.drag_and_drop && self.form_data && self.file_reader
    }
}

impl FeatureProbe for Capabilities {
    fn has_drag_and_drop(&self) -> bool {
        self.drag_and_drop
    }

    fn has_form_data(&self) -> bool {
        self.form_data
    }

    fn has_file_reader(&self) -> bool {
        self.file_reader
    }
}

/// Whether the runtime supports drag-and-drop uploads over multipart requests
pub fn can_drag_and_drop<P: FeatureProbe + ?Sized>(probe: &P) -> bool {
    Capabilities::detect(probe).supports_advanced_upload()
}
