use crate::capability::Capabilities;
use crate::error::{Result, UploadError};
use crate::upload::payload::MultipartRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;
use std::time::Duration;

/// Default size limit: 1 GiB
pub const DEFAULT_MAX_SIZE: u64 = 1 << 30;

/// Field name used for a dropped file when the file input has no name
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Default lifetime of a fallback upload frame, in seconds
pub const DEFAULT_FRAME_TIMEOUT_SECS: u64 = 300;

/// Longest frame timeout a browser timer can represent, in seconds
pub const MAX_FRAME_TIMEOUT_SECS: u64 = i32::MAX as u64 / 1000;

/// Completion callback receiving the parsed response body
pub type OnComplete = Rc<dyn Fn(Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }
}

/// Transfer strategy, fixed when the controller is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Asynchronous multipart request with drag-and-drop support
    Advanced,
    /// Native form submission into a hidden frame
    Fallback,
}

impl UploadMode {
    pub fn from_capabilities(capabilities: &Capabilities) -> Self {
        if capabilities.supports_advanced_upload() {
            UploadMode::Advanced
        } else {
            UploadMode::Fallback
        }
    }
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadMode::Advanced => write!(f, "advanced"),
            UploadMode::Fallback => write!(f, "fallback"),
        }
    }
}

/// Marker classes toggled on the form element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    Dragover,
    Uploading,
    Success,
    Error,
    Advanced,
}

impl StateClass {
    pub const ALL: [StateClass; 5] = [
        StateClass::Dragover,
        StateClass::Uploading,
        StateClass::Success,
        StateClass::Error,
        StateClass::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Dragover => "dragover",
            StateClass::Uploading => "uploading",
            StateClass::Success => "success",
            StateClass::Error => "error",
            StateClass::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for StateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The drag-and-drop event family handled on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEventKind {
    Drag,
    DragStart,
    DragEnd,
    DragOver,
    DragEnter,
    DragLeave,
    Drop,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 7] = [
        DragEventKind::Drag,
        DragEventKind::DragStart,
        DragEventKind::DragEnd,
        DragEventKind::DragOver,
        DragEventKind::DragEnter,
        DragEventKind::DragLeave,
        DragEventKind::Drop,
    ];

    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            DragEventKind::Drag => "drag",
            DragEventKind::DragStart => "dragstart",
            DragEventKind::DragEnd => "dragend",
            DragEventKind::DragOver => "dragover",
            DragEventKind::DragEnter => "dragenter",
            DragEventKind::DragLeave => "dragleave",
            DragEventKind::Drop => "drop",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn adds_dragover_marker(&self) -> bool {
        matches!(self, DragEventKind::DragOver | DragEventKind::DragEnter)
    }

    pub fn clears_dragover_marker(&self) -> bool {
        matches!(
            self,
            DragEventKind::DragLeave | DragEventKind::DragEnd | DragEventKind::Drop
        )
    }
}

/// Result of a settled transfer, identical for both strategies
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub success: bool,
    pub payload: Option<Value>,
}

impl TransferOutcome {
    /// Interpret a response body; only a literal `"success": true` counts
    pub fn from_payload(payload: Value) -> Self {
        let success = payload.get("success").and_then(Value::as_bool) == Some(true);
        Self {
            success,
            payload: Some(payload),
        }
    }
}

/// What the controller decided to do with a submission
#[derive(Debug)]
pub enum Submission<F> {
    /// Another upload is in flight; nothing happened
    Rejected,
    /// Stopped before any transfer began
    Aborted(UploadError),
    /// Send this request asynchronously, suppressing native submission
    Multipart(MultipartRequest<F>),
    /// Let the native submission proceed into the named frame
    Native { frame_name: String },
}

impl<F> Submission<F> {
    /// Whether the native form submission must be suppressed
    pub fn prevents_native_submit(&self) -> bool {
        !matches!(self, Submission::Native { .. })
    }
}

/// Result of a full `submit` call
#[derive(Debug)]
pub enum SubmitOutcome {
    Rejected,
    Aborted(UploadError),
    Completed(TransferOutcome),
    Failed(UploadError),
    /// Fallback mode: the outcome arrives with the frame's load event
    Pending { frame_name: String },
}

/// Result of handling a drop event
#[derive(Debug)]
pub enum DropOutcome {
    /// Nothing usable was dropped, or drag-and-drop is not wired
    Ignored,
    /// The file was over the limit and was not staged
    Rejected(UploadError),
    /// The file was staged and a form submission was requested
    Submitted,
}

#[derive(Clone)]
pub struct UploadOptions {
    pub max_size: u64,
    pub on_complete: Option<OnComplete>,
    pub frame_timeout: Option<u64>,
    pub notify_in_fallback: bool,
    pub file_field: String,
}

impl std::fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadOptions")
            .field("max_size", &self.max_size)
            .field("on_complete", &self.on_complete.is_some())
            .field("frame_timeout", &self.frame_timeout)
            .field("notify_in_fallback", &self.notify_in_fallback)
            .field("file_field", &self.file_field)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            on_complete: None,
            frame_timeout: Some(DEFAULT_FRAME_TIMEOUT_SECS),
            notify_in_fallback: false,
            file_field: DEFAULT_FILE_FIELD.to_string(),
        }
    }
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(Value) + 'static,
    {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    /// Seconds before an unanswered fallback frame is given up on
    pub fn frame_timeout(mut self, timeout: Option<u64>) -> Self {
        self.frame_timeout = timeout;
        self
    }

    /// Also invoke the completion callback for fallback transfers
    ///
    /// Off by default: fallback callers only observe the outcome through
    /// the `success`/`error` classes.
    pub fn notify_in_fallback(mut self, notify: bool) -> Self {
        self.notify_in_fallback = notify;
        self
    }

    pub fn file_field(mut self, field: impl Into<String>) -> Self {
        self.file_field = field.into();
        self
    }

    pub fn frame_timeout_duration(&self) -> Option<Duration> {
        self.frame_timeout.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(UploadError::invalid_parameter(
                "max_size",
                "Maximum size must be greater than 0",
            ));
        }

        if let Some(timeout) = self.frame_timeout {
            if timeout == 0 {
                return Err(UploadError::invalid_parameter(
                    "frame_timeout",
                    "Timeout must be greater than 0",
                ));
            }
            if timeout > MAX_FRAME_TIMEOUT_SECS {
                return Err(UploadError::invalid_parameter(
                    "frame_timeout",
                    format!("Timeout cannot exceed {} seconds", MAX_FRAME_TIMEOUT_SECS),
                ));
            }
        }

        if self.file_field.is_empty() {
            return Err(UploadError::invalid_parameter(
                "file_field",
                "File field name cannot be empty",
            ));
        }

        Ok(())
    }
}
