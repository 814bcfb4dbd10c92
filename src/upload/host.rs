//! Host seam for the upload controller
//!
//! The controller never touches the DOM or the network itself. Everything
//! it needs from the page goes through `UploadHost`: the browser
//! implementation lives in `crate::web`, and tests drive the controller
//! with recording hosts.

use crate::dialog::DialogSurface;
use crate::error::Result;
use crate::upload::payload::{MultipartPayload, MultipartRequest};
use crate::upload::types::StateClass;
use futures::future::LocalBoxFuture;
use serde_json::Value;

/// A file selected through the picker or dropped on the form
pub trait SelectedFile: Clone {
    fn name(&self) -> String;

    /// Size in bytes
    fn size(&self) -> u64;
}

/// The form, its file input and the page around them
pub trait UploadHost {
    type File: SelectedFile;
    type Surface: DialogSurface + 'static;

    /// Whether the bound element really is a form
    fn is_form(&self) -> bool;

    fn set_class(&self, class: StateClass, enabled: bool);

    /// The form's `action` URL
    fn form_action(&self) -> String;

    /// The form's raw `method` attribute
    fn form_method(&self) -> String;

    /// Set or remove the form's `target` attribute
    fn set_form_target(&self, target: Option<&str>);

    /// Serialize the form's current field set
    fn collect_fields(&self) -> Result<MultipartPayload<Self::File>>;

    /// The file input's `name` attribute, if any
    fn file_input_name(&self) -> Option<String>;

    /// Files currently selected in the file input
    fn selected_files(&self) -> Vec<Self::File>;

    /// Ask the page to submit the form, firing its submit event
    fn request_submit(&self);

    /// Create a hidden frame with this name and add it to the document
    fn attach_frame(&self, name: &str) -> Result<()>;

    /// Remove the named frame from the document
    fn remove_frame(&self, name: &str);

    /// A surface for the controller's feedback dialog
    fn dialog_surface(&self) -> Self::Surface;

    /// Send the request and resolve with the parsed JSON body
    fn send_multipart(
        &self,
        request: MultipartRequest<Self::File>,
    ) -> LocalBoxFuture<'static, Result<Value>>;
}
