//! DOM-backed upload host

use crate::error::{Result, UploadError};
use crate::upload::host::{SelectedFile, UploadHost};
use crate::upload::payload::{MultipartPayload, MultipartRequest};
use crate::upload::types::StateClass;
use crate::web::dialog::WebDialogSurface;
use crate::web::js_error;
use crate::web::transport;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventInit, File, FormData, HtmlFormElement, HtmlIFrameElement,
    HtmlInputElement,
};

/// A browser `File`
#[derive(Debug, Clone)]
pub struct WebFile(pub File);

impl SelectedFile for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

impl From<File> for WebFile {
    fn from(file: File) -> Self {
        WebFile(file)
    }
}

pub struct WebUploadHost {
    document: Document,
    form: Element,
    input: HtmlInputElement,
    frames: RefCell<HashMap<String, HtmlIFrameElement>>,
}

impl WebUploadHost {
    pub fn new(document: Document, form: Element, input: HtmlInputElement) -> Self {
        Self {
            document,
            form,
            input,
            frames: RefCell::new(HashMap::new()),
        }
    }

    pub fn form(&self) -> &Element {
        &self.form
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    /// A frame created by `attach_frame` and not removed yet
    pub fn frame(&self, name: &str) -> Option<HtmlIFrameElement> {
        self.frames.borrow().get(name).cloned()
    }

    fn form_element(&self) -> Option<&HtmlFormElement> {
        self.form.dyn_ref::<HtmlFormElement>()
    }
}

impl UploadHost for WebUploadHost {
    type File = WebFile;
    type Surface = WebDialogSurface;

    fn is_form(&self) -> bool {
        self.form_element().is_some()
    }

    fn set_class(&self, class: StateClass, enabled: bool) {
        if let Err(err) = self
            .form
            .class_list()
            .toggle_with_force(class.as_str(), enabled)
        {
            log::warn!("Failed to toggle class {}: {:?}", class, err);
        }
    }

    fn form_action(&self) -> String {
        self.form_element()
            .map(HtmlFormElement::action)
            .unwrap_or_default()
    }

    fn form_method(&self) -> String {
        self.form.get_attribute("method").unwrap_or_default()
    }

    fn set_form_target(&self, target: Option<&str>) {
        let result = match target {
            Some(name) => self.form.set_attribute("target", name),
            None => self.form.remove_attribute("target"),
        };
        if let Err(err) = result {
            log::warn!("Failed to update form target: {:?}", err);
        }
    }

    fn collect_fields(&self) -> Result<MultipartPayload<WebFile>> {
        let form = self
            .form_element()
            .ok_or_else(|| UploadError::invalid_target("expected a form element"))?;
        let form_data = FormData::new_with_form(form).map_err(js_error("serialize form"))?;

        let mut payload = MultipartPayload::new();
        let entries = js_sys::try_iter(&form_data)
            .map_err(js_error("iterate form data"))?
            .ok_or_else(|| UploadError::dom("iterate form data", "FormData is not iterable"))?;

        for entry in entries {
            let entry: js_sys::Array = entry
                .map_err(js_error("read form entry"))?
                .unchecked_into();
            let Some(name) = entry.get(0).as_string() else {
                continue;
            };
            let value = entry.get(1);
            if let Some(text) = value.as_string() {
                payload.append_text(name, text);
            } else if let Ok(file) = value.dyn_into::<File>() {
                payload.append_file(name, WebFile(file));
            }
        }

        Ok(payload)
    }

    fn file_input_name(&self) -> Option<String> {
        let name = self.input.name();
        (!name.is_empty()).then_some(name)
    }

    fn selected_files(&self) -> Vec<WebFile> {
        let Some(files) = self.input.files() else {
            return Vec::new();
        };
        (0..files.length())
            .filter_map(|index| files.get(index))
            .map(WebFile)
            .collect()
    }

    fn request_submit(&self) {
        let Some(form) = self.form_element() else {
            return;
        };
        if form.request_submit().is_ok() {
            return;
        }
        // runtimes without requestSubmit
        if let Err(err) = dispatch_submit(form) {
            log::error!("Failed to submit upload form: {}", err);
        }
    }

    fn attach_frame(&self, name: &str) -> Result<()> {
        let frame: HtmlIFrameElement = self
            .document
            .create_element("iframe")
            .map_err(js_error("create upload frame"))?
            .unchecked_into();
        frame.set_name(name);
        frame
            .set_attribute("style", "display: none;")
            .map_err(js_error("hide upload frame"))?;

        let body = self
            .document
            .body()
            .ok_or_else(|| UploadError::dom("attach upload frame", "document has no body"))?;
        body.append_child(&frame)
            .map_err(js_error("attach upload frame"))?;

        self.frames.borrow_mut().insert(name.to_string(), frame);
        Ok(())
    }

    fn remove_frame(&self, name: &str) {
        if let Some(frame) = self.frames.borrow_mut().remove(name) {
            frame.remove();
        }
    }

    fn dialog_surface(&self) -> WebDialogSurface {
        WebDialogSurface::new(self.document.clone())
    }

    fn send_multipart(
        &self,
        request: MultipartRequest<WebFile>,
    ) -> LocalBoxFuture<'static, Result<Value>> {
        transport::send_multipart(request).boxed_local()
    }
}

/// Fire a cancelable `submit` event and submit natively unless a listener
/// prevented it
pub fn dispatch_submit(form: &HtmlFormElement) -> Result<()> {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init)
        .map_err(js_error("create submit event"))?;

    let proceed = form
        .dispatch_event(&event)
        .map_err(js_error("dispatch submit event"))?;
    if proceed {
        form.submit().map_err(js_error("submit form"))?;
    }
    Ok(())
}

/// Text of the frame document's body, empty when it cannot be read
pub fn frame_body_text(frame: &HtmlIFrameElement) -> String {
    frame
        .content_document()
        .and_then(|document| document.body())
        .and_then(|body| body.text_content())
        .unwrap_or_default()
}
