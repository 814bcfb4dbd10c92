//! Browser bindings
//!
//! Wires an `UploadController` to a real form: drag-family, `change`,
//! `submit` and frame `load` events are translated into controller calls,
//! and `fileUpload` is exported for plain JavaScript callers.

pub mod dialog;
pub mod features;
pub mod host;
pub mod transport;

use crate::config::UploadConfig;
use crate::error::{Result, UploadError};
use crate::upload::{DragEventKind, Submission, UploadController, UploadMode, UploadOptions};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, HtmlInputElement};

pub use dialog::WebDialogSurface;
pub use features::BrowserFeatures;
pub use host::{dispatch_submit, frame_body_text, WebFile, WebUploadHost};

/// Attribute holding an optional JSON `UploadConfig` on the form
pub const CONFIG_ATTRIBUTE: &str = "data-upload-config";

pub(crate) fn js_error(operation: &'static str) -> impl Fn(JsValue) -> UploadError {
    move |err| UploadError::dom(operation, format!("{:?}", err))
}

type WebController = UploadController<WebUploadHost>;

#[derive(Default)]
struct FrameWatch {
    load: Option<EventListener>,
    timeout: Option<Timeout>,
}

/// A bound form; dropping it removes every listener
pub struct UploadBinding {
    controller: Rc<WebController>,
    listeners: Vec<EventListener>,
}

impl UploadBinding {
    pub fn controller(&self) -> &Rc<WebController> {
        &self.controller
    }

    /// Keep the listeners installed for the rest of the page's life
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

/// Bind an upload controller to a form and its file input
pub fn bind(
    form: Element,
    file_input: HtmlInputElement,
    options: UploadOptions,
) -> Result<UploadBinding> {
    let window = web_sys::window().ok_or_else(|| UploadError::dom("bind", "no window"))?;
    let document = form
        .owner_document()
        .ok_or_else(|| UploadError::dom("bind", "form has no owner document"))?;

    let probe = BrowserFeatures::new(window);
    let host = WebUploadHost::new(document, form.clone(), file_input.clone());
    let controller = Rc::new(UploadController::bind(host, &probe, options)?);
    let watch = Rc::new(RefCell::new(FrameWatch::default()));
    let mut listeners = Vec::new();

    if controller.mode() == UploadMode::Advanced {
        for kind in DragEventKind::ALL {
            let controller = controller.clone();
            listeners.push(EventListener::new_with_options(
                &form,
                kind.name(),
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    event.stop_propagation();
                    controller.on_drag(kind);
                    if kind == DragEventKind::Drop {
                        controller.on_drop(dropped_files(event));
                    }
                },
            ));
        }
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(&file_input, "change", move |_| {
            controller.on_input_change();
        }));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| match controller.prepare_submit() {
                Submission::Multipart(request) => {
                    event.prevent_default();
                    let controller = controller.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        controller.run_transfer(request).await;
                    });
                }
                Submission::Native { frame_name } => watch_frame(&controller, &watch, frame_name),
                Submission::Rejected | Submission::Aborted(_) => {
                    event.prevent_default();
                    event.stop_propagation();
                }
            },
        ));
    }

    Ok(UploadBinding {
        controller,
        listeners,
    })
}

fn dropped_files(event: &Event) -> Vec<WebFile> {
    let Some(files) = event
        .dyn_ref::<DragEvent>()
        .and_then(DragEvent::data_transfer)
        .and_then(|transfer| transfer.files())
    else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(WebFile)
        .collect()
}

fn watch_frame(
    controller: &Rc<WebController>,
    watch: &Rc<RefCell<FrameWatch>>,
    frame_name: String,
) {
    let Some(frame) = controller.host().frame(&frame_name) else {
        log::error!("Upload frame {} vanished before submission", frame_name);
        return;
    };

    let load = {
        let controller = controller.clone();
        let watch = watch.clone();
        let name = frame_name.clone();
        let target = frame.clone();
        EventListener::once(&frame, "load", move |_| {
            watch.borrow_mut().timeout.take();
            let body = frame_body_text(&target);
            if let Err(err) = controller.on_frame_load(&name, &body) {
                log::error!("Upload frame {} failed: {}", name, err);
            }
        })
    };

    let timeout = controller.options().frame_timeout_duration().map(|duration| {
        let controller = controller.clone();
        let watch = watch.clone();
        // setTimeout takes a signed 32-bit delay
        let millis = duration.as_millis().min(i32::MAX as u128) as u32;
        Timeout::new(millis, move || {
            watch.borrow_mut().load.take();
            if let Err(err) = controller.on_frame_timeout(&frame_name) {
                log::debug!("Ignoring stale frame timeout: {}", err);
            }
        })
    });

    let mut watch = watch.borrow_mut();
    watch.timeout = timeout;
    if let Some(previous) = watch.load.replace(load) {
        // a completion callback may submit again from inside the old listener
        wasm_bindgen_futures::spawn_local(async move { drop(previous) });
    }
}

fn config_from_attribute(form: &Element) -> UploadConfig {
    let Some(json) = form.get_attribute(CONFIG_ATTRIBUTE) else {
        return UploadConfig::default();
    };
    UploadConfig::from_json(&json).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid {}: {}", CONFIG_ATTRIBUTE, err);
        UploadConfig::default()
    })
}

/// JavaScript entry point: `fileUpload(form, fileInput, callback, maxSize?)`
///
/// Binding problems are logged and never thrown; an invalid form simply
/// gets no listeners.
#[wasm_bindgen(js_name = fileUpload)]
pub fn file_upload(
    form: Element,
    file_input: HtmlInputElement,
    callback: js_sys::Function,
    max_size: Option<f64>,
) {
    let mut options = config_from_attribute(&form).to_options();
    if let Some(max_size) = max_size {
        options = options.max_size(max_size as u64);
    }

    let options = options.on_complete(move |payload| {
        let value = match js_sys::JSON::parse(&payload.to_string()) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Failed to hand upload response to JavaScript: {:?}", err);
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            log::error!("Upload completion callback threw: {:?}", err);
        }
    });

    match bind(form, file_input, options) {
        Ok(binding) => binding.forget(),
        Err(err) => log::warn!("fileUpload: {}", err),
    }
}
