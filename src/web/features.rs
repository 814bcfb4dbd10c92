use crate::capability::FeatureProbe;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Element, Window};

/// Feature probe backed by the live browser globals
pub struct BrowserFeatures {
    window: Window,
    scratch: Option<Element>,
}

impl BrowserFeatures {
    pub fn new(window: Window) -> Self {
        let scratch = window
            .document()
            .and_then(|document| document.create_element("div").ok());
        Self { window, scratch }
    }

    fn scratch_has(&self, property: &str) -> bool {
        self.scratch
            .as_ref()
            .map(|div| Reflect::has(div, &JsValue::from_str(property)).unwrap_or(false))
            .unwrap_or(false)
    }

    fn window_has(&self, property: &str) -> bool {
        Reflect::has(&self.window, &JsValue::from_str(property)).unwrap_or(false)
    }
}

impl FeatureProbe for BrowserFeatures {
    fn has_drag_and_drop(&self) -> bool {
        self.scratch_has("draggable")
            || (self.scratch_has("ondragstart") && self.scratch_has("ondrop"))
    }

    fn has_form_data(&self) -> bool {
        self.window_has("FormData")
    }

    fn has_file_reader(&self) -> bool {
        self.window_has("FileReader")
    }
}
