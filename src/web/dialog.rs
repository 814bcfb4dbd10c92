use crate::dialog::{DialogSurface, DismissHandle};
use crate::error::{Result, UploadError};
use crate::web::js_error;
use gloo_events::EventListener;
use std::cell::RefCell;
use web_sys::{Document, Element};

/// Renders dialogs at the end of the document body
pub struct WebDialogSurface {
    document: Document,
    node: RefCell<Option<Element>>,
    click: RefCell<Option<EventListener>>,
}

impl WebDialogSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            node: RefCell::new(None),
            click: RefCell::new(None),
        }
    }
}

impl DialogSurface for WebDialogSurface {
    fn attach(&self, markup: &str, dismiss: DismissHandle) -> Result<()> {
        let container = self
            .document
            .create_element("div")
            .map_err(js_error("create dialog container"))?;
        container.set_inner_html(markup);

        let node = container
            .first_element_child()
            .ok_or_else(|| UploadError::dom("render dialog", "markup produced no element"))?;
        let body = self
            .document
            .body()
            .ok_or_else(|| UploadError::dom("attach dialog", "document has no body"))?;
        body.append_child(&node).map_err(js_error("attach dialog"))?;

        if let Ok(Some(button)) = node.query_selector("button") {
            let listener = EventListener::new(&button, "click", move |_| dismiss.dismiss());
            *self.click.borrow_mut() = Some(listener);
        }
        *self.node.borrow_mut() = Some(node);
        Ok(())
    }

    fn detach(&self) {
        if let Some(listener) = self.click.borrow_mut().take() {
            // detach usually runs from inside this listener's own callback
            wasm_bindgen_futures::spawn_local(async move { drop(listener) });
        }
        if let Some(node) = self.node.borrow_mut().take() {
            node.remove();
        }
    }
}
