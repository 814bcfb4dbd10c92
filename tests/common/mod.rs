//! Recording host shared by the integration tests

#![allow(dead_code)]

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use upload_widgets::{
    Capabilities, DialogSurface, DismissHandle, MultipartPayload, MultipartRequest, Result,
    SelectedFile, StateClass, UploadError, UploadHost,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    pub name: String,
    pub size: u64,
}

impl MockFile {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl SelectedFile for MockFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Default)]
pub struct SurfaceLog {
    pub attached: RefCell<Vec<String>>,
    pub detached: Cell<usize>,
    pub dismiss: RefCell<Option<DismissHandle>>,
}

impl SurfaceLog {
    pub fn attach_count(&self) -> usize {
        self.attached.borrow().len()
    }

    pub fn click_dismiss(&self) {
        let handle = self.dismiss.borrow().clone();
        if let Some(handle) = handle {
            handle.dismiss();
        }
    }
}

pub struct MockSurface {
    log: Rc<SurfaceLog>,
}

impl DialogSurface for MockSurface {
    fn attach(&self, markup: &str, dismiss: DismissHandle) -> Result<()> {
        self.log.attached.borrow_mut().push(markup.to_string());
        *self.log.dismiss.borrow_mut() = Some(dismiss);
        Ok(())
    }

    fn detach(&self) {
        self.log.detached.set(self.log.detached.get() + 1);
        self.log.dismiss.borrow_mut().take();
    }
}

pub enum MockResponse {
    Ready(Result<Value>),
    Deferred(oneshot::Receiver<Result<Value>>),
}

pub struct MockHost {
    pub is_form: bool,
    pub action: String,
    pub method: String,
    pub input_name: Option<String>,
    pub fields: RefCell<MultipartPayload<MockFile>>,
    pub selected: RefCell<Vec<MockFile>>,
    pub classes: RefCell<HashSet<StateClass>>,
    pub target: RefCell<Option<String>>,
    pub frames: RefCell<Vec<String>>,
    pub removed_frames: RefCell<Vec<String>>,
    pub fail_frames: Cell<bool>,
    pub submit_requests: Cell<usize>,
    pub sent: RefCell<Vec<MultipartRequest<MockFile>>>,
    pub responses: RefCell<VecDeque<MockResponse>>,
    pub surface: Rc<SurfaceLog>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            is_form: true,
            action: "/upload".to_string(),
            method: "post".to_string(),
            input_name: Some("attachment".to_string()),
            fields: RefCell::new(MultipartPayload::new()),
            selected: RefCell::new(Vec::new()),
            classes: RefCell::new(HashSet::new()),
            target: RefCell::new(None),
            frames: RefCell::new(Vec::new()),
            removed_frames: RefCell::new(Vec::new()),
            fail_frames: Cell::new(false),
            submit_requests: Cell::new(0),
            sent: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
            surface: Rc::new(SurfaceLog::default()),
        }
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_a_form() -> Self {
        Self {
            is_form: false,
            ..Self::default()
        }
    }

    pub fn with_field(self, name: &str, value: &str) -> Self {
        self.fields.borrow_mut().append_text(name, value);
        self
    }

    pub fn select(&self, file: MockFile) {
        *self.selected.borrow_mut() = vec![file];
    }

    pub fn respond(&self, response: Result<Value>) {
        self.responses
            .borrow_mut()
            .push_back(MockResponse::Ready(response));
    }

    pub fn respond_later(&self) -> oneshot::Sender<Result<Value>> {
        let (tx, rx) = oneshot::channel();
        self.responses
            .borrow_mut()
            .push_back(MockResponse::Deferred(rx));
        tx
    }

    pub fn class(&self, class: StateClass) -> bool {
        self.classes.borrow().contains(&class)
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl UploadHost for MockHost {
    type File = MockFile;
    type Surface = MockSurface;

    fn is_form(&self) -> bool {
        self.is_form
    }

    fn set_class(&self, class: StateClass, enabled: bool) {
        let mut classes = self.classes.borrow_mut();
        if enabled {
            classes.insert(class);
        } else {
            classes.remove(&class);
        }
    }

    fn form_action(&self) -> String {
        self.action.clone()
    }

    fn form_method(&self) -> String {
        self.method.clone()
    }

    fn set_form_target(&self, target: Option<&str>) {
        *self.target.borrow_mut() = target.map(str::to_string);
    }

    fn collect_fields(&self) -> Result<MultipartPayload<MockFile>> {
        let mut payload = self.fields.borrow().clone();
        if let Some(name) = &self.input_name {
            for file in self.selected.borrow().iter() {
                payload.append_file(name.clone(), file.clone());
            }
        }
        Ok(payload)
    }

    fn file_input_name(&self) -> Option<String> {
        self.input_name.clone()
    }

    fn selected_files(&self) -> Vec<MockFile> {
        self.selected.borrow().clone()
    }

    fn request_submit(&self) {
        self.submit_requests.set(self.submit_requests.get() + 1);
    }

    fn attach_frame(&self, name: &str) -> Result<()> {
        if self.fail_frames.get() {
            return Err(UploadError::dom("attach upload frame", "document has no body"));
        }
        self.frames.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn remove_frame(&self, name: &str) {
        self.frames.borrow_mut().retain(|frame| frame != name);
        self.removed_frames.borrow_mut().push(name.to_string());
    }

    fn dialog_surface(&self) -> MockSurface {
        MockSurface {
            log: self.surface.clone(),
        }
    }

    fn send_multipart(
        &self,
        request: MultipartRequest<MockFile>,
    ) -> LocalBoxFuture<'static, Result<Value>> {
        self.sent.borrow_mut().push(request);
        match self.responses.borrow_mut().pop_front() {
            Some(MockResponse::Ready(result)) => futures::future::ready(result).boxed_local(),
            Some(MockResponse::Deferred(rx)) => async move {
                rx.await
                    .unwrap_or_else(|_| Err(UploadError::transport("request dropped")))
            }
            .boxed_local(),
            None => futures::future::ready(Err(UploadError::transport("no response scripted")))
                .boxed_local(),
        }
    }
}

pub fn advanced() -> Capabilities {
    Capabilities {
        drag_and_drop: true,
        form_data: true,
        file_reader: true,
    }
}

pub fn no_form_data() -> Capabilities {
    Capabilities {
        form_data: false,
        ..advanced()
    }
}

/// Callback that records every payload it receives
pub fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl Fn(Value) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (calls, move |payload| sink.borrow_mut().push(payload))
}
