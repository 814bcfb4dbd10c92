use std::rc::Rc;

/// Title of the dialog shown when a file exceeds the size limit
pub const FILE_TOO_LARGE_TITLE: &str = "Upload Error";

/// Message of the dialog shown when a file exceeds the size limit
pub const FILE_TOO_LARGE_MESSAGE: &str =
    "Your image exceeds the maximum upload size. Reduce the size of your image and try again.";

/// What the dialog body contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogBody {
    /// Title and message text, optionally followed by a dismiss button
    Message(String),
    /// A bare spinner shown while the page waits on something
    Spinner,
}

/// Configuration for a feedback dialog
///
/// Behavior varies by configuration: a dismiss button is rendered only
/// when `dismiss_label` is set, and `on_dismiss` runs before the dialog
/// hides itself.
#[derive(Clone)]
pub struct DialogConfig {
    pub title: Option<String>,
    pub body: DialogBody,
    pub dismiss_label: Option<String>,
    pub on_dismiss: Option<Rc<dyn Fn()>>,
}

impl std::fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogConfig")
            .field("title", &self.title)
            .field("body", &self.body)
            .field("dismiss_label", &self.dismiss_label)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl DialogConfig {
    /// A dialog showing a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            title: None,
            body: DialogBody::Message(message.into()),
            dismiss_label: None,
            on_dismiss: None,
        }
    }

    /// A wait dialog with a spinner and nothing else
    pub fn spinner() -> Self {
        Self {
            title: None,
            body: DialogBody::Spinner,
            dismiss_label: None,
            on_dismiss: None,
        }
    }

    /// The dialog shown when a staged file is over the size limit
    pub fn file_too_large() -> Self {
        Self::message(FILE_TOO_LARGE_MESSAGE)
            .title(FILE_TOO_LARGE_TITLE)
            .dismiss_label("OK")
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dismiss_label(mut self, label: impl Into<String>) -> Self {
        self.dismiss_label = Some(label.into());
        self
    }

    pub fn on_dismiss<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_dismiss = Some(Rc::new(callback));
        self
    }

    /// Whether the rendered dialog has a dismiss button
    pub fn is_dismissible(&self) -> bool {
        self.dismiss_label.is_some()
    }

    /// Render the dialog markup
    ///
    /// Class names are part of the page stylesheet contract and must not
    /// change. All text is escaped.
    pub fn markup(&self) -> String {
        match &self.body {
            DialogBody::Spinner => {
                r#"<div class="fs-modal"><div class="spinner"></div></div>"#.to_string()
            }
            DialogBody::Message(message) => {
                let mut content = String::new();
                if let Some(title) = &self.title {
                    content.push_str(&format!(
                        r#"<h4 class="title">{}</h4>"#,
                        html_escape::encode_text(title)
                    ));
                }
                content.push_str(&format!(
                    r#"<span class="content">{}</span>"#,
                    html_escape::encode_text(message)
                ));
                if let Some(label) = &self.dismiss_label {
                    content.push_str(&format!(
                        r#"<div class="flex center-h"><button class="button rounded">{}</button></div>"#,
                        html_escape::encode_text(label)
                    ));
                }
                format!(
                    r#"<div class="fs-modal"><div class="modal-content">{}</div></div>"#,
                    content
                )
            }
        }
    }
}
