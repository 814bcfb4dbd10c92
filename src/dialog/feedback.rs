//! Feedback dialog lifecycle
//!
//! A `FeedbackDialog` owns its configuration and a surface that knows how
//! to put markup into the page and take it out again. The dialog tracks
//! whether it is visible so that repeated `show`/`hide` calls are no-ops.

use crate::dialog::types::DialogConfig;
use crate::error::Result;
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Handle the surface calls when the dismiss button is clicked
#[derive(Clone)]
pub struct DismissHandle {
    action: Rc<dyn Fn()>,
}

impl DismissHandle {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            action: Rc::new(action),
        }
    }

    /// Run the dialog's dismiss action
    pub fn dismiss(&self) {
        (self.action)()
    }
}

impl std::fmt::Debug for DismissHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DismissHandle")
    }
}

/// Where a dialog is rendered
pub trait DialogSurface {
    /// Append the markup to the visible document
    ///
    /// When the markup contains a dismiss button, the surface must call
    /// `dismiss.dismiss()` on click.
    fn attach(&self, markup: &str, dismiss: DismissHandle) -> Result<()>;

    /// Remove whatever `attach` added
    fn detach(&self);
}

struct DialogInner<S: DialogSurface> {
    config: DialogConfig,
    surface: S,
    visible: Cell<bool>,
}

/// A modal dialog built from a `DialogConfig`
///
/// Cloning yields another handle to the same dialog.
pub struct FeedbackDialog<S: DialogSurface> {
    inner: Rc<DialogInner<S>>,
}

impl<S: DialogSurface> Clone for FeedbackDialog<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: DialogSurface + 'static> FeedbackDialog<S> {
    pub fn new(config: DialogConfig, surface: S) -> Self {
        Self {
            inner: Rc::new(DialogInner {
                config,
                surface,
                visible: Cell::new(false),
            }),
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.inner.config
    }

    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    pub fn is_visible(&self) -> bool {
        self.inner.visible.get()
    }

    pub fn markup(&self) -> String {
        self.inner.config.markup()
    }

    /// Show the dialog
    pub fn show(&self) -> Result<()> {
        if self.is_visible() {
            return Ok(());
        }

        let weak: Weak<DialogInner<S>> = Rc::downgrade(&self.inner);
        let handle = DismissHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                FeedbackDialog { inner }.dismiss();
            }
        });

        self.inner.surface.attach(&self.markup(), handle)?;
        self.inner.visible.set(true);
        Ok(())
    }

    /// Hide the dialog
    pub fn hide(&self) {
        if !self.is_visible() {
            return;
        }
        self.inner.surface.detach();
        self.inner.visible.set(false);
    }

    /// Dismiss button action: run the callback, then hide
    pub fn dismiss(&self) {
        if let Some(callback) = self.inner.config.on_dismiss.clone() {
            callback();
        }
        self.hide();
    }
}
