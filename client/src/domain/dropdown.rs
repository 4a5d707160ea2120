//! Dropdown menus dismissed by clicks outside them.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::ports::{DocumentListeners, ListenerId};

/// Removes a document click listener when dropped.
pub struct ClickListenerGuard {
    listeners: Rc<dyn DocumentListeners>,
    id: ListenerId,
}

impl ClickListenerGuard {
    /// Register a listener owned by `owner`.
    #[must_use]
    pub fn register(listeners: Rc<dyn DocumentListeners>, owner: &str) -> Self {
        let id = listeners.add_click_listener(owner);
        debug!(listener = id.get(), owner, "click listener added");
        Self { listeners, id }
    }
}

impl fmt::Debug for ClickListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickListenerGuard")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for ClickListenerGuard {
    fn drop(&mut self) {
        self.listeners.remove_click_listener(self.id);
        debug!(listener = self.id.get(), "click listener removed");
    }
}

/// Element ids from the clicked element up to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    path: Vec<String>,
}

impl ClickTarget {
    /// Build a target from its ancestor chain, innermost first.
    #[must_use]
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the click landed inside `element_id`.
    #[must_use]
    pub fn is_within(&self, element_id: &str) -> bool {
        self.path.iter().any(|id| id == element_id)
    }
}

/// A menu that listens for outside clicks only while open.
pub struct Dropdown {
    element_id: &'static str,
    listeners: Rc<dyn DocumentListeners>,
    guard: Option<ClickListenerGuard>,
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("element_id", &self.element_id)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    /// Closed dropdown rendered into `element_id`.
    #[must_use]
    pub fn new(element_id: &'static str, listeners: Rc<dyn DocumentListeners>) -> Self {
        Self {
            element_id,
            listeners,
            guard: None,
        }
    }

    /// Whether the menu is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Show the menu. Opening twice keeps one listener.
    pub fn open(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(ClickListenerGuard::register(
                Rc::clone(&self.listeners),
                self.element_id,
            ));
        }
    }

    /// Hide the menu and drop its listener.
    pub fn close(&mut self) {
        self.guard = None;
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Close when a document click lands outside the menu. Returns whether
    /// the menu closed.
    pub fn handle_document_click(&mut self, target: &ClickTarget) -> bool {
        if self.is_open() && !target.is_within(self.element_id) {
            self.close();
            return true;
        }
        false
    }
}
