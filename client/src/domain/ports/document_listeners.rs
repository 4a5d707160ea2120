//! Driven port for document-level pointer listeners.
//!
//! Dropdowns register a listener only while open. Registration is held by a
//! [`crate::domain::ClickListenerGuard`], so the listener is removed on close
//! or when the owning component is dropped.

/// Identifier of a registered document click listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap an adapter-issued identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Adapter-issued identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Port for adding and removing document click listeners.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentListeners {
    /// Register a click listener on behalf of the element `owner`.
    fn add_click_listener(&self, owner: &str) -> ListenerId;

    /// Remove a listener previously returned by `add_click_listener`.
    fn remove_click_listener(&self, listener: ListenerId);
}
