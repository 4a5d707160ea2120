//! Driven port for moving keyboard focus to a document element.

/// Port wrapping `document.getElementById(id)?.focus()`.
#[cfg_attr(test, mockall::automock)]
pub trait ElementFocus {
    /// Focus the element with `element_id`; returns false when it is absent.
    fn focus(&self, element_id: &str) -> bool;
}
