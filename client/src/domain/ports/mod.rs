//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Browser capabilities (map rendering, element focus, document listeners)
//! and the placeholder REST API are reached only through these traits.

mod macros;

pub(crate) use macros::define_port_error;

mod document_listeners;
mod element_focus;
mod login_service;
mod map_surface;
mod phone_validator;
mod placeholder_source;

#[cfg(test)]
pub use document_listeners::MockDocumentListeners;
pub use document_listeners::{DocumentListeners, ListenerId};
#[cfg(test)]
pub use element_focus::MockElementFocus;
pub use element_focus::ElementFocus;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginError, LoginService};
#[cfg(test)]
pub use map_surface::MockMapSurface;
pub use map_surface::{
    FlyTo, MapHandle, MapInteractions, MapOptions, MapSurface, MapSurfaceError, MarkerHandle,
    MarkerStyle,
};
#[cfg(test)]
pub use phone_validator::MockPhoneValidator;
pub use phone_validator::{FixturePhoneValidator, PhoneValidator};
#[cfg(test)]
pub use placeholder_source::MockPlaceholderSource;
pub use placeholder_source::{FixturePlaceholderSource, PlaceholderSource, PlaceholderSourceError};
