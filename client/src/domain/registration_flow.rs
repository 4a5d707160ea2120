//! The registration view: form, map capture and submit handler mounted
//! together.

use std::rc::Rc;

use tracing::{debug, instrument};

use super::ports::{ElementFocus, MapSurface};
use super::{
    Coordinate, GeocoordinateCapture, LngLat, RegistrationError, RegistrationForm,
    RegistrationInput, RegistrationSchema, SubmitHandler, TextField,
};

/// One mounted registration view.
///
/// Dropping the view unmounts it and destroys the capture map.
#[derive(Debug)]
pub struct RegistrationView {
    form: RegistrationForm,
    capture: GeocoordinateCapture,
    submit: SubmitHandler,
}

impl RegistrationView {
    /// Mount the view and create its map.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ExternalCapability`] when the map cannot
    /// be created.
    pub fn mount(
        schema: RegistrationSchema,
        surface: Rc<dyn MapSurface>,
        focus: Rc<dyn ElementFocus>,
    ) -> Result<Self, RegistrationError> {
        let capture = GeocoordinateCapture::mount(surface)?;
        Ok(Self {
            form: RegistrationForm::new(schema),
            capture,
            submit: SubmitHandler::new(focus),
        })
    }

    /// Forward a text change to the form.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.form.set_text(field, value);
    }

    /// Handle a raw map click.
    ///
    /// The coordinate is staged and its error cleared before the marker is
    /// touched, so a marker failure never loses the click.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ExternalCapability`] when the marker
    /// cannot be placed.
    #[instrument(level = "debug", skip(self))]
    pub fn on_map_click(&mut self, raw: LngLat) -> Result<Coordinate, RegistrationError> {
        let coordinate = Coordinate::from_click(raw);
        self.form.set_coordinate(coordinate);
        self.capture.pin(coordinate)?;
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "location pinned"
        );
        Ok(coordinate)
    }

    /// Handle a submit click.
    ///
    /// # Errors
    ///
    /// See [`SubmitHandler::submit`].
    pub fn submit(&mut self) -> Result<RegistrationInput, RegistrationError> {
        self.submit.submit(&mut self.form)
    }

    /// Form state.
    #[must_use]
    pub const fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Map capture state.
    #[must_use]
    pub const fn capture(&self) -> &GeocoordinateCapture {
        &self.capture
    }

    /// Submit state machine.
    #[must_use]
    pub const fn submit_handler(&self) -> &SubmitHandler {
        &self.submit
    }
}
