//! Form controller for the registration view.
//!
//! All fields, phone included, live in one [`RegistrationInput`] container,
//! so the candidate validated on submit is always the candidate on screen.

use std::collections::BTreeMap;

use tracing::debug;

use super::{Coordinate, RegistrationField, RegistrationInput, RegistrationSchema, ValidationReport};

/// Field-scoped error messages. A field with no entry shows nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    messages: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// Record `message` for `field` unless a message is already shown there.
    pub fn record(&mut self, field: F, message: impl Into<String>) {
        self.messages.entry(field).or_insert_with(|| message.into());
    }

    /// Remove the message for `field`.
    pub fn clear(&mut self, field: F) {
        self.messages.remove(&field);
    }

    /// Message currently shown for `field`.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Whether no field shows a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Fields and messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.messages
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<&ValidationReport> for FieldErrors<RegistrationField> {
    fn from(report: &ValidationReport) -> Self {
        let mut errors = Self::default();
        for issue in report.issues() {
            errors.record(issue.field(), issue.message());
        }
        errors
    }
}

/// Text inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// First name input.
    FirstName,
    /// Last name input.
    LastName,
    /// Email input.
    Email,
    /// Phone input.
    Phone,
    /// Password input.
    Password,
}

impl From<TextField> for RegistrationField {
    fn from(field: TextField) -> Self {
        match field {
            TextField::FirstName => Self::FirstName,
            TextField::LastName => Self::LastName,
            TextField::Email => Self::Email,
            TextField::Phone => Self::Phone,
            TextField::Password => Self::Password,
        }
    }
}

/// Binds staged input to the schema and tracks per-field errors.
///
/// Before the first submit attempt edits are only staged. Afterwards each
/// edit re-validates its own field, clearing the message once it passes.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    schema: RegistrationSchema,
    input: RegistrationInput,
    errors: FieldErrors<RegistrationField>,
    submitted: bool,
}

impl RegistrationForm {
    /// Empty form with the coordinate at the sentinel.
    #[must_use]
    pub fn new(schema: RegistrationSchema) -> Self {
        Self {
            schema,
            input: RegistrationInput::default(),
            errors: FieldErrors::default(),
            submitted: false,
        }
    }

    /// Stage a text value.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::FirstName => self.input.first_name = value,
            TextField::LastName => self.input.last_name = value,
            TextField::Email => self.input.email = value,
            TextField::Phone => self.input.phone = value,
            TextField::Password => self.input.password = value,
        }
        if self.submitted {
            self.revalidate(field.into());
        }
    }

    /// Store a captured coordinate and clear its error immediately.
    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.input.coordinate = coordinate;
        self.errors.clear(RegistrationField::Coordinate);
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "coordinate staged"
        );
    }

    /// Validate the whole candidate atomically and replace every message.
    pub fn validate_all(&mut self) -> ValidationReport {
        self.submitted = true;
        let report = self.schema.validate(&self.input);
        self.errors = FieldErrors::from(&report);
        report
    }

    fn revalidate(&mut self, field: RegistrationField) {
        let report = self.schema.validate_field(&self.input, field);
        self.errors.clear(field);
        if let Some(issue) = report.issues().first() {
            self.errors.record(field, issue.message());
        }
    }

    /// Remove the message shown for `field`.
    pub fn clear_error(&mut self, field: RegistrationField) {
        self.errors.clear(field);
    }

    /// Current candidate.
    #[must_use]
    pub const fn input(&self) -> &RegistrationInput {
        &self.input
    }

    /// Current field errors.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors<RegistrationField> {
        &self.errors
    }

    /// Message shown for `field`, if any.
    #[must_use]
    pub fn error(&self, field: RegistrationField) -> Option<&str> {
        self.errors.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixturePhoneValidator;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm::new(RegistrationSchema::new(Arc::new(FixturePhoneValidator)))
    }

    fn fill_valid(form: &mut RegistrationForm) {
        form.set_text(TextField::FirstName, "Anne Marie");
        form.set_text(TextField::LastName, "Brien");
        form.set_text(TextField::Email, "anne@example.com");
        form.set_text(TextField::Phone, "+14155550123");
        form.set_text(TextField::Password, "longenough1");
        form.set_coordinate(Coordinate::new(10.0, 20.0));
    }

    #[rstest]
    fn staging_before_submit_does_not_validate(mut form: RegistrationForm) {
        form.set_text(TextField::Email, "nope");
        assert!(form.errors().is_empty());
    }

    #[rstest]
    fn phone_is_part_of_the_validated_candidate(mut form: RegistrationForm) {
        fill_valid(&mut form);
        let report = form.validate_all();
        assert!(report.is_valid(), "unexpected issues: {report:?}");
        assert_eq!(form.input().phone, "+14155550123");
    }

    #[rstest]
    fn first_message_per_field_is_shown(mut form: RegistrationForm) {
        fill_valid(&mut form);
        form.set_text(TextField::FirstName, "Anne3 Marie Claire");
        form.validate_all();
        assert_eq!(
            form.error(RegistrationField::FirstName),
            Some("First name must contain only letters")
        );
    }

    #[rstest]
    fn edits_after_submit_revalidate_their_field(mut form: RegistrationForm) {
        fill_valid(&mut form);
        form.set_text(TextField::Password, "short1");
        form.validate_all();
        assert!(form.error(RegistrationField::Password).is_some());

        form.set_text(TextField::Password, "longenough1");
        assert_eq!(form.error(RegistrationField::Password), None);

        form.set_text(TextField::Email, "broken");
        assert_eq!(
            form.error(RegistrationField::Email),
            Some("Invalid email address.")
        );
    }

    #[rstest]
    fn coordinate_error_clears_on_capture(mut form: RegistrationForm) {
        form.validate_all();
        assert!(form.error(RegistrationField::Coordinate).is_some());

        form.set_coordinate(Coordinate::new(1.0, 1.0));
        assert_eq!(form.error(RegistrationField::Coordinate), None);
        assert!(form.error(RegistrationField::FirstName).is_some());
    }
}
