//! Terminal submit action of the registration form.
//!
//! ```text
//! Idle -> Validating -> Rejected -> Idle
//!                    -> AcceptedButCoordinateMissing -> Idle
//!                    -> Ready
//! ```
//!
//! When the sentinel coordinate is the only failing rule the coordinate
//! guard takes precedence: focus moves to the map and no coordinate message
//! is shown. When other fields fail too, every message is surfaced.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::capture::MAP_ELEMENT_ID;
use super::ports::ElementFocus;
use super::{
    RegistrationError, RegistrationField, RegistrationForm, RegistrationInput, RegistrationRule,
    ValidationReport,
};

/// Phase of the submit state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPhase {
    /// Waiting for a submit click.
    Idle,
    /// The candidate is being checked.
    Validating,
    /// Schema validation failed.
    Rejected(ValidationReport),
    /// Every field passed but no location is chosen.
    AcceptedButCoordinateMissing,
    /// The candidate was accepted.
    Ready,
}

/// Drives one form through the submit state machine.
pub struct SubmitHandler {
    focus: Rc<dyn ElementFocus>,
    phase: SubmitPhase,
    transitions: Vec<SubmitPhase>,
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl SubmitHandler {
    /// Create an idle handler that refocuses through `focus`.
    #[must_use]
    pub fn new(focus: Rc<dyn ElementFocus>) -> Self {
        Self {
            focus,
            phase: SubmitPhase::Idle,
            transitions: Vec::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Phases entered during the latest submit, in order.
    #[must_use]
    pub fn transitions(&self) -> &[SubmitPhase] {
        &self.transitions
    }

    /// Handle a submit click.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::FieldValidation`] with every issue when
    /// the schema rejects the candidate, and
    /// [`RegistrationError::CoordinateUnset`] when the location is missing.
    pub fn submit(
        &mut self,
        form: &mut RegistrationForm,
    ) -> Result<RegistrationInput, RegistrationError> {
        self.enter(SubmitPhase::Validating);
        let report = form.validate_all();

        if report.only(RegistrationRule::CoordinateUnset) {
            form.clear_error(RegistrationField::Coordinate);
            return Err(self.coordinate_missing());
        }
        if !report.is_valid() {
            let rules: Vec<_> = report
                .issues()
                .iter()
                .map(|issue| issue.rule().code())
                .collect();
            info!(?rules, "registration rejected");
            self.enter(SubmitPhase::Rejected(report.clone()));
            self.enter(SubmitPhase::Idle);
            return Err(RegistrationError::FieldValidation { report });
        }

        self.guard_coordinate(form.input())?;
        self.enter(SubmitPhase::Ready);
        info!("registration accepted");
        Ok(form.input().clone())
    }

    /// Explicit sentinel check run after the schema has passed.
    fn guard_coordinate(&mut self, input: &RegistrationInput) -> Result<(), RegistrationError> {
        if input.coordinate.is_sentinel() {
            return Err(self.coordinate_missing());
        }
        Ok(())
    }

    fn coordinate_missing(&mut self) -> RegistrationError {
        self.enter(SubmitPhase::AcceptedButCoordinateMissing);
        if !self.focus.focus(MAP_ELEMENT_ID) {
            warn!(
                element = MAP_ELEMENT_ID,
                "map element missing; focus not moved"
            );
        }
        self.enter(SubmitPhase::Idle);
        RegistrationError::CoordinateUnset
    }

    fn enter(&mut self, phase: SubmitPhase) {
        debug!(from = ?self.phase, to = ?phase, "submit transition");
        if phase == SubmitPhase::Validating {
            self.transitions.clear();
        }
        self.transitions.push(phase.clone());
        self.phase = phase;
    }
}
