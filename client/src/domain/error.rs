//! Error taxonomy of the registration core.
//!
//! Every variant is recoverable within the current form session and nothing
//! is retried automatically; each requires a new user action.

use super::ValidationReport;
use super::ports::MapSurfaceError;

/// Why a registration attempt did not reach `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// One or more fields fail schema rules; the user corrects and resubmits.
    #[error("registration has {} invalid field(s)", .report.issues().len())]
    FieldValidation {
        /// Every violated rule.
        report: ValidationReport,
    },
    /// The schema passed but no location is chosen; focus moved to the map.
    #[error("no location has been selected on the map")]
    CoordinateUnset,
    /// The map surface failed. Surfaced, never retried.
    #[error("external capability failed: {0}")]
    ExternalCapability(#[from] MapSurfaceError),
}

impl RegistrationError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FieldValidation { .. } => "field_validation",
            Self::CoordinateUnset => "coordinate_unset",
            Self::ExternalCapability(_) => "external_capability",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistrationRule;
    use rstest::rstest;

    #[rstest]
    fn field_validation_counts_issues() {
        let report: ValidationReport = [
            RegistrationRule::EmailFormat,
            RegistrationRule::PasswordTooShort,
        ]
        .into_iter()
        .collect();
        let err = RegistrationError::FieldValidation { report };
        assert_eq!(err.to_string(), "registration has 2 invalid field(s)");
        assert_eq!(err.code(), "field_validation");
    }

    #[rstest]
    fn map_failures_convert_into_external_capability() {
        let err = RegistrationError::from(MapSurfaceError::initialisation("no webgl"));
        assert_eq!(
            err.to_string(),
            "external capability failed: map surface failed to initialise: no webgl"
        );
    }
}
