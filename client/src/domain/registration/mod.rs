//! Registration candidate and its validation schema.
//!
//! The schema is declarative: each [`RegistrationRule`] names its field,
//! message and predicate. Every rule runs; nothing fails fast, so a candidate
//! with several problems reports all of them at once.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Coordinate;
use super::email;
use super::ports::PhoneValidator;

/// Minimum length of either name.
pub const NAME_MIN: usize = 2;
/// Maximum number of whitespace-separated first-name tokens.
pub const FIRST_NAME_MAX_TOKENS: usize = 2;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;

/// Fields of the registration form in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationField {
    /// Given name or names.
    FirstName,
    /// Family name.
    LastName,
    /// Contact email.
    Email,
    /// International phone number.
    Phone,
    /// Location picked on the map.
    Coordinate,
    /// Account password.
    Password,
}

impl RegistrationField {
    /// Every field, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Coordinate,
        Self::Password,
    ];

    /// Field path as used by the form markup.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Coordinate => "coordinate",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A registration candidate as typed by the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationInput {
    /// Given name or names.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Phone number with its `+` country prefix.
    pub phone: String,
    /// Picked location; the sentinel until the map is clicked.
    pub coordinate: Coordinate,
    /// Account password.
    pub password: String,
}

/// A single validation rule of the registration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationRule {
    /// First name shorter than [`NAME_MIN`].
    FirstNameTooShort,
    /// First name is not letters separated by single spaces.
    FirstNameLettersOnly,
    /// First name has more than [`FIRST_NAME_MAX_TOKENS`] names.
    FirstNameTwoNamesOnly,
    /// Last name shorter than [`NAME_MIN`].
    LastNameTooShort,
    /// Last name contains anything but letters.
    LastNameLettersOnly,
    /// Email is not syntactically valid.
    EmailFormat,
    /// Phone number is not valid for its region.
    PhoneValidity,
    /// Coordinate is still the sentinel.
    CoordinateUnset,
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort,
}

impl RegistrationRule {
    /// Every rule, grouped by field in declaration order.
    pub const ALL: [Self; 9] = [
        Self::FirstNameTooShort,
        Self::FirstNameLettersOnly,
        Self::FirstNameTwoNamesOnly,
        Self::LastNameTooShort,
        Self::LastNameLettersOnly,
        Self::EmailFormat,
        Self::PhoneValidity,
        Self::CoordinateUnset,
        Self::PasswordTooShort,
    ];

    /// Field the rule reports against.
    #[must_use]
    pub const fn field(self) -> RegistrationField {
        match self {
            Self::FirstNameTooShort | Self::FirstNameLettersOnly | Self::FirstNameTwoNamesOnly => {
                RegistrationField::FirstName
            }
            Self::LastNameTooShort | Self::LastNameLettersOnly => RegistrationField::LastName,
            Self::EmailFormat => RegistrationField::Email,
            Self::PhoneValidity => RegistrationField::Phone,
            Self::CoordinateUnset => RegistrationField::Coordinate,
            Self::PasswordTooShort => RegistrationField::Password,
        }
    }

    /// Message shown next to the field.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::FirstNameTooShort => "First name is too short.",
            Self::FirstNameLettersOnly => "First name must contain only letters",
            Self::FirstNameTwoNamesOnly => "Two names only.",
            Self::LastNameTooShort => "Last name is too short.",
            Self::LastNameLettersOnly => "Last name must contain only letters",
            Self::EmailFormat => "Invalid email address.",
            Self::PhoneValidity => "Invalid phone number for the country.",
            Self::CoordinateUnset => "Please select a location on the map.",
            Self::PasswordTooShort => "Password must be greater than 8 characters.",
        }
    }

    /// Machine-readable rule code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FirstNameTooShort | Self::LastNameTooShort | Self::PasswordTooShort => {
                "too_short"
            }
            Self::FirstNameLettersOnly | Self::LastNameLettersOnly => "letters_only",
            Self::FirstNameTwoNamesOnly => "too_many_names",
            Self::EmailFormat => "invalid_email",
            Self::PhoneValidity => "invalid_phone",
            Self::CoordinateUnset => "coordinate_unset",
        }
    }
}

/// One violated rule, addressed by field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    rule: RegistrationRule,
}

impl FieldIssue {
    /// Violated rule.
    #[must_use]
    pub const fn rule(&self) -> RegistrationRule {
        self.rule
    }

    /// Field the issue belongs to.
    #[must_use]
    pub const fn field(&self) -> RegistrationField {
        self.rule.field()
    }

    /// Human-readable message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.rule.message()
    }
}

impl From<RegistrationRule> for FieldIssue {
    fn from(rule: RegistrationRule) -> Self {
        Self { rule }
    }
}

/// Ordered outcome of validating a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    /// Whether no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every issue in field declaration order, then rule order.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Issues reported against `field`.
    pub fn for_field(&self, field: RegistrationField) -> impl Iterator<Item = &FieldIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.field() == field)
    }

    /// Whether `rule` was violated.
    #[must_use]
    pub fn contains(&self, rule: RegistrationRule) -> bool {
        self.issues.iter().any(|issue| issue.rule == rule)
    }

    /// Whether every issue is an instance of `rule`.
    #[must_use]
    pub fn only(&self, rule: RegistrationRule) -> bool {
        !self.issues.is_empty() && self.issues.iter().all(|issue| issue.rule == rule)
    }
}

impl FromIterator<RegistrationRule> for ValidationReport {
    fn from_iter<T: IntoIterator<Item = RegistrationRule>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().map(FieldIssue::from).collect(),
        }
    }
}

/// Letters separated by single spaces; token count is checked separately.
static FIRST_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z]+(?: [a-zA-Z]+)*$").expect("Invalid first name regex"));

static LAST_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z]+$").expect("Invalid last name regex"));

/// Declarative rule set for [`RegistrationInput`].
#[derive(Clone)]
pub struct RegistrationSchema {
    phone: Arc<dyn PhoneValidator>,
}

impl fmt::Debug for RegistrationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationSchema").finish_non_exhaustive()
    }
}

impl RegistrationSchema {
    /// Build the schema around a phone validity oracle.
    #[must_use]
    pub fn new(phone: Arc<dyn PhoneValidator>) -> Self {
        Self { phone }
    }

    /// Validate the whole candidate. Every rule runs.
    #[must_use]
    pub fn validate(&self, input: &RegistrationInput) -> ValidationReport {
        RegistrationRule::ALL
            .into_iter()
            .filter(|rule| self.violates(*rule, input))
            .collect()
    }

    /// Validate the rules of a single field.
    #[must_use]
    pub fn validate_field(
        &self,
        input: &RegistrationInput,
        field: RegistrationField,
    ) -> ValidationReport {
        RegistrationRule::ALL
            .into_iter()
            .filter(|rule| rule.field() == field && self.violates(*rule, input))
            .collect()
    }

    fn violates(&self, rule: RegistrationRule, input: &RegistrationInput) -> bool {
        match rule {
            RegistrationRule::FirstNameTooShort => input.first_name.chars().count() < NAME_MIN,
            RegistrationRule::FirstNameLettersOnly => {
                !FIRST_NAME_RE.is_match(&input.first_name)
            }
            RegistrationRule::FirstNameTwoNamesOnly => {
                input.first_name.split_whitespace().count() > FIRST_NAME_MAX_TOKENS
            }
            RegistrationRule::LastNameTooShort => input.last_name.chars().count() < NAME_MIN,
            RegistrationRule::LastNameLettersOnly => !LAST_NAME_RE.is_match(&input.last_name),
            RegistrationRule::EmailFormat => !email::is_well_formed(&input.email),
            RegistrationRule::PhoneValidity => !self.phone.is_valid(&input.phone),
            RegistrationRule::CoordinateUnset => input.coordinate.is_sentinel(),
            RegistrationRule::PasswordTooShort => input.password.chars().count() < PASSWORD_MIN,
        }
    }
}
