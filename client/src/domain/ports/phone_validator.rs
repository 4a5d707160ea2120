//! Driven port for region-aware phone-number validity.
//!
//! Treated as a pure oracle: the same input always yields the same answer and
//! no I/O is performed.

/// Port answering whether a phone string is a dialable number.
#[cfg_attr(test, mockall::automock)]
pub trait PhoneValidator: Send + Sync {
    /// Return true when `phone` is valid for the region its prefix selects.
    fn is_valid(&self, phone: &str) -> bool;
}

/// Fixture validator accepting any `+`-prefixed string of 8 to 15 digits.
///
/// Useful where libphonenumber metadata is not the subject of a test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhoneValidator;

impl PhoneValidator for FixturePhoneValidator {
    fn is_valid(&self, phone: &str) -> bool {
        let Some(rest) = phone.strip_prefix('+') else {
            return false;
        };
        let digits = rest.chars().filter(char::is_ascii_digit).count();
        rest.chars().all(|c| c.is_ascii_digit() || c == ' ') && (8..=15).contains(&digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+14155550123", true)]
    #[case("+44 20 7946 0958", true)]
    #[case("4155550123", false)]
    #[case("+1-415", false)]
    #[case("+", false)]
    fn fixture_validator_checks_shape(#[case] phone: &str, #[case] expected: bool) {
        assert_eq!(FixturePhoneValidator.is_valid(phone), expected);
    }
}
