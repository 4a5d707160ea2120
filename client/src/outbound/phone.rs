//! Phone validity backed by libphonenumber metadata.

use tracing::debug;

use crate::domain::ports::PhoneValidator;

/// Validates international numbers with the `phonenumber` crate.
///
/// No default region is assumed: the country is selected by the number's
/// `+` prefix, so national-format input is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibphonenumberValidator;

impl PhoneValidator for LibphonenumberValidator {
    fn is_valid(&self, phone: &str) -> bool {
        match phonenumber::parse(None, phone) {
            Ok(number) => phonenumber::is_valid(&number),
            Err(error) => {
                debug!(?error, "phone number did not parse");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+12015550123", true)]
    #[case("+44 121 234 5678", true)]
    #[case("+33 1 23 45 67 89", true)]
    #[case("2015550123", false)]
    #[case("+1 555", false)]
    #[case("", false)]
    #[case("phone", false)]
    fn checks_numbers_against_their_region(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(LibphonenumberValidator.is_valid(phone), valid);
    }
}
