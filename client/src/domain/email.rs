//! Email syntax shared by the login and registration forms.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

/// Domain of dot-separated labels ending in an alphabetic top-level domain.
static DOTTED_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}$")
        .expect("Invalid dotted domain regex")
});

/// Whether `email` is a syntactically valid address on a dotted domain.
///
/// Single-label hosts such as `localhost` are rejected.
pub(crate) fn is_well_formed(email: &str) -> bool {
    email.validate_email() && DOTTED_DOMAIN_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sincere@april.biz", true)]
    #[case("ada.lovelace+feed@mail.example.co.uk", true)]
    #[case("anne@localhost", false)]
    #[case("anne@b", false)]
    #[case("anne@example.c", false)]
    #[case("anne@example.123", false)]
    #[case("anne@-example.com", false)]
    #[case("not-an-email", false)]
    #[case("", false)]
    fn requires_a_dotted_domain(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed(email), expected);
    }
}
