//! Login form rules and the placeholder-backed credential check.
//!
//! There is no real backend: the administrator account is built in and every
//! other account is a placeholder user whose password is their username.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};
use zeroize::Zeroizing;

use super::email::is_well_formed;
use super::ports::{LoginError, LoginService, PlaceholderSource};
use super::{ADMIN_EMAIL, FieldErrors, Session, SessionUser};

/// Password of the built-in administrator account.
pub const ADMIN_PASSWORD: &str = "admin123";

const INVALID_EMAIL: &str = "Invalid email address.";
const MISSING_PASSWORD: &str = "Input a password.";

/// Fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoginField {
    /// Email input.
    Email,
    /// Password input.
    Password,
}

/// Email and password accepted by the login form rules.
#[derive(Clone)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginCredentials {
    /// Apply the login form rules.
    ///
    /// # Errors
    ///
    /// Returns the field messages when the email is malformed or the password
    /// is empty.
    pub fn try_from_parts(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, FieldErrors<LoginField>> {
        let email = email.into();
        let password = Zeroizing::new(password.into());
        let mut errors = FieldErrors::default();
        if !is_well_formed(&email) {
            errors.record(LoginField::Email, INVALID_EMAIL);
        }
        if password.is_empty() {
            errors.record(LoginField::Password, MISSING_PASSWORD);
        }
        if errors.is_empty() {
            Ok(Self { email, password })
        } else {
            Err(errors)
        }
    }

    /// Submitted email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Submitted password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Messages shown when authentication fails: both fields are flagged.
#[must_use]
pub fn login_failure_errors() -> FieldErrors<LoginField> {
    let mut errors = FieldErrors::default();
    let message = LoginError::invalid_credentials().to_string();
    errors.record(LoginField::Email, message.clone());
    errors.record(LoginField::Password, message);
    errors
}

/// Authenticates against the built-in admin and the placeholder users.
#[derive(Clone)]
pub struct PlaceholderLoginService {
    source: Arc<dyn PlaceholderSource>,
}

impl fmt::Debug for PlaceholderLoginService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderLoginService")
            .finish_non_exhaustive()
    }
}

impl PlaceholderLoginService {
    /// Build the service over a user directory.
    #[must_use]
    pub fn new(source: Arc<dyn PlaceholderSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl LoginService for PlaceholderLoginService {
    #[instrument(skip_all, fields(email = %credentials.email()))]
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, LoginError> {
        if credentials.email() == ADMIN_EMAIL {
            if credentials.password() == ADMIN_PASSWORD {
                info!("administrator signed in");
                return Ok(Session::admin());
            }
            warn!("administrator password rejected");
            return Err(LoginError::invalid_credentials());
        }

        let users = self.source.users().await.map_err(|error| {
            warn!(code = error.code(), %error, "user directory unavailable");
            LoginError::source(error.to_string())
        })?;
        let user = users
            .iter()
            .find(|user| {
                user.email == credentials.email() && user.username == credentials.password()
            })
            .ok_or_else(|| {
                warn!("credentials rejected");
                LoginError::invalid_credentials()
            })?;

        info!(user = %user.id, "member signed in");
        Ok(Session::new(SessionUser::from(user)))
    }
}
