//! Authenticated session passed explicitly into every view.

use serde::{Deserialize, Serialize};

use super::User;

/// Email of the built-in administrator account.
pub const ADMIN_EMAIL: &str = "admin@admin.com";
/// Display name of the built-in administrator account.
pub const ADMIN_NAME: &str = "Admin";

/// Identity carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Placeholder user id, or `admin`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Handle.
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// An authenticated session.
///
/// ## Invariants
/// - `is_admin` holds exactly when the user's email is [`ADMIN_EMAIL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: SessionUser,
}

impl Session {
    /// Wrap an authenticated identity.
    #[must_use]
    pub const fn new(user: SessionUser) -> Self {
        Self { user }
    }

    /// Session for the built-in administrator.
    #[must_use]
    pub fn admin() -> Self {
        Self::new(SessionUser {
            id: "admin".to_owned(),
            name: ADMIN_NAME.to_owned(),
            email: ADMIN_EMAIL.to_owned(),
            username: ADMIN_NAME.to_owned(),
        })
    }

    /// Authenticated identity.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Whether the session belongs to the administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.email == ADMIN_EMAIL
    }
}

/// Session lifecycle as observed by route guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// The session lookup has not completed.
    Loading,
    /// A user is signed in.
    Authenticated(Session),
    /// Nobody is signed in.
    Unauthenticated,
}

impl SessionStatus {
    /// The session, when authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Loading | Self::Unauthenticated => None,
        }
    }
}
