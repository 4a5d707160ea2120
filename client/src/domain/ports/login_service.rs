//! Driving port for credential checks.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, Session};

use super::define_port_error;

define_port_error! {
    /// Errors raised while authenticating.
    pub enum LoginError {
        /// No account matches the email and password.
        InvalidCredentials => "Invalid email or password",
        /// The user directory could not be read.
        Source { message: String } => "user directory unavailable: {message}",
    }
}

/// Port for exchanging credentials for a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate `credentials`, returning the new session.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, LoginError>;
}
