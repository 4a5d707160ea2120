//! Client routes and the session guard in front of them.

use std::fmt;

use url::form_urlencoded;

use super::SessionStatus;

/// A navigable page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Feed of posts.
    Home,
    /// Sign-in page.
    Login,
    /// Registration form.
    Register,
    /// Admin chart of entity counts.
    Dashboard,
    /// Address of the user with the given account name.
    Address {
        /// Display name of the profiled user.
        account_name: String,
    },
}

impl Route {
    /// Path and query of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Address { account_name } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("accountName", account_name)
                    .finish();
                format!("/address?{query}")
            }
        }
    }

    /// Whether the route requires a signed-in user.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Home | Self::Dashboard | Self::Address { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the router should do for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session lookup is pending; show the loading indicator.
    Loading,
    /// Render the requested page.
    Render,
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Decide how to handle a navigation to `route`.
#[must_use]
pub fn guard(route: &Route, status: &SessionStatus) -> RouteDecision {
    match status {
        SessionStatus::Loading => RouteDecision::Loading,
        SessionStatus::Unauthenticated if route.is_private() => {
            RouteDecision::Redirect(Route::Login)
        }
        SessionStatus::Authenticated(session)
            if *route == Route::Dashboard && !session.is_admin() =>
        {
            RouteDecision::Redirect(Route::Home)
        }
        SessionStatus::Unauthenticated | SessionStatus::Authenticated(_) => RouteDecision::Render,
    }
}
