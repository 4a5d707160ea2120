//! Navigation bar with the profile and user-list dropdowns.

use std::rc::Rc;

use tracing::info;

use super::ports::DocumentListeners;
use super::{ClickTarget, Dropdown, Route, Session, User};

/// Element id of the profile dropdown.
pub const PROFILE_MENU_ID: &str = "profile-menu";
/// Element id of the user-list dropdown.
pub const USERS_MENU_ID: &str = "users-menu";

/// Entry of the profile dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEntry {
    /// The member's own address page.
    OwnAddress(Route),
    /// Admin dashboard.
    Dashboard,
    /// End the session.
    SignOut,
}

impl ProfileEntry {
    /// Visible label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OwnAddress(_) => "My address",
            Self::Dashboard => "Dashboard",
            Self::SignOut => "Sign out",
        }
    }

    /// Where the entry navigates.
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Self::OwnAddress(route) => route.clone(),
            Self::Dashboard => Route::Dashboard,
            Self::SignOut => Route::Login,
        }
    }
}

/// Entry of the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    /// Display name.
    pub name: String,
    /// Handle shown under the name.
    pub username: String,
    /// Address link; only the administrator may follow it.
    pub link: Option<Route>,
    /// Whether this user's address is the current page.
    pub selected: bool,
}

/// The navigation bar for one session.
#[derive(Debug)]
pub struct NavBar {
    session: Session,
    users: Vec<User>,
    selected_account: Option<String>,
    profile_menu: Dropdown,
    users_menu: Dropdown,
}

impl NavBar {
    /// Build the bar. `selected_account` is the account shown by the
    /// current address page, if any.
    #[must_use]
    pub fn new(
        session: Session,
        users: Vec<User>,
        selected_account: Option<String>,
        listeners: Rc<dyn DocumentListeners>,
    ) -> Self {
        Self {
            session,
            users,
            selected_account,
            profile_menu: Dropdown::new(PROFILE_MENU_ID, Rc::clone(&listeners)),
            users_menu: Dropdown::new(USERS_MENU_ID, listeners),
        }
    }

    /// Profile dropdown entries for the session.
    #[must_use]
    pub fn profile_entries(&self) -> Vec<ProfileEntry> {
        let mut entries = Vec::with_capacity(2);
        if self.session.is_admin() {
            entries.push(ProfileEntry::Dashboard);
        } else {
            entries.push(ProfileEntry::OwnAddress(Route::Address {
                account_name: self.session.user().name.clone(),
            }));
        }
        entries.push(ProfileEntry::SignOut);
        entries
    }

    /// Every user except the session user.
    #[must_use]
    pub fn user_entries(&self) -> Vec<UserEntry> {
        let is_admin = self.session.is_admin();
        self.users
            .iter()
            .filter(|user| user.name != self.session.user().name)
            .map(|user| UserEntry {
                name: user.name.clone(),
                username: user.username.clone(),
                link: is_admin.then(|| Route::Address {
                    account_name: user.name.clone(),
                }),
                selected: self.selected_account.as_deref() == Some(user.name.as_str()),
            })
            .collect()
    }

    /// Profile dropdown.
    #[must_use]
    pub const fn profile_menu(&self) -> &Dropdown {
        &self.profile_menu
    }

    /// User-list dropdown.
    #[must_use]
    pub const fn users_menu(&self) -> &Dropdown {
        &self.users_menu
    }

    /// Open or close the profile menu.
    pub fn toggle_profile_menu(&mut self) {
        self.profile_menu.toggle();
    }

    /// Open or close the user list.
    pub fn toggle_users_menu(&mut self) {
        self.users_menu.toggle();
    }

    /// Route a document click to both dropdowns.
    pub fn handle_document_click(&mut self, target: &ClickTarget) {
        self.profile_menu.handle_document_click(target);
        self.users_menu.handle_document_click(target);
    }

    /// Close both menus and return the page to show after sign-out.
    pub fn sign_out(&mut self) -> Route {
        self.profile_menu.close();
        self.users_menu.close();
        info!(email = %self.session.user().email, "signed out");
        Route::Login
    }
}
