//! Domain layer: view models, validation and the ports they depend on.
//!
//! Purpose: keep registration rules, map capture and the feed/dashboard/
//! navigation views free of browser and HTTP concerns. Adapters live under
//! `crate::outbound` and are injected as port trait objects.
//!
//! Public surface:
//! - Registration core: [`RegistrationSchema`], [`RegistrationForm`],
//!   [`GeocoordinateCapture`], [`SubmitHandler`] and the composed
//!   [`RegistrationView`].
//! - Session and routing: [`Session`], [`SessionStatus`], [`Route`],
//!   [`guard`].
//! - Collaborator views: [`FeedView`], [`DashboardService`],
//!   [`AddressView`], [`NavBar`].

pub mod address;
pub mod auth;
pub mod capture;
pub mod coordinate;
pub mod dashboard;
pub mod dropdown;
mod email;
pub mod error;
pub mod feed;
pub mod form;
pub mod map;
pub mod navbar;
pub mod placeholder;
pub mod ports;
pub mod registration;
pub mod registration_flow;
pub mod routes;
pub mod session;
pub mod submission;

pub use self::address::{AddressError, AddressView, find_user};
pub use self::auth::{
    ADMIN_PASSWORD, LoginCredentials, LoginField, PlaceholderLoginService, login_failure_errors,
};
pub use self::capture::{GeocoordinateCapture, MAP_ELEMENT_ID, MARKER_COLOR};
pub use self::coordinate::{COORDINATE_DECIMALS, Coordinate, LngLat, normalize_longitude};
pub use self::dashboard::{BarSeries, DashboardError, DashboardService, DashboardSummary};
pub use self::dropdown::{ClickListenerGuard, ClickTarget, Dropdown};
pub use self::error::RegistrationError;
pub use self::feed::{FeedEntry, FeedError, FeedView};
pub use self::form::{FieldErrors, RegistrationForm, TextField};
pub use self::map::MountedMap;
pub use self::navbar::{NavBar, PROFILE_MENU_ID, ProfileEntry, USERS_MENU_ID, UserEntry};
pub use self::placeholder::{
    Address, Comment, CommentId, Company, Geo, GeoParseError, Post, PostId, User, UserId,
};
pub use self::registration::{
    FieldIssue, RegistrationField, RegistrationInput, RegistrationRule, RegistrationSchema,
    ValidationReport,
};
pub use self::registration_flow::RegistrationView;
pub use self::routes::{Route, RouteDecision, guard};
pub use self::session::{ADMIN_EMAIL, ADMIN_NAME, Session, SessionStatus, SessionUser};
pub use self::submission::{SubmitHandler, SubmitPhase};
