//! Profile and address page for one placeholder user.

use std::rc::Rc;

use tracing::{debug, info};

use super::capture::MARKER_COLOR;
use super::ports::{
    FlyTo, MapInteractions, MapOptions, MapSurface, MapSurfaceError, MarkerHandle, MarkerStyle,
};
use super::{Coordinate, GeoParseError, MountedMap, User};

/// Container id of the address map.
pub const ADDRESS_MAP_ELEMENT_ID: &str = "address-map";
/// Zoom reached when the marker is clicked.
pub const FOCUS_ZOOM: f64 = 14.0;
/// Camera speed of the marker fly-to.
pub const FOCUS_SPEED: f64 = 1.2;

/// Errors raised by the address page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// No user carries the requested account name.
    #[error("no account named {account_name:?}")]
    UnknownAccount {
        /// Name that matched nobody.
        account_name: String,
    },
    /// The user's geo strings are not coordinates.
    #[error(transparent)]
    Geo(#[from] GeoParseError),
    /// The map surface failed.
    #[error(transparent)]
    Map(#[from] MapSurfaceError),
}

/// Find the user whose display name equals `account_name`.
///
/// # Errors
///
/// Returns [`AddressError::UnknownAccount`] when nobody matches.
pub fn find_user<'a>(users: &'a [User], account_name: &str) -> Result<&'a User, AddressError> {
    users
        .iter()
        .find(|user| user.name == account_name)
        .ok_or_else(|| AddressError::UnknownAccount {
            account_name: account_name.to_owned(),
        })
}

/// A mounted address page with its map and single marker.
#[derive(Debug)]
pub struct AddressView {
    user: User,
    location: Coordinate,
    map: MountedMap,
    marker: MarkerHandle,
}

impl AddressView {
    /// Mount the page for `user`: map centred on the address with one pin.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Geo`] for unparseable coordinates and
    /// [`AddressError::Map`] when the surface fails.
    pub fn mount(user: User, surface: Rc<dyn MapSurface>) -> Result<Self, AddressError> {
        let location = user.address.geo.coordinate()?;
        let options = MapOptions {
            container: ADDRESS_MAP_ELEMENT_ID.to_owned(),
            center: location,
            zoom: 0.0,
            interactions: MapInteractions::click_to_pin(),
            attribution_control: false,
        };
        let map = MountedMap::mount(surface, &options)?;
        let marker = map.add_marker(
            location,
            &MarkerStyle {
                color: MARKER_COLOR.to_owned(),
            },
        )?;
        info!(user = %user.id, "address page mounted");
        Ok(Self {
            user,
            location,
            map,
            marker,
        })
    }

    /// Fly to the address when the pin is clicked.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn on_marker_click(&self) -> Result<(), AddressError> {
        debug!(marker = self.marker.get(), "address marker clicked");
        self.map.fly_to(&FlyTo {
            center: self.location,
            zoom: FOCUS_ZOOM,
            speed: FOCUS_SPEED,
        })?;
        Ok(())
    }

    /// The profiled user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Parsed address coordinate.
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.location
    }
}
