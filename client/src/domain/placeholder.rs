//! Entities served by the JSONPlaceholder API.
//!
//! Field names follow the API's camelCase JSON. Nested address and company
//! records default when absent so trimmed payloads still decode.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw API identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw API identifier.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Placeholder user identifier.
    UserId
);
numeric_id!(
    /// Placeholder post identifier.
    PostId
);
numeric_id!(
    /// Placeholder comment identifier.
    CommentId
);

/// Failure to read a coordinate out of the API's string geo fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} '{value}' is not a number")]
pub struct GeoParseError {
    /// `lat` or `lng`.
    pub field: &'static str,
    /// Raw value as served.
    pub value: String,
}

/// Geographic position encoded as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    /// Latitude in decimal degrees.
    pub lat: String,
    /// Longitude in decimal degrees.
    pub lng: String,
}

impl Geo {
    /// Parse both components into a [`Coordinate`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoParseError`] naming the first component that is not a
    /// finite number.
    pub fn coordinate(&self) -> Result<Coordinate, GeoParseError> {
        let latitude = parse_component("lat", &self.lat)?;
        let longitude = parse_component("lng", &self.lng)?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

fn parse_component(field: &'static str, raw: &str) -> Result<f64, GeoParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeoParseError {
            field,
            value: raw.to_owned(),
        })
}

/// Postal address of a placeholder user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street.
    pub street: String,
    /// Suite or apartment.
    pub suite: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zipcode: String,
    /// Position of the address.
    pub geo: Geo,
}

/// Employer of a placeholder user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Slogan.
    pub catch_phrase: String,
    /// Business tagline.
    pub bs: String,
}

/// Placeholder user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Handle; doubles as the demo password.
    pub username: String,
    /// Sign-in email.
    pub email: String,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Free-form phone number.
    #[serde(default)]
    pub phone: String,
    /// Personal website.
    #[serde(default)]
    pub website: String,
    /// Employer.
    #[serde(default)]
    pub company: Company,
}

/// Feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Author.
    pub user_id: UserId,
    /// Post id.
    pub id: PostId,
    /// Headline.
    pub title: String,
    /// Text.
    pub body: String,
}

/// Comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Comment id.
    pub id: CommentId,
    /// Comment subject.
    pub name: String,
    /// Commenter email.
    pub email: String,
    /// Text.
    pub body: String,
}
