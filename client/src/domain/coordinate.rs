//! Geographic coordinates and map-click normalisation.

use serde::{Deserialize, Serialize};

/// Decimal places kept when a map click is stored.
pub const COORDINATE_DECIMALS: usize = 8;

/// Latitude/longitude pair in decimal degrees.
///
/// ## Invariants
/// - `(0.0, 0.0)` is the sentinel meaning "no location chosen yet".
/// - Values produced by [`Coordinate::from_click`] have longitude wrapped
///   into `[-180, 180]` and both components rounded to
///   [`COORDINATE_DECIMALS`] places.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Coordinate {
    /// The unset sentinel.
    pub const SENTINEL: Self = Self::new(0.0, 0.0);

    /// Build a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether this is exactly the sentinel. Negative zero counts as zero.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Normalise a raw map click.
    ///
    /// Longitude is wrapped first and rounded second; rounding an unwrapped
    /// value can leave the result outside the target range.
    ///
    /// ```
    /// use social_feed::domain::{Coordinate, LngLat};
    ///
    /// let c = Coordinate::from_click(LngLat::new(190.123456789, 45.0));
    /// assert_eq!(c, Coordinate::new(45.0, -169.87654321));
    /// ```
    #[must_use]
    pub fn from_click(raw: LngLat) -> Self {
        let longitude = round_to_decimals(normalize_longitude(raw.lng));
        let latitude = round_to_decimals(raw.lat);
        Self::new(latitude, longitude)
    }
}

/// Raw pointer position reported by the map surface, longitude first.
///
/// Longitude may be unwrapped (outside `[-180, 180]`) when the user has
/// panned across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    /// Longitude, possibly unwrapped.
    pub lng: f64,
    /// Latitude.
    pub lat: f64,
}

impl LngLat {
    /// Build a raw pointer position.
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Wrap a longitude into `[-180, 180)`, preserving it modulo 360.
#[must_use]
pub fn normalize_longitude(lng: f64) -> f64 {
    ((lng + 180.0) % 360.0 + 360.0) % 360.0 - 180.0
}

/// Fraction digits that print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1_100;

/// Round to [`COORDINATE_DECIMALS`] places by formatting and reparsing, so
/// the stored value is the nearest `f64` to the displayed decimal.
///
/// Exact halfway values round away from zero.
fn round_to_decimals(value: f64) -> f64 {
    let value = if is_halfway(value) {
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };
    format!("{value:.COORDINATE_DECIMALS$}")
        .parse()
        .unwrap_or(value)
}

/// Whether the exact decimal expansion of `value` ends in a lone `5` just
/// past the kept places.
fn is_halfway(value: f64) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let exact = format!("{:.EXACT_FRACTION_DIGITS$}", value.abs());
    exact
        .split_once('.')
        .and_then(|(_, fraction)| fraction.get(COORDINATE_DECIMALS..))
        .is_some_and(|rest| rest.trim_end_matches('0') == "5")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn congruent_mod_360(a: f64, b: f64) -> bool {
        let turns = (a - b) / 360.0;
        (turns - turns.round()).abs() < 1e-9
    }

    #[rstest]
    #[case(0.0)]
    #[case(179.999)]
    #[case(180.0)]
    #[case(-180.0)]
    #[case(-180.5)]
    #[case(359.0)]
    #[case(540.0)]
    #[case(-725.25)]
    #[case(1_000_000.125)]
    #[case(-0.000_000_1)]
    fn normalized_longitude_is_in_range_and_congruent(#[case] lng: f64) {
        let normalized = normalize_longitude(lng);
        assert!(
            (-180.0..180.0).contains(&normalized),
            "{lng} normalised to {normalized}"
        );
        assert!(congruent_mod_360(normalized, lng));
    }

    #[rstest]
    fn sweep_of_longitudes_stays_in_range() {
        for step in -4_000_i32..=4_000 {
            let lng = f64::from(step) * 0.37;
            let normalized = normalize_longitude(lng);
            assert!(
                (-180.0..180.0).contains(&normalized),
                "{lng} -> {normalized}"
            );
            assert!(congruent_mod_360(normalized, lng));
        }
    }

    #[rstest]
    #[case(180.0, -180.0)]
    #[case(190.0, -170.0)]
    #[case(-190.0, 170.0)]
    #[case(45.5, 45.5)]
    fn wraps_across_antimeridian(#[case] lng: f64, #[case] expected: f64) {
        assert_eq!(normalize_longitude(lng), expected);
    }

    #[rstest]
    fn click_rounds_to_eight_places() {
        let c = Coordinate::from_click(LngLat::new(12.123_456_789_9, -33.987_654_321_1));
        assert_eq!(c.longitude, 12.123_456_79);
        assert_eq!(c.latitude, -33.987_654_32);
    }

    #[rstest]
    #[case(0.001_953_125, 0.001_953_13)]
    #[case(-0.001_953_125, -0.001_953_13)]
    #[case(0.001_953_124, 0.001_953_12)]
    fn exact_ties_round_away_from_zero(#[case] raw: f64, #[case] expected: f64) {
        let c = Coordinate::from_click(LngLat::new(raw, raw));
        assert_eq!(c.longitude, expected);
        assert_eq!(c.latitude, expected);
    }

    #[rstest]
    fn click_keeps_latitude_unwrapped() {
        let c = Coordinate::from_click(LngLat::new(0.5, 89.5));
        assert_eq!(c.latitude, 89.5);
    }

    #[rstest]
    #[case(Coordinate::new(0.0, 0.0), true)]
    #[case(Coordinate::new(-0.0, 0.0), true)]
    #[case(Coordinate::new(0.0, 0.000_000_1), false)]
    #[case(Coordinate::new(0.000_000_1, 0.0), false)]
    fn sentinel_is_exact_origin(#[case] coordinate: Coordinate, #[case] expected: bool) {
        assert_eq!(coordinate.is_sentinel(), expected);
    }

    #[rstest]
    fn default_is_sentinel() {
        assert!(Coordinate::default().is_sentinel());
    }
}
