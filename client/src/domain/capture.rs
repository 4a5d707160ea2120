//! Click-to-pin coordinate capture on the registration map.

use std::rc::Rc;

use tracing::debug;

use super::ports::{
    MapInteractions, MapOptions, MapSurface, MapSurfaceError, MarkerHandle, MarkerStyle,
};
use super::{Coordinate, MountedMap};

/// Element id of the registration map container.
pub const MAP_ELEMENT_ID: &str = "map";
/// Colour of the location pin.
pub const MARKER_COLOR: &str = "#13cf13";

/// Keeps exactly one marker in sync with the most recent click.
///
/// ## Invariants
/// - No marker exists before the first pin.
/// - At most one marker exists; later pins move it.
#[derive(Debug)]
pub struct GeocoordinateCapture {
    map: MountedMap,
    marker: Option<MarkerHandle>,
    coordinate: Coordinate,
}

impl GeocoordinateCapture {
    /// Map options for the capture surface: world view centred on the
    /// sentinel, rotation and keyboard disabled.
    #[must_use]
    pub fn options() -> MapOptions {
        MapOptions {
            container: MAP_ELEMENT_ID.to_owned(),
            center: Coordinate::SENTINEL,
            zoom: 0.0,
            interactions: MapInteractions::click_to_pin(),
            attribution_control: false,
        }
    }

    /// Create the capture map.
    ///
    /// # Errors
    ///
    /// Propagates the surface's initialisation failure.
    pub fn mount(surface: Rc<dyn MapSurface>) -> Result<Self, MapSurfaceError> {
        let map = MountedMap::mount(surface, &Self::options())?;
        Ok(Self {
            map,
            marker: None,
            coordinate: Coordinate::SENTINEL,
        })
    }

    /// Store `coordinate` and place or move the single marker there.
    ///
    /// The coordinate is stored even if the marker update fails.
    ///
    /// # Errors
    ///
    /// Propagates surface failures from the marker update.
    pub fn pin(&mut self, coordinate: Coordinate) -> Result<(), MapSurfaceError> {
        self.coordinate = coordinate;
        match self.marker {
            Some(marker) => self.map.move_marker(marker, coordinate)?,
            None => {
                let style = MarkerStyle {
                    color: MARKER_COLOR.to_owned(),
                };
                let marker = self.map.add_marker(coordinate, &style)?;
                debug!(marker = marker.get(), "location marker created");
                self.marker = Some(marker);
            }
        }
        Ok(())
    }

    /// Most recently pinned coordinate, or the sentinel.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// The marker, once placed.
    #[must_use]
    pub const fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MapHandle, MockMapSurface};
    use rstest::rstest;

    fn surface_expecting_one_marker() -> MockMapSurface {
        let mut surface = MockMapSurface::new();
        surface
            .expect_create()
            .withf(|options| {
                options.container == MAP_ELEMENT_ID
                    && options.center.is_sentinel()
                    && options.zoom == 0.0
                    && !options.interactions.drag_rotate
                    && !options.interactions.touch_rotate
                    && !options.interactions.keyboard
                    && options.interactions.pan
                    && options.interactions.zoom
            })
            .returning(|_| Ok(MapHandle::new(1)));
        surface
            .expect_add_marker()
            .withf(|_, _, style| style.color == MARKER_COLOR)
            .times(1)
            .returning(|_, _, _| Ok(MarkerHandle::new(10)));
        surface.expect_destroy().times(1).return_const(());
        surface
    }

    #[rstest]
    fn starts_without_marker_at_sentinel() {
        let mut surface = MockMapSurface::new();
        surface.expect_create().returning(|_| Ok(MapHandle::new(1)));
        surface.expect_destroy().return_const(());

        let capture = GeocoordinateCapture::mount(Rc::new(surface)).expect("mount");
        assert!(capture.marker().is_none());
        assert!(capture.coordinate().is_sentinel());
    }

    #[rstest]
    fn later_pins_move_the_single_marker() {
        let mut surface = surface_expecting_one_marker();
        surface
            .expect_move_marker()
            .withf(|_, marker, position| {
                *marker == MarkerHandle::new(10) && *position == Coordinate::new(3.0, 4.0)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut capture = GeocoordinateCapture::mount(Rc::new(surface)).expect("mount");
        capture.pin(Coordinate::new(1.0, 2.0)).expect("first pin");
        capture.pin(Coordinate::new(3.0, 4.0)).expect("second pin");

        assert_eq!(capture.marker(), Some(MarkerHandle::new(10)));
        assert_eq!(capture.coordinate(), Coordinate::new(3.0, 4.0));
    }

    #[rstest]
    fn failed_marker_update_still_stores_coordinate() {
        let mut surface = MockMapSurface::new();
        surface.expect_create().returning(|_| Ok(MapHandle::new(1)));
        surface
            .expect_add_marker()
            .returning(|_, _, _| Err(MapSurfaceError::unknown_map(1_u64)));
        surface.expect_destroy().return_const(());

        let mut capture = GeocoordinateCapture::mount(Rc::new(surface)).expect("mount");
        let err = capture
            .pin(Coordinate::new(5.0, 6.0))
            .expect_err("marker failure");

        assert_eq!(err.code(), "unknown_map");
        assert_eq!(capture.coordinate(), Coordinate::new(5.0, 6.0));
        assert!(capture.marker().is_none());
    }
}
