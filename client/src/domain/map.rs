//! Scoped ownership of a map instance.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::Coordinate;
use super::ports::{
    FlyTo, MapHandle, MapOptions, MapSurface, MapSurfaceError, MarkerHandle, MarkerStyle,
};

/// A map created for the lifetime of one view mount.
///
/// Dropping the value destroys the map, releasing its rendering context and
/// listeners.
pub struct MountedMap {
    surface: Rc<dyn MapSurface>,
    handle: MapHandle,
}

impl fmt::Debug for MountedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedMap")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl MountedMap {
    /// Create a map on `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the surface's initialisation failure.
    pub fn mount(
        surface: Rc<dyn MapSurface>,
        options: &MapOptions,
    ) -> Result<Self, MapSurfaceError> {
        let handle = surface.create(options)?;
        debug!(map = handle.get(), container = %options.container, "map mounted");
        Ok(Self { surface, handle })
    }

    /// Handle of the live map.
    #[must_use]
    pub const fn handle(&self) -> MapHandle {
        self.handle
    }

    /// Add a marker.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn add_marker(
        &self,
        position: Coordinate,
        style: &MarkerStyle,
    ) -> Result<MarkerHandle, MapSurfaceError> {
        self.surface.add_marker(self.handle, position, style)
    }

    /// Move an existing marker.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn move_marker(
        &self,
        marker: MarkerHandle,
        position: Coordinate,
    ) -> Result<(), MapSurfaceError> {
        self.surface.move_marker(self.handle, marker, position)
    }

    /// Animate the camera.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn fly_to(&self, target: &FlyTo) -> Result<(), MapSurfaceError> {
        self.surface.fly_to(self.handle, target)
    }
}

impl Drop for MountedMap {
    fn drop(&mut self) {
        self.surface.destroy(self.handle);
        debug!(map = self.handle.get(), "map destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MapInteractions, MockMapSurface};
    use mockall::Sequence;
    use rstest::rstest;

    fn options() -> MapOptions {
        MapOptions {
            container: "map".to_owned(),
            center: Coordinate::SENTINEL,
            zoom: 0.0,
            interactions: MapInteractions::click_to_pin(),
            attribution_control: false,
        }
    }

    #[rstest]
    fn destroys_exactly_once_on_drop() {
        let mut surface = MockMapSurface::new();
        let mut seq = Sequence::new();
        surface
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(MapHandle::new(7)));
        surface
            .expect_destroy()
            .withf(|map| *map == MapHandle::new(7))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mounted = MountedMap::mount(Rc::new(surface), &options()).expect("mount");
        assert_eq!(mounted.handle(), MapHandle::new(7));
        drop(mounted);
    }

    #[rstest]
    fn failed_creation_does_not_destroy() {
        let mut surface = MockMapSurface::new();
        surface
            .expect_create()
            .returning(|_| Err(MapSurfaceError::initialisation("no context")));
        surface.expect_destroy().times(0);

        let err = MountedMap::mount(Rc::new(surface), &options()).expect_err("mount fails");
        assert_eq!(err.code(), "initialisation");
    }
}
