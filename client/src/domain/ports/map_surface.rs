//! Driven port for the interactive map surface.
//!
//! The map SDK is an external capability. Views own the surface through
//! [`crate::domain::MountedMap`], which guarantees `destroy` runs when the
//! view unmounts. Pointer clicks are delivered to the owning view as
//! [`crate::domain::LngLat`] events rather than registered callbacks.

use crate::domain::Coordinate;

use super::define_port_error;

/// Opaque identifier of a live map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapHandle(u64);

impl MapHandle {
    /// Wrap an adapter-issued identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Adapter-issued identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier of a marker placed on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Wrap an adapter-issued identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Adapter-issued identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Which user gestures the map reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapInteractions {
    /// Drag to pan.
    pub pan: bool,
    /// Scroll, pinch and double-click zoom.
    pub zoom: bool,
    /// Right-drag / ctrl-drag rotation.
    pub drag_rotate: bool,
    /// Two-finger rotation on touch screens.
    pub touch_rotate: bool,
    /// Arrow-key navigation.
    pub keyboard: bool,
}

impl MapInteractions {
    /// Pan, zoom and click only; rotation and keyboard input disabled.
    #[must_use]
    pub const fn click_to_pin() -> Self {
        Self {
            pan: true,
            zoom: true,
            drag_rotate: false,
            touch_rotate: false,
            keyboard: false,
        }
    }
}

/// Construction parameters for a map instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Id of the container element the map renders into.
    pub container: String,
    /// Initial camera centre.
    pub center: Coordinate,
    /// Initial zoom level; `0.0` shows the whole world.
    pub zoom: f64,
    /// Enabled gestures.
    pub interactions: MapInteractions,
    /// Whether the attribution control is rendered.
    pub attribution_control: bool,
}

/// Visual style of a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    /// CSS colour of the pin.
    pub color: String,
}

/// Animated camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    /// Camera target.
    pub center: Coordinate,
    /// Target zoom level.
    pub zoom: f64,
    /// Animation speed multiplier.
    pub speed: f64,
}

define_port_error! {
    /// Errors raised by map surface adapters.
    pub enum MapSurfaceError {
        /// The rendering context could not be created.
        Initialisation { message: String } =>
            "map surface failed to initialise: {message}",
        /// The handle does not refer to a live map.
        UnknownMap { map: u64 } =>
            "map {map} is not mounted",
        /// The marker does not exist on the given map.
        UnknownMarker { marker: u64 } =>
            "marker {marker} does not exist",
    }
}

/// Port for the map rendering capability.
#[cfg_attr(test, mockall::automock)]
pub trait MapSurface {
    /// Create a map inside the configured container.
    fn create(&self, options: &MapOptions) -> Result<MapHandle, MapSurfaceError>;

    /// Add a marker at `position`.
    fn add_marker(
        &self,
        map: MapHandle,
        position: Coordinate,
        style: &MarkerStyle,
    ) -> Result<MarkerHandle, MapSurfaceError>;

    /// Reposition an existing marker.
    fn move_marker(
        &self,
        map: MapHandle,
        marker: MarkerHandle,
        position: Coordinate,
    ) -> Result<(), MapSurfaceError>;

    /// Animate the camera.
    fn fly_to(&self, map: MapHandle, target: &FlyTo) -> Result<(), MapSurfaceError>;

    /// Release the rendering context and every listener attached to it.
    fn destroy(&self, map: MapHandle);
}
