//! In-process browser capabilities.
//!
//! These adapters stand in for the map SDK and the DOM when the views run
//! outside a browser. They keep the state a browser would keep and record
//! every call so it can be printed or asserted on.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::Coordinate;
use crate::domain::ports::{
    DocumentListeners, ElementFocus, FlyTo, ListenerId, MapHandle, MapOptions, MapSurface,
    MapSurfaceError, MarkerHandle, MarkerStyle,
};

/// One call received by [`HeadlessMapSurface`].
#[derive(Debug, Clone, PartialEq)]
#[expect(missing_docs, reason = "variant fields mirror the port arguments")]
pub enum SurfaceCall {
    Create { map: MapHandle, container: String },
    AddMarker {
        map: MapHandle,
        marker: MarkerHandle,
        position: Coordinate,
    },
    MoveMarker {
        map: MapHandle,
        marker: MarkerHandle,
        position: Coordinate,
    },
    FlyTo { map: MapHandle, target: FlyTo },
    Destroy { map: MapHandle },
}

#[derive(Debug)]
struct MapRecord {
    markers: BTreeMap<MarkerHandle, Coordinate>,
    camera: Option<FlyTo>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: u64,
    maps: BTreeMap<MapHandle, MapRecord>,
    calls: Vec<SurfaceCall>,
}

impl SurfaceState {
    fn issue_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn map_mut(&mut self, map: MapHandle) -> Result<&mut MapRecord, MapSurfaceError> {
        self.maps
            .get_mut(&map)
            .ok_or_else(|| MapSurfaceError::unknown_map(map.get()))
    }
}

/// Map surface that keeps markers and camera moves in memory.
#[derive(Debug, Default)]
pub struct HeadlessMapSurface {
    state: RefCell<SurfaceState>,
    unavailable: Option<String>,
}

impl HeadlessMapSurface {
    /// A working surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `create` always fails with `message`.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            state: RefCell::default(),
            unavailable: Some(message.into()),
        }
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of maps created and not yet destroyed.
    #[must_use]
    pub fn live_maps(&self) -> usize {
        self.state.borrow().maps.len()
    }

    /// Marker positions on `map`, in creation order.
    #[must_use]
    pub fn markers(&self, map: MapHandle) -> Vec<Coordinate> {
        self.state
            .borrow()
            .maps
            .get(&map)
            .map(|record| record.markers.values().copied().collect())
            .unwrap_or_default()
    }

    /// Last camera move on `map`.
    #[must_use]
    pub fn camera(&self, map: MapHandle) -> Option<FlyTo> {
        self.state
            .borrow()
            .maps
            .get(&map)
            .and_then(|record| record.camera)
    }
}

impl MapSurface for HeadlessMapSurface {
    fn create(&self, options: &MapOptions) -> Result<MapHandle, MapSurfaceError> {
        if let Some(message) = &self.unavailable {
            return Err(MapSurfaceError::initialisation(message.as_str()));
        }
        let mut state = self.state.borrow_mut();
        let map = MapHandle::new(state.issue_id());
        state.maps.insert(
            map,
            MapRecord {
                markers: BTreeMap::new(),
                camera: None,
            },
        );
        state.calls.push(SurfaceCall::Create {
            map,
            container: options.container.clone(),
        });
        debug!(map = map.get(), "headless map created");
        Ok(map)
    }

    fn add_marker(
        &self,
        map: MapHandle,
        position: Coordinate,
        _style: &MarkerStyle,
    ) -> Result<MarkerHandle, MapSurfaceError> {
        let mut state = self.state.borrow_mut();
        let marker = MarkerHandle::new(state.issue_id());
        state.map_mut(map)?.markers.insert(marker, position);
        state.calls.push(SurfaceCall::AddMarker {
            map,
            marker,
            position,
        });
        Ok(marker)
    }

    fn move_marker(
        &self,
        map: MapHandle,
        marker: MarkerHandle,
        position: Coordinate,
    ) -> Result<(), MapSurfaceError> {
        let mut state = self.state.borrow_mut();
        let slot = state
            .map_mut(map)?
            .markers
            .get_mut(&marker)
            .ok_or_else(|| MapSurfaceError::unknown_marker(marker.get()))?;
        *slot = position;
        state.calls.push(SurfaceCall::MoveMarker {
            map,
            marker,
            position,
        });
        Ok(())
    }

    fn fly_to(&self, map: MapHandle, target: &FlyTo) -> Result<(), MapSurfaceError> {
        let mut state = self.state.borrow_mut();
        state.map_mut(map)?.camera = Some(*target);
        state.calls.push(SurfaceCall::FlyTo {
            map,
            target: *target,
        });
        Ok(())
    }

    fn destroy(&self, map: MapHandle) {
        let mut state = self.state.borrow_mut();
        if state.maps.remove(&map).is_some() {
            state.calls.push(SurfaceCall::Destroy { map });
        }
    }
}

/// Focus adapter over a fixed set of element ids.
#[derive(Debug, Default)]
pub struct RecordingFocus {
    elements: BTreeSet<String>,
    focused: RefCell<Vec<String>>,
}

impl RecordingFocus {
    /// Document containing `elements`.
    #[must_use]
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            focused: RefCell::default(),
        }
    }

    /// Element ids that received focus, in order.
    #[must_use]
    pub fn focused(&self) -> Vec<String> {
        self.focused.borrow().clone()
    }
}

impl ElementFocus for RecordingFocus {
    fn focus(&self, element_id: &str) -> bool {
        if !self.elements.contains(element_id) {
            return false;
        }
        self.focused.borrow_mut().push(element_id.to_owned());
        true
    }
}

/// Document listener registry.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    next_id: Cell<u64>,
    listeners: RefCell<BTreeMap<ListenerId, String>>,
}

impl HeadlessDocument {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Owners of the registered listeners.
    #[must_use]
    pub fn active_listeners(&self) -> Vec<String> {
        self.listeners.borrow().values().cloned().collect()
    }
}

impl DocumentListeners for HeadlessDocument {
    fn add_click_listener(&self, owner: &str) -> ListenerId {
        let id = ListenerId::new(self.next_id.get() + 1);
        self.next_id.set(id.get());
        self.listeners.borrow_mut().insert(id, owner.to_owned());
        id
    }

    fn remove_click_listener(&self, listener: ListenerId) {
        self.listeners.borrow_mut().remove(&listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MapInteractions;
    use rstest::{fixture, rstest};

    #[fixture]
    fn options() -> MapOptions {
        MapOptions {
            container: "map".to_owned(),
            center: Coordinate::SENTINEL,
            zoom: 0.0,
            interactions: MapInteractions::click_to_pin(),
            attribution_control: false,
        }
    }

    fn style() -> MarkerStyle {
        MarkerStyle {
            color: "#13cf13".to_owned(),
        }
    }

    #[rstest]
    fn markers_move_in_place(options: MapOptions) {
        let surface = HeadlessMapSurface::new();
        let map = surface.create(&options).expect("create");
        let marker = surface
            .add_marker(map, Coordinate::new(1.0, 1.0), &style())
            .expect("add");
        surface
            .move_marker(map, marker, Coordinate::new(2.0, 2.0))
            .expect("move");

        assert_eq!(surface.markers(map), vec![Coordinate::new(2.0, 2.0)]);
    }

    #[rstest]
    fn destroyed_maps_reject_further_calls(options: MapOptions) {
        let surface = HeadlessMapSurface::new();
        let map = surface.create(&options).expect("create");
        surface.destroy(map);
        surface.destroy(map);

        let err = surface
            .add_marker(map, Coordinate::new(1.0, 1.0), &style())
            .expect_err("destroyed");
        assert_eq!(err.code(), "unknown_map");
        assert_eq!(surface.live_maps(), 0);
        assert_eq!(
            surface
                .calls()
                .iter()
                .filter(|call| matches!(call, SurfaceCall::Destroy { .. }))
                .count(),
            1
        );
    }

    #[rstest]
    fn unavailable_surface_fails_to_create(options: MapOptions) {
        let surface = HeadlessMapSurface::unavailable("no webgl");
        let err = surface.create(&options).expect_err("unavailable");
        assert_eq!(err, MapSurfaceError::initialisation("no webgl"));
    }

    #[rstest]
    fn focus_only_succeeds_for_known_elements() {
        let focus = RecordingFocus::new(["map"]);
        assert!(focus.focus("map"));
        assert!(!focus.focus("missing"));
        assert_eq!(focus.focused(), vec!["map".to_owned()]);
    }

    #[rstest]
    fn document_tracks_listener_owners() {
        let document = HeadlessDocument::new();
        let first = document.add_click_listener("profile-menu");
        document.add_click_listener("users-menu");
        document.remove_click_listener(first);
        assert_eq!(document.active_listeners(), vec!["users-menu".to_owned()]);
    }
}
