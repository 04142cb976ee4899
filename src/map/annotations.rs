use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::api::Geocoder;
use crate::entities::{Coordinates, Place};
use crate::map::surface::{MapSurface, MarkerId, MarkerPin, PinStyle, PopupId, PopupStyle};
use crate::view::markup;

/// Owns the attraction markers drawn on the map together with their popups:
/// at most one hover popup and one click popup are open at any time, and the
/// marker set always reflects the most recent search.
#[derive(Clone)]
pub struct AnnotationLayer {
    surface: Arc<dyn MapSurface + Send + Sync>,
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    photo_key: Option<String>,
    state: Arc<Mutex<LayerState>>,
}

#[derive(Default)]
struct LayerState {
    markers: Vec<MarkerEntry>,
    hover: Option<PopupId>,
    generation: u64,
}

// one placed marker and its click popup, created and destroyed together
struct MarkerEntry {
    marker: MarkerId,
    place: Place,
    detail_popup: Option<PopupId>,
}

impl AnnotationLayer {
    pub fn new(
        surface: Arc<dyn MapSurface + Send + Sync>,
        geocoder: Arc<dyn Geocoder + Send + Sync>,
        photo_key: Option<String>,
    ) -> Self {
        Self {
            surface,
            geocoder,
            photo_key,
            state: Arc::new(Mutex::new(LayerState::default())),
        }
    }

    // coordinate-bearing places appear immediately; the rest are geocoded by
    // address and appear as responses arrive, in no particular order
    #[tracing::instrument(skip_all, fields(count = places.len()))]
    pub async fn load_attractions(&self, places: Vec<Place>) {
        let mut pending = Vec::new();

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;

            for place in places {
                match place.coordinates() {
                    Some(position) => self.place_marker(&mut state, place, position),
                    None => pending.push(place),
                }
            }

            state.generation
        };

        join_all(
            pending
                .into_iter()
                .map(|place| self.place_geocoded(generation, place)),
        )
        .await;
    }

    async fn place_geocoded(&self, generation: u64, place: Place) {
        let position = match self.geocoder.geocode(place.location.clone()).await {
            Ok(position) => position,
            Err(err) => {
                tracing::debug!("no marker for {:?}: {}", place.name, err);
                return;
            }
        };

        let mut state = self.state.lock().await;

        if state.generation != generation {
            tracing::debug!("discarding stale geocode result for {:?}", place.name);
            return;
        }

        self.place_marker(&mut state, place, position);
    }

    fn place_marker(&self, state: &mut LayerState, place: Place, position: Coordinates) {
        let marker = self.surface.place_marker(MarkerPin {
            position,
            title: place.name.clone(),
            style: PinStyle::Attraction,
        });

        state.markers.push(MarkerEntry {
            marker,
            place,
            detail_popup: None,
        });
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_attractions(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;

        if let Some(popup) = state.hover.take() {
            self.surface.close_popup(popup);
        }

        for entry in state.markers.drain(..) {
            if let Some(popup) = entry.detail_popup {
                self.surface.close_popup(popup);
            }
            self.surface.remove_marker(entry.marker);
        }
    }

    pub async fn hover_enter(&self, id: MarkerId) {
        let mut state = self.state.lock().await;

        // a pointer gliding straight from marker to marker never leaves two open
        if let Some(popup) = state.hover.take() {
            self.surface.close_popup(popup);
        }

        let entry = match state.markers.iter().find(|entry| entry.marker == id) {
            Some(entry) => entry,
            None => return,
        };

        let content = markup::hover_card(&entry.place, self.photo_key.as_deref());
        state.hover = Some(self.surface.open_popup(id, PopupStyle::Hover, content));
    }

    // closes the shared hover popup regardless of which marker the pointer left
    pub async fn hover_exit(&self, _id: MarkerId) {
        let mut state = self.state.lock().await;

        if let Some(popup) = state.hover.take() {
            self.surface.close_popup(popup);
        }
    }

    // click takes visual priority: the hover popup and every click popup are
    // closed before the marker's own detail popup opens
    pub async fn click(&self, id: MarkerId) {
        let mut state = self.state.lock().await;

        if let Some(popup) = state.hover.take() {
            self.surface.close_popup(popup);
        }

        for entry in state.markers.iter_mut() {
            if let Some(popup) = entry.detail_popup.take() {
                self.surface.close_popup(popup);
            }
        }

        let entry = match state.markers.iter_mut().find(|entry| entry.marker == id) {
            Some(entry) => entry,
            None => return,
        };

        let content = markup::detail_card(&entry.place);
        entry.detail_popup = Some(self.surface.open_popup(id, PopupStyle::Detail, content));
    }

    pub async fn marker_count(&self) -> usize {
        self.state.lock().await.markers.len()
    }

    pub async fn hover_popup_open(&self) -> bool {
        self.state.lock().await.hover.is_some()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    use crate::api::Geocoder;
    use crate::entities::{Coordinates, Place, RoutePath};
    use crate::error::{geocode_error, Error};
    use crate::map::surface::{MapSurface, MarkerId, MarkerPin, PopupId, PopupStyle};

    use super::AnnotationLayer;

    pub struct OpenPopup {
        pub id: PopupId,
        pub anchor: MarkerId,
        pub style: PopupStyle,
        pub content: String,
    }

    /// Map backend double that tracks what is currently placed and open.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub markers: Mutex<Vec<(MarkerId, MarkerPin)>>,
        pub popups: Mutex<Vec<OpenPopup>>,
    }

    impl RecordingSurface {
        pub fn marker_ids(&self) -> Vec<MarkerId> {
            self.markers.lock().unwrap().iter().map(|(id, _)| *id).collect()
        }

        pub fn open_popups(&self, style: PopupStyle) -> Vec<(MarkerId, String)> {
            self.popups
                .lock()
                .unwrap()
                .iter()
                .filter(|popup| popup.style == style)
                .map(|popup| (popup.anchor, popup.content.clone()))
                .collect()
        }
    }

    impl MapSurface for RecordingSurface {
        fn place_marker(&self, pin: MarkerPin) -> MarkerId {
            let id = MarkerId::new();
            self.markers.lock().unwrap().push((id, pin));
            id
        }

        fn remove_marker(&self, id: MarkerId) {
            self.markers.lock().unwrap().retain(|(marker, _)| *marker != id);
        }

        fn open_popup(&self, anchor: MarkerId, style: PopupStyle, content: String) -> PopupId {
            let id = PopupId::new();
            self.popups.lock().unwrap().push(OpenPopup {
                id,
                anchor,
                style,
                content,
            });
            id
        }

        fn close_popup(&self, id: PopupId) {
            self.popups.lock().unwrap().retain(|popup| popup.id != id);
        }

        fn draw_route(&self, _path: &RoutePath) {}

        fn clear_route(&self) {}

        fn center_on(&self, _position: Coordinates, _zoom: u8) {}
    }

    pub struct StubGeocoder(pub Coordinates);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _address: String) -> Result<Coordinates, Error> {
            Ok(self.0)
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
            Ok("somewhere".to_string())
        }
    }

    pub struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn geocode(&self, _address: String) -> Result<Coordinates, Error> {
            Err(geocode_error("ZERO_RESULTS"))
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
            Err(geocode_error("ZERO_RESULTS"))
        }
    }

    /// Geocoder that blocks until the test releases it.
    pub struct GatedGeocoder {
        pub gate: Arc<Notify>,
        pub position: Coordinates,
    }

    #[async_trait]
    impl Geocoder for GatedGeocoder {
        async fn geocode(&self, _address: String) -> Result<Coordinates, Error> {
            self.gate.notified().await;
            Ok(self.position)
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
            Ok("somewhere".to_string())
        }
    }

    pub fn place(name: &str, coordinates: Option<Coordinates>) -> Place {
        Place {
            name: name.to_string(),
            location: format!("{} address", name),
            lat: coordinates.map(|c| c.lat),
            lng: coordinates.map(|c| c.lng),
            rating: 4.5,
            user_ratings_total: 1200,
            types: vec!["museum".to_string()],
            photo_reference: None,
        }
    }

    pub fn layer_with(
        geocoder: Arc<dyn Geocoder + Send + Sync>,
    ) -> (AnnotationLayer, Arc<RecordingSurface>) {
        let surface = Arc::new(RecordingSurface::default());
        let layer = AnnotationLayer::new(surface.clone(), geocoder, None);
        (layer, surface)
    }
}

#[test]
fn empty_load_places_nothing() {
    use fixtures::{layer_with, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(layer.load_attractions(vec![]));

    assert_eq!(block_on(layer.marker_count()), 0);
    assert!(surface.marker_ids().is_empty());
    assert!(surface.popups.lock().unwrap().is_empty());
}

#[test]
fn coordinate_bearing_places_become_markers() {
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    let places = vec![
        place("one", Some(Coordinates { lat: 40.0, lng: -74.0 })),
        place("two", Some(Coordinates { lat: 41.0, lng: -73.0 })),
    ];

    block_on(layer.load_attractions(places));

    assert_eq!(block_on(layer.marker_count()), 2);
    assert_eq!(surface.marker_ids().len(), 2);
}

#[test]
fn places_without_coordinates_are_geocoded() {
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let resolved = Coordinates { lat: 12.0, lng: 34.0 };
    let (layer, surface) = layer_with(Arc::new(StubGeocoder(resolved)));

    block_on(layer.load_attractions(vec![place("unresolved", None)]));

    assert_eq!(block_on(layer.marker_count()), 1);
    let markers = surface.markers.lock().unwrap();
    assert_eq!(markers[0].1.position, resolved);
}

#[test]
fn failed_geocodes_are_silently_omitted() {
    use fixtures::{layer_with, place, FailingGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(FailingGeocoder));

    block_on(layer.load_attractions(vec![
        place("resolved", Some(Coordinates { lat: 40.0, lng: -74.0 })),
        place("unresolvable", None),
    ]));

    assert_eq!(block_on(layer.marker_count()), 1);
    assert_eq!(surface.marker_ids().len(), 1);
}

#[test]
fn clear_removes_markers_and_popups() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![
                place("one", Some(Coordinates { lat: 40.0, lng: -74.0 })),
                place("two", Some(Coordinates { lat: 41.0, lng: -73.0 })),
            ])
            .await;

        let ids = surface.marker_ids();
        layer.hover_enter(ids[0]).await;
        layer.click(ids[1]).await;

        layer.clear_attractions().await;

        assert_eq!(layer.marker_count().await, 0);
        assert!(!layer.hover_popup_open().await);
        assert!(surface.marker_ids().is_empty());
        assert!(surface.open_popups(PopupStyle::Hover).is_empty());
        assert!(surface.open_popups(PopupStyle::Detail).is_empty());

        // clearing an already empty layer is a no-op
        layer.clear_attractions().await;
        assert_eq!(layer.marker_count().await, 0);
    });
}

#[test]
fn hovering_a_second_marker_replaces_the_popup() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![
                place("one", Some(Coordinates { lat: 40.0, lng: -74.0 })),
                place("two", Some(Coordinates { lat: 41.0, lng: -73.0 })),
            ])
            .await;

        let ids = surface.marker_ids();
        layer.hover_enter(ids[0]).await;
        layer.hover_enter(ids[1]).await;

        let hovers = surface.open_popups(PopupStyle::Hover);
        assert_eq!(hovers.len(), 1);
        assert_eq!(hovers[0].0, ids[1]);
    });
}

#[test]
fn hover_exit_clears_even_from_another_marker() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![
                place("one", Some(Coordinates { lat: 40.0, lng: -74.0 })),
                place("two", Some(Coordinates { lat: 41.0, lng: -73.0 })),
            ])
            .await;

        let ids = surface.marker_ids();
        layer.hover_enter(ids[0]).await;
        layer.hover_exit(ids[1]).await;

        assert!(!layer.hover_popup_open().await);
        assert!(surface.open_popups(PopupStyle::Hover).is_empty());
    });
}

#[test]
fn clicking_a_second_marker_closes_the_first_popup() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![
                place("one", Some(Coordinates { lat: 40.0, lng: -74.0 })),
                place("two", Some(Coordinates { lat: 41.0, lng: -73.0 })),
            ])
            .await;

        let ids = surface.marker_ids();
        layer.click(ids[0]).await;
        layer.click(ids[1]).await;

        let details = surface.open_popups(PopupStyle::Detail);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].0, ids[1]);
    });
}

#[test]
fn click_closes_the_hover_popup_first() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![place("one", Some(Coordinates { lat: 40.0, lng: -74.0 }))])
            .await;

        let ids = surface.marker_ids();
        layer.hover_enter(ids[0]).await;
        layer.click(ids[0]).await;

        assert!(!layer.hover_popup_open().await);
        assert!(surface.open_popups(PopupStyle::Hover).is_empty());

        let details = surface.open_popups(PopupStyle::Detail);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].0, ids[0]);
    });
}

#[test]
fn one_place_end_to_end() {
    use crate::map::surface::PopupStyle;
    use fixtures::{layer_with, place, StubGeocoder};
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![place("X", Some(Coordinates { lat: 40.0, lng: -74.0 }))])
            .await;

        assert_eq!(layer.marker_count().await, 1);

        let markers = surface.markers.lock().unwrap();
        assert_eq!(markers[0].1.position, Coordinates { lat: 40.0, lng: -74.0 });
        drop(markers);

        let ids = surface.marker_ids();
        layer.click(ids[0]).await;

        let details = surface.open_popups(PopupStyle::Detail);
        assert_eq!(details[0].1.matches("\"fas fa-star star\"").count(), 4);
        assert_eq!(details[0].1.matches("fa-star-half-alt").count(), 1);
        assert!(details[0].1.contains("(1.2K)"));
    });
}

#[test]
fn stale_geocode_results_are_discarded() {
    use fixtures::{layer_with, place, GatedGeocoder};
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tokio_test::block_on;

    let gate = Arc::new(Notify::new());
    let (layer, surface) = layer_with(Arc::new(GatedGeocoder {
        gate: gate.clone(),
        position: Coordinates { lat: 40.0, lng: -74.0 },
    }));

    block_on(async {
        let loading = {
            let layer = layer.clone();
            tokio::spawn(async move {
                layer.load_attractions(vec![place("late", None)]).await;
            })
        };

        // let the load reach the geocoder before tearing the layer down
        tokio::task::yield_now().await;
        layer.clear_attractions().await;
        gate.notify_one();

        loading.await.unwrap();

        assert_eq!(layer.marker_count().await, 0);
        assert!(surface.marker_ids().is_empty());
    });
}
