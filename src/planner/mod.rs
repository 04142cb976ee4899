mod attraction_api;
mod city_api;
mod recommendation_api;
mod travel_api;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::{DirectionsProvider, Geocoder, TravelBackend, API};
use crate::entities::Coordinates;
use crate::map::{AnnotationLayer, MapSurface, MarkerPin, PinStyle};

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};

pub const DEFAULT_ZOOM: u8 = 13;

/// The page controller: wires the travel backend, the map provider and the
/// annotation layer behind the interface-level `API` operations.
pub struct Planner {
    backend: Arc<dyn TravelBackend + Send + Sync>,
    directions: Arc<dyn DirectionsProvider + Send + Sync>,
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    surface: Arc<dyn MapSurface + Send + Sync>,
    annotations: AnnotationLayer,
    user_location: Mutex<Option<Coordinates>>,
}

impl Planner {
    pub fn new(
        backend: Arc<dyn TravelBackend + Send + Sync>,
        directions: Arc<dyn DirectionsProvider + Send + Sync>,
        geocoder: Arc<dyn Geocoder + Send + Sync>,
        surface: Arc<dyn MapSurface + Send + Sync>,
        photo_key: Option<String>,
    ) -> Self {
        surface.center_on(DEFAULT_CENTER, DEFAULT_ZOOM);

        let annotations = AnnotationLayer::new(surface.clone(), geocoder.clone(), photo_key);

        Self {
            backend,
            directions,
            geocoder,
            surface,
            annotations,
            user_location: Mutex::new(None),
        }
    }

    // exposed so the host can route map events into the marker lifecycle
    pub fn annotations(&self) -> &AnnotationLayer {
        &self.annotations
    }

    // the stored position becomes the default origin for later
    // "travel to place" requests
    #[tracing::instrument(skip(self))]
    pub async fn set_user_location(&self, position: Coordinates) {
        self.surface.center_on(position, DEFAULT_ZOOM);
        self.surface.place_marker(MarkerPin {
            position,
            title: "Your Location".to_string(),
            style: PinStyle::UserLocation,
        });

        *self.user_location.lock().await = Some(position);
    }
}

impl API for Planner {}

#[cfg(test)]
pub(crate) mod fixtures {
    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::api::{DirectionsProvider, Geocoder, TravelBackend};
    use crate::entities::{
        CityAttractions, Coordinates, ModeEstimate, Place, RecommendationBatch,
        RecommendationSource, RoutePath, TravelTimes,
    };
    use crate::error::Error;
    use crate::map::{MapSurface, MarkerId, MarkerPin, PopupId, PopupStyle};

    use super::Planner;

    pub struct StubBackend;

    fn sample_place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            location: format!("{} address", name),
            lat: Some(40.5),
            lng: Some(-74.2),
            rating: 4.5,
            user_ratings_total: 1200,
            types: vec!["tourist_attraction".to_string()],
            photo_reference: None,
        }
    }

    #[async_trait]
    impl TravelBackend for StubBackend {
        async fn travel_time(
            &self,
            _origin: String,
            _destination: String,
        ) -> Result<TravelTimes, Error> {
            Ok(TravelTimes {
                driving: ModeEstimate::Available {
                    duration: "3 hours 45 mins".to_string(),
                    distance: "346 km".to_string(),
                    departure_time: None,
                    arrival_time: None,
                },
                transit: ModeEstimate::Unavailable { message: None },
            })
        }

        async fn recommendations(
            &self,
            near: Option<Coordinates>,
        ) -> Result<RecommendationBatch, Error> {
            Ok(RecommendationBatch {
                recommendations: vec![sample_place("one")],
                source: match near {
                    Some(_) => RecommendationSource::Nearby,
                    None => RecommendationSource::Famous,
                },
            })
        }

        async fn city_attractions(&self, city_name: String) -> Result<CityAttractions, Error> {
            Ok(CityAttractions {
                attractions: vec![sample_place("one")],
                city: city_name,
            })
        }

        async fn route_attractions(
            &self,
            _origin: String,
            _destination: String,
            _distance_km: u32,
        ) -> Result<Vec<Place>, Error> {
            Ok(vec![sample_place("one"), sample_place("two")])
        }
    }

    pub struct StubProvider;

    #[async_trait]
    impl DirectionsProvider for StubProvider {
        async fn driving_route(
            &self,
            _origin: String,
            _destination: String,
        ) -> Result<RoutePath, Error> {
            Ok(RoutePath::new(
                vec![
                    Coordinates {
                        lat: 40.7128,
                        lng: -74.0060,
                    },
                    Coordinates {
                        lat: 42.3601,
                        lng: -71.0589,
                    },
                ],
                "I-95 N".to_string(),
            ))
        }
    }

    #[async_trait]
    impl Geocoder for StubProvider {
        async fn geocode(&self, _address: String) -> Result<Coordinates, Error> {
            Ok(Coordinates {
                lat: 40.5,
                lng: -74.2,
            })
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
            Ok("somewhere".to_string())
        }
    }

    pub struct NullSurface;

    impl MapSurface for NullSurface {
        fn place_marker(&self, _pin: MarkerPin) -> MarkerId {
            MarkerId::new()
        }

        fn remove_marker(&self, _id: MarkerId) {}

        fn open_popup(&self, _anchor: MarkerId, _style: PopupStyle, _content: String) -> PopupId {
            PopupId::new()
        }

        fn close_popup(&self, _id: PopupId) {}

        fn draw_route(&self, _path: &RoutePath) {}

        fn clear_route(&self) {}

        fn center_on(&self, _position: Coordinates, _zoom: u8) {}
    }

    pub fn planner() -> Planner {
        Planner::new(
            Arc::new(StubBackend),
            Arc::new(StubProvider),
            Arc::new(StubProvider),
            Arc::new(NullSurface),
            None,
        )
    }
}
