use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    CityAttractions, Coordinates, Place, RecommendationBatch, RoutePath, TravelTimes,
};
use crate::error::Error;

// the four JSON endpoints of the travel backend
#[async_trait]
pub trait TravelBackend {
    async fn travel_time(&self, origin: String, destination: String)
        -> Result<TravelTimes, Error>;

    async fn recommendations(&self, near: Option<Coordinates>)
        -> Result<RecommendationBatch, Error>;

    async fn city_attractions(&self, city_name: String) -> Result<CityAttractions, Error>;

    async fn route_attractions(
        &self,
        origin: String,
        destination: String,
        distance_km: u32,
    ) -> Result<Vec<Place>, Error>;
}

#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, address: String) -> Result<Coordinates, Error>;
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, Error>;
}

#[async_trait]
pub trait DirectionsProvider {
    async fn driving_route(&self, origin: String, destination: String)
        -> Result<RoutePath, Error>;
}

#[async_trait]
pub trait TravelTimeAPI {
    async fn calculate_travel_time(
        &self,
        origin: String,
        destination: String,
    ) -> Result<TravelTimes, Error>;

    // returns None when no user location is known to resolve an origin from
    async fn calculate_travel_to_place(
        &self,
        destination: String,
    ) -> Result<Option<TravelTimes>, Error>;
}

#[async_trait]
pub trait RecommendationAPI {
    async fn load_recommendations(
        &self,
        near: Option<Coordinates>,
    ) -> Result<RecommendationBatch, Error>;
}

#[async_trait]
pub trait CitySearchAPI {
    async fn search_city_attractions(&self, city_name: String) -> Result<CityAttractions, Error>;
}

#[async_trait]
pub trait RouteAttractionAPI {
    // replaces the current marker set, returning how many attractions arrived
    async fn load_route_attractions(
        &self,
        origin: String,
        destination: String,
        distance_km: u32,
    ) -> Result<usize, Error>;

    async fn reset(&self);
}

pub trait API: TravelTimeAPI + RecommendationAPI + CitySearchAPI + RouteAttractionAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
