mod google_maps;
mod travel_api;

pub use google_maps::GoogleMaps;
pub use travel_api::TravelApi;
