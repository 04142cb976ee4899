use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

// `location` doubles as the re-geocoding key when `lat`/`lng` are absent and
// as the destination key for travel-time lookups
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: f64,
    #[serde(default)]
    pub user_ratings_total: u64,
    #[serde(default)]
    pub types: Vec<String>,
    pub photo_reference: Option<String>,
}

impl Place {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Nearby,
    Famous,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendationBatch {
    pub recommendations: Vec<Place>,
    pub source: RecommendationSource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CityAttractions {
    pub attractions: Vec<Place>,
    pub city: String,
}
