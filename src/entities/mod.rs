mod place;
mod route;
mod travel;

pub use place::{CityAttractions, Coordinates, Place, RecommendationBatch, RecommendationSource};
pub use route::RoutePath;
pub use travel::{ModeEstimate, TravelTimes};
