use geo_types::LineString;

use crate::entities::Coordinates;

#[derive(Clone, Debug)]
pub struct RoutePath {
    pub polyline: LineString<f64>,
    pub summary: String,
}

impl RoutePath {
    pub fn new(points: Vec<Coordinates>, summary: String) -> Self {
        RoutePath {
            polyline: points
                .into_iter()
                .map(|c| (c.lng, c.lat))
                .collect::<Vec<_>>()
                .into(),
            summary,
        }
    }
}
