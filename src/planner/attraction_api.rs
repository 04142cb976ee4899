use super::{Planner, DEFAULT_CENTER, DEFAULT_ZOOM};

use async_trait::async_trait;

use crate::api::RouteAttractionAPI;
use crate::error::Error;

#[async_trait]
impl RouteAttractionAPI for Planner {
    // a new search owns the map: existing markers are torn down before the
    // backend is asked for the next batch
    #[tracing::instrument(skip(self))]
    async fn load_route_attractions(
        &self,
        origin: String,
        destination: String,
        distance_km: u32,
    ) -> Result<usize, Error> {
        self.annotations.clear_attractions().await;

        let attractions = self
            .backend
            .route_attractions(origin, destination, distance_km)
            .await?;

        let count = attractions.len();
        self.annotations.load_attractions(attractions).await;

        tracing::info!("placed {} attractions along the route", count);

        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn reset(&self) {
        self.surface.clear_route();
        self.annotations.clear_attractions().await;

        let center = (*self.user_location.lock().await).unwrap_or(DEFAULT_CENTER);
        self.surface.center_on(center, DEFAULT_ZOOM);
    }
}

#[test]
fn route_attractions_replace_the_marker_set() {
    use crate::api::RouteAttractionAPI;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    block_on(async {
        let first = planner
            .load_route_attractions("New York".to_string(), "Boston".to_string(), 50)
            .await
            .unwrap();
        assert_eq!(first, 2);
        assert_eq!(planner.annotations().marker_count().await, 2);

        let second = planner
            .load_route_attractions("New York".to_string(), "Albany".to_string(), 50)
            .await
            .unwrap();
        assert_eq!(second, 2);

        // the old batch is gone, not appended to
        assert_eq!(planner.annotations().marker_count().await, 2);
    });
}

#[test]
fn reset_clears_annotations() {
    use crate::api::RouteAttractionAPI;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    block_on(async {
        planner
            .load_route_attractions("New York".to_string(), "Boston".to_string(), 50)
            .await
            .unwrap();

        planner.reset().await;

        assert_eq!(planner.annotations().marker_count().await, 0);
    });
}

#[test]
fn travel_to_place_needs_a_user_location() {
    use crate::api::TravelTimeAPI;
    use crate::entities::Coordinates;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    block_on(async {
        let none = planner
            .calculate_travel_to_place("Boston".to_string())
            .await
            .unwrap();
        assert!(none.is_none());

        planner
            .set_user_location(Coordinates {
                lat: 40.7128,
                lng: -74.0060,
            })
            .await;

        let times = planner
            .calculate_travel_to_place("Boston".to_string())
            .await
            .unwrap();
        assert!(times.is_some());
    });
}
