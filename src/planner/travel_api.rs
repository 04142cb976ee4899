use super::Planner;

use async_trait::async_trait;

use crate::api::TravelTimeAPI;
use crate::entities::TravelTimes;
use crate::error::{invalid_input_error, Error};

#[async_trait]
impl TravelTimeAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn calculate_travel_time(
        &self,
        origin: String,
        destination: String,
    ) -> Result<TravelTimes, Error> {
        let origin = origin.trim().to_string();
        let destination = destination.trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(invalid_input_error(
                "Please enter both origin and destination",
            ));
        }

        let times = self
            .backend
            .travel_time(origin.clone(), destination.clone())
            .await?;

        // drawing the polyline is best-effort: estimates are still shown
        // when the directions request fails
        match self.directions.driving_route(origin, destination).await {
            Ok(path) => self.surface.draw_route(&path),
            Err(err) => tracing::warn!("directions request failed: {}", err),
        }

        Ok(times)
    }

    #[tracing::instrument(skip(self))]
    async fn calculate_travel_to_place(
        &self,
        destination: String,
    ) -> Result<Option<TravelTimes>, Error> {
        let position = match *self.user_location.lock().await {
            Some(position) => position,
            None => return Ok(None),
        };

        // without an address for the user's position the host page falls back
        // to prompting for an origin
        let origin = match self.geocoder.reverse_geocode(position).await {
            Ok(address) => address,
            Err(err) => {
                tracing::warn!("reverse geocoding failed: {}", err);
                return Ok(None);
            }
        };

        let times = self.calculate_travel_time(origin, destination).await?;

        Ok(Some(times))
    }
}

#[test]
fn blank_inputs_fail_before_any_request() {
    use crate::api::TravelTimeAPI;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    let result = block_on(planner.calculate_travel_time("  ".to_string(), "Boston".to_string()));
    assert_eq!(result.unwrap_err().code, 101);

    let result = block_on(planner.calculate_travel_time("New York".to_string(), "".to_string()));
    assert_eq!(result.unwrap_err().code, 101);
}

#[test]
fn estimates_survive_a_directions_failure() {
    use crate::api::TravelTimeAPI;
    use crate::entities::RoutePath;
    use crate::error::{provider_error, Error};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio_test::block_on;

    struct NoDirections;

    #[async_trait]
    impl crate::api::DirectionsProvider for NoDirections {
        async fn driving_route(
            &self,
            _origin: String,
            _destination: String,
        ) -> Result<RoutePath, Error> {
            Err(provider_error("NOT_FOUND"))
        }
    }

    let planner = super::Planner::new(
        Arc::new(super::fixtures::StubBackend),
        Arc::new(NoDirections),
        Arc::new(super::fixtures::StubProvider),
        Arc::new(super::fixtures::NullSurface),
        None,
    );

    let times = block_on(planner.calculate_travel_time(
        "New York".to_string(),
        "Boston".to_string(),
    ))
    .unwrap();

    assert!(times.driving.is_available());
}
