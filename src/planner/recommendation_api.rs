use super::Planner;

use async_trait::async_trait;

use crate::api::RecommendationAPI;
use crate::entities::{Coordinates, RecommendationBatch};
use crate::error::Error;

#[async_trait]
impl RecommendationAPI for Planner {
    // nearby picks when coordinates are known, famous destinations otherwise;
    // the backend decides and reports which through `source`
    #[tracing::instrument(skip(self))]
    async fn load_recommendations(
        &self,
        near: Option<Coordinates>,
    ) -> Result<RecommendationBatch, Error> {
        self.backend.recommendations(near).await
    }
}

#[test]
fn recommendation_source_follows_the_coordinates() {
    use crate::api::RecommendationAPI;
    use crate::entities::{Coordinates, RecommendationSource};
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    let nearby = block_on(planner.load_recommendations(Some(Coordinates {
        lat: 40.0,
        lng: -74.0,
    })))
    .unwrap();
    assert_eq!(nearby.source, RecommendationSource::Nearby);

    let famous = block_on(planner.load_recommendations(None)).unwrap();
    assert_eq!(famous.source, RecommendationSource::Famous);
}
