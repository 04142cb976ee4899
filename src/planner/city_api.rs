use super::Planner;

use async_trait::async_trait;

use crate::api::CitySearchAPI;
use crate::entities::CityAttractions;
use crate::error::{invalid_input_error, upstream_error, Error};

#[async_trait]
impl CitySearchAPI for Planner {
    #[tracing::instrument(skip(self))]
    async fn search_city_attractions(&self, city_name: String) -> Result<CityAttractions, Error> {
        let city_name = city_name.trim().to_string();

        if city_name.is_empty() {
            return Err(invalid_input_error("Please enter a city name"));
        }

        let results = self.backend.city_attractions(city_name.clone()).await?;

        if results.attractions.is_empty() {
            return Err(upstream_error(format!(
                "No attractions found for \"{}\". Please try a different city.",
                city_name
            )));
        }

        Ok(results)
    }
}

#[test]
fn blank_city_names_fail_before_any_request() {
    use crate::api::CitySearchAPI;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    let result = block_on(planner.search_city_attractions("   ".to_string()));
    assert_eq!(result.unwrap_err().code, 101);
}

#[test]
fn city_search_trims_and_echoes_the_city() {
    use crate::api::CitySearchAPI;
    use tokio_test::block_on;

    let planner = super::fixtures::planner();

    let results = block_on(planner.search_city_attractions("  Paris  ".to_string())).unwrap();

    assert_eq!(results.city, "Paris");
    assert_eq!(results.attractions.len(), 1);
}
