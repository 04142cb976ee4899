use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::env;

use crate::api::TravelBackend;
use crate::entities::{
    CityAttractions, Coordinates, ModeEstimate, Place, RecommendationBatch, TravelTimes,
};
use crate::error::{upstream_error, Error};

// client for the travel backend's JSON endpoints; the base URL comes from
// TRAVEL_API_BASE, scheme included
pub struct TravelApi;

#[derive(Debug, Deserialize)]
struct ModeResponse {
    status: String,
    duration: Option<String>,
    distance: Option<String>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    message: Option<String>,
}

impl From<ModeResponse> for ModeEstimate {
    fn from(mode: ModeResponse) -> Self {
        match mode {
            ModeResponse {
                status,
                duration: Some(duration),
                distance: Some(distance),
                departure_time,
                arrival_time,
                ..
            } if status == "success" => ModeEstimate::Available {
                duration,
                distance,
                departure_time,
                arrival_time,
            },
            ModeResponse { message, .. } => ModeEstimate::Unavailable { message },
        }
    }
}

#[derive(Debug, Deserialize)]
struct TravelTimeResponse {
    driving: Option<ModeResponse>,
    transit: Option<ModeResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteAttractionsResponse {
    attractions: Option<Vec<Place>>,
    message: Option<String>,
}

async fn post(path: &str, body: serde_json::Value) -> Result<reqwest::Response, Error> {
    let api_base = env::var("TRAVEL_API_BASE")?;
    let url = format!("{}{}", api_base.trim_end_matches('/'), path);

    let res = reqwest::Client::new().post(url).json(&body).send().await?;

    if !res.status().is_success() {
        let body: ErrorBody = res.json().await.unwrap_or_default();
        let message = body
            .error
            .or(body.message)
            .unwrap_or_else(|| "the travel service returned an error".to_string());

        return Err(upstream_error(message));
    }

    Ok(res)
}

fn mode_or_unavailable(mode: Option<ModeResponse>) -> ModeEstimate {
    match mode {
        Some(mode) => mode.into(),
        None => ModeEstimate::Unavailable { message: None },
    }
}

#[async_trait]
impl TravelBackend for TravelApi {
    #[tracing::instrument(skip(self))]
    async fn travel_time(
        &self,
        origin: String,
        destination: String,
    ) -> Result<TravelTimes, Error> {
        let res = post(
            "/get_travel_time",
            json!({ "origin": origin, "destination": destination }),
        )
        .await?;

        let data: TravelTimeResponse = res.json().await?;

        Ok(TravelTimes {
            driving: mode_or_unavailable(data.driving),
            transit: mode_or_unavailable(data.transit),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn recommendations(
        &self,
        near: Option<Coordinates>,
    ) -> Result<RecommendationBatch, Error> {
        let res = post(
            "/get_recommendations",
            json!({
                "lat": near.map(|c| c.lat),
                "lng": near.map(|c| c.lng),
            }),
        )
        .await?;

        Ok(res.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn city_attractions(&self, city_name: String) -> Result<CityAttractions, Error> {
        let res = post("/search_city_attractions", json!({ "city_name": city_name })).await?;

        Ok(res.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn route_attractions(
        &self,
        origin: String,
        destination: String,
        distance_km: u32,
    ) -> Result<Vec<Place>, Error> {
        let res = post(
            "/get_route_attractions",
            json!({
                "origin": origin,
                "destination": destination,
                "distance_km": distance_km,
            }),
        )
        .await?;

        let data: RouteAttractionsResponse = res.json().await?;

        match data.attractions {
            Some(attractions) if !attractions.is_empty() => Ok(attractions),
            _ => Err(upstream_error(data.message.unwrap_or_else(|| {
                "No attractions found along this route".to_string()
            }))),
        }
    }
}

#[test]
fn mode_responses_convert_to_estimates() {
    let success = ModeResponse {
        status: "success".to_string(),
        duration: Some("2 hours".to_string()),
        distance: Some("150 km".to_string()),
        departure_time: None,
        arrival_time: None,
        message: None,
    };

    assert!(ModeEstimate::from(success).is_available());

    let failure = ModeResponse {
        status: "error".to_string(),
        duration: None,
        distance: None,
        departure_time: None,
        arrival_time: None,
        message: Some("No route found".to_string()),
    };

    match ModeEstimate::from(failure) {
        ModeEstimate::Unavailable { message } => {
            assert_eq!(message.as_deref(), Some("No route found"))
        }
        _ => panic!("expected an unavailable estimate"),
    }
}

#[test]
fn success_status_without_fields_is_unavailable() {
    let partial = ModeResponse {
        status: "success".to_string(),
        duration: Some("2 hours".to_string()),
        distance: None,
        departure_time: None,
        arrival_time: None,
        message: None,
    };

    assert!(!ModeEstimate::from(partial).is_available());
}
