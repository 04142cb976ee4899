use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::api::{DirectionsProvider, Geocoder};
use crate::entities::{Coordinates, RoutePath};
use crate::error::{geocode_error, invalid_input_error, provider_error, Error};

// geocoding and directions over the Google Maps HTTP APIs, configured through
// GOOGLE_MAPS_API_BASE and GOOGLE_MAPS_API_KEY
pub struct GoogleMaps;

#[derive(Debug, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
    routes: Option<T>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    summary: Option<String>,
    legs: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    steps: Vec<RouteStep>,
}

#[derive(Debug, Deserialize)]
struct RouteStep {
    start_location: Coordinates,
    end_location: Coordinates,
}

async fn get<T: serde::de::DeserializeOwned>(
    path: &str,
    query: &[(&str, String)],
) -> Result<Response<T>, Error> {
    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}{}", api_base, path);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(query)
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error("invalid request"));
    } else if status_code != 200 {
        return Err(provider_error(format!("status {}", status_code)));
    }

    Ok(res.json().await?)
}

#[async_trait]
impl Geocoder for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: String) -> Result<Coordinates, Error> {
        let data: Response<Vec<GeocodeResult>> =
            get("/maps/api/geocode/json", &[("address", address)]).await?;

        if data.status != "OK" {
            return Err(geocode_error(data.status));
        }

        let results = data.results.unwrap_or_default();
        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| geocode_error("ZERO_RESULTS"))?;

        Ok(first.geometry.location)
    }

    #[tracing::instrument(skip(self))]
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, Error> {
        let latlng = format!("{},{}", coordinates.lat, coordinates.lng);
        let data: Response<Vec<GeocodeResult>> =
            get("/maps/api/geocode/json", &[("latlng", latlng)]).await?;

        if data.status != "OK" {
            return Err(geocode_error(data.status));
        }

        let results = data.results.unwrap_or_default();
        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| geocode_error("ZERO_RESULTS"))?;

        Ok(first.formatted_address)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn driving_route(
        &self,
        origin: String,
        destination: String,
    ) -> Result<RoutePath, Error> {
        let data: Response<Vec<DirectionsRoute>> = get(
            "/maps/api/directions/json",
            &[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving".to_string()),
            ],
        )
        .await?;

        if data.status != "OK" {
            return Err(provider_error(format!("directions failed: {}", data.status)));
        }

        let route = data
            .routes
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| provider_error("directions returned no routes"))?;

        // a polyline from the step endpoints is close enough to draw
        let mut points = Vec::new();
        for leg in &route.legs {
            for (index, step) in leg.steps.iter().enumerate() {
                if index == 0 {
                    points.push(step.start_location);
                }
                points.push(step.end_location);
            }
        }

        Ok(RoutePath::new(points, route.summary.unwrap_or_default()))
    }
}
