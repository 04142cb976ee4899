use std::env;
use std::sync::Arc;

use viator::api::{RouteAttractionAPI, TravelTimeAPI};
use viator::external::{GoogleMaps, TravelApi};
use viator::map::LogSurface;
use viator::planner::Planner;
use viator::view::markup;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let usage = "usage: viator <origin> <destination> [distance_km]";
    let origin = args.next().expect(usage);
    let destination = args.next().expect(usage);
    let distance_km = args.next().and_then(|v| v.parse().ok()).unwrap_or(50);

    let photo_key = env::var("GOOGLE_MAPS_API_KEY").ok();

    let planner = Planner::new(
        Arc::new(TravelApi),
        Arc::new(GoogleMaps),
        Arc::new(GoogleMaps),
        Arc::new(LogSurface),
        photo_key,
    );

    match planner
        .calculate_travel_time(origin.clone(), destination.clone())
        .await
    {
        Ok(times) => {
            let summary = markup::travel_summary(&times);
            println!("driving: {} ({})", summary.driving_time, summary.driving_distance);
            println!("transit: {} ({})", summary.transit_time, summary.transit_distance);
            if let Some((departure, arrival)) = summary.transit_schedule {
                println!("transit schedule: {} -> {}", departure, arrival);
            }
        }
        Err(err) => {
            println!("{}", err);
            return;
        }
    }

    match planner
        .load_route_attractions(origin, destination, distance_km)
        .await
    {
        Ok(count) => println!("found {} attractions along the route", count),
        Err(err) => println!("{}", err),
    }
}
