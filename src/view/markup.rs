// data-to-markup assembly for cards and popups, kept as plain functions of
// `Place` so content is independent of any rendering technology

use crate::entities::{ModeEstimate, Place, TravelTimes};
use crate::view::format::{display_types, format_review_count, place_icon, star_markup};

const PHOTO_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/photo";

fn photo_url(reference: &str, max_width: u32, key: &str) -> String {
    format!(
        "{}?maxwidth={}&photo_reference={}&key={}",
        PHOTO_ENDPOINT, max_width, reference, key
    )
}

// the location string rides inside a single-quoted onclick argument
fn escape_quotes(value: &str) -> String {
    value.replace('\'', "\\'")
}

// compact popup shown while the pointer rests on a marker
pub fn hover_card(place: &Place, photo_key: Option<&str>) -> String {
    let stars = star_markup(place.rating);
    let review_count = format_review_count(place.user_ratings_total);

    let media = match (place.photo_reference.as_deref(), photo_key) {
        (Some(reference), Some(key)) => format!(
            "<div class=\"hover-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
            photo_url(reference, 200, key),
            place.name
        ),
        _ => format!(
            "<div class=\"hover-image-placeholder\"><i class=\"fas {}\"></i></div>",
            place_icon(&place.types)
        ),
    };

    format!(
        concat!(
            "<div class=\"map-hover-tooltip\">{media}<div class=\"hover-content\">",
            "<h4 class=\"hover-title\">{name}</h4>",
            "<div class=\"hover-rating\"><div class=\"stars\">{stars}</div>",
            "<span class=\"rating-text\">{rating:.1}</span></div>",
            "<div class=\"hover-reviews\"><i class=\"fas fa-users\"></i> {reviews} reviews</div>",
            "<div class=\"hover-location\"><i class=\"fas fa-map-marker-alt\"></i> {location}</div>",
            "<div class=\"hover-tip\"><small>Click for directions</small></div>",
            "</div></div>"
        ),
        media = media,
        name = place.name,
        stars = stars,
        rating = place.rating,
        reviews = review_count,
        location = place.location,
    )
}

// persistent popup opened by clicking a marker: full detail plus the
// get-directions action
pub fn detail_card(place: &Place) -> String {
    let stars = star_markup(place.rating);
    let review_count = format_review_count(place.user_ratings_total);

    format!(
        concat!(
            "<div class=\"map-info-window\">",
            "<div class=\"info-header\"><h4>{name}</h4>",
            "<div class=\"info-rating\"><div class=\"stars\">{stars}</div>",
            "<span>{rating:.1} ({reviews})</span></div></div>",
            "<div class=\"info-location\"><i class=\"fas fa-map-marker-alt\"></i> {location}</div>",
            "<div class=\"info-actions\">",
            "<button onclick=\"calculateTravelToPlace('{destination}')\" class=\"info-directions-btn\">",
            "<i class=\"fas fa-route\"></i> Get Directions</button></div>",
            "</div>"
        ),
        name = place.name,
        stars = stars,
        rating = place.rating,
        reviews = review_count,
        location = place.location,
        destination = escape_quotes(&place.location),
    )
}

// grid card used by the recommendation and city-search views
pub fn place_card(place: &Place, index: usize, photo_key: Option<&str>) -> String {
    let stars = star_markup(place.rating);

    let image = match (place.photo_reference.as_deref(), photo_key) {
        (Some(reference), Some(key)) => format!(
            "<div class=\"recommendation-image has-photo\" style=\"background-image: url('{}')\"></div>",
            photo_url(reference, 400, key)
        ),
        _ => format!(
            "<div class=\"recommendation-image\"><i class=\"fas {}\"></i></div>",
            place_icon(&place.types)
        ),
    };

    let review_text = if place.user_ratings_total > 0 {
        format!(
            "<span class=\"review-count\">({} reviews)</span>",
            format_review_count(place.user_ratings_total)
        )
    } else {
        String::new()
    };

    let types = display_types(&place.types);
    let types_block = if types.is_empty() {
        String::new()
    } else {
        let tags: String = types
            .iter()
            .map(|tag| format!("<span class=\"type-tag\">{}</span>", tag))
            .collect();
        format!("<div class=\"recommendation-types\">{}</div>", tags)
    };

    format!(
        concat!(
            "<div class=\"recommendation-card\" style=\"animation-delay: {delay:.1}s;\">",
            "{image}",
            "<div class=\"recommendation-content\">",
            "<h3 class=\"recommendation-title\">{name}</h3>",
            "<div class=\"recommendation-location\"><i class=\"fas fa-map-marker-alt\"></i> {location}</div>",
            "<div class=\"recommendation-rating\"><div class=\"stars\">{stars}</div>",
            "<span class=\"rating-number\">{rating:.1}</span>{review_text}</div>",
            "{types_block}",
            "<button class=\"calculate-travel-btn\" onclick=\"calculateTravelToPlace('{destination}')\">",
            "<i class=\"fas fa-route\"></i> Calculate Travel Time</button>",
            "</div></div>"
        ),
        delay = index as f64 * 0.1,
        image = image,
        name = place.name,
        location = place.location,
        stars = stars,
        rating = place.rating,
        review_text = review_text,
        types_block = types_block,
        destination = escape_quotes(&place.location),
    )
}

pub fn city_results(city: &str, attractions: &[Place], photo_key: Option<&str>) -> String {
    let cards: String = attractions
        .iter()
        .enumerate()
        .map(|(index, place)| place_card(place, index, photo_key))
        .collect();

    format!(
        concat!(
            "<div class=\"city-results-header\"><h3>",
            "<i class=\"fas fa-star\"></i> Top Attractions in {city}",
            "<span>Found {count} highly-rated places</span>",
            "</h3></div>",
            "<div class=\"recommendations-grid\">{cards}</div>"
        ),
        city = city,
        count = attractions.len(),
        cards = cards,
    )
}

// display strings for the results panel; each mode degrades independently
#[derive(Clone, Debug, PartialEq)]
pub struct TravelSummary {
    pub driving_time: String,
    pub driving_distance: String,
    pub transit_time: String,
    pub transit_distance: String,
    pub transit_schedule: Option<(String, String)>,
}

pub fn travel_summary(times: &TravelTimes) -> TravelSummary {
    let (driving_time, driving_distance) = match &times.driving {
        ModeEstimate::Available {
            duration, distance, ..
        } => (duration.clone(), distance.clone()),
        ModeEstimate::Unavailable { message } => (
            "N/A".to_string(),
            message.clone().unwrap_or_else(|| "No route found".to_string()),
        ),
    };

    let (transit_time, transit_distance, transit_schedule) = match &times.transit {
        ModeEstimate::Available {
            duration,
            distance,
            departure_time,
            arrival_time,
        } => {
            let schedule = match (departure_time, arrival_time) {
                (Some(departure), Some(arrival)) => Some((departure.clone(), arrival.clone())),
                _ => None,
            };
            (duration.clone(), distance.clone(), schedule)
        }
        ModeEstimate::Unavailable { message } => (
            "N/A".to_string(),
            message
                .clone()
                .unwrap_or_else(|| "No transit route found".to_string()),
            None,
        ),
    };

    TravelSummary {
        driving_time,
        driving_distance,
        transit_time,
        transit_distance,
        transit_schedule,
    }
}

#[cfg(test)]
fn sample_place() -> Place {
    Place {
        name: "City Museum".to_string(),
        location: "1 Main St".to_string(),
        lat: Some(40.0),
        lng: Some(-74.0),
        rating: 4.5,
        user_ratings_total: 1200,
        types: vec!["museum".to_string()],
        photo_reference: None,
    }
}

#[test]
fn place_card_formats_rating_and_reviews() {
    let card = place_card(&sample_place(), 0, None);

    assert_eq!(card.matches("\"fas fa-star star\"").count(), 4);
    assert_eq!(card.matches("fa-star-half-alt").count(), 1);
    assert!(!card.contains("far fa-star"));
    assert!(card.contains("(1.2K reviews)"));
    assert!(card.contains("fa-university"));
    assert!(card.contains("1 Main St"));
}

#[test]
fn place_card_omits_review_text_without_reviews() {
    let mut place = sample_place();
    place.user_ratings_total = 0;

    let card = place_card(&place, 0, None);

    assert!(!card.contains("review-count"));
}

#[test]
fn hover_card_falls_back_to_an_icon_without_a_photo() {
    let card = hover_card(&sample_place(), None);

    assert!(card.contains("hover-image-placeholder"));
    assert!(card.contains("fa-university"));
    assert!(card.contains("1.2K reviews"));
    assert!(card.contains("Click for directions"));
}

#[test]
fn hover_card_embeds_the_photo_when_available() {
    let mut place = sample_place();
    place.photo_reference = Some("ref123".to_string());

    let card = hover_card(&place, Some("key456"));

    assert!(card.contains("hover-image"));
    assert!(card.contains("photo_reference=ref123"));
    assert!(card.contains("key=key456"));
}

#[test]
fn detail_card_escapes_the_directions_argument() {
    let mut place = sample_place();
    place.location = "Tim's Diner, Main St".to_string();

    let card = detail_card(&place);

    assert!(card.contains("calculateTravelToPlace('Tim\\'s Diner, Main St')"));
}

#[test]
fn travel_summary_degrades_per_mode() {
    use crate::entities::ModeEstimate;

    let times = TravelTimes {
        driving: ModeEstimate::Available {
            duration: "2 hours".to_string(),
            distance: "150 km".to_string(),
            departure_time: None,
            arrival_time: None,
        },
        transit: ModeEstimate::Unavailable {
            message: Some("No transit available".to_string()),
        },
    };

    let summary = travel_summary(&times);

    assert_eq!(summary.driving_time, "2 hours");
    assert_eq!(summary.driving_distance, "150 km");
    assert_eq!(summary.transit_time, "N/A");
    assert_eq!(summary.transit_distance, "No transit available");
    assert_eq!(summary.transit_schedule, None);
}

#[test]
fn travel_summary_carries_the_transit_schedule() {
    use crate::entities::ModeEstimate;

    let times = TravelTimes {
        driving: ModeEstimate::Unavailable { message: None },
        transit: ModeEstimate::Available {
            duration: "1 hour".to_string(),
            distance: "40 km".to_string(),
            departure_time: Some("10:05".to_string()),
            arrival_time: Some("11:05".to_string()),
        },
    };

    let summary = travel_summary(&times);

    assert_eq!(summary.driving_time, "N/A");
    assert_eq!(summary.driving_distance, "No route found");
    assert_eq!(
        summary.transit_schedule,
        Some(("10:05".to_string(), "11:05".to_string()))
    );
}
