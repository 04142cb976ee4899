#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    pub fn css_class(&self) -> &'static str {
        match self {
            Star::Full => "fas fa-star star",
            Star::Half => "fas fa-star-half-alt star",
            Star::Empty => "far fa-star star empty",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        }
    }
}

// always exactly five glyphs: full stars, then at most one half star when the
// fraction reaches .5, then empty stars
pub fn star_rating(rating: f64) -> [Star; 5] {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;

    let mut stars = [Star::Empty; 5];
    for star in stars.iter_mut().take(full) {
        *star = Star::Full;
    }
    if half {
        stars[full] = Star::Half;
    }

    stars
}

pub fn star_markup(rating: f64) -> String {
    star_rating(rating)
        .iter()
        .map(|star| format!("<i class=\"{}\"></i>", star.css_class()))
        .collect()
}

// 1500 -> "1.5K", 2_000_000 -> "2M"
pub fn format_review_count(count: u64) -> String {
    if count >= 1_000_000 {
        abbreviate(count as f64 / 1_000_000.0, "M")
    } else if count >= 1_000 {
        abbreviate(count as f64 / 1_000.0, "K")
    } else {
        count.to_string()
    }
}

fn abbreviate(value: f64, suffix: &str) -> String {
    let fixed = format!("{:.1}", value);
    let trimmed = fixed.strip_suffix(".0").unwrap_or(&fixed);
    format!("{}{}", trimmed, suffix)
}

const PLACE_ICONS: &[(&str, &str)] = &[
    ("tourist_attraction", "fa-camera"),
    ("amusement_park", "fa-ferris-wheel"),
    ("museum", "fa-university"),
    ("park", "fa-tree"),
    ("zoo", "fa-paw"),
    ("aquarium", "fa-fish"),
    ("art_gallery", "fa-palette"),
    ("church", "fa-church"),
    ("mosque", "fa-mosque"),
    ("synagogue", "fa-star-of-david"),
    ("stadium", "fa-futbol"),
    ("shopping_mall", "fa-shopping-bag"),
    ("restaurant", "fa-utensils"),
    ("lodging", "fa-bed"),
];

const DEFAULT_ICON: &str = "fa-map-marker-alt";

// the first recognized taxonomy tag selects the icon
pub fn place_icon(types: &[String]) -> &'static str {
    for tag in types {
        if let Some((_, icon)) = PLACE_ICONS.iter().find(|(known, _)| known == tag) {
            return icon;
        }
    }

    DEFAULT_ICON
}

// up to three tags, underscores spaced out, catch-all "establishment" dropped
pub fn display_types(types: &[String]) -> Vec<String> {
    types
        .iter()
        .take(3)
        .map(|tag| tag.replace('_', " ").replace("establishment", "place"))
        .filter(|tag| tag != "place")
        .collect()
}

#[test]
fn star_rating_is_always_five_glyphs() {
    let mut rating = 0.0;
    while rating <= 5.0 {
        assert_eq!(star_rating(rating).len(), 5);
        rating += 0.05;
    }
}

#[test]
fn star_rating_splits_full_half_empty() {
    use Star::{Empty, Full, Half};

    assert_eq!(star_rating(0.0), [Empty, Empty, Empty, Empty, Empty]);
    assert_eq!(star_rating(4.5), [Full, Full, Full, Full, Half]);
    assert_eq!(star_rating(4.4), [Full, Full, Full, Full, Empty]);
    assert_eq!(star_rating(3.0), [Full, Full, Full, Empty, Empty]);
    assert_eq!(star_rating(5.0), [Full, Full, Full, Full, Full]);
    assert_eq!(star_rating(0.5), [Half, Empty, Empty, Empty, Empty]);
}

#[test]
fn review_counts_abbreviate() {
    assert_eq!(format_review_count(0), "0");
    assert_eq!(format_review_count(999), "999");
    assert_eq!(format_review_count(1000), "1K");
    assert_eq!(format_review_count(1200), "1.2K");
    assert_eq!(format_review_count(1500), "1.5K");
    assert_eq!(format_review_count(1000000), "1M");
    assert_eq!(format_review_count(2500000), "2.5M");
}

#[test]
fn first_recognized_tag_wins() {
    let types = vec!["establishment".to_string(), "museum".to_string(), "park".to_string()];
    assert_eq!(place_icon(&types), "fa-university");

    let unknown = vec!["establishment".to_string()];
    assert_eq!(place_icon(&unknown), "fa-map-marker-alt");

    assert_eq!(place_icon(&[]), "fa-map-marker-alt");
}

#[test]
fn display_types_drop_the_catch_all() {
    let types = vec![
        "tourist_attraction".to_string(),
        "establishment".to_string(),
        "museum".to_string(),
        "park".to_string(),
    ];

    assert_eq!(display_types(&types), vec!["tourist attraction", "museum"]);
}
