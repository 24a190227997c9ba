use rand::Rng;

use crate::{
    models::{
        venue::{link_with_query, maps_search_url},
        Activity, Distance, Hotel, Restaurant, TripPreferences,
    },
    services::{
        catalog::{self, RestaurantTemplate},
        preferences::PreferenceFlags,
    },
};

/// Fewer filtered restaurants than this and the filter is dropped
pub const FALLBACK_THRESHOLD: usize = 6;

const RATING_RANGE: (f64, f64) = (4.0, 4.9);
const DISTANCE_MILES: (f64, f64) = (0.3, 2.3);
const NEAR_HOTEL_DISTANCE_MILES: (f64, f64) = (0.1, 0.6);

const AIRPORT_SHUTTLE: &str = " Convenient airport shuttle service available.";
const NEAR_RESTAURANTS: &str = " Walking distance to acclaimed restaurants and cafes.";
const NEAR_LANDMARKS: &str = " Steps away from popular tourist attractions and landmarks.";
const CLEANLINESS: &str = " Known for exceptional cleanliness and hygiene standards.";
const SPECIAL_OCCASION: &str = " Perfect for a special occasion.";
const QUICK_SERVICE: &str = " Quick service without compromising quality.";

fn rating<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.gen_range(RATING_RANGE.0..=RATING_RANGE.1);
    ((raw * 10.0).round() / 10.0).clamp(RATING_RANGE.0, RATING_RANGE.1)
}

fn distance<R: Rng + ?Sized>(rng: &mut R, near_hotel: bool) -> Distance {
    let (min, max) = if near_hotel {
        NEAR_HOTEL_DISTANCE_MILES
    } else {
        DISTANCE_MILES
    };
    Distance::from_miles(rng.gen_range(min..=max))
}

/// Restaurant templates that survive the dietary filter
///
/// The first restriction in precedence order decides the filter. When it
/// leaves fewer than [`FALLBACK_THRESHOLD`] candidates the unfiltered
/// catalog is used instead. The result is truncated to the threshold.
pub fn select_restaurants(flags: &PreferenceFlags) -> Vec<&'static RestaurantTemplate> {
    let mut selected: Vec<&'static RestaurantTemplate> = match flags.dietary_restriction() {
        Some(restriction) => catalog::RESTAURANTS
            .iter()
            .filter(|r| restriction.accepts(r.dietary))
            .collect(),
        None => catalog::RESTAURANTS.iter().collect(),
    };

    if selected.len() < FALLBACK_THRESHOLD {
        tracing::debug!(
            matched = selected.len(),
            threshold = FALLBACK_THRESHOLD,
            "Dietary filter too narrow, using unfiltered catalog"
        );
        selected = catalog::RESTAURANTS
            .iter()
            .take(FALLBACK_THRESHOLD)
            .collect();
    }

    selected.truncate(FALLBACK_THRESHOLD);
    selected
}

/// Hotels for the destination, skipping any whose name was already shown
///
/// Identifiers follow the catalog position so excluded hotels never shift
/// the ids of the remaining ones.
pub fn rank_hotels<R: Rng + ?Sized>(
    prefs: &TripPreferences,
    excluded: &[String],
    rng: &mut R,
) -> Vec<Hotel> {
    let flags = PreferenceFlags::parse(prefs.location_text());
    let (min_price, max_price) = prefs.price_range.nightly_band();
    let nights = prefs.nights();
    let booking_url = link_with_query(
        "https://www.booking.com/search",
        &[("city", prefs.city.as_str())],
    );

    catalog::HOTELS
        .iter()
        .enumerate()
        .filter_map(|(index, template)| {
            let name = catalog::render(template.name, &prefs.city);
            if excluded.iter().any(|seen| seen.eq_ignore_ascii_case(&name)) {
                return None;
            }

            let location = (template.location)(&flags);
            let mut description = template.description.to_string();
            if flags.near_airport && !location.to_lowercase().contains("airport") {
                description.push_str(AIRPORT_SHUTTLE);
            }
            if flags.near_restaurants {
                description.push_str(NEAR_RESTAURANTS);
            }
            if flags.near_tourist {
                description.push_str(NEAR_LANDMARKS);
            }

            let price_per_night = rng.gen_range(min_price..=max_price);

            Some(Hotel {
                id: format!("hotel-{}", index),
                name,
                rating: rating(rng),
                total_reviews: 0,
                price_per_night: Some(price_per_night),
                total_price: Some(price_per_night.saturating_mul(nights)),
                currency: "USD".to_string(),
                images: vec![catalog::image_for(catalog::HOTEL_IMAGES, index)],
                description,
                amenities: template.amenities.iter().map(|a| a.to_string()).collect(),
                address: location.to_string(),
                booking_url: booking_url.clone(),
                ai_analysis: None,
                review_snippets: Vec::new(),
            })
        })
        .collect()
}

/// Restaurants around `reference` matching the free-text dining preferences
pub fn rank_restaurants<R: Rng + ?Sized>(
    city: &str,
    reference: &str,
    dining: &str,
    rng: &mut R,
) -> Vec<Restaurant> {
    let flags = PreferenceFlags::parse(dining);

    select_restaurants(&flags)
        .into_iter()
        .enumerate()
        .map(|(index, template)| {
            let name = catalog::render(template.name, city);

            let mut description = template.description.to_string();
            if flags.wants_clean {
                description.push_str(CLEANLINESS);
            }
            if flags.fine_dining && template.price_level == "$$$" {
                description.push_str(SPECIAL_OCCASION);
            }
            if flags.quick && template.price_level == "$" {
                description.push_str(QUICK_SERVICE);
            }

            Restaurant {
                id: format!("restaurant-{}", index),
                maps_url: maps_search_url(&name, city),
                name,
                cuisine: template.cuisine.to_string(),
                rating: rating(rng),
                total_reviews: 0,
                price_level: template.price_level.to_string(),
                images: vec![catalog::image_for(catalog::RESTAURANT_IMAGES, index)],
                description,
                address: format!("Near {}", reference),
                distance: distance(rng, flags.near_hotel),
                dietary: template.dietary.iter().map(|d| d.to_string()).collect(),
                ai_analysis: None,
                review_snippets: Vec::new(),
            }
        })
        .collect()
}

/// Activities around `reference`
///
/// The catalog is not filtered; only the "near hotel" hint in the prompt
/// changes the synthesized distances.
pub fn rank_activities<R: Rng + ?Sized>(
    city: &str,
    reference: &str,
    prompt: &str,
    rng: &mut R,
) -> Vec<Activity> {
    let flags = PreferenceFlags::parse(prompt);

    catalog::ACTIVITIES
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let name = catalog::render(template.name, city);
            let search = format!("{} {} booking", name, city);

            Activity {
                id: format!("activity-{}", index),
                booking_url: link_with_query(
                    "https://www.google.com/search",
                    &[("q", search.as_str())],
                ),
                name,
                activity_type: template.category.to_string(),
                rating: rating(rng),
                total_reviews: 0,
                price_info: template.price.to_string(),
                duration: Some(template.duration.to_string()),
                images: vec![catalog::image_for(catalog::ACTIVITY_IMAGES, index)],
                description: template.description.to_string(),
                address: format!("Near {}", reference),
                distance: distance(rng, flags.near_hotel),
                ai_analysis: None,
                review_snippets: Vec::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, PriceRange};
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};

    fn prefs(price_range: PriceRange) -> TripPreferences {
        TripPreferences::new(
            "Paris",
            DateRange::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            ),
            price_range,
        )
        .with_trip_type("romantic getaway")
    }

    fn names(selected: &[&RestaurantTemplate]) -> Vec<&'static str> {
        selected.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_no_preferences_takes_first_six() {
        let selected = select_restaurants(&PreferenceFlags::default());
        assert_eq!(selected.len(), FALLBACK_THRESHOLD);
        assert_eq!(selected[0].name, "Le Petit {city}");
        assert_eq!(selected[5].name, "{city} Seafood Co.");
    }

    #[test]
    fn test_vegan_filter_falls_back_when_too_narrow() {
        // Only five catalog entries carry a vegan tag
        let vegan_count = catalog::RESTAURANTS
            .iter()
            .filter(|r| r.dietary.iter().any(|d| d.contains("vegan")))
            .count();
        assert!(vegan_count < FALLBACK_THRESHOLD);

        let selected = select_restaurants(&PreferenceFlags::parse("vegan"));
        let expected: Vec<&RestaurantTemplate> =
            catalog::RESTAURANTS.iter().take(FALLBACK_THRESHOLD).collect();
        assert_eq!(names(&selected), names(&expected));
    }

    #[test]
    fn test_vegetarian_filter_keeps_only_matching() {
        let selected = select_restaurants(&PreferenceFlags::parse("vegetarian"));
        assert_eq!(selected.len(), FALLBACK_THRESHOLD);
        assert!(selected
            .iter()
            .all(|r| r.dietary.iter().any(|d| d.contains("vegan") || d.contains("vegetarian"))));
        assert!(!names(&selected).contains(&"The Steakhouse"));
    }

    #[test]
    fn test_gluten_free_filter_truncates_to_threshold() {
        let selected = select_restaurants(&PreferenceFlags::parse("celiac"));
        assert_eq!(selected.len(), FALLBACK_THRESHOLD);
        assert!(selected
            .iter()
            .all(|r| r.dietary.iter().any(|d| d.contains("gluten-free"))));
    }

    #[test]
    fn test_first_matching_restriction_wins() {
        // Vegetarian outranks halal; halal alone would fall back
        let selected = select_restaurants(&PreferenceFlags::parse("halal vegetarian"));
        assert!(!names(&selected).contains(&"The Steakhouse"));
        assert!(!names(&selected).contains(&"{city} Seafood Co."));
    }

    #[test]
    fn test_hotel_prices_within_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for (range, (min, max)) in [
            (PriceRange::Budget, (80, 150)),
            (PriceRange::Moderate, (150, 300)),
            (PriceRange::Luxury, (300, 600)),
            (PriceRange::from("splurge"), (80, 150)),
        ] {
            for _ in 0..25 {
                for hotel in rank_hotels(&prefs(range.clone()), &[], &mut rng) {
                    let nightly = hotel.price_per_night.unwrap();
                    assert!((min..=max).contains(&nightly));
                    assert_eq!(hotel.total_price, Some(nightly * 3));
                    assert!((4.0..=4.9).contains(&hotel.rating));
                }
            }
        }
    }

    #[test]
    fn test_hotel_total_saturates_on_huge_stay() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut trip = prefs(PriceRange::Luxury);
        trip.date_range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::MAX,
        );
        for hotel in rank_hotels(&trip, &[], &mut rng) {
            assert_eq!(hotel.total_price, Some(u32::MAX));
        }
    }

    #[test]
    fn test_hotel_exclusions_keep_ids_stable() {
        let mut rng = StdRng::seed_from_u64(1);
        let hotels = rank_hotels(
            &prefs(PriceRange::Budget),
            &["The Grand Paris".to_string()],
            &mut rng,
        );
        assert_eq!(hotels.len(), catalog::HOTELS.len() - 1);
        assert_eq!(hotels[0].id, "hotel-1");
        assert_eq!(hotels[0].name, "Paris Boutique Suites");
    }

    #[test]
    fn test_hotel_descriptions_follow_location_flags() {
        let mut rng = StdRng::seed_from_u64(3);
        let trip = prefs(PriceRange::Moderate).with_location_preferences("near the airport");
        let hotels = rank_hotels(&trip, &[], &mut rng);
        assert_eq!(hotels[0].address, "Near Airport District");
        assert!(!hotels[0].description.contains("shuttle"));
        assert!(hotels[2].description.ends_with(AIRPORT_SHUTTLE));
    }

    #[test]
    fn test_regeneration_keeps_ids_changes_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let first = rank_restaurants("Paris", "City Center", "", &mut rng);
        let second = rank_restaurants("Paris", "City Center", "", &mut rng);
        let ids = |r: &[Restaurant]| r.iter().map(|x| x.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_near_hotel_distances() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..25 {
            for restaurant in rank_restaurants("Paris", "City Center", "vegan, near hotel", &mut rng) {
                assert!(restaurant.distance.miles() <= 0.61);
                assert!(restaurant.distance.miles() >= 0.09);
            }
            for restaurant in rank_restaurants("Paris", "City Center", "anything", &mut rng) {
                assert!(restaurant.distance.miles() >= 0.29);
                assert!(restaurant.distance.miles() <= 2.31);
            }
        }
    }

    #[test]
    fn test_restaurant_description_augmentation() {
        let mut rng = StdRng::seed_from_u64(9);
        let restaurants = rank_restaurants("Paris", "Hotel", "clean fine dining", &mut rng);
        assert!(restaurants.iter().all(|r| r.description.contains(CLEANLINESS.trim())));
        let sakura = restaurants.iter().find(|r| r.name == "Sakura Garden").unwrap();
        assert!(sakura.description.ends_with(SPECIAL_OCCASION));
        let trattoria = restaurants.iter().find(|r| r.name == "Paris Trattoria").unwrap();
        assert!(!trattoria.description.contains(SPECIAL_OCCASION.trim()));
    }

    #[test]
    fn test_activities_render_city() {
        let mut rng = StdRng::seed_from_u64(2);
        let activities = rank_activities("Rome", "Rome Plaza Hotel", "museums", &mut rng);
        assert_eq!(activities.len(), catalog::ACTIVITIES.len());
        assert_eq!(activities[0].name, "Rome Museum of Art");
        assert_eq!(activities[0].id, "activity-0");
        assert_eq!(activities[2].price_amount(), 0);
        assert!(activities[0].booking_url.contains("Rome+Museum+of+Art"));
    }
}
