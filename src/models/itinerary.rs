use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{Activity, Hotel, Restaurant, TripPreferences};

/// Flat per-restaurant allowance used in the cost estimate
pub const MEAL_ESTIMATE: u32 = 75;

/// The finished trip: selected hotel plus the saved restaurants and activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripItinerary {
    pub preferences: TripPreferences,
    pub hotel: Hotel,
    pub restaurants: Vec<Restaurant>,
    pub activities: Vec<Activity>,
}

impl TripItinerary {
    pub fn new(
        preferences: TripPreferences,
        hotel: Hotel,
        restaurants: Vec<Restaurant>,
        activities: Vec<Activity>,
    ) -> Self {
        Self {
            preferences,
            hotel,
            restaurants,
            activities,
        }
    }

    /// Hotel stay + a meal allowance per restaurant + activity tickets
    pub fn estimated_total_cost(&self) -> u32 {
        let stay = self.hotel.total_price.unwrap_or(0);
        let meals = u32::try_from(self.restaurants.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(MEAL_ESTIMATE);
        let tickets = self
            .activities
            .iter()
            .map(Activity::price_amount)
            .fold(0u32, u32::saturating_add);
        stay.saturating_add(meals).saturating_add(tickets)
    }
}

/// Printable plain-text itinerary
impl Display for TripItinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefs = &self.preferences;

        writeln!(f, "Your trip to {}", prefs.city)?;
        writeln!(
            f,
            "{} to {} ({} nights) | {}",
            prefs.date_range.check_in,
            prefs.date_range.check_out,
            prefs.nights(),
            prefs.price_range
        )?;
        if !prefs.trip_type.is_empty() {
            writeln!(f, "Trip type: {}", prefs.trip_type)?;
        }
        if let Some(location) = prefs.location_preferences.as_deref() {
            writeln!(f, "Location preferences: {}", location)?;
        }
        writeln!(f, "Estimated total cost: ${}", self.estimated_total_cost())?;

        writeln!(f)?;
        writeln!(f, "HOTEL")?;
        writeln!(
            f,
            "  {} ({:.1} stars) - {}",
            self.hotel.name, self.hotel.rating, self.hotel.address
        )?;
        if let (Some(total), Some(nightly)) = (self.hotel.total_price, self.hotel.price_per_night) {
            writeln!(f, "  ${} total (${}/night)", total, nightly)?;
        }
        if !self.hotel.amenities.is_empty() {
            let amenities: Vec<&str> = self.hotel.amenities.iter().take(5).map(String::as_str).collect();
            writeln!(f, "  Amenities: {}", amenities.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "RESTAURANTS ({})", self.restaurants.len())?;
        for (i, restaurant) in self.restaurants.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} - {} {} ({:.1} stars, {})",
                i + 1,
                restaurant.name,
                restaurant.cuisine,
                restaurant.price_level,
                restaurant.rating,
                restaurant.distance.text
            )?;
        }

        writeln!(f)?;
        writeln!(f, "ACTIVITIES ({})", self.activities.len())?;
        for (i, activity) in self.activities.iter().enumerate() {
            write!(
                f,
                "  {}. {} - {} ({})",
                i + 1,
                activity.name,
                activity.activity_type,
                activity.price_info
            )?;
            if let Some(duration) = activity.duration.as_deref() {
                write!(f, ", {}", duration)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
