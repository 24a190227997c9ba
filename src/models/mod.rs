use serde::{Deserialize, Serialize};

pub mod itinerary;
pub mod trip_preferences;
pub mod venue;

pub use itinerary::TripItinerary;
pub use trip_preferences::{DateRange, PriceRange, TripPreferences};
pub use venue::{AiAnalysis, Activity, Distance, Hotel, Restaurant};

/// What the user asked for once a hotel is chosen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePreferences {
    /// Kinds of restaurants and experiences (e.g., "romantic fine dining")
    #[serde(default)]
    pub eating_preferences: String,
    /// Dietary restrictions, comma separated (e.g., "vegan, near hotel")
    #[serde(default)]
    pub dietary_restrictions: String,
    /// Open-ended activity prompt
    #[serde(default)]
    pub activity_prompt: String,
}

impl ExperiencePreferences {
    pub fn dietary(restrictions: impl Into<String>) -> Self {
        Self {
            dietary_restrictions: restrictions.into(),
            ..Self::default()
        }
    }

    /// Everything that shapes restaurant selection, as one string
    pub fn dining_text(&self) -> String {
        [
            self.eating_preferences.trim(),
            self.dietary_restrictions.trim(),
        ]
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Activity prompt, falling back to the eating preferences and then the trip type
    pub fn activity_prompt_or<'a>(&'a self, trip_type: &'a str) -> &'a str {
        [
            self.activity_prompt.as_str(),
            self.eating_preferences.as_str(),
            trip_type,
        ]
        .into_iter()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
    }
}

// ============================================================================
// Search API Request Types
// ============================================================================

/// Body of `POST /hotels/search`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchRequest {
    pub city: String,
    pub date_range: DateRange,
    pub price_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_description: Option<String>,
    /// Hotel names already shown to the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_hotels: Vec<String>,
}

impl HotelSearchRequest {
    pub fn from_preferences(prefs: &TripPreferences, excluded_hotels: Vec<String>) -> Self {
        Self {
            city: prefs.city.clone(),
            date_range: prefs.date_range,
            price_range: prefs.price_range.to_string(),
            location_preferences: non_blank(prefs.location_preferences.as_deref()),
            trip_description: non_blank(Some(prefs.trip_type.as_str())),
            excluded_hotels,
        }
    }
}

/// Body of `POST /restaurants/search`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSearchRequest {
    /// Reference address the search is centered on
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eating_preferences: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub food_restrictions: Vec<String>,
}

/// Body of `POST /activities/search`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySearchRequest {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<String>,
    /// Open-ended description of what to do
    pub search_prompt: String,
}

/// Trimmed text, or None when blank
pub(crate) fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Search API Response Types
// ============================================================================

/// Response envelope shared by every search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` member of a successful search response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiSearchData<T> {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub reference_address: Option<String>,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReviews {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub snippets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAiAnalysis {
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub summary: String,
}

impl From<ApiAiAnalysis> for AiAnalysis {
    fn from(analysis: ApiAiAnalysis) -> Self {
        AiAnalysis::new(analysis.relevance_score.round().clamp(0.0, 10.0) as u8, analysis.summary)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRoomPrices {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDistance {
    #[serde(default)]
    pub meters: f64,
    #[serde(default)]
    pub text: String,
}

impl From<ApiDistance> for Distance {
    fn from(distance: ApiDistance) -> Self {
        Distance {
            meters: distance.meters.max(0.0).round() as u32,
            text: distance.text,
        }
    }
}

/// Single hotel from `POST /hotels/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHotel {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub room_prices: ApiRoomPrices,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reviews: ApiReviews,
    #[serde(default)]
    pub ai_analysis: Option<ApiAiAnalysis>,
    #[serde(default)]
    pub place_id: String,
}

/// Single restaurant from `POST /restaurants/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRestaurant {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reviews: ApiReviews,
    #[serde(default)]
    pub ai_analysis: Option<ApiAiAnalysis>,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub distance: ApiDistance,
}

/// Single activity from `POST /activities/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiActivity {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price_info: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reviews: ApiReviews,
    #[serde(default)]
    pub ai_analysis: Option<ApiAiAnalysis>,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub distance: ApiDistance,
    #[serde(default)]
    pub activity_type: String,
}

/// Place id when present, otherwise the venue name
fn place_or_name(place_id: String, name: &str) -> String {
    if place_id.trim().is_empty() {
        name.to_string()
    } else {
        place_id
    }
}

fn whole_amount(amount: Option<f64>) -> Option<u32> {
    amount.map(|a| a.max(0.0).round() as u32)
}

impl From<ApiHotel> for Hotel {
    fn from(hotel: ApiHotel) -> Self {
        let ai_analysis: Option<AiAnalysis> = hotel.ai_analysis.map(AiAnalysis::from);
        let description = ai_analysis
            .as_ref()
            .map(|a| a.summary.clone())
            .unwrap_or_default();

        Hotel {
            id: place_or_name(hotel.place_id, &hotel.name),
            name: hotel.name,
            rating: hotel.reviews.rating.unwrap_or(0.0),
            total_reviews: hotel.reviews.total_reviews.unwrap_or(0),
            price_per_night: whole_amount(hotel.room_prices.price_per_night),
            total_price: whole_amount(hotel.room_prices.total_price),
            currency: hotel.room_prices.currency.unwrap_or_default(),
            images: hotel.images,
            description,
            amenities: Vec::new(),
            address: hotel.address,
            booking_url: String::new(),
            ai_analysis,
            review_snippets: hotel.reviews.snippets,
        }
    }
}

impl From<ApiRestaurant> for Restaurant {
    fn from(restaurant: ApiRestaurant) -> Self {
        let ai_analysis: Option<AiAnalysis> = restaurant.ai_analysis.map(AiAnalysis::from);
        let description = ai_analysis
            .as_ref()
            .map(|a| a.summary.clone())
            .unwrap_or_default();
        let maps_url = if restaurant.place_id.trim().is_empty() {
            String::new()
        } else {
            venue::link_with_query(
                "https://www.google.com/maps/search/",
                &[
                    ("api", "1"),
                    ("query", restaurant.name.as_str()),
                    ("query_place_id", restaurant.place_id.as_str()),
                ],
            )
        };

        Restaurant {
            id: place_or_name(restaurant.place_id, &restaurant.name),
            name: restaurant.name,
            cuisine: String::new(),
            rating: restaurant.reviews.rating.unwrap_or(0.0),
            total_reviews: restaurant.reviews.total_reviews.unwrap_or(0),
            price_level: restaurant.price_level.unwrap_or_default(),
            images: restaurant.images,
            description,
            address: restaurant.address,
            distance: restaurant.distance.into(),
            dietary: Vec::new(),
            ai_analysis,
            review_snippets: restaurant.reviews.snippets,
            maps_url,
        }
    }
}

impl From<ApiActivity> for Activity {
    fn from(activity: ApiActivity) -> Self {
        let ai_analysis: Option<AiAnalysis> = activity.ai_analysis.map(AiAnalysis::from);
        let description = ai_analysis
            .as_ref()
            .map(|a| a.summary.clone())
            .unwrap_or_default();

        Activity {
            id: place_or_name(activity.place_id, &activity.name),
            name: activity.name,
            activity_type: activity.activity_type,
            rating: activity.reviews.rating.unwrap_or(0.0),
            total_reviews: activity.reviews.total_reviews.unwrap_or(0),
            price_info: activity.price_info.unwrap_or_default(),
            duration: None,
            images: activity.images,
            description,
            address: activity.address,
            distance: activity.distance.into(),
            ai_analysis,
            review_snippets: activity.reviews.snippets,
            booking_url: String::new(),
        }
    }
}
