use tracing::instrument;

use crate::{
    config::Config,
    error::AppResult,
    models::{
        non_blank, Activity, ActivitySearchRequest, ExperiencePreferences, Hotel,
        HotelSearchRequest, Restaurant, RestaurantSearchRequest, TripPreferences,
    },
    services::{gateway::SearchGateway, preferences::split_restrictions, providers::RecommendationProvider},
};

/// Live-mode provider that forwards every search to the remote search API
#[derive(Clone)]
pub struct SearchApiProvider {
    gateway: SearchGateway,
}

impl SearchApiProvider {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            gateway: SearchGateway::new(config)?,
        })
    }

    pub fn gateway(&self) -> &SearchGateway {
        &self.gateway
    }
}

/// Restaurant search centered on the selected hotel
pub fn restaurant_request(
    prefs: &TripPreferences,
    hotel: &Hotel,
    experience: &ExperiencePreferences,
) -> RestaurantSearchRequest {
    RestaurantSearchRequest {
        address: hotel.address.clone(),
        price_range: Some(prefs.price_range.to_string()),
        eating_preferences: non_blank(Some(experience.eating_preferences.as_str())),
        food_restrictions: split_restrictions(&experience.dietary_restrictions),
    }
}

/// Activity search centered on the selected hotel
pub fn activity_request(
    prefs: &TripPreferences,
    hotel: &Hotel,
    experience: &ExperiencePreferences,
) -> ActivitySearchRequest {
    ActivitySearchRequest {
        address: hotel.address.clone(),
        price_range: Some(prefs.price_range.to_string()),
        max_distance: None,
        search_prompt: experience.activity_prompt_or(&prefs.trip_type).to_string(),
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for SearchApiProvider {
    #[instrument(skip_all, fields(provider = "search_api", city = %prefs.city))]
    async fn search_hotels(
        &self,
        prefs: &TripPreferences,
        excluded: &[String],
    ) -> AppResult<Vec<Hotel>> {
        let request = HotelSearchRequest::from_preferences(prefs, excluded.to_vec());
        self.gateway.search_hotels(&request).await
    }

    #[instrument(skip_all, fields(provider = "search_api", hotel_id = %hotel.id))]
    async fn search_restaurants(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Restaurant>> {
        let request = restaurant_request(prefs, hotel, experience);
        self.gateway.search_restaurants(&request).await
    }

    #[instrument(skip_all, fields(provider = "search_api", hotel_id = %hotel.id))]
    async fn search_activities(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Activity>> {
        let request = activity_request(prefs, hotel, experience);
        self.gateway.search_activities(&request).await
    }

    fn name(&self) -> &'static str {
        "search_api"
    }
}
