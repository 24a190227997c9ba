use std::sync::{Arc, Mutex, MutexGuard};

use rand::{rngs::StdRng, SeedableRng};
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{Activity, ExperiencePreferences, Hotel, Restaurant, TripPreferences},
    services::{providers::RecommendationProvider, ranking},
};

/// Demo-mode provider backed by the local catalog
///
/// Every call draws fresh ratings and prices from its generator, so repeated
/// searches look different while identifiers stay the same.
#[derive(Clone)]
pub struct MockDataProvider {
    rng: Arc<Mutex<StdRng>>,
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataProvider {
    /// Provider seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Provider with reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic while generating cannot leave the generator inconsistent
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for MockDataProvider {
    #[instrument(skip_all, fields(provider = "mock", city = %prefs.city))]
    async fn search_hotels(
        &self,
        prefs: &TripPreferences,
        excluded: &[String],
    ) -> AppResult<Vec<Hotel>> {
        let hotels = ranking::rank_hotels(prefs, excluded, &mut *self.rng());

        tracing::info!(
            city = %prefs.city,
            excluded = excluded.len(),
            results = hotels.len(),
            "Hotel search completed"
        );

        Ok(hotels)
    }

    #[instrument(skip_all, fields(provider = "mock", city = %prefs.city, hotel_id = %hotel.id))]
    async fn search_restaurants(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Restaurant>> {
        let restaurants = ranking::rank_restaurants(
            &prefs.city,
            &hotel.address,
            &experience.dining_text(),
            &mut *self.rng(),
        );

        tracing::info!(
            city = %prefs.city,
            reference = %hotel.address,
            results = restaurants.len(),
            "Restaurant search completed"
        );

        Ok(restaurants)
    }

    #[instrument(skip_all, fields(provider = "mock", city = %prefs.city, hotel_id = %hotel.id))]
    async fn search_activities(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Activity>> {
        let prompt = experience.activity_prompt_or(&prefs.trip_type);
        let activities =
            ranking::rank_activities(&prefs.city, &hotel.address, prompt, &mut *self.rng());

        tracing::info!(
            city = %prefs.city,
            reference = %hotel.address,
            results = activities.len(),
            "Activity search completed"
        );

        Ok(activities)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
