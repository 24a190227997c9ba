use std::sync::Arc;

use crate::{
    config::{Config, DataSource},
    error::AppResult,
    models::{Activity, ExperiencePreferences, Hotel, Restaurant, TripPreferences},
};

pub mod mock;
pub mod search_api;

pub use mock::MockDataProvider;
pub use search_api::SearchApiProvider;

/// Trait for recommendation providers
///
/// Implemented by a local generator for demo mode and by the remote search
/// API for live mode; `provider_from_config` picks one.
/// Every call returns a fresh result set. Callers replace what they show
/// with it, except for hotel "load more" which appends.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Hotels for the trip, skipping names in `excluded`
    async fn search_hotels(
        &self,
        prefs: &TripPreferences,
        excluded: &[String],
    ) -> AppResult<Vec<Hotel>>;

    /// Restaurants around the selected hotel
    async fn search_restaurants(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Restaurant>>;

    /// Activities around the selected hotel
    async fn search_activities(
        &self,
        prefs: &TripPreferences,
        hotel: &Hotel,
        experience: &ExperiencePreferences,
    ) -> AppResult<Vec<Activity>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the provider the configuration asks for
pub fn provider_from_config(config: &Config) -> AppResult<Arc<dyn RecommendationProvider>> {
    let provider: Arc<dyn RecommendationProvider> = match config.data_source {
        DataSource::Mock => Arc::new(match config.mock_seed {
            Some(seed) => MockDataProvider::seeded(seed),
            None => MockDataProvider::new(),
        }),
        DataSource::Live => Arc::new(SearchApiProvider::new(config)?),
    };

    tracing::info!(provider = provider.name(), "Recommendation provider ready");

    Ok(provider)
}
