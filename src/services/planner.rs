use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        Activity, ExperiencePreferences, Hotel, Restaurant, TripItinerary, TripPreferences,
    },
    services::providers::RecommendationProvider,
};

/// Screen the user is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerStep {
    #[default]
    Search,
    Hotels,
    Recommendations,
    Overview,
}

/// Result of a search that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    /// The response was the latest for its screen and is now shown
    Applied(T),
    /// A newer search for the same screen started first; the response was dropped
    Superseded,
}

impl<T> SearchOutcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            SearchOutcome::Applied(value) => Some(value),
            SearchOutcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }
}

/// Restaurants and activities fetched together for the selected hotel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendations {
    pub restaurants: Vec<Restaurant>,
    pub activities: Vec<Activity>,
}

/// Shared planner session
///
/// Drives search form, hotel list, recommendations and overview. Every clone
/// sees the same state. Each screen owns a sequence counter: a search takes a
/// ticket before awaiting the provider and only applies its response if the
/// ticket is still the latest one for that screen.
#[derive(Clone)]
pub struct TripPlanner {
    inner: Arc<RwLock<PlannerState>>,
    provider: Arc<dyn RecommendationProvider>,
}

/// Inner state that can be modified
#[derive(Default)]
struct PlannerState {
    step: PlannerStep,
    preferences: Option<TripPreferences>,
    hotels: Vec<Hotel>,
    selected_hotel: Option<Hotel>,
    experience: ExperiencePreferences,
    restaurants: Vec<Restaurant>,
    activities: Vec<Activity>,
    itinerary: Option<TripItinerary>,
    /// User-facing message from the last failed search on the current screen
    last_error: Option<String>,
    hotel_seq: u64,
    recommendation_seq: u64,
}

impl PlannerState {
    /// Clears the session while invalidating every search still in flight
    fn reset(&mut self) {
        let hotel_seq = self.hotel_seq + 1;
        let recommendation_seq = self.recommendation_seq + 1;
        *self = PlannerState {
            hotel_seq,
            recommendation_seq,
            ..PlannerState::default()
        };
    }

    fn preferences(&self) -> AppResult<TripPreferences> {
        self.preferences
            .clone()
            .ok_or_else(|| AppError::InvalidState("No trip has been submitted".to_string()))
    }

    fn selected_hotel(&self) -> AppResult<Hotel> {
        self.selected_hotel
            .clone()
            .ok_or_else(|| AppError::InvalidState("No hotel has been selected".to_string()))
    }
}

impl TripPlanner {
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlannerState::default())),
            provider,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Accepts the search form and moves to the hotel list
    ///
    /// Any previous session is discarded.
    pub async fn submit(&self, prefs: TripPreferences) -> AppResult<()> {
        prefs.validate()?;

        let mut state = self.inner.write().await;
        state.reset();
        tracing::info!(
            city = %prefs.city,
            nights = prefs.nights(),
            price_range = %prefs.price_range,
            "Trip submitted"
        );
        state.preferences = Some(prefs);
        state.step = PlannerStep::Hotels;
        Ok(())
    }

    /// Runs a fresh hotel search and replaces the hotel list
    pub async fn search_hotels(&self) -> AppResult<SearchOutcome<Vec<Hotel>>> {
        let (ticket, prefs) = {
            let mut state = self.inner.write().await;
            let prefs = state.preferences()?;
            state.hotel_seq += 1;
            (state.hotel_seq, prefs)
        };

        tokio::task::yield_now().await;
        let result = self.provider.search_hotels(&prefs, &[]).await;

        let mut state = self.inner.write().await;
        if state.hotel_seq != ticket {
            tracing::warn!(ticket, latest = state.hotel_seq, "Dropping stale hotel results");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(hotels) => {
                state.hotels = hotels.clone();
                state.last_error = None;
                Ok(SearchOutcome::Applied(hotels))
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "Hotel search failed");
                state.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Fetches more hotels, excluding every name already shown
    ///
    /// Returns only the hotels that were appended.
    pub async fn load_more_hotels(&self) -> AppResult<SearchOutcome<Vec<Hotel>>> {
        let (ticket, prefs, excluded) = {
            let mut state = self.inner.write().await;
            let prefs = state.preferences()?;
            let excluded: Vec<String> = state.hotels.iter().map(|h| h.name.clone()).collect();
            state.hotel_seq += 1;
            (state.hotel_seq, prefs, excluded)
        };

        tokio::task::yield_now().await;
        let result = self.provider.search_hotels(&prefs, &excluded).await;

        let mut state = self.inner.write().await;
        if state.hotel_seq != ticket {
            tracing::warn!(ticket, latest = state.hotel_seq, "Dropping stale hotel results");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(hotels) => {
                let mut seen_ids: HashSet<String> =
                    state.hotels.iter().map(|h| h.id.clone()).collect();
                let mut seen_names: HashSet<String> =
                    state.hotels.iter().map(|h| h.name.to_lowercase()).collect();

                let added: Vec<Hotel> = hotels
                    .into_iter()
                    .filter(|h| {
                        let name = h.name.to_lowercase();
                        if seen_ids.contains(&h.id) || seen_names.contains(&name) {
                            return false;
                        }
                        seen_ids.insert(h.id.clone());
                        seen_names.insert(name);
                        true
                    })
                    .collect();

                tracing::info!(
                    added = added.len(),
                    total = state.hotels.len() + added.len(),
                    "More hotels loaded"
                );

                state.hotels.extend(added.iter().cloned());
                state.last_error = None;
                Ok(SearchOutcome::Applied(added))
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "Loading more hotels failed");
                state.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Picks a hotel from the current list and moves to recommendations
    pub async fn select_hotel(&self, hotel_id: &str) -> AppResult<Hotel> {
        let mut state = self.inner.write().await;
        let hotel = state
            .hotels
            .iter()
            .find(|h| h.id == hotel_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Hotel {}", hotel_id)))?;

        if state.selected_hotel.as_ref().map(|h| &h.id) != Some(&hotel.id) {
            state.restaurants.clear();
            state.activities.clear();
            state.recommendation_seq += 1;
        }

        tracing::info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel selected");

        state.selected_hotel = Some(hotel.clone());
        state.last_error = None;
        state.step = PlannerStep::Recommendations;
        Ok(hotel)
    }

    /// Searches restaurants and activities around the selected hotel
    ///
    /// Both searches run concurrently and both must succeed for either list
    /// to be replaced.
    pub async fn search_recommendations(
        &self,
        experience: ExperiencePreferences,
    ) -> AppResult<SearchOutcome<Recommendations>> {
        let (ticket, prefs, hotel) = {
            let mut state = self.inner.write().await;
            let prefs = state.preferences()?;
            let hotel = state.selected_hotel()?;
            state.recommendation_seq += 1;
            state.experience = experience.clone();
            (state.recommendation_seq, prefs, hotel)
        };

        tokio::task::yield_now().await;
        let (restaurants, activities) = tokio::join!(
            self.provider.search_restaurants(&prefs, &hotel, &experience),
            self.provider.search_activities(&prefs, &hotel, &experience),
        );

        let mut state = self.inner.write().await;
        if state.recommendation_seq != ticket {
            tracing::warn!(
                ticket,
                latest = state.recommendation_seq,
                "Dropping stale recommendations"
            );
            return Ok(SearchOutcome::Superseded);
        }

        match restaurants.and_then(|r| activities.map(|a| (r, a))) {
            Ok((restaurants, activities)) => {
                tracing::info!(
                    hotel_id = %hotel.id,
                    restaurants = restaurants.len(),
                    activities = activities.len(),
                    provider = self.provider.name(),
                    "Recommendations ready"
                );
                state.restaurants = restaurants.clone();
                state.activities = activities.clone();
                state.last_error = None;
                Ok(SearchOutcome::Applied(Recommendations {
                    restaurants,
                    activities,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "Recommendation search failed");
                state.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Builds the itinerary from the chosen recommendations
    ///
    /// An empty id list keeps every result of that kind.
    pub async fn save_trip(
        &self,
        restaurant_ids: &[String],
        activity_ids: &[String],
    ) -> AppResult<TripItinerary> {
        let mut state = self.inner.write().await;
        let prefs = state.preferences()?;
        let hotel = state.selected_hotel()?;

        let restaurants = pick(&state.restaurants, restaurant_ids, |r| &r.id, "Restaurant")?;
        let activities = pick(&state.activities, activity_ids, |a| &a.id, "Activity")?;

        let itinerary = TripItinerary::new(prefs, hotel, restaurants, activities);
        tracing::info!(
            hotel_id = %itinerary.hotel.id,
            restaurants = itinerary.restaurants.len(),
            activities = itinerary.activities.len(),
            estimated_total = itinerary.estimated_total_cost(),
            "Trip saved"
        );

        state.itinerary = Some(itinerary.clone());
        state.step = PlannerStep::Overview;
        Ok(itinerary)
    }

    /// Returns to the hotel list, keeping the hotels already loaded
    pub async fn back_to_hotels(&self) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.preferences()?;
        state.last_error = None;
        state.step = PlannerStep::Hotels;
        Ok(())
    }

    /// Returns from the overview to the recommendations of the selected hotel
    pub async fn back_to_recommendations(&self) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.selected_hotel()?;
        state.last_error = None;
        state.step = PlannerStep::Recommendations;
        Ok(())
    }

    /// Discards the whole session and goes back to the search form
    pub async fn start_over(&self) {
        let mut state = self.inner.write().await;
        state.reset();
        tracing::info!("Planner reset");
    }

    pub async fn step(&self) -> PlannerStep {
        self.inner.read().await.step
    }

    pub async fn preferences(&self) -> Option<TripPreferences> {
        self.inner.read().await.preferences.clone()
    }

    pub async fn hotels(&self) -> Vec<Hotel> {
        self.inner.read().await.hotels.clone()
    }

    pub async fn selected_hotel(&self) -> Option<Hotel> {
        self.inner.read().await.selected_hotel.clone()
    }

    pub async fn experience(&self) -> ExperiencePreferences {
        self.inner.read().await.experience.clone()
    }

    pub async fn recommendations(&self) -> Recommendations {
        let state = self.inner.read().await;
        Recommendations {
            restaurants: state.restaurants.clone(),
            activities: state.activities.clone(),
        }
    }

    pub async fn itinerary(&self) -> Option<TripItinerary> {
        self.inner.read().await.itinerary.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.last_error.clone()
    }
}

/// Items whose id is in `ids`, in result order; every item when `ids` is empty
fn pick<T: Clone>(
    items: &[T],
    ids: &[String],
    id_of: impl Fn(&T) -> &String,
    kind: &str,
) -> AppResult<Vec<T>> {
    if ids.is_empty() {
        return Ok(items.to_vec());
    }

    if let Some(missing) = ids.iter().find(|id| !items.iter().any(|item| id_of(item) == *id)) {
        return Err(AppError::NotFound(format!("{} {}", kind, missing)));
    }

    Ok(items
        .iter()
        .filter(|item| ids.contains(id_of(item)))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Distance, PriceRange};
    use crate::services::providers::MockRecommendationProvider;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prefs() -> TripPreferences {
        TripPreferences::new(
            "Paris",
            DateRange::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            ),
            PriceRange::Luxury,
        )
        .with_trip_type("romantic getaway")
    }

    fn hotel(id: &str, name: &str) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: name.to_string(),
            rating: 4.5,
            total_reviews: 10,
            price_per_night: Some(400),
            total_price: Some(1200),
            currency: "USD".to_string(),
            images: Vec::new(),
            description: String::new(),
            amenities: Vec::new(),
            address: "Le Marais".to_string(),
            booking_url: String::new(),
            ai_analysis: None,
            review_snippets: Vec::new(),
        }
    }

    fn restaurant(id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            cuisine: "French".to_string(),
            rating: 4.2,
            total_reviews: 0,
            price_level: "$$".to_string(),
            images: Vec::new(),
            description: String::new(),
            address: "Near Le Marais".to_string(),
            distance: Distance::from_miles(0.4),
            dietary: Vec::new(),
            ai_analysis: None,
            review_snippets: Vec::new(),
            maps_url: String::new(),
        }
    }

    fn activity(id: &str, price: &str) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Activity {}", id),
            activity_type: "Tour".to_string(),
            rating: 4.7,
            total_reviews: 0,
            price_info: price.to_string(),
            duration: None,
            images: Vec::new(),
            description: String::new(),
            address: "Near Le Marais".to_string(),
            distance: Distance::from_miles(1.2),
            ai_analysis: None,
            review_snippets: Vec::new(),
            booking_url: String::new(),
        }
    }

    fn planner(mock: MockRecommendationProvider) -> TripPlanner {
        TripPlanner::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_submit_rejects_reversed_dates() {
        let planner = planner(MockRecommendationProvider::new());
        let mut bad = prefs();
        bad.date_range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );

        let err = planner.submit(bad).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(planner.step().await, PlannerStep::Search);
    }

    #[tokio::test]
    async fn test_submit_rejects_stay_beyond_a_year() {
        let planner = planner(MockRecommendationProvider::new());
        let mut long = prefs();
        long.date_range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(40000, 6, 1).unwrap(),
        );

        let err = planner.submit(long).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(planner.preferences().await.is_none());
    }

    #[tokio::test]
    async fn test_search_before_submit_is_invalid_state() {
        let planner = planner(MockRecommendationProvider::new());
        let err = planner.search_hotels().await.unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_hotels() {
        let mut mock = MockRecommendationProvider::new();
        let calls = AtomicUsize::new(0);
        mock.expect_search_hotels().times(2).returning(move |_, _| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![hotel("h1", "Hotel One")])
            } else {
                Err(AppError::Network("connection refused".to_string()))
            }
        });

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();

        let err = planner.search_hotels().await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(planner.hotels().await, vec![hotel("h1", "Hotel One")]);
        assert_eq!(
            planner.last_error().await.as_deref(),
            Some(crate::error::NETWORK_ERROR_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_stale_hotel_response_is_dropped() {
        let mut mock = MockRecommendationProvider::new();
        let calls = AtomicUsize::new(0);
        mock.expect_search_hotels().times(2).returning(move |_, _| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![hotel(&format!("h{}", n), &format!("Hotel {}", n))])
        });

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();

        let (first, second) = tokio::join!(planner.search_hotels(), planner.search_hotels());
        let (first, second) = (first.unwrap(), second.unwrap());

        let applied = match (first, second) {
            (SearchOutcome::Superseded, SearchOutcome::Applied(hotels))
            | (SearchOutcome::Applied(hotels), SearchOutcome::Superseded) => hotels,
            other => panic!("expected exactly one superseded search, got {:?}", other),
        };
        assert_eq!(planner.hotels().await, applied);
    }

    #[tokio::test]
    async fn test_load_more_appends_and_dedups() {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_search_hotels()
            .withf(|_, excluded| excluded.is_empty())
            .times(1)
            .returning(|_, _| Ok(vec![hotel("h1", "Hotel One"), hotel("h2", "Hotel Two")]));
        mock.expect_search_hotels()
            .withf(|_, excluded| {
                excluded.len() == 2 && excluded[0] == "Hotel One" && excluded[1] == "Hotel Two"
            })
            .times(1)
            .returning(|_, _| Ok(vec![hotel("h2", "Hotel Two"), hotel("h3", "Hotel Three")]));

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();

        let added = planner.load_more_hotels().await.unwrap().applied().unwrap();
        assert_eq!(added, vec![hotel("h3", "Hotel Three")]);

        let ids: Vec<String> = planner.hotels().await.into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["h1", "h2", "h3"]);
    }

    #[tokio::test]
    async fn test_select_unknown_hotel_is_not_found() {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_search_hotels()
            .returning(|_, _| Ok(vec![hotel("h1", "Hotel One")]));

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();

        let err = planner.select_hotel("nope").await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(planner.step().await, PlannerStep::Hotels);
    }

    #[tokio::test]
    async fn test_recommendations_require_both_searches() {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_search_hotels()
            .returning(|_, _| Ok(vec![hotel("h1", "Hotel One")]));
        mock.expect_search_restaurants()
            .returning(|_, _, _| Ok(vec![restaurant("r1")]));
        mock.expect_search_activities().returning(|_, _, _| {
            Err(AppError::Server {
                code: "EXTERNAL_SERVICE_ERROR".to_string(),
                message: "Places API unavailable".to_string(),
            })
        });

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();
        planner.select_hotel("h1").await.unwrap();

        let err = planner
            .search_recommendations(ExperiencePreferences::dietary("vegan"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EXTERNAL_SERVICE_ERROR");
        assert_eq!(planner.recommendations().await, Recommendations::default());
        assert_eq!(
            planner.last_error().await.as_deref(),
            Some("Places API unavailable")
        );
    }

    #[tokio::test]
    async fn test_full_flow_to_overview() {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_search_hotels()
            .returning(|_, _| Ok(vec![hotel("h1", "Hotel One")]));
        mock.expect_search_restaurants()
            .withf(|_, hotel, experience| {
                hotel.id == "h1" && experience.dietary_restrictions == "vegan"
            })
            .returning(|_, _, _| Ok(vec![restaurant("r1"), restaurant("r2")]));
        mock.expect_search_activities()
            .returning(|_, _, _| Ok(vec![activity("a1", "$25"), activity("a2", "Free")]));

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();
        planner.select_hotel("h1").await.unwrap();
        planner
            .search_recommendations(ExperiencePreferences::dietary("vegan"))
            .await
            .unwrap();

        let itinerary = planner
            .save_trip(&["r2".to_string()], &[])
            .await
            .unwrap();
        assert_eq!(planner.step().await, PlannerStep::Overview);
        assert_eq!(itinerary.restaurants.len(), 1);
        assert_eq!(itinerary.activities.len(), 2);
        assert_eq!(itinerary.estimated_total_cost(), 1200 + 75 + 25);

        planner.back_to_recommendations().await.unwrap();
        assert_eq!(planner.step().await, PlannerStep::Recommendations);
        planner.back_to_hotels().await.unwrap();
        assert_eq!(planner.step().await, PlannerStep::Hotels);

        planner.start_over().await;
        assert_eq!(planner.step().await, PlannerStep::Search);
        assert!(planner.hotels().await.is_empty());
        assert!(planner.preferences().await.is_none());
    }

    #[tokio::test]
    async fn test_save_trip_with_unknown_id_is_not_found() {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_search_hotels()
            .returning(|_, _| Ok(vec![hotel("h1", "Hotel One")]));

        let planner = planner(mock);
        planner.submit(prefs()).await.unwrap();
        planner.search_hotels().await.unwrap();
        planner.select_hotel("h1").await.unwrap();

        let err = planner
            .save_trip(&["ghost".to_string()], &[])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
