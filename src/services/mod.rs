pub mod catalog;
pub mod gateway;
pub mod planner;
pub mod preferences;
pub mod providers;
pub mod ranking;

pub use gateway::SearchGateway;
pub use planner::{PlannerStep, Recommendations, SearchOutcome, TripPlanner};
pub use preferences::{DietaryRestriction, PreferenceFlags};
pub use providers::{provider_from_config, RecommendationProvider};
