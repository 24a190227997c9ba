//! Trip planning wizard
//!
//! Takes a destination, dates, and a budget, then walks through hotel
//! selection and restaurant and activity recommendations to a finished
//! itinerary. Results come either from a built-in demo catalog or from the
//! remote search API, depending on [`config::DataSource`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::TripPlanner;
