use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Price range token chosen on the search form
///
/// Known tokens map to nightly price bands; anything else is kept verbatim
/// so it can be forwarded to the search API unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriceRange {
    Budget,
    Moderate,
    Luxury,
    Other(String),
}

impl PriceRange {
    /// Inclusive nightly price band in whole currency units
    ///
    /// Unknown tokens use the budget band.
    pub fn nightly_band(&self) -> (u32, u32) {
        match self {
            PriceRange::Budget => (80, 150),
            PriceRange::Moderate => (150, 300),
            PriceRange::Luxury => (300, 600),
            PriceRange::Other(_) => (80, 150),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Moderate => "moderate",
            PriceRange::Luxury => "luxury",
            PriceRange::Other(token) => token,
        }
    }
}

impl From<String> for PriceRange {
    fn from(token: String) -> Self {
        match token.trim().to_lowercase().as_str() {
            "budget" => PriceRange::Budget,
            "moderate" => PriceRange::Moderate,
            "luxury" => PriceRange::Luxury,
            _ => PriceRange::Other(token),
        }
    }
}

impl From<&str> for PriceRange {
    fn from(token: &str) -> Self {
        PriceRange::from(token.to_string())
    }
}

impl From<PriceRange> for String {
    fn from(range: PriceRange) -> Self {
        range.as_str().to_string()
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest stay a search accepts
pub const MAX_NIGHTS: u32 = 365;

/// Check-in / check-out pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Number of nights between the two dates, never less than one
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days().max(1);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn is_valid(&self) -> bool {
        self.check_out > self.check_in
    }
}

/// Everything the user entered on the search form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    /// Destination city (e.g., "Paris")
    pub city: String,
    #[serde(flatten)]
    pub date_range: DateRange,
    /// Free-text description of the trip (e.g., "romantic getaway")
    #[serde(default)]
    pub trip_type: String,
    pub price_range: PriceRange,
    /// Free-text location hints (e.g., "near the airport")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_preferences: Option<String>,
}

impl TripPreferences {
    pub fn new(city: impl Into<String>, date_range: DateRange, price_range: PriceRange) -> Self {
        Self {
            city: city.into(),
            date_range,
            trip_type: String::new(),
            price_range,
            location_preferences: None,
        }
    }

    pub fn with_trip_type(mut self, trip_type: impl Into<String>) -> Self {
        self.trip_type = trip_type.into();
        self
    }

    pub fn with_location_preferences(mut self, prefs: impl Into<String>) -> Self {
        self.location_preferences = Some(prefs.into());
        self
    }

    pub fn nights(&self) -> u32 {
        self.date_range.nights()
    }

    /// Location preferences, empty when unset
    pub fn location_text(&self) -> &str {
        self.location_preferences.as_deref().unwrap_or_default()
    }

    /// Checks the fields a search cannot run without
    pub fn validate(&self) -> AppResult<()> {
        if self.city.trim().is_empty() {
            return Err(AppError::Validation("City is required".to_string()));
        }
        if !self.date_range.is_valid() {
            return Err(AppError::Validation(format!(
                "Check-out date {} must be after check-in date {}",
                self.date_range.check_out, self.date_range.check_in
            )));
        }
        if self.nights() > MAX_NIGHTS {
            return Err(AppError::Validation(format!(
                "Stays longer than {} nights are not supported",
                MAX_NIGHTS
            )));
        }
        Ok(())
    }
}
