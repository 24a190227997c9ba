use serde::{Deserialize, Serialize};

const METERS_PER_MILE: f64 = 1609.344;

/// Distance from the reference location (selected hotel or city center)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Distance {
    pub meters: u32,
    pub text: String,
}

impl Distance {
    /// Builds a distance from miles, rounded to one decimal place
    ///
    /// Meters are derived from the rounded value so both fields agree.
    pub fn from_miles(miles: f64) -> Self {
        let rounded = (miles * 10.0).round() / 10.0;
        Self {
            meters: (rounded * METERS_PER_MILE).round() as u32,
            text: format!("{:.1} mi", rounded),
        }
    }

    /// Distance in miles to one decimal place, matching `text`
    pub fn miles(&self) -> f64 {
        (self.meters as f64 / METERS_PER_MILE * 10.0).round() / 10.0
    }
}

/// Relevance annotation produced by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// 1-10, how well the result matches stated preferences
    pub relevance_score: u8,
    pub summary: String,
}

impl AiAnalysis {
    pub fn new(relevance_score: u8, summary: impl Into<String>) -> Self {
        Self {
            relevance_score: relevance_score.clamp(1, 10),
            summary: summary.into(),
        }
    }
}

/// A ranked hotel candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub total_reviews: u32,
    /// Nightly rate, unknown when the provider has no availability
    pub price_per_night: Option<u32>,
    /// Rate for the whole stay
    pub total_price: Option<u32>,
    pub currency: String,
    pub images: Vec<String>,
    pub description: String,
    pub amenities: Vec<String>,
    /// Street address (live) or neighborhood (mock)
    pub address: String,
    pub booking_url: String,
    pub ai_analysis: Option<AiAnalysis>,
    pub review_snippets: Vec<String>,
}

/// A ranked restaurant candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub total_reviews: u32,
    /// "$" to "$$$$"
    pub price_level: String,
    pub images: Vec<String>,
    pub description: String,
    pub address: String,
    pub distance: Distance,
    pub dietary: Vec<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub review_snippets: Vec<String>,
    pub maps_url: String,
}

/// A ranked activity candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub activity_type: String,
    pub rating: f64,
    pub total_reviews: u32,
    /// Free-form price text (e.g., "$25", "Free")
    pub price_info: String,
    pub duration: Option<String>,
    pub images: Vec<String>,
    pub description: String,
    pub address: String,
    pub distance: Distance,
    pub ai_analysis: Option<AiAnalysis>,
    pub review_snippets: Vec<String>,
    pub booking_url: String,
}

impl Activity {
    /// Ticket price parsed from the price text; "Free" or unparseable text is zero
    pub fn price_amount(&self) -> u32 {
        let digits: String = self
            .price_info
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

/// Absolute link with url-encoded query parameters, empty if the base is malformed
pub fn link_with_query(base: &str, params: &[(&str, &str)]) -> String {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .unwrap_or_default()
}

/// Google Maps search link for a venue
pub fn maps_search_url(name: &str, city: &str) -> String {
    let query = format!("{} {}", name, city);
    link_with_query(
        "https://www.google.com/maps/search/",
        &[("api", "1"), ("query", query.as_str())],
    )
}
