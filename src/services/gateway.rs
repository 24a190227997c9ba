use reqwest::{Client as HttpClient, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::Instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, RequestId},
    models::{
        Activity, ActivitySearchRequest, ApiActivity, ApiEnvelope, ApiHotel, ApiRestaurant,
        ApiSearchData, Hotel, HotelSearchRequest, Restaurant, RestaurantSearchRequest,
    },
};

const HOTELS_PATH: &str = "/hotels/search";
const RESTAURANTS_PATH: &str = "/restaurants/search";
const ACTIVITIES_PATH: &str = "/activities/search";
const HEALTH_PATH: &str = "/health";

const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
const UNKNOWN_ERROR_MESSAGE: &str = "An error occurred";

/// Client for the remote search API
///
/// One JSON POST per search, no caching and no automatic retry. Transport
/// failures and unparseable bodies become `AppError::Network`; `success: false`
/// or a non-2xx status becomes `AppError::Server` with the server's code and
/// message verbatim.
#[derive(Clone)]
pub struct SearchGateway {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl SearchGateway {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.bearer_token().map(str::to_string),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn search_hotels(&self, request: &HotelSearchRequest) -> AppResult<Vec<Hotel>> {
        let data: ApiSearchData<ApiHotel> = self.post(HOTELS_PATH, request).await?;

        tracing::info!(
            city = %request.city,
            excluded = request.excluded_hotels.len(),
            results = data.results.len(),
            total_results = data.total_results,
            "Hotel search completed"
        );

        Ok(data.results.into_iter().map(Hotel::from).collect())
    }

    pub async fn search_restaurants(
        &self,
        request: &RestaurantSearchRequest,
    ) -> AppResult<Vec<Restaurant>> {
        let data: ApiSearchData<ApiRestaurant> = self.post(RESTAURANTS_PATH, request).await?;

        tracing::info!(
            address = %request.address,
            results = data.results.len(),
            total_results = data.total_results,
            "Restaurant search completed"
        );

        Ok(data.results.into_iter().map(Restaurant::from).collect())
    }

    pub async fn search_activities(
        &self,
        request: &ActivitySearchRequest,
    ) -> AppResult<Vec<Activity>> {
        let data: ApiSearchData<ApiActivity> = self.post(ACTIVITIES_PATH, request).await?;

        tracing::info!(
            address = %request.address,
            prompt = %request.search_prompt,
            results = data.results.len(),
            total_results = data.total_results,
            "Activity search completed"
        );

        Ok(data.results.into_iter().map(Activity::from).collect())
    }

    /// Checks that the search API is up and answering with a success envelope
    pub async fn health_check(&self) -> AppResult<()> {
        let request_id = RequestId::new();
        let span = make_span_with_request_id("GET", HEALTH_PATH, &request_id);

        async move {
            let url = format!("{}{}", self.api_url, HEALTH_PATH);
            let response = request_id.attach(self.http_client.get(&url)).send().await?;
            let status = response.status();
            let body = response.text().await?;
            let _: serde_json::Value = parse_envelope(status, &body)?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = RequestId::new();
        let span = make_span_with_request_id("POST", path, &request_id);

        async move {
            let url = format!("{}{}", self.api_url, path);
            let mut request = request_id.attach(self.http_client.post(&url)).json(body);
            if let Some(token) = &self.api_key {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(|e| {
                tracing::warn!(error = %e, url = %url, "Search API unreachable");
                AppError::from(e)
            })?;

            let status = response.status();
            let text = response.text().await?;
            tracing::debug!(status = %status, body = %text, "Raw search API response");

            parse_envelope(status, &text)
        }
        .instrument(span)
        .await
    }
}

/// Classifies a raw response body into data or an `AppError`
pub fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> AppResult<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            status = %status,
            "Failed to parse search API response"
        );
        AppError::Network(format!("Failed to parse search API response: {}", e))
    })?;

    if !envelope.success || !status.is_success() {
        let error = envelope.error.unwrap_or_default();
        let code = error.code.unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string());
        let message = error
            .message
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

        tracing::warn!(
            status = %status,
            code = %code,
            message = %message,
            "Search API returned an error"
        );
        return Err(AppError::Server { code, message });
    }

    envelope
        .data
        .ok_or_else(|| AppError::Network("Search API response missing data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_success() {
        let body = r#"{"success": true, "data": {"query": "hotels in Paris", "results": [{"name": "A"}], "totalResults": 1}, "error": null}"#;
        let data: ApiSearchData<ApiHotel> = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(data.results.len(), 1);
        assert_eq!(data.total_results, 1);
    }

    #[test]
    fn test_parse_envelope_server_error_verbatim() {
        let body = r#"{"success": false, "data": null, "error": {"code": "INVALID_DATE_RANGE", "message": "Check-out must be after check-in"}}"#;
        let err = parse_envelope::<ApiSearchData<ApiHotel>>(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            AppError::Server { code, message } => {
                assert_eq!(code, "INVALID_DATE_RANGE");
                assert_eq!(message, "Check-out must be after check-in");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_envelope_failure_without_error_object() {
        let body = r#"{"success": false}"#;
        let err = parse_envelope::<ApiSearchData<ApiHotel>>(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.code(), UNKNOWN_ERROR_CODE);
        assert_eq!(err.user_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_parse_envelope_non_json_is_network_error() {
        let err = parse_envelope::<ApiSearchData<ApiHotel>>(
            StatusCode::BAD_GATEWAY,
            "<html>502 Bad Gateway</html>",
        )
        .unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_parse_envelope_success_without_data_is_network_error() {
        let err = parse_envelope::<ApiSearchData<ApiHotel>>(StatusCode::OK, r#"{"success": true}"#)
            .unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_new_trims_trailing_slash_and_blank_key() {
        let config = Config {
            api_base_url: "http://api.local/".to_string(),
            api_key: Some(String::new()),
            ..Config::default()
        };
        let gateway = SearchGateway::new(&config).unwrap();
        assert_eq!(gateway.api_url(), "http://api.local");
        assert!(gateway.api_key.is_none());
    }
}
