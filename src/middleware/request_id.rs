use reqwest::RequestBuilder;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outgoing search API call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    /// Adds the `x-request-id` header to an outgoing request
    pub fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(REQUEST_ID_HEADER, self.as_str())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates a tracing span for one outgoing call, tagged with its request ID
pub fn make_span_with_request_id(method: &str, path: &str, request_id: &RequestId) -> tracing::Span {
    tracing::info_span!(
        "search_api_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    )
}
