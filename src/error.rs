/// Message shown when the search API cannot be reached or answers with garbage
pub const NETWORK_ERROR_MESSAGE: &str =
    "Failed to connect to the server. Please check your connection and try again.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Transport failure, timeout, or a response body that could not be parsed
    #[error("Network error: {0}")]
    Network(String),

    /// Explicit `success: false` response from the search API
    #[error("Server error [{code}]: {message}")]
    Server { code: String, message: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl AppError {
    /// Machine-readable error code
    ///
    /// Server errors carry the code the search API returned.
    pub fn code(&self) -> &str {
        match self {
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Server { code, .. } => code,
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// Human-readable message suitable for showing on the initiating screen
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AppError::Server { message, .. } => message.clone(),
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::InvalidState(msg) => {
                msg.clone()
            }
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
