use thiserror::Error;

/// Failures of a single REST API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 401.
    #[error("Authentication required")]
    Unauthorized,

    /// Any other non-success status, with the response body as text.
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A success response whose body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential expired before the call was made; nothing was sent.
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for errors that mean the caller must log in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::SessionExpired)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
