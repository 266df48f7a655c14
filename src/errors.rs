use axum::http::StatusCode;
use thiserror::Error;

/// Local failure while serving a page, rendered as a plain-text response.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Outcome of an upstream round trip that did not succeed.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("upstream rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("upstream returned {status} without a usable body")]
    Unexpected { status: u16 },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("base url cannot carry path segments: {0}")]
    InvalidUrl(String),
}

pub const NETWORK_ERROR: &str = "Network error";
pub const GENERIC_ERROR: &str = "An error occurred";
pub const LOGIN_FAILED: &str = "Login failed";

impl ApiError {
    /// Text shown to the user; `fallback` covers error responses without a `detail`.
    pub fn notice_text(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::Unexpected { .. } => fallback.to_string(),
            ApiError::Network(_) | ApiError::InvalidUrl(_) => NETWORK_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_shows_detail_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            detail: "Student already signed up".to_string(),
        };
        assert_eq!(err.notice_text(GENERIC_ERROR), "Student already signed up");
    }

    #[test]
    fn unexpected_uses_fallback() {
        let err = ApiError::Unexpected { status: 502 };
        assert_eq!(err.notice_text(GENERIC_ERROR), "An error occurred");
        assert_eq!(err.notice_text(LOGIN_FAILED), "Login failed");
    }

    #[test]
    fn bad_base_url_reads_as_network_error() {
        let err = ApiError::InvalidUrl("mailto:x".to_string());
        assert_eq!(err.notice_text(GENERIC_ERROR), NETWORK_ERROR);
    }
}
