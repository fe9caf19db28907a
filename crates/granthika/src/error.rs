//! Error types for the Granthika application.

use thiserror::Error;

/// Failure of one API call.
///
/// No retry and no caching happen at this layer: every error propagates to
/// the triggering user action, which logs it and shows an error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never produced a response (DNS, refused, aborted).
    #[error("request failed: {0}")]
    Transport(String),
    /// A success response whose body did not decode as the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Capability signal for the legacy save fallback: the endpoint itself
    /// is missing, not the request that was sent to it.
    pub fn is_unsupported_endpoint(&self) -> bool {
        matches!(self, ApiError::Status { status: 404 | 405, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_endpoints_trigger_the_fallback() {
        let not_found = ApiError::Status {
            status: 404,
            message: "Not Found".into(),
        };
        let bad_method = ApiError::Status {
            status: 405,
            message: "Method Not Allowed".into(),
        };
        let server_error = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };

        assert!(not_found.is_unsupported_endpoint());
        assert!(bad_method.is_unsupported_endpoint());
        assert!(!server_error.is_unsupported_endpoint());
        assert!(!ApiError::Transport("offline".into()).is_unsupported_endpoint());
        assert!(!ApiError::Decode("bad json".into()).is_unsupported_endpoint());
    }
}
