use reconcile::ReconcileError;
use thiserror::Error;

use super::common::ApiErrorDetails;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Admin API returned error (HTTP {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        #[source]
        details: Option<Box<ApiErrorDetails>>,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Service unavailable, retry later")]
    ServiceUnavailable,
}

/// Collapse admin API failures into the reconciliation taxonomy.
///
/// The admin API reports duplicate registrations as 400s with an
/// "already exists" message rather than a 409, so the message is inspected
/// before treating a 400 as a plain validation failure.
impl From<ApiError> for ReconcileError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ApiError { status: 404, message, .. } => ReconcileError::NotFound(message),
            ApiError::ApiError { status: 409, message, .. } => ReconcileError::Conflict(message),
            ApiError::ApiError { status: 400, message, .. } => {
                if message.contains("already exist") {
                    ReconcileError::Conflict(message)
                } else {
                    ReconcileError::Validation(message)
                }
            }
            ApiError::InvalidConfig(message) => ReconcileError::Validation(message),
            other => ReconcileError::transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, message: &str) -> ApiError {
        ApiError::ApiError {
            status,
            message: message.to_string(),
            details: None,
        }
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err: ReconcileError = api_error(404, "HTTP 404: no such client").into();
        assert!(matches!(err, ReconcileError::NotFound(_)));
    }

    #[test]
    fn conflict_maps_to_conflict() {
        let err: ReconcileError = api_error(409, "duplicate").into();
        assert!(matches!(err, ReconcileError::Conflict(_)));
    }

    #[test]
    fn duplicate_message_on_400_maps_to_conflict() {
        let err: ReconcileError =
            api_error(400, "Client ID 'app1' already exists on this module").into();
        assert!(matches!(err, ReconcileError::Conflict(_)));
    }

    #[test]
    fn plain_400_maps_to_validation() {
        let err: ReconcileError = api_error(400, "accessTokenValiditySeconds must be positive").into();
        assert!(matches!(err, ReconcileError::Validation(_)));
    }

    #[test]
    fn everything_else_is_transport() {
        let err: ReconcileError = ApiError::ServiceUnavailable.into();
        assert!(matches!(err, ReconcileError::Transport(_)));

        let err: ReconcileError = ApiError::AuthError.into();
        assert!(matches!(err, ReconcileError::Transport(_)));
    }
}
