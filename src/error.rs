//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the central error type for the HTTP surface. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! [`DeliveryError`] covers outbound sends to a single connection.
//!
//! A refused station bind is *not* an error: it is reported through
//! [`crate::domain::BindDecision::Rejected`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "unknown station: green-4",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Routing    | 404 Not Found             |
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Token is not one of the fixed station identities.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Alliance/slot pair does not name a scouting seat.
    #[error("invalid station seat: {alliance}/{slot}")]
    InvalidSeat {
        /// Alliance path segment as received.
        alliance: String,
        /// Slot path segment as received.
        slot: String,
    },

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Inbound WebSocket frame could not be decoded.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Alliance is neither `red` nor `blue`.
    #[error("unknown alliance: {0}")]
    UnknownAlliance(String),
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::UnknownStation(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::MalformedMessage(_) => 1003,
            Self::UnknownAlliance(_) => 1004,
            Self::InvalidSeat { .. } => 2001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownStation(_)
            | Self::UnknownAlliance(_)
            | Self::InvalidRequest(_)
            | Self::MalformedMessage(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSeat { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Failure to hand a frame to a connection's outbound queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The connection task has exited; its binding is stale.
    #[error("connection closed")]
    Closed,

    /// The connection's outbound queue is full.
    #[error("outbound queue full")]
    Full,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn codes_fall_in_documented_ranges() {
        assert_eq!(RelayError::UnknownStation("x".into()).error_code(), 1001);
        assert_eq!(
            RelayError::InvalidSeat {
                alliance: "green".into(),
                slot: "1".into(),
            }
            .error_code(),
            2001
        );
        assert_eq!(RelayError::UnknownAlliance("green".into()).error_code(), 1004);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            RelayError::UnknownStation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::InvalidSeat {
                alliance: "red".into(),
                slot: "4".into(),
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RelayError::UnknownAlliance("green".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn into_response_sets_status() {
        let response = RelayError::UnknownStation("green-4".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn display_includes_token() {
        let err = RelayError::UnknownStation("green-4".into());
        assert_eq!(err.to_string(), "unknown station: green-4");
    }
}
