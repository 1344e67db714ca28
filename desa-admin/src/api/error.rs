//! Mapping of domain errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use desa_common::Error;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by handlers; body is `{"error": message}`
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Duplicate(_) | Error::InvalidTransition { .. } => StatusCode::CONFLICT,
            Error::Validation(_) | Error::HeadNotFound { .. } => StatusCode::BAD_REQUEST,
            Error::SimulatedFailure => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::NotFound("Warga w1".into()), StatusCode::NOT_FOUND),
            (Error::Duplicate("KK-1".into()), StatusCode::CONFLICT),
            (Error::Validation("nik".into()), StatusCode::BAD_REQUEST),
            (
                Error::HeadNotFound { nik: "111".into() },
                StatusCode::BAD_REQUEST,
            ),
            (Error::SimulatedFailure, StatusCode::SERVICE_UNAVAILABLE),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
