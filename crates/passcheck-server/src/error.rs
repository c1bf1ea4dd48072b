use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use passcheck_ai::PredictError;
use passcheck_core::CoerceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Every way a `/predict` request can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body absent, unparseable, or JSON `null`.
    #[error("Invalid or missing JSON")]
    InvalidJson,

    #[error("Missing 'study_hours' or 'previous_score'")]
    MissingFields,

    /// A field was present but could not be read as a finite number.
    /// Reported as a server error.
    #[error(transparent)]
    Coercion(#[from] CoerceError),

    #[error("{0}")]
    Internal(String),
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Coercion(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body returned for every failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        if status.is_server_error() {
            warn!(%status, %error, "predict failed");
        } else {
            debug!(%status, %error, "predict rejected");
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}
